//! Fixed-rate amortization with an optional interest-only period.
//!
//! The calculator never fails. Zero, negative and unrepresentable inputs all
//! collapse to [`AmortizationResult::zero`], so a consuming UI can re-run it
//! on every keystroke without error handling.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::inputs::LoanInputs;
use crate::error::LoanCalcError;
use crate::time_value::{self, checked};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LoanCalcResult;

/// Payment summary for one set of loan inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// Level monthly payment. With an interest-only period this mirrors
    /// `principal_and_interest_payment`.
    pub monthly_payment: Money,
    pub total_payment: Money,
    /// `total_payment - principal`.
    pub total_interest: Money,
    pub interest_only_payment: Money,
    /// Level payment once the interest-only period ends.
    pub principal_and_interest_payment: Money,
    pub interest_only_total: Money,
}

impl AmortizationResult {
    /// The all-zero result returned for degenerate inputs.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_degenerate(&self) -> bool {
        *self == Self::zero()
    }
}

/// Compute the payment summary. Degenerate inputs produce the all-zero result.
pub fn compute(inputs: &LoanInputs) -> AmortizationResult {
    let inputs = inputs.clone().sanitized();
    match try_compute(&inputs) {
        Ok(result) => result,
        Err(e) => {
            log::debug!("loan calculation degenerated to zero: {e}");
            AmortizationResult::zero()
        }
    }
}

/// Envelope form of [`compute`] for the CLI and bindings.
pub fn calculate_loan(inputs: &LoanInputs) -> ComputationOutput<AmortizationResult> {
    let start = Instant::now();
    let sanitized = inputs.clone().sanitized();
    let mut warnings: Vec<String> = Vec::new();

    let result = match try_compute(&sanitized) {
        Ok(result) => result,
        Err(e) => {
            warnings.push(format!("{e}; all payment figures reported as zero"));
            AmortizationResult::zero()
        }
    };

    if sanitized.interest_only && result.principal_and_interest_payment.is_zero() && !result.is_degenerate() {
        warnings.push("Interest-only period covers the full term; no amortizing payments".into());
    }

    let methodology = if sanitized.interest_only {
        "Fixed-rate annuity with interest-only period"
    } else {
        "Fixed-rate annuity"
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        methodology,
        &serde_json::json!({
            "principal": sanitized.principal.to_string(),
            "annual_rate_percent": sanitized.annual_rate_percent.to_string(),
            "term": format!("{} {}", sanitized.term_value, sanitized.term_unit),
            "interest_only": sanitized.interest_only,
            "interest_only_period": format!(
                "{} {}",
                sanitized.interest_only_period_value, sanitized.interest_only_period_unit
            ),
            "compounding": "monthly",
        }),
        warnings,
        elapsed,
        result,
    )
}

/// Result-typed core. `inputs` must already be sanitized.
pub(crate) fn try_compute(inputs: &LoanInputs) -> LoanCalcResult<AmortizationResult> {
    if inputs.principal <= Decimal::ZERO {
        return Err(LoanCalcError::Degenerate("principal must be positive".into()));
    }
    if inputs.annual_rate_percent < Decimal::ZERO {
        return Err(LoanCalcError::Degenerate("interest rate is negative".into()));
    }
    if inputs.term_value <= Decimal::ZERO {
        return Err(LoanCalcError::Degenerate("term must be positive".into()));
    }

    let total_months = inputs.total_months()?;
    let monthly_rate = inputs.monthly_rate();

    if inputs.interest_only {
        interest_only(inputs, total_months, monthly_rate)
    } else {
        standard(inputs, total_months, monthly_rate)
    }
}

fn standard(inputs: &LoanInputs, total_months: Decimal, monthly_rate: Decimal) -> LoanCalcResult<AmortizationResult> {
    log::trace!("standard amortization over {total_months} months at {monthly_rate} per month");

    let payment = time_value::annuity_payment(inputs.principal, monthly_rate, total_months)?;
    let total_payment = checked(payment.checked_mul(total_months), "total payment")?;
    let total_interest = checked(total_payment.checked_sub(inputs.principal), "total interest")?;

    Ok(AmortizationResult {
        monthly_payment: payment,
        total_payment,
        total_interest,
        ..AmortizationResult::zero()
    })
}

fn interest_only(
    inputs: &LoanInputs,
    total_months: Decimal,
    monthly_rate: Decimal,
) -> LoanCalcResult<AmortizationResult> {
    let io_months = inputs.interest_only_months()?;
    let remaining_months = checked(total_months.checked_sub(io_months), "remaining months")?;
    log::trace!("interest-only for {io_months} months, amortizing {remaining_months} months");

    let interest_only_payment = checked(inputs.principal.checked_mul(monthly_rate), "interest-only payment")?;

    // With no rate there is nothing to amortize over zero or negative months
    if monthly_rate.is_zero() && remaining_months <= Decimal::ZERO {
        return Err(LoanCalcError::DivisionByZero {
            context: "straight-line payment after interest-only period".into(),
        });
    }

    // Otherwise an IO period swallowing the whole term is a defined outcome
    let principal_and_interest_payment = if remaining_months <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        time_value::annuity_payment(inputs.principal, monthly_rate, remaining_months)?
    };

    let interest_only_total = checked(interest_only_payment.checked_mul(io_months), "interest-only total")?;
    let principal_and_interest_total = if remaining_months <= Decimal::ZERO {
        Decimal::ZERO
    } else {
        checked(
            principal_and_interest_payment.checked_mul(remaining_months),
            "amortizing total",
        )?
    };
    let total_payment = checked(
        interest_only_total.checked_add(principal_and_interest_total),
        "total payment",
    )?;
    let total_interest = checked(total_payment.checked_sub(inputs.principal), "total interest")?;

    Ok(AmortizationResult {
        monthly_payment: principal_and_interest_payment,
        total_payment,
        total_interest,
        interest_only_payment,
        principal_and_interest_payment,
        interest_only_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TermUnit;
    use rust_decimal_macros::dec;

    fn thirty_year(principal: Decimal, rate: Decimal) -> LoanInputs {
        LoanInputs::new(principal, rate, dec!(30), TermUnit::Years)
    }

    #[test]
    fn test_standard_payment() {
        let r = compute(&thirty_year(dec!(100000), dec!(6)));
        assert!((r.monthly_payment - dec!(599.55)).abs() < dec!(0.01));
        assert_eq!(r.total_payment, r.monthly_payment * dec!(360));
        assert_eq!(r.total_interest, r.total_payment - dec!(100000));
        assert_eq!(r.interest_only_payment, Decimal::ZERO);
        assert_eq!(r.principal_and_interest_payment, Decimal::ZERO);
        assert_eq!(r.interest_only_total, Decimal::ZERO);
    }

    #[test]
    fn test_zero_principal_is_degenerate() {
        assert!(compute(&thirty_year(Decimal::ZERO, dec!(6))).is_degenerate());
    }

    #[test]
    fn test_negative_principal_is_degenerate() {
        assert!(compute(&thirty_year(dec!(-5000), dec!(6))).is_degenerate());
    }

    #[test]
    fn test_zero_term_is_degenerate() {
        let inputs = LoanInputs::new(dec!(100000), dec!(6), Decimal::ZERO, TermUnit::Months);
        assert!(compute(&inputs).is_degenerate());
    }

    #[test]
    fn test_interest_only_aliases_monthly_payment() {
        let inputs = thirty_year(dec!(200000), dec!(5)).with_interest_only(dec!(5), TermUnit::Years);
        let r = compute(&inputs);
        assert_eq!(r.monthly_payment, r.principal_and_interest_payment);
        assert!(r.principal_and_interest_payment > r.interest_only_payment);
    }

    #[test]
    fn test_interest_only_full_term() {
        let inputs = LoanInputs::new(dec!(100000), dec!(6), dec!(5), TermUnit::Years)
            .with_interest_only(dec!(7), TermUnit::Years);
        let r = compute(&inputs);
        assert_eq!(r.principal_and_interest_payment, Decimal::ZERO);
        assert_eq!(r.interest_only_payment, dec!(500));
        // Interest-only total spans the whole IO period, even past the term
        assert_eq!(r.interest_only_total, dec!(42000));
        assert_eq!(r.total_payment, r.interest_only_total);
    }

    #[test]
    fn test_overflow_is_degenerate() {
        let inputs = LoanInputs::new(Decimal::MAX, dec!(50), dec!(30), TermUnit::Years);
        assert!(compute(&inputs).is_degenerate());
    }

    #[test]
    fn test_long_high_rate_term_is_not_degenerate() {
        let inputs = LoanInputs::new(dec!(100000), dec!(24), dec!(300), TermUnit::Years);
        let r = compute(&inputs);
        assert!((r.monthly_payment - dec!(2000)).abs() < dec!(0.01));
        assert_eq!(r.total_payment, r.monthly_payment * dec!(3600));
    }

    #[test]
    fn test_zero_rate_io_covering_term_is_degenerate() {
        let inputs = LoanInputs::new(dec!(100000), Decimal::ZERO, dec!(5), TermUnit::Years)
            .with_interest_only(dec!(5), TermUnit::Years);
        assert!(compute(&inputs).is_degenerate());
        assert_eq!(calculate_loan(&inputs).warnings.len(), 1);
    }

    #[test]
    fn test_calculate_loan_warns_on_degenerate() {
        let out = calculate_loan(&thirty_year(Decimal::ZERO, dec!(6)));
        assert!(out.result.is_degenerate());
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.methodology, "Fixed-rate annuity");
    }

    #[test]
    fn test_calculate_loan_warns_on_io_covering_term() {
        let inputs = LoanInputs::new(dec!(100000), dec!(6), dec!(60), TermUnit::Months)
            .with_interest_only(dec!(5), TermUnit::Years);
        let out = calculate_loan(&inputs);
        assert!(!out.result.is_degenerate());
        assert_eq!(out.warnings.len(), 1);
    }
}
