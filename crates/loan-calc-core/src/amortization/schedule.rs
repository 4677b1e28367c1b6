//! Month-by-month amortization schedule.
//!
//! Payment amounts come from the same calculation as [`super::compute`], so
//! the schedule and the summary always agree. Unlike `compute`, this API is
//! strict: degenerate loans are reported as errors.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::calculator::try_compute;
use super::inputs::LoanInputs;
use crate::error::LoanCalcError;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::LoanCalcResult;

/// Longest schedule we will materialise (100 years of monthly rows).
const MAX_SCHEDULE_MONTHS: u32 = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulePhase {
    InterestOnly,
    Amortizing,
}

/// One monthly payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub phase: SchedulePhase,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub rows: Vec<ScheduleRow>,
    pub total_payment: Money,
    pub total_interest: Money,
    pub total_principal: Money,
}

/// Build the full monthly schedule for a loan.
pub fn build_schedule(inputs: &LoanInputs) -> LoanCalcResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let inputs = inputs.clone().sanitized();

    let summary = try_compute(&inputs)?;
    let total_months = inputs.total_months()?;
    let io_months = inputs.interest_only_months()?;

    if inputs.interest_only && io_months >= total_months {
        return Err(LoanCalcError::Degenerate(
            "interest-only period covers the full term; nothing amortizes".into(),
        ));
    }

    let total_rows = whole_months(total_months, "term")?;
    if total_rows > MAX_SCHEDULE_MONTHS {
        return Err(LoanCalcError::InvalidInput {
            field: "term_value".into(),
            reason: format!("Schedules are limited to {MAX_SCHEDULE_MONTHS} months, got {total_rows}"),
        });
    }
    let io_rows = whole_months(io_months, "interest-only period")?;

    if total_months.fract() != Decimal::ZERO {
        warnings.push(format!(
            "Fractional term of {total_months} months scheduled as {total_rows} monthly payments"
        ));
    }
    if io_months.fract() != Decimal::ZERO {
        warnings.push(format!(
            "Fractional interest-only period of {io_months} months scheduled as {io_rows} interest-only payments"
        ));
    }

    let monthly_rate = inputs.monthly_rate();
    let mut rows = Vec::with_capacity(total_rows as usize);
    let mut balance = inputs.principal;
    let mut total_payment = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;

    for month in 1..=total_rows {
        let opening = balance;
        let interest = opening * monthly_rate;
        let is_last = month == total_rows;

        let (phase, principal) = if is_last {
            // Final payment clears whatever rounding residue is left
            (SchedulePhase::Amortizing, opening)
        } else if month <= io_rows {
            (SchedulePhase::InterestOnly, Decimal::ZERO)
        } else {
            let scheduled = summary.principal_and_interest_payment - interest;
            (SchedulePhase::Amortizing, scheduled.min(opening))
        };

        let payment = interest + principal;
        balance = opening - principal;

        total_payment += payment;
        total_interest += interest;
        total_principal += principal;

        rows.push(ScheduleRow {
            month,
            phase,
            opening_balance: opening,
            payment,
            interest,
            principal,
            closing_balance: balance,
        });
    }

    let output = AmortizationSchedule {
        rows,
        total_payment,
        total_interest,
        total_principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly amortization schedule",
        &serde_json::json!({
            "principal": inputs.principal.to_string(),
            "annual_rate_percent": inputs.annual_rate_percent.to_string(),
            "total_months": total_months.to_string(),
            "interest_only_months": io_months.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn whole_months(months: Decimal, field: &str) -> LoanCalcResult<u32> {
    months.ceil().to_u32().ok_or_else(|| LoanCalcError::InvalidInput {
        field: field.into(),
        reason: format!("{months} months cannot be scheduled"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::compute;
    use crate::types::TermUnit;
    use rust_decimal_macros::dec;

    #[test]
    fn test_schedule_matches_summary() {
        let inputs = LoanInputs::new(dec!(100000), dec!(6), dec!(30), TermUnit::Years);
        let summary = compute(&inputs);
        let sched = build_schedule(&inputs).unwrap().result;

        assert_eq!(sched.rows.len(), 360);
        assert_eq!(sched.rows[0].payment, summary.monthly_payment);
        assert_eq!(sched.rows.last().unwrap().closing_balance, Decimal::ZERO);
        assert!((sched.total_principal - dec!(100000)).abs() < dec!(0.000001));
        assert!((sched.total_payment - summary.total_payment).abs() < dec!(0.01));
    }

    #[test]
    fn test_interest_only_rows() {
        let inputs = LoanInputs::new(dec!(120000), dec!(6), dec!(10), TermUnit::Years)
            .with_interest_only(dec!(12), TermUnit::Months);
        let sched = build_schedule(&inputs).unwrap().result;

        for row in &sched.rows[..12] {
            assert_eq!(row.phase, SchedulePhase::InterestOnly);
            assert_eq!(row.principal, Decimal::ZERO);
            assert_eq!(row.payment, dec!(600));
            assert_eq!(row.closing_balance, dec!(120000));
        }
        assert_eq!(sched.rows[12].phase, SchedulePhase::Amortizing);
        assert!(sched.rows[12].principal > Decimal::ZERO);
    }

    #[test]
    fn test_fractional_term_rounds_up() {
        let inputs = LoanInputs::new(dec!(1000), dec!(12), dec!(2.5), TermUnit::Months);
        let out = build_schedule(&inputs).unwrap();
        assert_eq!(out.result.rows.len(), 3);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.result.rows[2].closing_balance, Decimal::ZERO);
    }

    #[test]
    fn test_fractional_io_period_warns() {
        let inputs = LoanInputs::new(dec!(12000), dec!(12), dec!(12), TermUnit::Months)
            .with_interest_only(dec!(2.5), TermUnit::Months);
        let out = build_schedule(&inputs).unwrap();
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("interest-only"));
        let io_rows = out
            .result
            .rows
            .iter()
            .filter(|row| row.phase == SchedulePhase::InterestOnly)
            .count();
        assert_eq!(io_rows, 3);
        assert_eq!(out.result.rows[11].closing_balance, Decimal::ZERO);
    }

    #[test]
    fn test_degenerate_loan_is_an_error() {
        let inputs = LoanInputs::new(Decimal::ZERO, dec!(6), dec!(30), TermUnit::Years);
        assert!(matches!(build_schedule(&inputs), Err(LoanCalcError::Degenerate(_))));
    }

    #[test]
    fn test_io_covering_term_is_an_error() {
        let inputs = LoanInputs::new(dec!(1000), dec!(6), dec!(1), TermUnit::Years)
            .with_interest_only(dec!(12), TermUnit::Months);
        assert!(build_schedule(&inputs).is_err());
    }

    #[test]
    fn test_schedule_length_limit() {
        let inputs = LoanInputs::new(dec!(1000), Decimal::ZERO, dec!(101), TermUnit::Years);
        assert!(matches!(
            build_schedule(&inputs),
            Err(LoanCalcError::InvalidInput { .. })
        ));
    }
}
