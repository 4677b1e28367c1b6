use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value;
use crate::types::{Money, Months, Rate};
use crate::LoanCalcResult;

pub use crate::types::TermUnit;

/// Numeric loan terms for a single calculation.
///
/// Built fresh from the form on every recalculation; nothing here is cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanInputs {
    /// Loan amount in currency units.
    pub principal: Money,
    /// Nominal annual rate as a percentage (7.5 = 7.5%).
    pub annual_rate_percent: Decimal,
    /// Term magnitude, in `term_unit`.
    pub term_value: Decimal,
    #[serde(default)]
    pub term_unit: TermUnit,
    /// Whether an initial interest-only period applies.
    #[serde(default)]
    pub interest_only: bool,
    /// Interest-only period magnitude; ignored unless `interest_only`.
    #[serde(default)]
    pub interest_only_period_value: Decimal,
    #[serde(default)]
    pub interest_only_period_unit: TermUnit,
}

impl LoanInputs {
    /// Standard amortizing loan with no interest-only period.
    pub fn new(principal: Money, annual_rate_percent: Decimal, term_value: Decimal, term_unit: TermUnit) -> Self {
        LoanInputs {
            principal,
            annual_rate_percent,
            term_value,
            term_unit,
            interest_only: false,
            interest_only_period_value: Decimal::ZERO,
            interest_only_period_unit: TermUnit::Years,
        }
    }

    /// Enable an interest-only period of `value` `unit`s.
    pub fn with_interest_only(mut self, value: Decimal, unit: TermUnit) -> Self {
        self.interest_only = true;
        self.interest_only_period_value = value;
        self.interest_only_period_unit = unit;
        self
    }

    /// Coerce every negative numeric field to zero. Idempotent.
    pub fn sanitized(self) -> Self {
        LoanInputs {
            principal: non_negative(self.principal),
            annual_rate_percent: non_negative(self.annual_rate_percent),
            term_value: non_negative(self.term_value),
            interest_only_period_value: non_negative(self.interest_only_period_value),
            ..self
        }
    }

    pub fn total_months(&self) -> LoanCalcResult<Months> {
        time_value::to_months(self.term_value, self.term_unit)
    }

    /// Interest-only months, zero when the period is disabled.
    pub fn interest_only_months(&self) -> LoanCalcResult<Months> {
        if !self.interest_only {
            return Ok(Decimal::ZERO);
        }
        time_value::to_months(self.interest_only_period_value, self.interest_only_period_unit)
    }

    pub fn monthly_rate(&self) -> Rate {
        time_value::monthly_rate(self.annual_rate_percent)
    }
}

fn non_negative(value: Decimal) -> Decimal {
    if value.is_sign_negative() {
        Decimal::ZERO
    } else {
        value
    }
}
