//! String boundary between the calculator form and [`LoanInputs`].
//!
//! Form fields arrive as raw text. Everything is parsed and sanitized here so
//! that `compute` only ever sees non-negative decimals.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::inputs::{LoanInputs, TermUnit};

/// Raw calculator form state, field names as the front end sends them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoanForm {
    pub loan_amount: String,
    pub interest_rate: String,
    pub loan_term: String,
    pub term_unit: TermUnit,
    pub interest_only_enabled: bool,
    pub interest_only_period: String,
    pub interest_only_unit: TermUnit,
}

impl LoanForm {
    /// Parse every field. Never fails: bad text becomes zero.
    pub fn to_inputs(&self) -> LoanInputs {
        LoanInputs {
            principal: parse_amount(&self.loan_amount),
            annual_rate_percent: parse_number(&self.interest_rate),
            term_value: parse_number(&self.loan_term),
            term_unit: self.term_unit,
            interest_only: self.interest_only_enabled,
            interest_only_period_value: parse_number(&self.interest_only_period),
            interest_only_period_unit: self.interest_only_unit,
        }
        .sanitized()
    }
}

/// Parse a currency amount, tolerating `,` thousands separators.
pub fn parse_amount(raw: &str) -> Decimal {
    parse_number(&raw.replace(',', ""))
}

/// Parse a plain number. Empty, unparsable or negative text yields zero.
pub fn parse_number(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    let parsed = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed));
    match parsed {
        Ok(value) if !value.is_sign_negative() => value,
        Ok(_) => Decimal::ZERO,
        Err(e) => {
            log::debug!("unparsable numeric field {trimmed:?}: {e}");
            Decimal::ZERO
        }
    }
}
