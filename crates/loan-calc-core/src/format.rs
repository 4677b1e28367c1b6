//! Currency presentation for calculator output.
//!
//! Formatting sits outside the calculation contract; callers pick a
//! [`CurrencyFormatter`] and apply it to whatever figures they display.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::{Currency, Money};

#[cfg(feature = "amortization")]
use crate::amortization::AmortizationResult;

pub trait CurrencyFormatter {
    fn format(&self, amount: Money) -> String;
}

/// Symbol, grouping and decimal separators with two fraction digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolFormatter {
    pub symbol: String,
    pub grouping: char,
    pub decimal: char,
}

impl SymbolFormatter {
    pub fn new(symbol: &str, grouping: char, decimal: char) -> Self {
        SymbolFormatter {
            symbol: symbol.to_string(),
            grouping,
            decimal,
        }
    }
}

impl CurrencyFormatter for SymbolFormatter {
    fn format(&self, amount: Money) -> String {
        // Half away from zero, matching browser currency formatting
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();

        let digits = format!("{:.2}", rounded.abs());
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(self.grouping);
            }
            grouped.push(ch);
        }

        let sign = if negative { "-" } else { "" };
        format!("{sign}{}{grouped}{}{fraction}", self.symbol, self.decimal)
    }
}

/// US dollars: `$1,234.50`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsdFormatter;

impl CurrencyFormatter for UsdFormatter {
    fn format(&self, amount: Money) -> String {
        SymbolFormatter::new("$", ',', '.').format(amount)
    }
}

/// Pick a formatter for `currency`. Unknown codes fall back to the code as prefix.
pub fn formatter_for(currency: &Currency) -> Box<dyn CurrencyFormatter> {
    match currency {
        Currency::USD => Box::new(UsdFormatter),
        Currency::CAD => Box::new(SymbolFormatter::new("CA$", ',', '.')),
        Currency::AUD => Box::new(SymbolFormatter::new("A$", ',', '.')),
        Currency::GBP => Box::new(SymbolFormatter::new("£", ',', '.')),
        Currency::EUR => Box::new(SymbolFormatter::new("€", '.', ',')),
        Currency::CHF => Box::new(SymbolFormatter::new("CHF ", '\'', '.')),
        Currency::JPY => Box::new(SymbolFormatter::new("¥", ',', '.')),
        Currency::Other(code) => Box::new(SymbolFormatter::new(&format!("{code} "), ',', '.')),
    }
}

/// The six summary figures, formatted, in display order.
#[cfg(feature = "amortization")]
pub fn format_result(result: &AmortizationResult, formatter: &dyn CurrencyFormatter) -> Vec<(&'static str, String)> {
    vec![
        ("monthly_payment", formatter.format(result.monthly_payment)),
        ("total_payment", formatter.format(result.total_payment)),
        ("total_interest", formatter.format(result.total_interest)),
        ("interest_only_payment", formatter.format(result.interest_only_payment)),
        (
            "principal_and_interest_payment",
            formatter.format(result.principal_and_interest_payment),
        ),
        ("interest_only_total", formatter.format(result.interest_only_total)),
    ]
}

/// Shorthand for [`UsdFormatter`].
pub fn format_usd(amount: Decimal) -> String {
    UsdFormatter.format(amount)
}
