use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanCalcError;
use crate::types::{Money, Months, Rate, TermUnit};
use crate::LoanCalcResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Lift a checked Decimal operation into a `LoanCalcResult`, reporting
/// `None` as an overflow in `context`.
pub(crate) fn checked(value: Option<Decimal>, context: &str) -> LoanCalcResult<Decimal> {
    value.ok_or_else(|| LoanCalcError::Overflow {
        context: context.into(),
    })
}

/// Nominal annual percentage (7.5 = 7.5%) to a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Decimal) -> Rate {
    annual_rate_percent / PERCENT / MONTHS_PER_YEAR
}

/// Normalise a term magnitude to months.
pub fn to_months(value: Decimal, unit: TermUnit) -> LoanCalcResult<Months> {
    match unit {
        TermUnit::Years => checked(value.checked_mul(MONTHS_PER_YEAR), "years to months"),
        TermUnit::Months => Ok(value),
    }
}

/// Discount factor `(1 + r)^-n`.
///
/// Raising `1 / (1 + r)` keeps the value in `(0, 1]`, so long high-rate terms
/// shrink towards zero instead of overflowing the 96-bit mantissa.
pub fn discount_factor(rate: Rate, periods: Months) -> LoanCalcResult<Decimal> {
    let base = checked(Decimal::ONE.checked_add(rate), "compound base")?;
    let inverse = checked(Decimal::ONE.checked_div(base), "inverse compound base")?;
    checked(inverse.checked_powd(periods.normalize()), "discount factor")
}

/// Level payment that fully repays `principal` over `periods` months at
/// `monthly_rate`: `P * r / (1 - (1+r)^-n)`, the same annuity as
/// `P * r * (1+r)^n / ((1+r)^n - 1)`, or `P / n` when the rate is zero.
pub fn annuity_payment(principal: Money, monthly_rate: Rate, periods: Months) -> LoanCalcResult<Money> {
    if periods.is_zero() {
        return Err(LoanCalcError::DivisionByZero {
            context: "annuity payment with zero periods".into(),
        });
    }

    if monthly_rate.is_zero() {
        return checked(principal.checked_div(periods), "straight-line payment");
    }

    let discount = discount_factor(monthly_rate, periods)?;
    let denominator = checked(Decimal::ONE.checked_sub(discount), "annuity denominator")?;
    if denominator.is_zero() {
        return Err(LoanCalcError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    let periodic_interest = checked(principal.checked_mul(monthly_rate), "periodic interest")?;
    checked(periodic_interest.checked_div(denominator), "annuity payment")
}
