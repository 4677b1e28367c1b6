use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;

use loan_calc_core::amortization::{self, LoanForm, LoanInputs};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Payment summary from raw form state (`{"loanAmount": "250,000", ...}`).
#[napi]
pub fn calculate_loan(form_json: String) -> NapiResult<String> {
    let form: LoanForm = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let output = amortization::calculate_loan(&form.to_inputs());
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Payment summary from already-numeric inputs.
#[napi]
pub fn calculate_loan_inputs(inputs_json: String) -> NapiResult<String> {
    let inputs: LoanInputs = serde_json::from_str(&inputs_json).map_err(to_napi_error)?;
    let output = amortization::calculate_loan(&inputs);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(form_json: String) -> NapiResult<String> {
    let form: LoanForm = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let output =
        amortization::schedule::build_schedule(&form.to_inputs()).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

/// USD display string for a decimal amount passed as text.
#[napi]
pub fn format_currency(amount: String) -> NapiResult<String> {
    let value: Decimal = amount.trim().parse().map_err(to_napi_error)?;
    Ok(loan_calc_core::format::format_usd(value))
}
