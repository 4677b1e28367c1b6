pub mod calculator;
pub mod form;
pub mod inputs;
#[cfg(feature = "schedule")]
pub mod schedule;

pub use calculator::{calculate_loan, compute, AmortizationResult};
pub use form::LoanForm;
pub use inputs::LoanInputs;
