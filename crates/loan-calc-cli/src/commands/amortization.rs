use clap::Args;
use serde_json::{Map, Value};

use loan_calc_core::amortization::schedule;
use loan_calc_core::amortization::{self as amort, LoanForm, LoanInputs};
use loan_calc_core::format::{format_result, UsdFormatter};
use loan_calc_core::TermUnit;

use crate::input;

/// Loan terms shared by every amortization command.
///
/// Values are taken as text, exactly as typed into the calculator form, and
/// parsed by the core (commas allowed in the amount, bad text becomes zero).
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount, e.g. "250,000"
    #[arg(long, allow_hyphen_values = true)]
    pub loan_amount: Option<String>,

    /// Annual interest rate as a percentage, e.g. "7.5"
    #[arg(long, allow_hyphen_values = true)]
    pub interest_rate: Option<String>,

    /// Loan term magnitude
    #[arg(long, allow_hyphen_values = true)]
    pub loan_term: Option<String>,

    /// Unit for the loan term: years or months
    #[arg(long, default_value = "years")]
    pub term_unit: TermUnit,

    /// Start the loan with an interest-only period
    #[arg(long)]
    pub interest_only: bool,

    /// Interest-only period magnitude
    #[arg(long, alias = "io-period", allow_hyphen_values = true)]
    pub interest_only_period: Option<String>,

    /// Unit for the interest-only period: years or months
    #[arg(long, alias = "io-unit", default_value = "years")]
    pub interest_only_unit: TermUnit,
}

/// Arguments for the payment summary
#[derive(Args)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Add USD-formatted figures alongside the raw decimals
    #[arg(long)]
    pub formatted: bool,
}

/// Arguments for the monthly schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_calculate(args: CalculateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = resolve_inputs(args.loan)?;
    let output = amort::calculate_loan(&inputs);
    log::debug!("calculated loan in {}us", output.metadata.computation_time_us);

    let mut value = serde_json::to_value(&output)?;
    if args.formatted {
        let formatted: Map<String, Value> = format_result(&output.result, &UsdFormatter)
            .into_iter()
            .map(|(field, text)| (field.to_string(), Value::String(text)))
            .collect();
        if let Value::Object(ref mut map) = value {
            map.insert("formatted".into(), Value::Object(formatted));
        }
    }
    Ok(value)
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = resolve_inputs(args.loan)?;
    let output = schedule::build_schedule(&inputs)?;
    log::debug!("built {} schedule rows", output.result.rows.len());
    Ok(serde_json::to_value(output)?)
}

/// Input precedence: `--input` file, then piped stdin, then flags.
fn resolve_inputs(args: LoanArgs) -> Result<LoanInputs, Box<dyn std::error::Error>> {
    let form: LoanForm = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let interest_only_period = if args.interest_only {
            args.interest_only_period
                .ok_or("--interest-only-period is required with --interest-only")?
        } else {
            args.interest_only_period.unwrap_or_default()
        };
        LoanForm {
            loan_amount: args
                .loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
            interest_rate: args
                .interest_rate
                .ok_or("--interest-rate is required (or provide --input)")?,
            loan_term: args
                .loan_term
                .ok_or("--loan-term is required (or provide --input)")?,
            term_unit: args.term_unit,
            interest_only_enabled: args.interest_only,
            interest_only_period,
            interest_only_unit: args.interest_only_unit,
        }
    };

    log::debug!("loan form: {form:?}");
    Ok(form.to_inputs())
}
