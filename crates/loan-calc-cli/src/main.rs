mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::{CalculateArgs, ScheduleArgs};

/// Commercial loan payment calculations
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Commercial loan payment calculations",
    long_about = "A CLI for fixed-rate loan payment calculations with decimal precision. \
                  Supports standard amortization, an initial interest-only period, and \
                  month-by-month schedules. Inputs may come from flags, a JSON file, \
                  or JSON piped on stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate monthly payment, total payment and total interest
    Calculate(CalculateArgs),
    /// Build a month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Calculate(args) => commands::amortization::run_calculate(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::render(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
