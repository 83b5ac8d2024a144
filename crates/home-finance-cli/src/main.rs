mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::amortization::ScheduleArgs;
use commands::mortgage::{EstimateArgs, SwitchArgs};

/// Mortgage payment estimates for property listing calculators
#[derive(Parser)]
#[command(
    name = "homecalc",
    version,
    about = "Mortgage payment estimates for property listing calculators",
    long_about = "Estimate the monthly cost of a home (principal & interest, property tax, \
                  insurance, HOA, PMI) and the cash needed at closing, or print a full \
                  amortization schedule. Inputs come from flags, a JSON/YAML file, or stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Round decimal values to this many places when rendering
    #[arg(long, global = true)]
    precision: Option<u32>,

    /// Log filter (overridden by HOMECALC_LOG), e.g. "debug" or "home_finance_cli=trace"
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the monthly payment and upfront costs for a purchase
    Estimate(EstimateArgs),
    /// Build a month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// Re-express the down payment as a percent or an amount
    SwitchDownPayment(SwitchArgs),
    /// Print the default loan configuration (a template for --input)
    Defaults,
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
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Estimate(args) => commands::mortgage::run_estimate(args),
        Commands::Schedule(args) => commands::amortization::run_schedule(args),
        Commands::SwitchDownPayment(args) => commands::mortgage::run_switch_down_payment(args),
        Commands::Defaults => commands::mortgage::run_defaults(),
        Commands::Version => {
            println!("homecalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, value, cli.precision);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
