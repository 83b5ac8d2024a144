use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info};

use home_finance_core::mortgage::amortization::{self, AmortizationInput};

use super::{load_base, LoanArgs};

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to a JSON or YAML schedule input ({"loan": {...}, "extra_monthly_principal": ..})
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,

    /// Extra principal paid every month
    #[arg(long)]
    pub extra_principal: Option<Decimal>,

    /// First payment date (YYYY-MM-DD); rows are dated when set
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Render only the per-year summary, not every monthly row
    #[arg(long)]
    pub annual_only: bool,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let base: AmortizationInput = load_base(args.input.as_deref())?;
    let schedule_input = AmortizationInput {
        loan: args.loan.apply(base.loan),
        extra_monthly_principal: args
            .extra_principal
            .unwrap_or(base.extra_monthly_principal),
        first_payment_date: args.start_date.or(base.first_payment_date),
    };
    debug!(?schedule_input, "building amortization schedule");

    let output = amortization::build_schedule(&schedule_input)?;
    info!(
        payments = output.result.actual_payments,
        total_interest = %output.result.total_interest,
        "schedule built"
    );

    let mut value = serde_json::to_value(output)?;
    if args.annual_only {
        if let Some(Value::Object(result)) = value.get_mut("result") {
            result.remove("rows");
        }
    }

    Ok(value)
}
