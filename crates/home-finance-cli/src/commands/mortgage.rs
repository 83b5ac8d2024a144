use clap::Args;
use serde_json::Value;
use tracing::{debug, info};

use home_finance_core::mortgage::{self, LoanConfiguration};

use super::{load_base, DownPaymentMode, LoanArgs};

/// Arguments for the payment estimate
#[derive(Args)]
pub struct EstimateArgs {
    /// Path to a JSON or YAML loan configuration (flags override its fields)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_estimate(args: EstimateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let base: LoanConfiguration = load_base(args.input.as_deref())?;
    let config = args.loan.apply(base);
    debug!(?config, "estimating payment");

    let output = mortgage::estimate_payment(&config);
    for warning in &output.warnings {
        info!(%warning, "estimate warning");
    }

    Ok(serde_json::to_value(output)?)
}

/// Arguments for switching the down payment mode
#[derive(Args)]
pub struct SwitchArgs {
    /// Path to a JSON or YAML loan configuration (flags override its fields)
    #[arg(long)]
    pub input: Option<String>,

    /// Mode to re-express the down payment in
    #[arg(long, value_enum)]
    pub to: DownPaymentMode,

    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_switch_down_payment(args: SwitchArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let base: LoanConfiguration = load_base(args.input.as_deref())?;
    let config = args.loan.apply(base);

    let switched = config.with_down_payment_type(args.to.into());
    debug!(
        from = %config.down_payment,
        to = %switched.down_payment,
        "down payment re-expressed"
    );

    Ok(serde_json::to_value(switched)?)
}

pub fn run_defaults() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(LoanConfiguration::default())?)
}
