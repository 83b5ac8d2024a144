pub mod amortization;
pub mod mortgage;

use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::debug;

use home_finance_core::mortgage::{DownPaymentType, LoanConfiguration};

use crate::input;

/// Down payment interpretation as accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DownPaymentMode {
    Percent,
    Amount,
}

impl From<DownPaymentMode> for DownPaymentType {
    fn from(mode: DownPaymentMode) -> Self {
        match mode {
            DownPaymentMode::Percent => DownPaymentType::Percent,
            DownPaymentMode::Amount => DownPaymentType::Amount,
        }
    }
}

/// Loan flags shared by every command; each one overrides the file/stdin/default value.
#[derive(Args, Debug, Default)]
pub struct LoanArgs {
    /// Purchase price of the home
    #[arg(long)]
    pub home_price: Option<Decimal>,

    /// How --down-payment is read
    #[arg(long, value_enum)]
    pub down_payment_type: Option<DownPaymentMode>,

    /// Down payment (percent of price or amount, per --down-payment-type)
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Annual interest rate in percent (6.5 = 6.5%)
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Annual property tax, percent of price
    #[arg(long)]
    pub property_tax_rate: Option<Decimal>,

    /// Annual homeowner's insurance premium
    #[arg(long)]
    pub insurance: Option<Decimal>,

    /// Monthly HOA dues
    #[arg(long)]
    pub hoa: Option<Decimal>,

    /// Include private mortgage insurance (true/false)
    #[arg(long)]
    pub pmi: Option<bool>,

    /// Annual PMI rate, percent of loan amount
    #[arg(long)]
    pub pmi_rate: Option<Decimal>,

    /// Discount points, percent of loan amount
    #[arg(long)]
    pub points: Option<Decimal>,

    /// Closing costs, percent of price
    #[arg(long)]
    pub closing_costs: Option<Decimal>,
}

impl LoanArgs {
    /// Layer the flags that were given over `base`.
    pub fn apply(&self, base: LoanConfiguration) -> LoanConfiguration {
        LoanConfiguration {
            home_price: self.home_price.unwrap_or(base.home_price),
            down_payment_type: self
                .down_payment_type
                .map(Into::into)
                .unwrap_or(base.down_payment_type),
            down_payment: self.down_payment.unwrap_or(base.down_payment),
            interest_rate: self.interest_rate.unwrap_or(base.interest_rate),
            loan_term_years: self.term_years.unwrap_or(base.loan_term_years),
            property_tax_rate: self.property_tax_rate.unwrap_or(base.property_tax_rate),
            home_insurance_annual: self.insurance.unwrap_or(base.home_insurance_annual),
            hoa_monthly: self.hoa.unwrap_or(base.hoa_monthly),
            pmi_enabled: self.pmi.unwrap_or(base.pmi_enabled),
            pmi_rate: self.pmi_rate.unwrap_or(base.pmi_rate),
            points_percent: self.points.unwrap_or(base.points_percent),
            closing_costs_percent: self.closing_costs.unwrap_or(base.closing_costs_percent),
        }
    }
}

/// Load the base input from `--input`, then piped stdin, then defaults.
pub fn load_base<T: DeserializeOwned + Default>(
    path: Option<&str>,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        debug!(path, "reading input file");
        return input::file::read_input(path);
    }

    if let Some(value) = input::stdin::read_stdin()? {
        debug!("reading input from stdin");
        return Ok(value);
    }

    debug!("no input file or stdin, starting from defaults");
    Ok(T::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn flags_override_only_what_was_given() {
        let args = LoanArgs {
            home_price: Some(dec!(615000)),
            down_payment_type: Some(DownPaymentMode::Amount),
            pmi: Some(false),
            ..LoanArgs::default()
        };
        let base = LoanConfiguration::default();
        let config = args.apply(base.clone());

        assert_eq!(config.home_price, dec!(615000));
        assert_eq!(config.down_payment_type, DownPaymentType::Amount);
        assert!(!config.pmi_enabled);
        assert_eq!(config.interest_rate, base.interest_rate);
        assert_eq!(config.loan_term_years, base.loan_term_years);
    }

    #[test]
    fn no_flags_is_identity() {
        let base = LoanConfiguration::default();
        assert_eq!(LoanArgs::default().apply(base.clone()), base);
    }
}
