use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value::saturating_div;
use crate::types::{Money, Percent};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How the `down_payment` field of a [`LoanConfiguration`] is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownPaymentType {
    /// Percent of the home price (20 = 20%)
    #[default]
    Percent,
    /// Absolute currency amount
    Amount,
}

/// Inputs to the payment estimator, one field per calculator control.
///
/// Missing fields fall back to [`LoanConfiguration::default`], so a partially
/// filled form deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanConfiguration {
    /// Purchase price of the home
    pub home_price: Money,
    /// Interpretation of `down_payment`
    pub down_payment_type: DownPaymentType,
    /// Percent of price or absolute amount, depending on `down_payment_type`
    pub down_payment: Decimal,
    /// Annual interest rate in percent (6.5 = 6.5% APR)
    pub interest_rate: Percent,
    /// Loan term in years
    pub loan_term_years: u32,
    /// Annual property tax as a percent of the home price
    pub property_tax_rate: Percent,
    /// Annual homeowner's insurance premium
    pub home_insurance_annual: Money,
    /// Monthly HOA dues
    pub hoa_monthly: Money,
    /// Whether private mortgage insurance is considered at all
    pub pmi_enabled: bool,
    /// Annual PMI rate as a percent of the loan amount
    pub pmi_rate: Percent,
    /// Discount points as a percent of the loan amount
    pub points_percent: Percent,
    /// Closing costs as a percent of the home price
    pub closing_costs_percent: Percent,
}

impl Default for LoanConfiguration {
    fn default() -> Self {
        Self {
            home_price: dec!(400000),
            down_payment_type: DownPaymentType::Percent,
            down_payment: dec!(20),
            interest_rate: dec!(6.5),
            loan_term_years: 30,
            property_tax_rate: dec!(1.2),
            home_insurance_annual: dec!(1500),
            hoa_monthly: Decimal::ZERO,
            pmi_enabled: true,
            pmi_rate: dec!(0.5),
            points_percent: Decimal::ZERO,
            closing_costs_percent: dec!(3),
        }
    }
}

// ---------------------------------------------------------------------------
// Down payment cross-derivation
// ---------------------------------------------------------------------------

impl LoanConfiguration {
    /// Down payment in currency, whichever mode it was entered in.
    pub fn down_payment_amount(&self) -> Money {
        match self.down_payment_type {
            DownPaymentType::Percent => {
                self.home_price.saturating_mul(self.down_payment) / dec!(100)
            }
            DownPaymentType::Amount => self.down_payment,
        }
    }

    /// Down payment as a percent of the home price. Zero when the price is zero.
    pub fn down_payment_percent(&self) -> Percent {
        match self.down_payment_type {
            DownPaymentType::Percent => self.down_payment,
            DownPaymentType::Amount => {
                if self.home_price.is_zero() {
                    Decimal::ZERO
                } else {
                    saturating_div(self.down_payment, self.home_price).saturating_mul(dec!(100))
                }
            }
        }
    }

    /// Re-express the down payment in another mode, keeping its value.
    ///
    /// The derived amount is preserved; switching to the current mode returns
    /// an identical configuration.
    pub fn with_down_payment_type(&self, kind: DownPaymentType) -> Self {
        if kind == self.down_payment_type {
            return self.clone();
        }

        let down_payment = match kind {
            DownPaymentType::Amount => self.down_payment_amount(),
            DownPaymentType::Percent => self.down_payment_percent(),
        };

        Self {
            down_payment_type: kind,
            down_payment,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config(kind: DownPaymentType, down: Decimal) -> LoanConfiguration {
        LoanConfiguration {
            home_price: dec!(300000),
            down_payment_type: kind,
            down_payment: down,
            ..LoanConfiguration::default()
        }
    }

    #[test]
    fn test_percent_mode_derives_amount() {
        let c = config(DownPaymentType::Percent, dec!(20));
        assert_eq!(c.down_payment_amount(), dec!(60000));
        assert_eq!(c.down_payment_percent(), dec!(20));
    }

    #[test]
    fn test_amount_mode_derives_percent() {
        let c = config(DownPaymentType::Amount, dec!(45000));
        assert_eq!(c.down_payment_amount(), dec!(45000));
        assert_eq!(c.down_payment_percent(), dec!(15));
    }

    #[test]
    fn test_amount_mode_zero_price_percent_is_zero() {
        let mut c = config(DownPaymentType::Amount, dec!(45000));
        c.home_price = Decimal::ZERO;
        assert_eq!(c.down_payment_percent(), Decimal::ZERO);
    }

    #[test]
    fn test_amount_mode_tiny_price_saturates_percent() {
        let mut c = config(DownPaymentType::Amount, dec!(100000000));
        c.home_price = dec!(0.000000000000000000001);
        assert_eq!(c.down_payment_percent(), Decimal::MAX);
    }

    #[test]
    fn test_switch_percent_to_amount() {
        let c = config(DownPaymentType::Percent, dec!(20));
        let switched = c.with_down_payment_type(DownPaymentType::Amount);
        assert_eq!(switched.down_payment_type, DownPaymentType::Amount);
        assert_eq!(switched.down_payment, dec!(60000));
        assert_eq!(switched.home_price, c.home_price);
    }

    #[test]
    fn test_switch_to_same_mode_is_identity() {
        let c = config(DownPaymentType::Amount, dec!(12345.67));
        assert_eq!(c.with_down_payment_type(DownPaymentType::Amount), c);
    }

    #[test]
    fn test_switch_round_trip_preserves_amount() {
        let mut c = config(DownPaymentType::Percent, dec!(7.3));
        c.home_price = dec!(333333);
        let back = c
            .with_down_payment_type(DownPaymentType::Amount)
            .with_down_payment_type(DownPaymentType::Percent);
        let diff = (back.down_payment_amount() - c.down_payment_amount()).abs();
        assert!(diff < dec!(0.000001), "drifted by {diff}");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let c: LoanConfiguration =
            serde_json::from_str(r#"{"home_price": "500000", "down_payment_type": "amount"}"#)
                .unwrap();
        assert_eq!(c.home_price, dec!(500000));
        assert_eq!(c.down_payment_type, DownPaymentType::Amount);
        assert_eq!(c.loan_term_years, 30);
        assert_eq!(c.interest_rate, dec!(6.5));
    }

    #[test]
    fn test_json_numbers_accepted() {
        let c: LoanConfiguration =
            serde_json::from_str(r#"{"home_price": 250000, "interest_rate": 7.25}"#).unwrap();
        assert_eq!(c.home_price, dec!(250000));
        assert_eq!(c.interest_rate, dec!(7.25));
    }
}
