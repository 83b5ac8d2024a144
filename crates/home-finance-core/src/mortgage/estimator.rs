use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::mortgage::config::LoanConfiguration;
use crate::time_value::{annuity_payment, monthly_rate, saturating_div};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};

/// Loan-to-value at or above which PMI is charged.
pub const PMI_LTV_THRESHOLD: Percent = dec!(80);

const HIGH_INTEREST_RATE: Percent = dec!(15);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Monthly and upfront cost breakdown derived from a [`LoanConfiguration`].
///
/// Values are unrounded; round only when displaying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub down_payment_amount: Money,
    pub down_payment_percent: Percent,
    /// Home price less down payment, never negative
    pub loan_amount: Money,
    pub loan_to_value_percent: Percent,
    pub principal_and_interest_monthly: Money,
    pub property_tax_monthly: Money,
    pub insurance_monthly: Money,
    pub pmi_monthly: Money,
    pub hoa_monthly: Money,
    /// Sum of the five monthly components
    pub total_monthly_payment: Money,
    pub points_cost: Money,
    pub closing_costs: Money,
    /// Down payment + points + closing costs
    pub total_upfront_cost: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the full payment breakdown for a loan configuration.
///
/// Never fails: a zero home price reports zero ratios and a zero term reports
/// a zero principal-and-interest payment, so a half-edited form still renders.
/// Products saturate instead of overflowing.
pub fn compute_breakdown(config: &LoanConfiguration) -> PaymentBreakdown {
    let home_price = config.home_price;

    let down_payment_amount = config.down_payment_amount();
    let down_payment_percent = config.down_payment_percent();

    let loan_amount = home_price
        .saturating_sub(down_payment_amount)
        .max(Decimal::ZERO);

    let loan_to_value_percent = if home_price.is_zero() {
        Decimal::ZERO
    } else {
        saturating_div(loan_amount, home_price).saturating_mul(dec!(100))
    };

    let num_payments = u64::from(config.loan_term_years) * 12;
    let principal_and_interest_monthly =
        annuity_payment(loan_amount, monthly_rate(config.interest_rate), num_payments);

    let property_tax_monthly = monthly_share(home_price, config.property_tax_rate);
    let insurance_monthly = config.home_insurance_annual / dec!(12);

    let pmi_monthly = if config.pmi_enabled && loan_to_value_percent >= PMI_LTV_THRESHOLD {
        monthly_share(loan_amount, config.pmi_rate)
    } else {
        Decimal::ZERO
    };

    let total_monthly_payment = principal_and_interest_monthly
        .saturating_add(property_tax_monthly)
        .saturating_add(insurance_monthly)
        .saturating_add(config.hoa_monthly)
        .saturating_add(pmi_monthly);

    let points_cost = loan_amount.saturating_mul(config.points_percent) / dec!(100);
    let closing_costs = home_price.saturating_mul(config.closing_costs_percent) / dec!(100);
    let total_upfront_cost = down_payment_amount
        .saturating_add(points_cost)
        .saturating_add(closing_costs);

    PaymentBreakdown {
        down_payment_amount,
        down_payment_percent,
        loan_amount,
        loan_to_value_percent,
        principal_and_interest_monthly,
        property_tax_monthly,
        insurance_monthly,
        pmi_monthly,
        hoa_monthly: config.hoa_monthly,
        total_monthly_payment,
        points_cost,
        closing_costs,
        total_upfront_cost,
    }
}

/// Compute the breakdown wrapped in the standard output envelope.
///
/// Degenerate or unusual inputs are reported as warnings, never as errors.
pub fn estimate_payment(config: &LoanConfiguration) -> ComputationOutput<PaymentBreakdown> {
    let start = Instant::now();

    let breakdown = compute_breakdown(config);
    let warnings = collect_warnings(config, &breakdown);

    let elapsed = start.elapsed().as_micros() as u64;

    with_metadata(
        "Fixed-Rate Mortgage Payment Estimate (PITI + HOA + PMI)",
        config,
        warnings,
        elapsed,
        breakdown,
    )
}

/// `base * annual_percent / 100 / 12`, evaluated left to right.
fn monthly_share(base: Money, annual_percent: Percent) -> Money {
    base.saturating_mul(annual_percent) / dec!(100) / dec!(12)
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

fn collect_warnings(config: &LoanConfiguration, breakdown: &PaymentBreakdown) -> Vec<String> {
    let mut warnings = Vec::new();

    let negatives: Vec<&str> = [
        ("home_price", config.home_price),
        ("down_payment", config.down_payment),
        ("interest_rate", config.interest_rate),
        ("property_tax_rate", config.property_tax_rate),
        ("home_insurance_annual", config.home_insurance_annual),
        ("hoa_monthly", config.hoa_monthly),
        ("pmi_rate", config.pmi_rate),
        ("points_percent", config.points_percent),
        ("closing_costs_percent", config.closing_costs_percent),
    ]
    .into_iter()
    .filter(|(_, v)| v.is_sign_negative() && !v.is_zero())
    .map(|(name, _)| name)
    .collect();

    if !negatives.is_empty() {
        warnings.push(format!(
            "Negative values for {}: results are outside the calculator's contract",
            negatives.join(", ")
        ));
    }

    if config.home_price.is_zero() {
        warnings.push(
            "Home price is zero: loan-to-value and down payment percent reported as 0".into(),
        );
    }

    if config.loan_term_years == 0 {
        warnings.push("Loan term is zero: principal and interest reported as 0".into());
    }

    if breakdown.down_payment_amount > config.home_price && !config.home_price.is_zero() {
        warnings.push(format!(
            "Down payment {} exceeds home price {}: loan amount clamped to 0",
            breakdown.down_payment_amount, config.home_price
        ));
    }

    if !config.pmi_enabled && breakdown.loan_to_value_percent >= PMI_LTV_THRESHOLD {
        warnings.push(format!(
            "LTV of {:.1}% is at or above 80% but PMI is disabled: lenders typically require PMI",
            breakdown.loan_to_value_percent
        ));
    }

    if config.interest_rate > HIGH_INTEREST_RATE {
        warnings.push(format!(
            "Interest rate {}% exceeds 15%: unusually high for a residential mortgage",
            config.interest_rate
        ));
    }

    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
