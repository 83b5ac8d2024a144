use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::HomeFinanceError;
use crate::mortgage::config::LoanConfiguration;
use crate::mortgage::estimator::compute_breakdown;
use crate::time_value::{annuity_payment, monthly_rate};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::HomeFinanceResult;

const MAX_TERM_YEARS: u32 = 50;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input for a month-by-month amortization schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmortizationInput {
    /// Loan being amortized; the loan amount is derived exactly as the estimator does
    #[serde(default)]
    pub loan: LoanConfiguration,
    /// Additional principal paid every month on top of the scheduled payment
    #[serde(default)]
    pub extra_monthly_principal: Money,
    /// Date of the first payment; rows carry dates only when this is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_date: Option<NaiveDate>,
}

/// A single monthly payment in the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    /// Scheduled principal and interest actually paid this month (excludes extra)
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    pub extra_principal: Money,
    /// Outstanding balance after this payment
    pub balance: Money,
}

/// Totals for one loan year (periods 1-12 are year 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualSummary {
    pub year: u32,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub ending_balance: Money,
}

/// Complete amortization output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub loan_amount: Money,
    pub monthly_principal_and_interest: Money,
    /// Payments in the contractual term
    pub scheduled_payments: u32,
    /// Payments until the balance reaches zero
    pub actual_payments: u32,
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_paid: Money,
    /// Interest avoided versus paying only the scheduled amount
    pub interest_saved: Money,
    pub months_saved: u32,
    pub annual_summary: Vec<AnnualSummary>,
    pub rows: Vec<AmortizationRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the month-by-month amortization schedule for a fixed-rate loan.
pub fn build_schedule(
    input: &AmortizationInput,
) -> HomeFinanceResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let loan_amount = compute_breakdown(&input.loan).loan_amount;
    let rate = monthly_rate(input.loan.interest_rate);
    let scheduled_payments = input.loan.loan_term_years * 12;
    let payment = annuity_payment(loan_amount, rate, u64::from(scheduled_payments));

    if loan_amount.is_zero() && !input.extra_monthly_principal.is_zero() {
        warnings.push("Extra principal ignored: the down payment covers the full price".into());
    }

    let rows = amortize(
        loan_amount,
        rate,
        payment,
        scheduled_payments,
        input.extra_monthly_principal,
        input.first_payment_date,
    )?;

    let total_interest = checked_sum(rows.iter().map(|r| r.interest))?;
    let total_principal = checked_sum(rows.iter().map(|r| r.principal + r.extra_principal))?;
    let total_paid = total_principal.checked_add(total_interest).ok_or_else(overflow)?;

    let baseline_interest = if input.extra_monthly_principal.is_zero() {
        total_interest
    } else {
        let baseline = amortize(
            loan_amount,
            rate,
            payment,
            scheduled_payments,
            Decimal::ZERO,
            None,
        )?;
        checked_sum(baseline.iter().map(|r| r.interest))?
    };
    let interest_saved = (baseline_interest - total_interest).max(Decimal::ZERO);

    let actual_payments = rows.len() as u32;
    let months_saved = scheduled_payments.saturating_sub(actual_payments);

    let annual_summary = summarize_years(&rows)?;

    let output = AmortizationSchedule {
        loan_amount,
        monthly_principal_and_interest: payment,
        scheduled_payments,
        actual_payments,
        total_principal,
        total_interest,
        total_paid,
        interest_saved,
        months_saved,
        annual_summary,
        rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Fixed-Rate Amortization Schedule (monthly compounding)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &AmortizationInput) -> HomeFinanceResult<()> {
    let loan = &input.loan;

    if loan.home_price <= Decimal::ZERO {
        return Err(HomeFinanceError::InvalidInput {
            field: "home_price".into(),
            reason: "Home price must be positive".into(),
        });
    }

    if loan.loan_term_years == 0 || loan.loan_term_years > MAX_TERM_YEARS {
        return Err(HomeFinanceError::InvalidInput {
            field: "loan_term_years".into(),
            reason: format!("Loan term must be between 1 and {MAX_TERM_YEARS} years"),
        });
    }

    if loan.interest_rate < Decimal::ZERO {
        return Err(HomeFinanceError::InvalidInput {
            field: "interest_rate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    if input.extra_monthly_principal < Decimal::ZERO {
        return Err(HomeFinanceError::InvalidInput {
            field: "extra_monthly_principal".into(),
            reason: "Extra principal cannot be negative".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

fn amortize(
    loan_amount: Money,
    rate: Rate,
    payment: Money,
    scheduled_payments: u32,
    extra: Money,
    first_payment_date: Option<NaiveDate>,
) -> HomeFinanceResult<Vec<AmortizationRow>> {
    let mut rows = Vec::with_capacity(scheduled_payments as usize);
    let mut balance = loan_amount;

    for period in 1..=scheduled_payments {
        if balance <= Decimal::ZERO {
            break;
        }

        let interest = balance.checked_mul(rate).ok_or_else(overflow)?;
        // The final scheduled payment retires whatever drift remains
        let principal = if period == scheduled_payments {
            balance
        } else {
            payment
                .checked_sub(interest)
                .ok_or_else(overflow)?
                .min(balance)
        };
        let remaining = balance - principal;
        let extra_principal = if extra >= remaining {
            balance = Decimal::ZERO;
            remaining
        } else {
            balance = remaining - extra;
            extra
        };

        let payment_date = match first_payment_date {
            Some(first) => Some(
                first
                    .checked_add_months(Months::new(period - 1))
                    .ok_or_else(|| {
                        HomeFinanceError::DateError(format!(
                            "Payment date for period {period} is out of range"
                        ))
                    })?,
            ),
            None => None,
        };

        rows.push(AmortizationRow {
            period,
            payment_date,
            payment: principal.checked_add(interest).ok_or_else(overflow)?,
            principal,
            interest,
            extra_principal,
            balance,
        });
    }

    Ok(rows)
}

fn summarize_years(rows: &[AmortizationRow]) -> HomeFinanceResult<Vec<AnnualSummary>> {
    rows.chunks(12)
        .enumerate()
        .map(|(i, year_rows)| {
            Ok(AnnualSummary {
                year: i as u32 + 1,
                principal_paid: checked_sum(
                    year_rows.iter().map(|r| r.principal + r.extra_principal),
                )?,
                interest_paid: checked_sum(year_rows.iter().map(|r| r.interest))?,
                ending_balance: year_rows
                    .last()
                    .map(|r| r.balance)
                    .unwrap_or(Decimal::ZERO),
            })
        })
        .collect()
}

fn checked_sum(mut values: impl Iterator<Item = Money>) -> HomeFinanceResult<Money> {
    values
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .ok_or_else(overflow)
}

fn overflow() -> HomeFinanceError {
    HomeFinanceError::InvalidInput {
        field: "interest_rate".into(),
        reason: "Loan amount and interest rate are too large to amortize".into(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
