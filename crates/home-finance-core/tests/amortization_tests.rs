#![cfg(feature = "amortization")]

use chrono::NaiveDate;
use home_finance_core::mortgage::amortization::{build_schedule, AmortizationInput};
use home_finance_core::mortgage::{compute_breakdown, LoanConfiguration};
use home_finance_core::HomeFinanceError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn input(extra: Decimal) -> AmortizationInput {
    AmortizationInput {
        loan: LoanConfiguration {
            home_price: dec!(500000),
            down_payment: dec!(10),
            interest_rate: dec!(7),
            loan_term_years: 30,
            ..LoanConfiguration::default()
        },
        extra_monthly_principal: extra,
        first_payment_date: NaiveDate::from_ymd_opt(2027, 3, 1),
    }
}

// ===========================================================================
// Schedule consistency with the estimator
// ===========================================================================

#[test]
fn test_schedule_payment_matches_estimator() {
    let input = input(Decimal::ZERO);
    let schedule = build_schedule(&input).unwrap().result;
    let breakdown = compute_breakdown(&input.loan);

    assert_eq!(schedule.loan_amount, breakdown.loan_amount);
    assert_eq!(
        schedule.monthly_principal_and_interest,
        breakdown.principal_and_interest_monthly
    );
    // Every payment but the last is the level payment
    for row in &schedule.rows[..359] {
        assert!((row.payment - schedule.monthly_principal_and_interest).abs() < dec!(0.000001));
    }
}

#[test]
fn test_interest_declines_over_time() {
    let schedule = build_schedule(&input(Decimal::ZERO)).unwrap().result;
    assert!(schedule.rows[0].interest > schedule.rows[180].interest);
    assert!(schedule.rows[180].interest > schedule.rows[359].interest);
    assert!(schedule.rows[0].principal < schedule.rows[359].principal);
}

#[test]
fn test_annual_summary_totals_match_rows() {
    let schedule = build_schedule(&input(Decimal::ZERO)).unwrap().result;
    let interest: Decimal = schedule.annual_summary.iter().map(|y| y.interest_paid).sum();
    assert!((interest - schedule.total_interest).abs() < dec!(0.000001));
    assert_eq!(schedule.annual_summary.last().unwrap().ending_balance, Decimal::ZERO);
}

#[test]
fn test_last_payment_date() {
    let schedule = build_schedule(&input(Decimal::ZERO)).unwrap().result;
    assert_eq!(
        schedule.rows.last().unwrap().payment_date,
        NaiveDate::from_ymd_opt(2057, 2, 1)
    );
}

// ===========================================================================
// Extra principal
// ===========================================================================

#[test]
fn test_extra_principal_savings() {
    let base = build_schedule(&input(Decimal::ZERO)).unwrap().result;
    let accelerated = build_schedule(&input(dec!(250))).unwrap().result;

    assert!(accelerated.actual_payments < base.actual_payments);
    assert_eq!(
        accelerated.months_saved,
        base.actual_payments - accelerated.actual_payments
    );
    assert!(
        (accelerated.interest_saved - (base.total_interest - accelerated.total_interest)).abs()
            < dec!(0.000001)
    );
    assert_eq!(accelerated.annual_summary.len(), accelerated.rows.len().div_ceil(12));
}

#[test]
fn test_extra_larger_than_balance_pays_off_in_one_month() {
    let schedule = build_schedule(&input(dec!(10000000))).unwrap().result;
    assert_eq!(schedule.actual_payments, 1);
    assert_eq!(schedule.rows[0].balance, Decimal::ZERO);
    let retired = schedule.rows[0].principal + schedule.rows[0].extra_principal;
    assert!((retired - dec!(450000)).abs() < dec!(0.000001));
}

// ===========================================================================
// Validation
// ===========================================================================

#[test]
fn test_negative_rate_rejected() {
    let mut bad = input(Decimal::ZERO);
    bad.loan.interest_rate = dec!(-1);
    match build_schedule(&bad) {
        Err(HomeFinanceError::InvalidInput { field, .. }) => assert_eq!(field, "interest_rate"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_input_json_defaults() {
    let parsed: AmortizationInput =
        serde_json::from_str(r#"{"loan": {"home_price": 250000}}"#).unwrap();
    assert_eq!(parsed.extra_monthly_principal, Decimal::ZERO);
    assert!(parsed.first_payment_date.is_none());
    assert_eq!(parsed.loan.loan_term_years, 30);
}

#[test]
fn test_overflowing_interest_rejected() {
    let mut huge = input(Decimal::ZERO);
    huge.loan.home_price = dec!(10000000000000000000000000000);
    huge.loan.interest_rate = dec!(12000);
    match build_schedule(&huge) {
        Err(HomeFinanceError::InvalidInput { field, .. }) => assert_eq!(field, "interest_rate"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}
