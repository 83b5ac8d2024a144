use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent, Rate};

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT_SCALE: Decimal = dec!(100);

/// Convert an annual percentage (6.5 = 6.5% APR) into a monthly decimal rate.
pub fn monthly_rate(annual_percent: Percent) -> Rate {
    annual_percent / PERCENT_SCALE / MONTHS_PER_YEAR
}

/// `numerator / denominator`, clamped to `Decimal::MAX` or `Decimal::MIN` when
/// the quotient is out of range. A zero denominator yields zero.
pub fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

/// Discount factor `(1 + rate)^(-periods)` for a positive periodic rate.
///
/// Computed by exponentiation by squaring on `1 / (1 + rate)`, so the factor
/// shrinks toward zero instead of overflowing for long horizons. Returns
/// `None` when `1 + rate` is not positive or an intermediate product overflows.
pub fn discount_factor(rate: Rate, periods: u64) -> Option<Decimal> {
    let one_plus_r = Decimal::ONE + rate;
    if one_plus_r <= Decimal::ZERO {
        return None;
    }

    let mut base = Decimal::ONE.checked_div(one_plus_r)?;
    let mut factor = Decimal::ONE;
    let mut remaining = periods;

    while remaining > 0 {
        if (remaining & 1) == 1 {
            factor = factor.checked_mul(base)?;
        }
        remaining >>= 1;
        if remaining > 0 {
            base = base.checked_mul(base)?;
        }
    }

    Some(factor)
}

/// Level payment that retires `principal` over `periods` at `rate` per period.
///
/// `principal * r / (1 - (1 + r)^(-n))` for a positive rate, straight-line
/// `principal / n` otherwise. Zero periods yield a zero payment.
pub fn annuity_payment(principal: Money, rate: Rate, periods: u64) -> Money {
    if periods == 0 {
        return Decimal::ZERO;
    }

    let straight_line = principal / Decimal::from(periods);
    if rate <= Decimal::ZERO {
        return straight_line;
    }

    let denominator = match discount_factor(rate, periods) {
        Some(v) => Decimal::ONE - v,
        None => return straight_line,
    };

    if denominator.is_zero() {
        return straight_line;
    }

    match rate.checked_div(denominator) {
        Some(factor) => principal.saturating_mul(factor),
        None => straight_line,
    }
}
