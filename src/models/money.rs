//! Monetary values are stored as `f64` but every write goes through
//! [`normalize`], which rounds on the decimal representation so that
//! midpoints like `2.005` are not lost to binary float error.

use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;
const MAX_PRICE: f64 = 1_000_000.0;

fn to_decimal(value: f64) -> Decimal {
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
        .unwrap_or_default()
}

fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round to 2 decimal places, half away from zero.
pub fn normalize(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// Sum of monetary values, normalized once at the end.
pub fn total<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    to_f64(values.into_iter().map(to_decimal).sum())
}

/// Validate a price supplied by a client and return it normalized.
pub fn parse_price(value: f64, field: &str) -> Result<f64, String> {
    if !value.is_finite() {
        return Err(format!("{} must be a finite number, got {}", field, value));
    }
    if value < 0.0 {
        return Err(format!("{} must be non-negative, got {}", field, value));
    }
    if value > MAX_PRICE {
        return Err(format!(
            "{} exceeds maximum allowed ({}), got {}",
            field, MAX_PRICE, value
        ));
    }
    Ok(normalize(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::assert_err;

    #[test]
    fn midpoint_rounds_away_from_zero() {
        assert_eq!(normalize(2.005), 2.01);
        assert_eq!(normalize(0.125), 0.13);
        assert_eq!(normalize(-2.005), -2.01);
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        for value in [9.99, 2.01, 0.0, 12.5, 1234.56] {
            assert_eq!(normalize(value), value);
            assert_eq!(normalize(normalize(value)), normalize(value));
        }
    }

    #[test]
    fn below_midpoint_rounds_down() {
        assert_eq!(normalize(3.14159), 3.14);
        assert_eq!(normalize(2.004), 2.0);
    }

    #[test]
    fn totals_are_rounded_once() {
        assert_eq!(total([0.1, 0.2]), 0.3);
        assert_eq!(total(Vec::<f64>::new()), 0.0);
    }

    #[test]
    fn rejects_prices_a_menu_cannot_carry() {
        assert_err!(parse_price(f64::NAN, "price"));
        assert_err!(parse_price(-1.0, "price"));
        assert_err!(parse_price(10_000_000.0, "price"));
        assert_eq!(parse_price(9.999, "price"), Ok(10.0));
    }
}
