//! Decimal arithmetic shared by the rate and exchange pipelines.
//!
//! CRITICAL: Rounding strategy for rates and amounts:
//! - Every quotient is rounded to 16 fractional digits before further use
//! - Rounding is half away from zero everywhere
//! - Rendering pads with zeros to exactly the requested digits

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use rategate_shared::{AppError, AppResult};

/// Fractional digits kept on every division result.
pub const DIVISION_SCALE: u32 = 16;

/// Rounding applied to quotients and rendered values.
pub const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Divides two decimals, rounding the quotient to [`DIVISION_SCALE`] places.
///
/// Fails with `AppError::Internal` on a zero divisor or overflow; callers are
/// expected to reject zero rates with a more specific error first.
pub fn divide(dividend: Decimal, divisor: Decimal) -> AppResult<Decimal> {
    dividend
        .checked_div(divisor)
        .map(|quotient| quotient.round_dp_with_strategy(DIVISION_SCALE, ROUNDING))
        .ok_or_else(|| AppError::Internal(format!("cannot divide {dividend} by {divisor}")))
}

/// Multiplies two decimals.
pub fn multiply(lhs: Decimal, rhs: Decimal) -> AppResult<Decimal> {
    lhs.checked_mul(rhs)
        .ok_or_else(|| AppError::Internal(format!("cannot multiply {lhs} by {rhs}")))
}

/// Renders `value` with exactly `decimal_places` fractional digits.
///
/// Padding happens in the string, so values too wide to carry the full scale
/// in 96 bits still render every requested digit.
#[must_use]
pub fn to_fixed(value: Decimal, decimal_places: u32) -> String {
    let rounded = value.round_dp_with_strategy(decimal_places, ROUNDING);
    let width = decimal_places as usize;
    format!("{rounded:.width$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_divide_rounds_to_division_scale() {
        // 1 / 3 = 0.3333333333333333 (16 places)
        let result = divide(dec!(1), dec!(3)).unwrap();
        assert_eq!(result, dec!(0.3333333333333333));
        assert_eq!(result.scale(), DIVISION_SCALE);
    }

    #[test]
    fn test_divide_rounds_half_away_from_zero() {
        // 2 / 3 = 0.666...67 at 16 places
        assert_eq!(divide(dec!(2), dec!(3)).unwrap(), dec!(0.6666666666666667));
        assert_eq!(
            divide(dec!(-2), dec!(3)).unwrap(),
            dec!(-0.6666666666666667)
        );
    }

    #[test]
    fn test_divide_by_zero_is_internal_error() {
        let err = divide(dec!(1), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_to_fixed_pads_with_zeros() {
        assert_eq!(to_fixed(dec!(0.743653), 8), "0.74365300");
        assert_eq!(to_fixed(dec!(42125), 2), "42125.00");
        assert_eq!(to_fixed(dec!(1.5), 0), "2");
    }

    #[test]
    fn test_to_fixed_rounds_half_up() {
        assert_eq!(to_fixed(dec!(2.5), 0), "3");
        assert_eq!(to_fixed(dec!(0.123456785), 8), "0.12345679");
        assert_eq!(to_fixed(dec!(0.123456784), 8), "0.12345678");
    }

    #[test]
    fn test_to_fixed_pads_wide_values() {
        // 28 significant digits leave no room for an 18-digit scale in the mantissa
        let wide = dec!(405932547744.8191791950000000);
        assert_eq!(to_fixed(wide, 18), "405932547744.819179195000000000");
        assert_eq!(
            to_fixed(dec!(4059325477448191791950000), 18),
            "4059325477448191791950000.000000000000000000"
        );
    }

    #[test]
    fn test_division_then_padding_keeps_trailing_zeros() {
        // 0.999 / 0.00002461 keeps 16 places, so 18-place rendering pads "00"
        let rate = divide(dec!(0.999), dec!(0.00002461)).unwrap();
        assert_eq!(to_fixed(rate, 18), "40593.254774481917919500");
    }
}
