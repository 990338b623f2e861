//! Conversion of decimal quantities to whole minutes.

use rust_decimal::prelude::*;

/// Rounds a decimal minute value to a whole minute, midpoint away from zero.
///
/// Values outside the `i32` range saturate.
#[must_use]
pub fn round_to_minutes(value: Decimal) -> i32 {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_i32().unwrap_or(if rounded.is_sign_negative() {
        i32::MIN
    } else {
        i32::MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_to_minutes() {
        assert_eq!(round_to_minutes(dec!(480)), 480);
        assert_eq!(round_to_minutes(dec!(240.5)), 241);
        assert_eq!(round_to_minutes(dec!(240.49)), 240);
        assert_eq!(round_to_minutes(dec!(-30.5)), -31);
    }

    #[test]
    fn test_saturates() {
        assert_eq!(round_to_minutes(dec!(99999999999)), i32::MAX);
        assert_eq!(round_to_minutes(dec!(-99999999999)), i32::MIN);
    }
}
