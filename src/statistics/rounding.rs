//! Decimal rounding with round-half-to-even tie breaking

/// Round `value` to `decimals` digits after the decimal point.
///
/// The value is scaled by `10^decimals`, rounded to the nearest integer with
/// ties going to the even neighbour, then scaled back. Non-finite inputs are
/// returned unchanged, as are values whose scaled form overflows.
pub fn round_half_even(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let exponent = i32::try_from(decimals).unwrap_or(i32::MAX);
    let factor = 10_f64.powi(exponent);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }

    scaled.round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_go_to_even() {
        assert_eq!(round_half_even(2.25, 1), 2.2);
        assert_eq!(round_half_even(2.75, 1), 2.8);
        assert_eq!(round_half_even(-2.25, 1), -2.2);
        assert_eq!(round_half_even(0.5, 0), 0.0);
        assert_eq!(round_half_even(1.5, 0), 2.0);
    }

    #[test]
    fn test_non_ties() {
        assert_eq!(round_half_even(2.0, 1), 2.0);
        assert_eq!(round_half_even(5.0 / 3.0, 1), 1.7);
        assert_eq!(round_half_even(47.067, 0), 47.0);
    }

    #[test]
    fn test_non_finite_passthrough() {
        assert!(round_half_even(f64::NAN, 1).is_nan());
        assert_eq!(round_half_even(f64::INFINITY, 1), f64::INFINITY);
        assert_eq!(round_half_even(f64::MAX, 1), f64::MAX);
    }
}
