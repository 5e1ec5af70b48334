/// Rounds `x` to `digits` decimal places, ties to even.
///
/// Used for display of step sizes, which are powers of two and hit exact
/// ties (0.03125 -> 0.0312).
pub fn round_half_even(x: f64, digits: u32) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let scale = 10_f64.powi(digits.min(22) as i32);
    let scaled = x * scale;
    let rounded = scaled.round();
    let nearest = if (scaled - scaled.trunc()).abs() == 0.5 {
        2.0 * (scaled / 2.0).round()
    } else {
        rounded
    };
    nearest / scale
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_go_to_even() {
        assert_eq!(round_half_even(0.03125, 4), 0.0312);
        assert_eq!(round_half_even(0.5, 0), 0.0);
        assert_eq!(round_half_even(1.5, 0), 2.0);
        assert_eq!(round_half_even(-2.5, 0), -2.0);
    }

    #[test]
    fn test_plain_rounding() {
        assert_eq!(round_half_even(0.000244140625, 4), 0.0002);
        assert_eq!(round_half_even(0.25, 4), 0.25);
        assert!(round_half_even(f64::NAN, 4).is_nan());
    }
}
