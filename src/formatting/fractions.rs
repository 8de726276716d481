//! best-effort fraction rendering against a fixed table of simple fractions.
//! No continued-fraction reconstruction: anything not in the table is `None`.

/// tolerance when matching the fractional part
pub const FRACTION_TOLERANCE: f64 = 1e-6;

// halves, thirds, quarters, sixths, eighths, tenths; reduced form
const COMMON_FRACTIONS: [(u64, u64); 19] = [
    (1, 2),
    (1, 3),
    (2, 3),
    (1, 4),
    (3, 4),
    (1, 6),
    (5, 6),
    (1, 8),
    (3, 8),
    (5, 8),
    (7, 8),
    (1, 10),
    (1, 5),
    (3, 10),
    (2, 5),
    (3, 5),
    (7, 10),
    (4, 5),
    (9, 10),
];

/// `2.5 -> "5/2"`, `-0.75 -> "-3/4"`; integers and unknown values give `None`
pub fn to_fraction(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let magnitude = value.abs();
    let whole = magnitude.trunc();
    let part = magnitude - whole;
    // whole numbers have no fractional rendering
    if part < FRACTION_TOLERANCE || 1.0 - part < FRACTION_TOLERANCE {
        return None;
    }
    if whole > u64::MAX as f64 / 16.0 {
        return None;
    }
    let (num, den) = COMMON_FRACTIONS
        .iter()
        .find(|(n, d)| (part - *n as f64 / *d as f64).abs() < FRACTION_TOLERANCE)?;
    let numerator = whole as u64 * den + num;
    let sign = if value < 0.0 { "-" } else { "" };
    Some(format!("{}{}/{}", sign, numerator, den))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_fractions() {
        assert_eq!(to_fraction(0.5).as_deref(), Some("1/2"));
        assert_eq!(to_fraction(0.25).as_deref(), Some("1/4"));
        assert_eq!(to_fraction(0.125).as_deref(), Some("1/8"));
        assert_eq!(to_fraction(0.3).as_deref(), Some("3/10"));
        assert_eq!(to_fraction(0.4).as_deref(), Some("2/5"));
    }

    #[test]
    fn test_thirds_and_sixths_within_tolerance() {
        assert_eq!(to_fraction(1.0 / 3.0).as_deref(), Some("1/3"));
        assert_eq!(to_fraction(0.6666667).as_deref(), Some("2/3"));
        assert_eq!(to_fraction(5.0 / 6.0).as_deref(), Some("5/6"));
    }

    #[test]
    fn test_improper_and_negative() {
        assert_eq!(to_fraction(2.5).as_deref(), Some("5/2"));
        assert_eq!(to_fraction(-0.75).as_deref(), Some("-3/4"));
        assert_eq!(to_fraction(-1.125).as_deref(), Some("-9/8"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(to_fraction(3.0), None);
        assert_eq!(to_fraction(0.0), None);
        assert_eq!(to_fraction(0.123), None);
        assert_eq!(to_fraction(std::f64::consts::PI), None);
        assert_eq!(to_fraction(f64::NAN), None);
    }
}
