//! Number to display text.
//!
//! Values are written in plain positional notation so that a result pasted
//! back into the buffer is still valid calculator input.

/// Shortest text that reads back as the same `f64`. Never uses an exponent and
/// never shows a negative zero.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Percentage with two decimals, e.g. `"50.00%"`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_have_no_fraction() {
        assert_eq!(format_number(15.0), "15");
        assert_eq!(format_number(-120.0), "-120");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn fractions_round_trip() {
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(1.0 / 3.0).parse::<f64>().unwrap(), 1.0 / 3.0);
    }

    #[test]
    fn no_exponent_notation() {
        let tiny = format_number(1.5e-10);
        assert_eq!(tiny, "0.00000000015");
        assert!(!format_number(1e22).contains('e'));
    }

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(format_percent(50.0), "50.00%");
        assert_eq!(format_percent(100.0), "100.00%");
        assert_eq!(format_percent(33.3333), "33.33%");
    }
}
