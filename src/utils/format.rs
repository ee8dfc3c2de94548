//! INR display formatting
//!
//! Amounts stay unrounded through every computation stage; rounding to
//! paise happens only here, at display time.

use bigdecimal::{BigDecimal, RoundingMode};

/// Format an amount as rupees with two decimal places, half-up
pub fn format_inr(amount: &BigDecimal) -> String {
    let rounded = amount.with_scale_round(2, RoundingMode::HalfUp);
    if rounded < BigDecimal::from(0) {
        format!("-₹{}", rounded.abs())
    } else {
        format!("₹{}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(&BigDecimal::from(900)), "₹900.00");
        assert_eq!(
            format_inr(&"1088.55".parse::<BigDecimal>().unwrap()),
            "₹1088.55"
        );
        assert_eq!(
            format_inr(&"83.0250".parse::<BigDecimal>().unwrap()),
            "₹83.03"
        );
        assert_eq!(
            format_inr(&"-177.005".parse::<BigDecimal>().unwrap()),
            "-₹177.01"
        );
    }
}
