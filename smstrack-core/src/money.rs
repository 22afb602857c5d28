//! Currency display helpers

/// Default currency symbol for SMS exports
pub const DEFAULT_SYMBOL: &str = "₹";

/// Format an amount with thousands separators and two decimals: ₹1,234.50
pub fn format_money(val: f64, symbol: &str) -> String {
    let negative = val < 0.0;
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative && cents != "0.00" {
        format!("-{symbol}{grouped}.{dec_part}")
    } else {
        format!("{symbol}{grouped}.{dec_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(format_money(1234.5, DEFAULT_SYMBOL), "₹1,234.50");
        assert_eq!(format_money(0.0, DEFAULT_SYMBOL), "₹0.00");
        assert_eq!(format_money(999.999, "$"), "$1,000.00");
        assert_eq!(format_money(1_000_000.99, "$"), "$1,000,000.99");
        assert_eq!(format_money(-500.0, "$"), "-$500.00");
        assert_eq!(format_money(42.1, "€ "), "€ 42.10");
    }

    #[test]
    fn test_tiny_negative_is_not_signed() {
        assert_eq!(format_money(-0.001, "$"), "$0.00");
    }
}
