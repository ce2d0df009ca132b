//! Number formatting for dashboard cells

/// Formats a number with the given decimals and comma thousand separators
///
/// `1234.567, 2` → `1,234.57`
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, decimal_part) = match unsigned.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (unsigned, None),
    };

    // "-0.00" reads as zero
    let is_zero = unsigned.chars().all(|c| c == '0' || c == '.');
    let sign = if is_zero { "" } else { sign };

    let mut result = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    let formatted_integer: String = result.chars().rev().collect();

    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, formatted_integer, d),
        None => format!("{}{}", sign, formatted_integer),
    }
}

/// Amount with two decimals; a missing amount reads `0.00`
pub fn format_money(value: Option<f64>) -> String {
    format_number_with_decimals(value.unwrap_or(0.0), 2)
}

/// Amount prefixed with the currency glyph: `₹1,180.00`
pub fn format_currency(value: Option<f64>, currency_symbol: &str) -> String {
    format!("{}{}", currency_symbol, format_money(value))
}

/// Integer with thousand separators; a missing value reads `0`
pub fn format_int(value: Option<i64>) -> String {
    format_number_with_decimals(value.unwrap_or(0) as f64, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(1234.567, 2), "1,234.57");
        assert_eq!(format_number_with_decimals(999.0, 0), "999");
        assert_eq!(format_number_with_decimals(-1234567.0, 1), "-1,234,567.0");
        assert_eq!(format_number_with_decimals(-0.001, 2), "0.00");
    }

    #[test]
    fn test_missing_values() {
        assert_eq!(format_money(None), "0.00");
        assert_eq!(format_int(None), "0");
        assert_eq!(format_currency(None, "₹"), "₹0.00");
        assert_eq!(format_currency(Some(1180.0), "₹"), "₹1,180.00");
    }
}
