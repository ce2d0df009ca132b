use chrono::NaiveDate;

/// Integer with dot thousand separators, used for response sizes in the request log
pub fn format_number(n: usize) -> String {
    group_digits(&n.to_string(), '.')
}

/// Fixed two-decimal number with comma grouping: `1234.5` → `1,234.50`
pub fn format_float(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));
    let sign = if integer.chars().chain(fraction.chars()).all(|c| c == '0') {
        ""
    } else {
        sign
    };
    format!("{}{}.{}", sign, group_digits(integer, ','), fraction)
}

/// Currency amount with its glyph: `(1234.5, "₹")` → `₹ 1,234.50`
pub fn format_money(value: f64, currency_symbol: &str) -> String {
    format!("{} {}", currency_symbol, format_float(value))
}

/// `2026-10-15` → `15-10-2026`
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format("%d-%m-%Y").to_string(),
        Err(_) => date.to_string(),
    }
}

/// Escapes database text before it lands in rendered markup
pub fn escape(text: &str) -> String {
    ammonia::clean_text(text)
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(separator);
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567890), "1.234.567.890");
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(0.0), "0.00");
        assert_eq!(format_float(12.5), "12.50");
        assert_eq!(format_float(1234.567), "1,234.57");
        assert_eq!(format_float(-9876543.2), "-9,876,543.20");
        assert_eq!(format_float(-0.001), "0.00");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1180.0, "₹"), "₹ 1,180.00");
        assert_eq!(format_money(0.0, "$"), "$ 0.00");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-10-15"), "15-10-2026");
        assert_eq!(format_date("not a date"), "not a date");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>"), "&lt;b&gt;");
        assert_eq!(escape("A&B"), "A&amp;B");
        assert_eq!(escape("Widget"), "Widget");
    }
}
