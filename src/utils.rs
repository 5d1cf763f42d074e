// src/utils.rs

/// `1234.5` → `£1,234.50`
pub fn format_currency(value: f64) -> String {
    let pence = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && pence > 0 { "-" } else { "" };
    format!("{}£{}.{:02}", sign, group_thousands(pence / 100), pence % 100)
}

/// `12345.4` → `12,345`
pub fn format_count(value: f64) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}", sign, group_thousands(rounded.abs() as u64))
}

/// Signed percentage with one decimal; non-negative values get a `+`.
pub fn format_delta(delta_pct: f64) -> String {
    if delta_pct >= 0.0 {
        format!("+{:.1}%", delta_pct)
    } else {
        format!("{:.1}%", delta_pct)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(1234.5), "£1,234.50");
        assert_eq!(format_currency(0.0), "£0.00");
        assert_eq!(format_currency(999.999), "£1,000.00");
        assert_eq!(format_currency(-42.1), "-£42.10");
        assert_eq!(format_currency(1_234_567.891), "£1,234,567.89");
    }

    #[test]
    fn test_count() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(12345.4), "12,345");
        assert_eq!(format_count(1_000_000.0), "1,000,000");
    }

    #[test]
    fn test_delta() {
        assert_eq!(format_delta(-3.2), "-3.2%");
        assert_eq!(format_delta(0.0), "+0.0%");
        assert_eq!(format_delta(12.345), "+12.3%");
    }
}
