// Display formatting for metric values, dates and table cells
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Shown where a number cannot be displayed.
pub const NOT_AVAILABLE: &str = "N/A";

/// USD with thousands separators and two decimals, e.g. `$12,345.60`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

/// Plain number as the browser would print it: `8`, `8.5`, `-0.25`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    // Avoid "-0"
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Integer with thousands separators, e.g. `1,250,000`.
pub fn format_count(value: u64) -> String {
    group_thousands(value)
}

pub fn format_fixed2(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.2}", value)
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number(value))
}

pub fn format_change(value: f64) -> String {
    format!("{}% vs last period", format_number(value))
}

/// One-decimal share used by report category tables.
pub fn format_share(value: f64) -> String {
    if !value.is_finite() {
        return "0.0%".to_string();
    }
    format!("{:.1}%", value)
}

/// Short month, day and year, e.g. `Jan 5, 2024`. Unparseable input is returned as-is.
pub fn format_date(raw: &str) -> String {
    let trimmed = raw.trim();
    let date = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(12345.6), "$12,345.60");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(-5.0), "-$5.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(f64::NAN), NOT_AVAILABLE);
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(8.0), "8% vs last period");
        assert_eq!(format_change(-2.5), "-2.5% vs last period");
        assert_eq!(format_change(0.0), "0% vs last period");
    }

    #[test]
    fn test_format_number_and_count() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(3.25), "3.25");
        assert_eq!(format_count(1_250_000), "1,250,000");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_fixed2(2.0), "2.00");
    }

    #[test]
    fn test_format_share_precision() {
        assert_eq!(format_share(33.333), "33.3%");
        assert_eq!(format_share(f64::NAN), "0.0%");
        assert_eq!(format_percent(42.0), "42%");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-05"), "Jan 5, 2024");
        assert_eq!(format_date("2024-03-17T10:15:00Z"), "Mar 17, 2024");
        assert_eq!(format_date("2024-12-01T08:00:00"), "Dec 1, 2024");
        assert_eq!(format_date("yesterday"), "yesterday");
    }
}
