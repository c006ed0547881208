//! Conversions between minor currency units and their decimal text form.

use std::collections::HashMap;

use tera::Value;

/// Render an amount in minor units as `"1234.50"`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Parse a non-negative decimal amount (`"12"`, `"12.5"`, `"12,50"`) into
/// minor units. More than two fractional digits are rejected.
pub fn parse_cents(input: &str) -> Option<i64> {
    let normalized: String = input
        .trim()
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| if ch == ',' { '.' } else { ch })
        .collect();

    if normalized.is_empty() {
        return None;
    }

    let (whole, fraction) = match normalized.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (normalized.as_str(), ""),
    };

    if fraction.len() > 2 || !fraction.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let fraction: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };

    whole.checked_mul(100)?.checked_add(fraction)
}

/// Tera filter rendering an integer amount of minor units: `{{ item.price_cents | money }}`.
pub fn money_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    match value.as_i64() {
        Some(cents) => Ok(Value::String(format_cents(cents))),
        None => Err(tera::Error::msg(format!(
            "Filter `money` expects an integer, got `{value}`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_cents_pads_fraction() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(123450), "1234.50");
        assert_eq!(format_cents(-250), "-2.50");
    }

    #[test]
    fn parse_cents_accepts_common_formats() {
        assert_eq!(parse_cents("12"), Some(1200));
        assert_eq!(parse_cents("12.5"), Some(1250));
        assert_eq!(parse_cents(" 12,50 "), Some(1250));
        assert_eq!(parse_cents("1 200.00"), Some(120000));
        assert_eq!(parse_cents(".99"), Some(99));
    }

    #[test]
    fn parse_cents_rejects_invalid_values() {
        assert_eq!(parse_cents(""), None);
        assert_eq!(parse_cents("."), None);
        assert_eq!(parse_cents("-1"), None);
        assert_eq!(parse_cents("1.234"), None);
        assert_eq!(parse_cents("abc"), None);
        assert_eq!(parse_cents("1.2.3"), None);
    }

    #[test]
    fn money_filter_formats_integers() {
        let rendered = money_filter(&Value::from(1999), &HashMap::new()).expect("filter");
        assert_eq!(rendered, Value::String("19.99".to_string()));

        assert!(money_filter(&Value::from("abc"), &HashMap::new()).is_err());
    }
}
