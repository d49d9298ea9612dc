//! Display strings attached to API responses so every client renders them alike.

use chrono::{DateTime, Utc};

/// `"$55,000 - $75,000"`; currencies without a known symbol use the ISO code.
pub fn format_salary(min: i64, max: i64, currency: &str) -> String {
    format!("{} - {}", format_amount(min, currency), format_amount(max, currency))
}

fn format_amount(amount: i64, currency: &str) -> String {
    let digits = group_thousands(amount.unsigned_abs());
    let sign = if amount < 0 { "-" } else { "" };
    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{digits}"),
        None => format!("{sign}{} {digits}", currency.to_uppercase()),
    }
}

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency.to_uppercase().as_str() {
        "USD" => Some("$"),
        "GBP" => Some("£"),
        "EUR" => Some("€"),
        _ => None,
    }
}

fn group_thousands(n: u64) -> String {
    let raw = n.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Relative age: `Just now`, `5m ago`, `3h ago`, `2d ago`, then `Jan 10, 2024`.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    match secs {
        s if s < 60 => "Just now".to_string(),
        s if s < 3_600 => format!("{}m ago", s / 60),
        s if s < 86_400 => format!("{}h ago", s / 3_600),
        s if s < 604_800 => format!("{}d ago", s / 86_400),
        _ => then.format("%b %-d, %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_salary_usd() {
        assert_eq!(format_salary(55_000, 75_000, "USD"), "$55,000 - $75,000");
    }

    #[test]
    fn test_salary_other_currencies() {
        assert_eq!(format_salary(900, 1_250_000, "eur"), "€900 - €1,250,000");
        assert_eq!(format_salary(40_000, 60_000, "CAD"), "CAD 40,000 - CAD 60,000");
    }

    #[test]
    fn test_group_thousands_edges() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(100_000), "100,000");
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap();
        assert_eq!(time_ago(now - Duration::seconds(30), now), "Just now");
        assert_eq!(time_ago(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(time_ago(now - Duration::hours(3), now), "3h ago");
        assert_eq!(time_ago(now - Duration::days(2), now), "2d ago");
        assert_eq!(
            time_ago(Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap(), now),
            "Jan 10, 2024"
        );
    }

    #[test]
    fn test_future_timestamp_is_just_now() {
        let now = Utc.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap();
        assert_eq!(time_ago(now + Duration::hours(1), now), "Just now");
    }
}
