//! Display Formatting
//!
//! Currency, date and text helpers used by the views.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Format an amount as dollars with thousands separators: `$1,234.50`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let rem = cents % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, rem)
}

/// Whole-number percentage: `12.5` -> `13%`.
pub fn format_percent(value: f64) -> String {
    format!("{}%", value.round() as i64)
}

/// `Mar 5, 2024`
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y").to_string()
}

/// `Mar 5, 2024 14:30`
pub fn format_date_time(dt: &DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y %H:%M").to_string()
}

/// Optional timestamp for list rows; missing dates render as a dash.
pub fn format_opt_date(dt: Option<&DateTime<Utc>>) -> String {
    dt.map(format_date).unwrap_or_else(|| "-".to_string())
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}

/// Relative age used in notification lists. Older than a week (or in the
/// future) falls back to the calendar date.
pub fn format_relative(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let secs = (*now - *then).num_seconds();
    match secs {
        s if s < 0 => format_date(then),
        s if s < 60 => "just now".to_string(),
        s if s < 3_600 => plural(s / 60, "minute"),
        s if s < 86_400 => plural(s / 3_600, "hour"),
        s if s < 7 * 86_400 => plural(s / 86_400, "day"),
        _ => format_date(then),
    }
}

/// Parse the timestamp shapes the backend emits. Naive values are UTC.
pub fn parse_backend_date(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, pattern) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Cut `text` to at most `max` characters, ending with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(9.5), "$9.50");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-3.0), "-$3.00");
        assert_eq!(format_currency(19.999), "$20.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(12.5), "13%");
        assert_eq!(format_percent(20.0), "20%");
    }

    #[test]
    fn test_format_dates() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap();
        assert_eq!(format_date(&dt), "Mar 5, 2024");
        assert_eq!(format_date_time(&dt), "Mar 5, 2024 14:30");
        assert_eq!(format_opt_date(None), "-");
    }

    #[test]
    fn test_format_relative() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let ago = |secs: i64| now - chrono::Duration::seconds(secs);
        assert_eq!(format_relative(&ago(10), &now), "just now");
        assert_eq!(format_relative(&ago(60), &now), "1 minute ago");
        assert_eq!(format_relative(&ago(300), &now), "5 minutes ago");
        assert_eq!(format_relative(&ago(3 * 3600), &now), "3 hours ago");
        assert_eq!(format_relative(&ago(2 * 86_400), &now), "2 days ago");
        assert_eq!(format_relative(&ago(30 * 86_400), &now), "Feb 9, 2024");
    }

    #[test]
    fn test_parse_backend_date_shapes() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(parse_backend_date("2024-01-02T03:04:05Z"), Some(expected));
        assert_eq!(parse_backend_date("2024-01-02T05:04:05+02:00"), Some(expected));
        assert_eq!(parse_backend_date("2024-01-02 03:04:05"), Some(expected));
        assert_eq!(parse_backend_date("2024-01-02T03:04:05.000"), Some(expected));
        assert_eq!(
            parse_backend_date("2024-01-02"),
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_backend_date(""), None);
        assert_eq!(parse_backend_date("yesterday"), None);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer sentence", 8), "a longe…");
        assert_eq!(truncate("ééééé", 3), "éé…");
    }
}
