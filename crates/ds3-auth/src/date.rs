//! `Date` header formatting.

use chrono::{DateTime, Utc};

/// Format a timestamp the way the `Date` request header expects it:
/// `Day, DD Mon YYYY HH:MM:SS GMT`.
#[must_use]
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// The current time formatted for the `Date` header.
///
/// Called at send time, never at request-build time.
#[must_use]
pub fn http_date_now() -> String {
    http_date(Utc::now())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_should_format_rfc1123_date() {
        let at = Utc.with_ymd_and_hms(2026, 2, 28, 12, 0, 5).unwrap();
        assert_eq!(http_date(at), "Sat, 28 Feb 2026 12:00:05 GMT");
    }

    #[test]
    fn test_should_zero_pad_day() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(http_date(at), "Mon, 01 Jan 2024 00:00:00 GMT");
    }
}
