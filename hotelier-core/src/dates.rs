use chrono::{DateTime, NaiveDate, NaiveDateTime};
use crate::{CoreError, CoreResult};

const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Parses a booking date down to its calendar day.
///
/// Accepts a bare `YYYY-MM-DD`, a local date-time, or an RFC 3339 timestamp.
/// Time-of-day (and offset) is dropped; the day as written is what counts.
pub fn parse_booking_date(raw: &str) -> CoreResult<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::InvalidInput("date is required".to_string()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.date_naive());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
        .ok_or_else(|| CoreError::InvalidInput(format!("invalid date: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_plain_date() {
        assert_eq!(parse_booking_date("2024-06-10").unwrap(), day(2024, 6, 10));
    }

    #[test]
    fn test_time_of_day_is_dropped() {
        assert_eq!(parse_booking_date("2024-01-05T10:00").unwrap(), day(2024, 1, 5));
        assert_eq!(parse_booking_date("2024-01-05T22:00:00").unwrap(), day(2024, 1, 5));
        assert_eq!(parse_booking_date("2024-01-05T22:00:00.125").unwrap(), day(2024, 1, 5));
    }

    #[test]
    fn test_rfc3339_keeps_written_day() {
        assert_eq!(parse_booking_date("2024-01-05T23:30:00-05:00").unwrap(), day(2024, 1, 5));
        assert_eq!(parse_booking_date("2024-01-05T00:00:00Z").unwrap(), day(2024, 1, 5));
    }

    #[test]
    fn test_garbage_is_invalid_input() {
        assert!(matches!(parse_booking_date("next tuesday"), Err(CoreError::InvalidInput(_))));
        assert!(matches!(parse_booking_date("2024-02-30"), Err(CoreError::InvalidInput(_))));
        assert!(matches!(parse_booking_date("  "), Err(CoreError::InvalidInput(_))));
    }
}
