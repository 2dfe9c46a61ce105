//! Calendar helpers.
//!
//! Every date in habitual is a `NaiveDate` holding a UTC calendar day, so
//! weekday and day-of-month arithmetic never depends on the local timezone.

use chrono::{Datelike, NaiveDate};

/// Format used for dates on the wire and on the command line.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors raised while parsing calendar input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The text is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid ISO date `{0}` (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, CalendarError> {
    let trimmed = s.trim();
    // chrono accepts unpadded fields; the wire format does not
    if trimmed.len() != 10 {
        return Err(CalendarError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .map_err(|_| CalendarError::InvalidDate(s.to_string()))
}

/// Render a date as `YYYY-MM-DD`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Weekday number with 0 = Sunday .. 6 = Saturday.
pub fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Every calendar day from `start` to `end`, both inclusive.
///
/// Empty when `start > end`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    #[test]
    fn test_parse_and_format() {
        let date = d("2025-09-01");
        assert_eq!(format_iso_date(date), "2025-09-01");
        assert!(parse_iso_date("2025-9-1").is_err());
        assert!(parse_iso_date("2025-02-30").is_err());
        assert!(parse_iso_date("not a date").is_err());
    }

    #[test]
    fn test_weekday_numbers() {
        assert_eq!(weekday_number(d("2025-08-31")), 0); // Sunday
        assert_eq!(weekday_number(d("2025-09-01")), 1);
        assert_eq!(weekday_number(d("2025-09-06")), 6);
    }

    #[test]
    fn test_days_inclusive() {
        let days: Vec<_> = days_inclusive(d("2025-02-27"), d("2025-03-01")).collect();
        assert_eq!(days, vec![d("2025-02-27"), d("2025-02-28"), d("2025-03-01")]);
        assert_eq!(days_inclusive(d("2025-03-02"), d("2025-03-01")).count(), 0);
    }
}
