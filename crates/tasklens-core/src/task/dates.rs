//! Date parsing and calendar comparisons for task date strings.
//!
//! Task dates arrive as strings from the hosting application. A string that
//! does not parse is treated as absent; none of these helpers fail.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an RFC 3339 timestamp.
pub fn parse_instant(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw.trim()).ok()
}

/// Parse a date or date-time string into the calendar day it names.
///
/// RFC 3339 values keep the day as written in their own offset, so
/// `2024-05-01T23:30:00-05:00` is May 1st.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(instant) = parse_instant(raw) {
        return Some(instant.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Whether two days are the same calendar day.
pub fn same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

/// Whether two days fall in the same ISO 8601 week (Monday start).
pub fn same_week(a: NaiveDate, b: NaiveDate) -> bool {
    a.iso_week() == b.iso_week()
}

/// Whether the date string lies strictly before `now`.
///
/// Full timestamps compare as instants. Date-only strings compare by
/// calendar day against `now`'s day in `now`'s offset, so a task due today
/// is not yet overdue.
pub fn is_before(raw: &str, now: &DateTime<FixedOffset>) -> bool {
    if let Some(instant) = parse_instant(raw) {
        return instant < *now;
    }
    parse_calendar_date(raw).is_some_and(|day| day < now.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-06-12T10:00:00+00:00").unwrap()
    }

    #[test]
    fn parses_supported_formats() {
        assert_eq!(parse_calendar_date("2024-06-12"), Some(day(2024, 6, 12)));
        assert_eq!(parse_calendar_date("2024-06-12T08:30:00Z"), Some(day(2024, 6, 12)));
        assert_eq!(parse_calendar_date("2024-06-12T08:30:00.250"), Some(day(2024, 6, 12)));
        assert_eq!(parse_calendar_date("2024-06-12 08:30:00"), Some(day(2024, 6, 12)));
        assert_eq!(parse_calendar_date(" 2024-06-12 "), Some(day(2024, 6, 12)));
    }

    #[test]
    fn rfc3339_keeps_written_day() {
        assert_eq!(
            parse_calendar_date("2024-05-01T23:30:00-05:00"),
            Some(day(2024, 5, 1))
        );
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("tomorrow"), None);
        assert_eq!(parse_calendar_date("2024-13-40"), None);
    }

    #[test]
    fn iso_week_starts_monday() {
        // 2024-06-10 is a Monday, 2024-06-16 a Sunday.
        assert!(same_week(day(2024, 6, 10), day(2024, 6, 16)));
        assert!(!same_week(day(2024, 6, 16), day(2024, 6, 17)));
        assert!(!same_week(day(2023, 6, 12), day(2024, 6, 12)));
    }

    #[test]
    fn iso_week_spans_year_boundary() {
        // 2024-12-30 (Mon) and 2025-01-01 (Wed) share ISO week 2025-W01.
        assert!(same_week(day(2024, 12, 30), day(2025, 1, 1)));
    }

    #[test]
    fn date_only_due_today_is_not_before() {
        assert!(!is_before("2024-06-12", &now()));
        assert!(is_before("2024-06-11", &now()));
        assert!(!is_before("2024-06-13", &now()));
    }

    #[test]
    fn timestamps_compare_as_instants() {
        assert!(is_before("2024-06-12T09:59:00Z", &now()));
        assert!(!is_before("2024-06-12T10:00:00Z", &now()));
        assert!(!is_before("garbage", &now()));
    }
}
