use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// Export timestamps look like `"2024-01-10 08:00:00 +0100"`.
const EXPORT_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S %z";
const NAIVE_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";
const CALENDAR_DATE: &str = "%Y-%m-%d";

/// Parse an export timestamp, keeping the offset it was recorded with.
///
/// Accepts the export's own format, RFC 3339, an offset-less
/// `YYYY-MM-DD HH:MM:SS` and a bare `YYYY-MM-DD`; the last two are read as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_str(s, EXPORT_TIMESTAMP) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    let naive = NaiveDateTime::parse_from_str(s, NAIVE_TIMESTAMP)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, CALENDAR_DATE)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;
    Some(naive.and_utc().fixed_offset())
}

/// Timestamp → millis since the epoch (UTC).
pub fn parse_timestamp_millis(s: &str) -> Option<i64> {
    parse_timestamp(s).map(|dt| dt.timestamp_millis())
}

/// Calendar date of a date or timestamp string, in the offset it carries.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, CALENDAR_DATE)
        .ok()
        .or_else(|| parse_timestamp(s).map(|dt| dt.date_naive()))
}

/// Strict `YYYY-MM-DD`, as used by the profile's date of birth.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), CALENDAR_DATE).ok()
}

/// Days since 1970-01-01, the Arrow `Date32` encoding.
pub fn days_since_epoch(date: NaiveDate) -> i32 {
    (date - DateTime::<Utc>::UNIX_EPOCH.date_naive()).num_days() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_export_format_with_offset() {
        let dt = parse_timestamp("2024-01-10 08:00:00 +0100").unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 3600);
        assert_eq!(
            parse_timestamp_millis("2024-01-10 08:00:00 +0100"),
            parse_timestamp_millis("2024-01-10 07:00:00 +0000")
        );
    }

    #[test]
    fn parses_fallback_formats() {
        assert!(parse_timestamp("2024-01-10T08:00:00Z").is_some());
        assert_eq!(
            parse_timestamp_millis("2024-01-10 08:00:00"),
            parse_timestamp_millis("2024-01-10 08:00:00 +0000")
        );
        assert_eq!(parse_timestamp_millis("1970-01-02"), Some(86_400_000));
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn dates_keep_the_recorded_offset() {
        // 22:30 UTC on the 10th
        assert_eq!(
            parse_date("2024-01-11 00:30:00 +0200"),
            NaiveDate::from_ymd_opt(2024, 1, 11)
        );
        assert_eq!(parse_date("2024-01-11"), NaiveDate::from_ymd_opt(2024, 1, 11));
        assert_eq!(parse_date("11/01/2024"), None);
    }

    #[test]
    fn calendar_dates_are_strict() {
        assert_eq!(
            parse_calendar_date("1990-06-15"),
            NaiveDate::from_ymd_opt(1990, 6, 15)
        );
        assert_eq!(parse_calendar_date("1990-06-15 00:00:00 +0000"), None);
        assert_eq!(parse_calendar_date("1990-13-01"), None);
    }

    #[test]
    fn epoch_days() {
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()), 0);
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(1970, 1, 11).unwrap()), 10);
        assert_eq!(days_since_epoch(NaiveDate::from_ymd_opt(1969, 12, 31).unwrap()), -1);
    }
}
