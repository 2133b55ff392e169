//! Date helper functions

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Formats that carry their own UTC offset
const OFFSET_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S %:z",
    "%Y-%m-%d %H:%M:%S%.f %:z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Formats interpreted in the configured time zone
const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a front-matter timestamp.
///
/// Timestamps without an offset are placed in `tz`. Returns `None` when the
/// string matches no known format, or when the local time does not exist in
/// `tz` (a DST gap).
///
/// # Examples
/// ```ignore
/// parse_timestamp("2020-12-17T00:00:00", &chrono_tz::UTC) // -> 2020-12-17T00:00:00+00:00
/// parse_timestamp("2020-12-17 09:00:00 +0900", &chrono_tz::UTC) // -> keeps +09:00
/// ```
pub fn parse_timestamp(s: &str, tz: &Tz) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return localize(naive, tz);
        }
    }

    // Bare dates mean midnight
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    localize(date.and_hms_opt(0, 0, 0)?, tz)
}

fn localize(naive: NaiveDateTime, tz: &Tz) -> Option<DateTime<FixedOffset>> {
    // Ambiguous fall-back times resolve to the earlier instant
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.fixed_offset())
}

/// Format a timestamp the way `new` writes it into front matter
pub fn format_timestamp<Tz2: TimeZone>(date: &DateTime<Tz2>) -> String
where
    Tz2::Offset: std::fmt::Display,
{
    date.format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_naive_iso() {
        let dt = parse_timestamp("2020-12-17T00:00:00", &chrono_tz::UTC).unwrap();
        assert_eq!(dt.to_rfc3339(), "2020-12-17T00:00:00+00:00");
    }

    #[test]
    fn test_parse_keeps_offset() {
        let dt = parse_timestamp("2020-12-17 09:30:00 +0900", &chrono_tz::UTC).unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 9 * 3600);
        assert_eq!(dt.format("%H:%M").to_string(), "09:30");

        let dt = parse_timestamp("2020-12-17T09:30:00+09:00", &chrono_tz::UTC).unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_parse_naive_in_zone() {
        let dt = parse_timestamp("2020-12-17 12:00", &chrono_tz::Asia::Seoul).unwrap();
        assert_eq!(dt.to_rfc3339(), "2020-12-17T12:00:00+09:00");
    }

    #[test]
    fn test_parse_bare_date() {
        let dt = parse_timestamp("2020-12-17", &chrono_tz::UTC).unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2020-12-17 00:00:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("", &chrono_tz::UTC).is_none());
        assert!(parse_timestamp("last tuesday", &chrono_tz::UTC).is_none());
        assert!(parse_timestamp("2020-13-40", &chrono_tz::UTC).is_none());
        assert!(parse_timestamp("2020-02-30T00:00:00", &chrono_tz::UTC).is_none());
    }

    #[test]
    fn test_format_round_trips() {
        let dt = parse_timestamp("2021-03-04T05:06:07+02:00", &chrono_tz::UTC).unwrap();
        let text = format_timestamp(&dt);
        assert_eq!(text, "2021-03-04T05:06:07+02:00");
        assert_eq!(parse_timestamp(&text, &chrono_tz::UTC), Some(dt));
    }
}
