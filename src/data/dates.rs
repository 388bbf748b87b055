use chrono::{DateTime, NaiveDate, NaiveDateTime};

//datetime layouts seen in broker exports, mt5 first
const DATETIME_FORMATS: &[&str] = &[
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y.%m.%d", "%Y-%m-%d", "%Y/%m/%d"];

//parses a close date cell into a wall-clock timestamp
//offsets are resolved to the offset's local time, so the month a trade lands in
//matches what the broker statement shows
pub fn parse_close_time(raw: &str) -> Option<NaiveDateTime> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_mt5_layout() {
        let dt = parse_close_time("2024.01.05 13:45:10").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 1, 5));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (13, 45, 10));
    }

    #[test]
    fn parses_iso_and_date_only() {
        assert!(parse_close_time("2024-02-01 09:30").is_some());
        assert!(parse_close_time("2024-02-01T09:30:00").is_some());
        let date_only = parse_close_time(" 2024-02-01 ").unwrap();
        assert_eq!(date_only.hour(), 0);
    }

    #[test]
    fn rfc3339_keeps_local_wall_time() {
        let dt = parse_close_time("2024-01-31T23:30:00-05:00").unwrap();
        assert_eq!(dt.month(), 1);
        assert_eq!(dt.day(), 31);
        assert_eq!(dt.hour(), 23);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_close_time("").is_none());
        assert!(parse_close_time("yesterday").is_none());
        assert!(parse_close_time("2024-13-01").is_none());
    }
}
