//! Timestamp formats used by the data file
//!
//! Entities carry local wall-clock times at minute precision
//! (`2026-10-19 14:05`); the document's `last_saved` stamp keeps seconds.
//! Both are stored as plain strings so the file stays human-editable.
//!
//! Reading is lenient: seconds, an ISO `T` separator and RFC 3339 offsets
//! are all accepted. Entity timestamps are written back at minute
//! precision, so seconds in a hand-edited `created` are dropped on the
//! next save. A stamp that cannot be read at all never rejects the
//! document: `created` becomes the load time, the optional stamps become
//! absent.

use chrono::{DateTime, Local, NaiveDateTime, Timelike};
use tracing::warn;

/// Format for `created` / `completed_at`
pub const MINUTE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format for `last_saved`
pub const SECOND_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time truncated to the minute.
///
/// Truncation keeps in-memory values equal to what a save/load cycle
/// produces.
pub fn now_minute() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

/// Current local time truncated to the second.
pub fn now_second() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Further layouts accepted on read, tried in order
const READ_FORMATS: [&str; 4] = [
    SECOND_FORMAT,
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Parse a stored timestamp in any of the accepted layouts
pub fn parse(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let value = value.trim();
    READ_FORMATS
        .iter()
        .fold(NaiveDateTime::parse_from_str(value, MINUTE_FORMAT), |acc, format| {
            acc.or_else(|_| NaiveDateTime::parse_from_str(value, format))
        })
        .or_else(|e| {
            DateTime::parse_from_rfc3339(value)
                .map(|t| t.naive_local())
                .map_err(|_| e)
        })
}

/// [`parse`], or `None` (logged) when the value cannot be read
fn parse_lenient(field: &str, value: &str) -> Option<NaiveDateTime> {
    match parse(value) {
        Ok(t) => Some(t),
        Err(e) => {
            warn!(field, value, error = %e, "unreadable timestamp ignored");
            None
        }
    }
}

/// Serde adapter for minute-precision timestamps
pub mod minute {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.format(super::MINUTE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        Ok(super::parse_lenient("created", &raw).unwrap_or_else(super::now_minute))
    }
}

/// Serde adapter for optional minute-precision timestamps
pub mod minute_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.serialize_str(&v.format(super::MINUTE_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.and_then(|raw| super::parse_lenient("completed_at", &raw)))
    }
}

/// Serde adapter for the optional second-precision `last_saved` stamp
pub mod second_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        s: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.serialize_str(&v.format(super::SECOND_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw.and_then(|raw| super::parse_lenient("last_saved", &raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_minute_has_no_seconds() {
        let now = now_minute();
        assert_eq!(now.second(), 0);
        assert_eq!(now.nanosecond(), 0);
    }

    #[test]
    fn test_parse_both_formats() {
        let a = parse("2026-10-19 14:05").unwrap();
        let b = parse("2026-10-19 14:05:00").unwrap();
        assert_eq!(a, b);
        assert!(parse("yesterday").is_err());
    }

    #[test]
    fn test_parse_iso_layouts() {
        let expected = parse("2024-05-01 08:30:00").unwrap();
        assert_eq!(parse("2024-05-01T08:30:00").unwrap(), expected);
        assert_eq!(parse("2024-05-01T08:30").unwrap(), expected);
        assert_eq!(parse("2024-05-01 08:30:00.250").unwrap().minute(), 30);
        assert_eq!(parse("2024-05-01T08:30:00+02:00").unwrap(), expected);
    }

    #[derive(Debug, serde::Deserialize, serde::Serialize)]
    struct Stamps {
        #[serde(with = "minute")]
        created: NaiveDateTime,
        #[serde(default, with = "minute_opt")]
        completed_at: Option<NaiveDateTime>,
    }

    #[test]
    fn test_unreadable_stamps_do_not_fail_the_record() {
        let stamps: Stamps =
            serde_json::from_str(r#"{"created":"last tuesday","completed_at":"soon"}"#).unwrap();
        assert_eq!(stamps.created.second(), 0);
        assert!(stamps.completed_at.is_none());
    }

    #[test]
    fn test_seconds_are_dropped_on_write() {
        let stamps: Stamps =
            serde_json::from_str(r#"{"created":"2024-05-01 08:30:45"}"#).unwrap();
        let json = serde_json::to_value(&stamps).unwrap();
        assert_eq!(json["created"], "2024-05-01 08:30");
    }
}
