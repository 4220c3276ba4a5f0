//! Timestamp utilities

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// Convert a filesystem timestamp (e.g. mtime) to UTC
pub fn from_system_time(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}

/// Format a timestamp the way the store persists it
pub fn to_db_string(time: &DateTime<Utc>) -> String {
    time.to_rfc3339()
}

/// Parse a persisted RFC 3339 timestamp
pub fn parse_db_string(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::CorruptRecord(format!("Invalid stored timestamp {:?}: {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_from_system_time_preserves_seconds() {
        let time = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        assert_eq!(from_system_time(time).timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_db_string_round_trip_keeps_subsecond_precision() {
        let time = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let parsed = parse_db_string(&to_db_string(&time)).unwrap();
        assert_eq!(parsed, time);
    }

    #[test]
    fn test_parse_db_string_rejects_garbage() {
        let result = parse_db_string("yesterday");
        assert!(matches!(result, Err(Error::CorruptRecord(_))));
    }
}
