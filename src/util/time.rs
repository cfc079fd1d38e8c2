use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTimestampError {
    #[error("timestamp is empty")]
    Empty,
    #[error("timestamp {0} is out of range")]
    OutOfRange(i64),
    #[error("unrecognised timestamp {0:?}: expected RFC 3339, YYYY-MM-DD or a unix time")]
    Unrecognised(String),
}

/// Parse a command-line timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T12:00:00Z`), a naive `YYYY-MM-DD HH:MM:SS`
/// or `YYYY-MM-DD` taken as UTC, or an integer unix time in seconds
/// (milliseconds when `millis` is set).
pub fn parse_timestamp(input: &str, millis: bool) -> Result<DateTime<Utc>, ParseTimestampError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseTimestampError::Empty);
    }

    if let Ok(n) = input.parse::<i64>() {
        let parsed = if millis {
            DateTime::from_timestamp_millis(n)
        } else {
            DateTime::from_timestamp(n, 0)
        };
        return parsed.ok_or(ParseTimestampError::OutOfRange(n));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, pattern) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    Err(ParseTimestampError::Unrecognised(input.to_string()))
}
