//! Timestamp utilities.

use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

/// A UTC timestamp.
pub type Timestamp = DateTime<Utc>;

/// Errors that can occur during timestamp parsing.
#[derive(Debug, Error)]
pub enum TimestampError {
    /// The timestamp string is empty.
    #[error("Empty timestamp string")]
    EmptyString,

    /// The timestamp value is invalid.
    #[error("Invalid timestamp: {0}")]
    InvalidFormat(String),
}

/// Formats a timestamp as ISO 8601 with millisecond precision and a `Z`
/// suffix, e.g. `2024-05-01T12:00:00.000Z`.
#[must_use]
pub fn format_iso(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Returns the current UTC time formatted with [`format_iso`].
///
/// # Examples
///
/// ```
/// use seamgen::utils::iso_timestamp;
///
/// let ts = iso_timestamp();
/// assert!(ts.contains('T'));
/// assert!(ts.ends_with('Z'));
/// ```
#[must_use]
pub fn iso_timestamp() -> String {
    format_iso(&Utc::now())
}

/// Parses an RFC 3339 timestamp into UTC.
///
/// # Errors
///
/// Returns [`TimestampError`] if the input is empty or not RFC 3339.
pub fn parse_timestamp(input: &str) -> Result<Timestamp, TimestampError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimestampError::EmptyString);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| TimestampError::InvalidFormat(trimmed.to_string()))
}

/// Source of the current time.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Returns the current time.
    fn now(&self) -> Timestamp;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Timestamp);

impl FixedClock {
    /// Creates a clock frozen at the given RFC 3339 instant.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampError`] if `input` cannot be parsed.
    pub fn parse(input: &str) -> Result<Self, TimestampError> {
        parse_timestamp(input).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_iso_millis_z() {
        let ts = parse_timestamp("2024-05-01T12:00:00+00:00").unwrap();
        assert_eq!(format_iso(&ts), "2024-05-01T12:00:00.000Z");
    }

    #[test]
    fn test_parse_converts_offsets_to_utc() {
        let ts = parse_timestamp("2024-05-01T14:30:00+02:00").unwrap();
        assert_eq!(format_iso(&ts), "2024-05-01T12:30:00.000Z");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse_timestamp("  "), Err(TimestampError::EmptyString)));
        assert!(matches!(
            parse_timestamp("yesterday"),
            Err(TimestampError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_fixed_clock_is_frozen() {
        let clock = FixedClock::parse("2024-01-02T03:04:05Z").unwrap();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(format_iso(&clock.now()), "2024-01-02T03:04:05.000Z");
    }

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
