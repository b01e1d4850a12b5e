//! Utility functions for timestamp handling.
//!
//! This module provides ISO timestamp formatting and an injectable clock
//! so generated output can be made deterministic.

pub mod timestamps;

pub use timestamps::{
    format_iso, iso_timestamp, parse_timestamp, Clock, FixedClock, SystemClock, Timestamp,
    TimestampError,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_timestamp_format() {
        let ts = iso_timestamp();
        assert!(ts.contains('T'));
        assert!(ts.contains(':'));
        assert!(parse_timestamp(&ts).is_ok());
    }
}
