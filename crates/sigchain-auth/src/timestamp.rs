//! Timestamp parsing and the canonical date profile.
//!
//! Request date headers arrive in the RFC 2822 form HTTP uses on the wire
//! (`Sun, 05 Mar 2017 23:53:08 +0000`) or already in RFC 3339. When the
//! `date` header participates in the canonical string it is reformatted to
//! a fixed RFC 3339 profile in UTC:
//!
//! ```text
//! yyyy-MM-ddTHH:mm:ssZ
//! ```
//!
//! Normalizing to UTC keeps canonicalization deterministic across host
//! timezones.

use chrono::{DateTime, Utc};

/// The canonical date profile emitted into signed bodies.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse a date header value to an absolute instant.
///
/// Accepts RFC 2822 (the HTTP `Date` wire format) and RFC 3339. Returns
/// `None` for anything else.
///
/// # Examples
///
/// ```
/// use sigchain_auth::timestamp::parse_timestamp;
///
/// assert!(parse_timestamp("Sun, 05 Mar 2017 23:53:08 +0000").is_some());
/// assert!(parse_timestamp("2017-03-05T23:53:08Z").is_some());
/// assert!(parse_timestamp("not a date").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Format an instant using the canonical date profile.
///
/// # Examples
///
/// ```
/// use sigchain_auth::timestamp::{format_canonical, parse_timestamp};
///
/// let instant = parse_timestamp("Sun, 05 Mar 2017 23:53:08 +0000").unwrap();
/// assert_eq!(format_canonical(instant), "2017-03-05T23:53:08Z");
/// ```
#[must_use]
pub fn format_canonical(instant: DateTime<Utc>) -> String {
    instant.format(CANONICAL_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_parse_rfc2822_dates() {
        let instant = parse_timestamp("Sun, 05 Mar 2017 23:53:08 +0000").unwrap();
        assert_eq!(format_canonical(instant), "2017-03-05T23:53:08Z");
    }

    #[test]
    fn test_should_parse_rfc3339_dates() {
        let instant = parse_timestamp("2017-03-05T23:53:08Z").unwrap();
        assert_eq!(format_canonical(instant), "2017-03-05T23:53:08Z");
    }

    #[test]
    fn test_should_normalize_offsets_to_utc() {
        let instant = parse_timestamp("Sun, 05 Mar 2017 23:53:08 +0200").unwrap();
        assert_eq!(format_canonical(instant), "2017-03-05T21:53:08Z");
    }

    #[test]
    fn test_should_reject_unparseable_input() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("05/03/2017").is_none());
    }
}
