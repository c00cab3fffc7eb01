//! Request freshness checking.
//!
//! A signed request is only accepted while its `date` header is close to the
//! verifier's wall clock; outside that window the request is treated as a
//! replay. The judgment is a capability behind [`FreshnessPolicy`] so a
//! fixed-verdict double can stand in during tests. The production policy is
//! [`SystemClockFreshness`]: the absolute difference between the timestamp
//! and the current time must be strictly under the window (5 minutes by
//! default). The absolute comparison rejects far-future dates the same way
//! it rejects stale ones.

use chrono::{Duration, Utc};

use crate::timestamp::parse_timestamp;

/// The default freshness window: 5 minutes.
pub const DEFAULT_FRESHNESS_WINDOW_SECS: u64 = 300;

/// Trait for judging whether a request timestamp is recent enough.
pub trait FreshnessPolicy: Send + Sync {
    /// Whether `timestamp` is within the acceptance window.
    ///
    /// Returns `false` for stale, far-future, or unparseable input; this is
    /// a judgment, not an error.
    fn is_fresh(&self, timestamp: &str) -> bool;
}

/// Freshness policy backed by the system wall clock.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use sigchain_auth::freshness::{FreshnessPolicy, SystemClockFreshness};
///
/// let policy = SystemClockFreshness::default();
/// assert!(policy.is_fresh(&Utc::now().to_rfc2822()));
/// assert!(!policy.is_fresh("Sun, 05 Mar 2017 23:53:08 +0000"));
/// ```
#[derive(Debug, Clone)]
pub struct SystemClockFreshness {
    window: Duration,
}

impl SystemClockFreshness {
    /// Create a policy with the given acceptance window in seconds.
    #[must_use]
    pub fn new(window_secs: u64) -> Self {
        Self {
            window: Duration::seconds(i64::try_from(window_secs).unwrap_or(i64::MAX)),
        }
    }
}

impl Default for SystemClockFreshness {
    fn default() -> Self {
        Self::new(DEFAULT_FRESHNESS_WINDOW_SECS)
    }
}

impl FreshnessPolicy for SystemClockFreshness {
    fn is_fresh(&self, timestamp: &str) -> bool {
        let Some(instant) = parse_timestamp(timestamp) else {
            return false;
        };
        let age = Utc::now().signed_duration_since(instant).abs();
        age < self.window
    }
}
