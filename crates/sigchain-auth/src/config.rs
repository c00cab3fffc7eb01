//! Verifier configuration.
//!
//! Configuration is driven by environment variables; everything has a
//! default except the root key, which has no meaningful default and must be
//! supplied by the deployment.

use crate::freshness::DEFAULT_FRESHNESS_WINDOW_SECS;

/// Configuration for a [`crate::Verifier`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    /// The trusted root public key, base64url-encoded (lenient of standard
    /// alphabet and padding).
    pub root_key: String,
    /// The freshness acceptance window in seconds.
    pub freshness_window_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            root_key: String::new(),
            freshness_window_secs: DEFAULT_FRESHNESS_WINDOW_SECS,
        }
    }
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `SIGCHAIN_ROOT_KEY` and `SIGCHAIN_FRESHNESS_WINDOW_SECS`;
    /// unset or unparseable variables leave the defaults in place.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("SIGCHAIN_ROOT_KEY") {
            config.root_key = v;
        }
        if let Ok(v) = std::env::var("SIGCHAIN_FRESHNESS_WINDOW_SECS") {
            if let Ok(secs) = v.parse() {
                config.freshness_window_secs = secs;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_default_config() {
        let config = AuthConfig::default();
        assert!(config.root_key.is_empty());
        assert_eq!(config.freshness_window_secs, 300);
    }

    #[test]
    fn test_should_round_trip_through_json() {
        let config = AuthConfig {
            root_key: "PY7wu3q3-adYr9-0ES6CMRixup9OjO5iL7EFDFpolhk".to_owned(),
            freshness_window_secs: 60,
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AuthConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.root_key, config.root_key);
        assert_eq!(parsed.freshness_window_secs, 60);
    }
}
