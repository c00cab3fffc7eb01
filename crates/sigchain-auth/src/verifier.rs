//! Request verification orchestration.
//!
//! [`Verifier`] ties the pieces together into a single pass/fail decision
//! per request:
//!
//! 1. Require the signature, signed-headers, and date headers.
//! 2. Judge the date against the freshness policy.
//! 3. Parse the signature chain header.
//! 4. Build the canonical request string.
//! 5. Validate the chain against the trusted root key.
//!
//! Verification is single-shot and fail-fast: the first failure is raised
//! immediately, nothing is retried, and there is no partial result. A
//! `Verifier` holds only immutable configuration, so one instance can serve
//! any number of concurrent verifications, and differently-configured
//! instances (per-tenant root keys) can coexist.

use std::fmt;

use tracing::debug;

use crate::base64url;
use crate::canonical::{DATE_HEADER, SIGNED_HEADERS_HEADER, build_canonical_request};
use crate::chain::SignatureChain;
use crate::config::AuthConfig;
use crate::crypto::{Ed25519Verifier, SignatureVerifier};
use crate::error::AuthError;
use crate::freshness::{FreshnessPolicy, SystemClockFreshness};

/// Name of the header carrying the signature chain.
pub const SIGNATURE_HEADER: &str = "x-signature";

/// The result of a successful verification.
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// The endorsed ephemeral public key that signed the request.
    pub ephemeral_public_key: Vec<u8>,
    /// The header names that participated in the signature, in declared order.
    pub signed_headers: Vec<String>,
}

/// Verifies that inbound requests were signed by a key the trusted root has
/// endorsed.
pub struct Verifier {
    root_key: Vec<u8>,
    freshness: Box<dyn FreshnessPolicy>,
    crypto: Box<dyn SignatureVerifier>,
}

impl fmt::Debug for Verifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verifier")
            .field("root_key_len", &self.root_key.len())
            .finish_non_exhaustive()
    }
}

impl Verifier {
    /// Create a verifier with production capabilities: the system wall
    /// clock with a 5-minute window, and Ed25519.
    ///
    /// The root key text is lenient of base64 variants — standard-alphabet
    /// or padded material is normalized before decoding.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedEncoding`] if the key text does not
    /// decode.
    pub fn new(root_key: &str) -> Result<Self, AuthError> {
        Self::with_capabilities(
            root_key,
            Box::new(SystemClockFreshness::default()),
            Box::new(Ed25519Verifier),
        )
    }

    /// Create a verifier with explicit freshness and signature capabilities.
    ///
    /// This is the injection seam: tests substitute a fixed clock or a
    /// fixed-verdict signature primitive here.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedEncoding`] if the key text does not
    /// decode.
    pub fn with_capabilities(
        root_key: &str,
        freshness: Box<dyn FreshnessPolicy>,
        crypto: Box<dyn SignatureVerifier>,
    ) -> Result<Self, AuthError> {
        let root_key = base64url::decode(&base64url::normalize_key(root_key))?;
        Ok(Self {
            root_key,
            freshness,
            crypto,
        })
    }

    /// Create a verifier from configuration, with production capabilities.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedEncoding`] if the configured key does
    /// not decode.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        Self::with_capabilities(
            &config.root_key,
            Box::new(SystemClockFreshness::new(config.freshness_window_secs)),
            Box::new(Ed25519Verifier),
        )
    }

    /// Verify a request against the trusted root key.
    ///
    /// `parts` are the request head; `body` is the collected request body.
    /// On success, returns the endorsed ephemeral key and the signed-header
    /// list; every failure is an error — there is no silent-false outcome.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] of kind `InvalidHeaders` if the signature,
    /// signed-headers, or date header is missing, or the date is outside
    /// the freshness window; of kind `InvalidSignature` if the chain is
    /// malformed or either signature fails to verify.
    pub fn verify(
        &self,
        parts: &http::request::Parts,
        body: &[u8],
    ) -> Result<AuthResult, AuthError> {
        let signature_header =
            first_header_value(parts, SIGNATURE_HEADER).ok_or(AuthError::MissingSignatureHeader)?;
        let signed_headers_value = first_header_value(parts, SIGNED_HEADERS_HEADER)
            .ok_or(AuthError::MissingSignedHeaders)?;
        let date_value = first_header_value(parts, DATE_HEADER).ok_or(AuthError::MissingDate)?;

        if !self.freshness.is_fresh(date_value) {
            debug!(date = %date_value, "Date header outside freshness window");
            return Err(AuthError::StaleDate);
        }

        let chain = SignatureChain::parse(signature_header)?;

        let signed_names: Vec<&str> = signed_headers_value.split(' ').collect();

        debug!(
            method = %parts.method,
            uri = %parts.uri,
            signed_headers = %signed_headers_value,
            "Verifying request signature chain"
        );

        let canonical = build_canonical_request(parts, body, &signed_names)?;

        chain.validate(&self.root_key, &canonical, self.crypto.as_ref())?;

        debug!("Request verified");

        Ok(AuthResult {
            ephemeral_public_key: chain.ephemeral_public_key().to_vec(),
            signed_headers: signed_names.iter().map(|&name| name.to_owned()).collect(),
        })
    }
}

/// The first value of a header as a string, if present and readable.
fn first_header_value<'a>(parts: &'a http::request::Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|value| value.to_str().ok())
}
