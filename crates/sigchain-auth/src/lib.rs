//! Endorsed-key signature chain authentication for inbound HTTP requests.
//!
//! This crate answers one question: was this exact request produced,
//! recently, by a key that a trusted root has vouched for? Requests carry a
//! three-part signature header — a detached signature over a canonical
//! rendering of the request, the ephemeral public key that made it, and the
//! root key's endorsement of that ephemeral key. Verification rebuilds the
//! canonical string byte-for-byte and checks both links of the chain.
//!
//! # Overview
//!
//! The sender declares which headers it signed (`x-signed-headers`), signs
//! the canonical request with a per-request ephemeral key, and attaches the
//! chain (`x-signature`). The verifier holds only the long-lived root
//! public key: the ephemeral key's authority derives entirely from the
//! endorsement, so key rotation on the sending side never touches verifier
//! configuration.
//!
//! # Usage
//!
//! ```rust
//! use sigchain_auth::Verifier;
//!
//! let verifier = Verifier::new("PY7wu3q3-adYr9-0ES6CMRixup9OjO5iL7EFDFpolhk").unwrap();
//!
//! // For an incoming request, collect the body and pass the request head:
//! // verifier.verify(&parts, &body)?;
//! ```
//!
//! Verification is synchronous, stateless, and fail-fast; a `Verifier` is
//! safely shared across concurrent requests.
//!
//! # Modules
//!
//! - [`base64url`] - URL-safe base64 decoding for chain material
//! - [`canonical`] - Canonical request construction
//! - [`chain`] - Signature chain parsing and validation
//! - [`config`] - Environment-driven configuration
//! - [`crypto`] - The Ed25519 capability and its trait seam
//! - [`error`] - Verification error types
//! - [`freshness`] - Request freshness policy
//! - [`header`] - Header name canonicalization
//! - [`timestamp`] - Timestamp parsing and the canonical date profile
//! - [`verifier`] - The verification orchestrator

pub mod base64url;
pub mod canonical;
pub mod chain;
pub mod config;
pub mod crypto;
pub mod error;
pub mod freshness;
pub mod header;
pub mod timestamp;
pub mod verifier;

pub use chain::SignatureChain;
pub use config::AuthConfig;
pub use crypto::{Ed25519Verifier, SignatureVerifier};
pub use error::{AuthError, ErrorKind};
pub use freshness::{FreshnessPolicy, SystemClockFreshness};
pub use verifier::{AuthResult, Verifier};
