//! Signature chain parsing and validation.
//!
//! The signature header carries three base64url tokens separated by single
//! spaces:
//!
//! ```text
//! <signature> <ephemeral public key> <endorsement>
//! ```
//!
//! - `signature` — detached signature over the canonical request string,
//!   made with the ephemeral key.
//! - `ephemeral public key` — the per-request key whose authority derives
//!   entirely from the endorsement.
//! - `endorsement` — the trusted root key's signature over the raw bytes of
//!   the ephemeral public key.
//!
//! A chain is valid only when the endorsement verifies under the root key
//! AND the body signature verifies under the ephemeral key; neither check
//! alone is sufficient.

use tracing::debug;

use crate::base64url;
use crate::crypto::SignatureVerifier;
use crate::error::AuthError;

/// The three decoded components of a signature header.
///
/// Constructed once per verification attempt from the header string and
/// discarded after use; never mutated.
#[derive(Debug, Clone)]
pub struct SignatureChain {
    signature: Vec<u8>,
    ephemeral_public_key: Vec<u8>,
    endorsement: Vec<u8>,
}

impl SignatureChain {
    /// Parse a signature header value into its three components.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedChain`] unless splitting on single
    /// spaces yields exactly three tokens, and
    /// [`AuthError::MalformedEncoding`] if any token is not valid base64url.
    pub fn parse(header_value: &str) -> Result<Self, AuthError> {
        let parts: Vec<&str> = header_value.split(' ').collect();
        let [signature, public_key, endorsement] = parts.as_slice() else {
            return Err(AuthError::MalformedChain);
        };

        Ok(Self {
            signature: base64url::decode(signature)?,
            ephemeral_public_key: base64url::decode(public_key)?,
            endorsement: base64url::decode(endorsement)?,
        })
    }

    /// The ephemeral public key carried by the chain.
    #[must_use]
    pub fn ephemeral_public_key(&self) -> &[u8] {
        &self.ephemeral_public_key
    }

    /// Validate the chain against the trusted root key and the canonical
    /// request string.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::KeyNotEndorsed`] if the endorsement does not
    /// verify under `root_key` over the ephemeral public key bytes, or
    /// [`AuthError::BodyNotSigned`] if the signature does not verify under
    /// the ephemeral key over the UTF-8 bytes of `canonical_body`.
    pub fn validate(
        &self,
        root_key: &[u8],
        canonical_body: &str,
        crypto: &dyn SignatureVerifier,
    ) -> Result<(), AuthError> {
        if !crypto.verify(root_key, &self.ephemeral_public_key, &self.endorsement) {
            debug!("Ephemeral key endorsement did not verify under root key");
            return Err(AuthError::KeyNotEndorsed);
        }

        if !crypto.verify(
            &self.ephemeral_public_key,
            canonical_body.as_bytes(),
            &self.signature,
        ) {
            debug!("Canonical body signature did not verify under ephemeral key");
            return Err(AuthError::BodyNotSigned);
        }

        debug!("Signature chain verified");
        Ok(())
    }
}
