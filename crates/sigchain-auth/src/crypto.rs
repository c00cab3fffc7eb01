//! The signature primitive capability.
//!
//! Chain validation treats the underlying algorithm as an opaque
//! `verify(public_key, message, signature) -> bool` capability behind the
//! [`SignatureVerifier`] trait, so tests can substitute fixed verdicts
//! without touching real key material. The production implementation is
//! [`Ed25519Verifier`]: 32-byte public keys, 64-byte detached signatures.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

/// Trait for verifying a detached signature over a message.
///
/// Implementations decide validity only; malformed keys or signatures are
/// reported as `false`, never as a panic.
pub trait SignatureVerifier: Send + Sync {
    /// Whether `signature` is a valid signature over `message` by the holder
    /// of `public_key`.
    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool;
}

/// The production Ed25519 verification capability.
///
/// # Examples
///
/// ```
/// use sigchain_auth::crypto::{Ed25519Verifier, SignatureVerifier};
///
/// // A truncated key can never verify anything.
/// assert!(!Ed25519Verifier.verify(&[0u8; 31], b"msg", &[0u8; 64]));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        let Ok(key_bytes) = <[u8; 32]>::try_from(public_key) else {
            return false;
        };
        let Ok(verifying_key) = VerifyingKey::from_bytes(&key_bytes) else {
            return false;
        };
        let Ok(sig_bytes) = <[u8; 64]>::try_from(signature) else {
            return false;
        };
        let signature = Signature::from_bytes(&sig_bytes);
        verifying_key.verify(message, &signature).is_ok()
    }
}
