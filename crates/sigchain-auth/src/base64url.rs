//! URL-safe base64 decoding for signature chain material.
//!
//! Every component of the wire format (the three chain tokens and the
//! configured root key) travels as URL-safe, unpadded base64. Decoding is
//! defined by translation into the standard alphabet:
//!
//! ```text
//! '-' -> '+'
//! '_' -> '/'
//! re-pad: "==" for length % 4 == 2, "=" for length % 4 == 3
//! ```
//!
//! A remainder of 1 is not repaired — no valid base64 string has that shape,
//! and the standard decoder rejects it.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Decode a URL-safe, unpadded base64 string into raw bytes.
///
/// # Errors
///
/// Returns a [`base64::DecodeError`] if the input, after alphabet
/// translation and re-padding, is not valid standard base64.
///
/// # Examples
///
/// ```
/// use sigchain_auth::base64url::decode;
///
/// assert_eq!(decode("_w").unwrap(), vec![0xff]);
/// assert!(decode("not base64!").is_err());
/// ```
pub fn decode(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let mut translated = text.replace('-', "+").replace('_', "/");
    match translated.len() % 4 {
        2 => translated.push_str("=="),
        3 => translated.push('='),
        _ => {}
    }
    BASE64.decode(translated)
}

/// Normalize key text into URL-safe, unpadded form.
///
/// Key material is sometimes configured in the standard alphabet or with
/// padding attached. Translates `+` -> `-`, `/` -> `_` and strips trailing
/// `=` so that [`decode`] accepts either variant.
///
/// # Examples
///
/// ```
/// use sigchain_auth::base64url::normalize_key;
///
/// assert_eq!(normalize_key("ab+c/d=="), "ab-c_d");
/// assert_eq!(normalize_key("ab-c_d"), "ab-c_d");
/// ```
#[must_use]
pub fn normalize_key(text: &str) -> String {
    text.trim_end_matches('=').replace('+', "-").replace('/', "_")
}
