//! Header name canonicalization.
//!
//! The wire format declares signed headers in lowercase (`content-type`),
//! while the surrounding HTTP layer's storage convention capitalizes the
//! first character and the character following every `-` (`Content-Type`).
//! [`canonical_header_name`] maps between the two so that special-cased
//! names (`Host`, `Date`) are recognized regardless of declared casing.
//! Header map lookups themselves are case-insensitive in the `http` crate,
//! so the mapping never alters signed semantics.

/// Canonicalize a header name: uppercase the first character and each
/// character following a `-`.
///
/// Total over any ASCII token; the empty string is returned unchanged.
///
/// # Examples
///
/// ```
/// use sigchain_auth::header::canonical_header_name;
///
/// assert_eq!(canonical_header_name("content-type"), "Content-Type");
/// assert_eq!(canonical_header_name("host"), "Host");
/// ```
#[must_use]
pub fn canonical_header_name(name: &str) -> String {
    let mut output = String::with_capacity(name.len());
    let mut upper_next = true;
    for ch in name.chars() {
        if upper_next {
            output.extend(ch.to_uppercase());
        } else {
            output.push(ch);
        }
        upper_next = ch == '-';
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_capitalize_single_word_names() {
        assert_eq!(canonical_header_name("host"), "Host");
        assert_eq!(canonical_header_name("date"), "Date");
    }

    #[test]
    fn test_should_capitalize_after_each_hyphen() {
        assert_eq!(canonical_header_name("content-type"), "Content-Type");
        assert_eq!(canonical_header_name("x-signed-headers"), "X-Signed-Headers");
    }

    #[test]
    fn test_should_leave_other_characters_untouched() {
        assert_eq!(canonical_header_name("x-forwarded-FOR"), "X-Forwarded-FOR");
    }

    #[test]
    fn test_should_handle_degenerate_tokens() {
        assert_eq!(canonical_header_name(""), "");
        assert_eq!(canonical_header_name("x-"), "X-");
        assert_eq!(canonical_header_name("-x"), "-X");
    }
}
