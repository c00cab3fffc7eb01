//! Canonical request construction.
//!
//! The canonical request is the exact byte string the signature chain signs.
//! Its format:
//!
//! ```text
//! lower(METHOD) <space> PATH sorted(QUERY) <newline>
//! lower(NAME) <colon> <space> VALUE <newline>     (one per signed header)
//! BODY
//! ```
//!
//! where `sorted(QUERY)` is the query fragments split on `&`, sorted
//! byte-wise ascending, and re-joined with `&`. The `?` separator is never
//! emitted; path and sorted query are concatenated directly. This is the
//! deployed wire format — emitting the separator would invalidate every
//! previously issued signature.
//!
//! The header lines follow the declared signed-header order exactly, with
//! the declaration header itself appended last (so the list signs itself).
//! `host` resolves to the request authority and `date` to the timestamp in
//! the fixed canonical profile; every other name resolves to its first
//! value on the request, or the empty string when absent. Repeated headers
//! contribute only their first value.
//!
//! The result is deterministic and is computed once per verification,
//! never cached.

use tracing::debug;

use crate::error::AuthError;
use crate::header::canonical_header_name;
use crate::timestamp::{format_canonical, parse_timestamp};

/// Name of the header declaring which headers are signed, in order.
pub const SIGNED_HEADERS_HEADER: &str = "x-signed-headers";

/// Name of the timestamp header.
pub const DATE_HEADER: &str = "date";

/// Build the canonical request string for `parts` with the given
/// signed-header list.
///
/// `body` is the request body, already collected; it is appended as text
/// with no trailing transformation.
///
/// # Errors
///
/// Returns [`AuthError::UnparseableDate`] if the `date` header participates
/// in the signed list but cannot be parsed to an absolute instant.
pub fn build_canonical_request(
    parts: &http::request::Parts,
    body: &[u8],
    signed_header_names: &[&str],
) -> Result<String, AuthError> {
    let mut canonical = build_canonical_target(parts);
    canonical.push('\n');

    for &name in signed_header_names
        .iter()
        .chain(std::iter::once(&SIGNED_HEADERS_HEADER))
    {
        let value = resolve_header_value(parts, name)?;
        canonical.push_str(&name.to_lowercase());
        canonical.push_str(": ");
        canonical.push_str(&value);
        canonical.push('\n');
    }

    canonical.push_str(&String::from_utf8_lossy(body));

    debug!(canonical_request = %canonical, "Built canonical request");

    Ok(canonical)
}

/// Build the request-target line: `lower(METHOD) <space> PATH sorted(QUERY)`.
///
/// # Examples
///
/// ```
/// use sigchain_auth::canonical::build_canonical_target;
///
/// let (parts, ()) = http::Request::builder()
///     .method("PUT")
///     .uri("https://example.com/v1/things?b=2&a=1")
///     .body(())
///     .unwrap()
///     .into_parts();
/// assert_eq!(build_canonical_target(&parts), "put /v1/thingsa=1&b=2");
/// ```
#[must_use]
pub fn build_canonical_target(parts: &http::request::Parts) -> String {
    let method = parts.method.as_str().to_lowercase();
    let path = parts.uri.path();
    let mut target = format!("{method} {path}");
    if let Some(query) = parts.uri.query() {
        target.push_str(&sort_query_fragments(query));
    }
    target
}

/// Sort query fragments byte-wise ascending.
///
/// Fragments are whole `key=value` units; no decoding or re-encoding is
/// applied, so the canonical form uses exactly the bytes the sender signed.
///
/// # Examples
///
/// ```
/// use sigchain_auth::canonical::sort_query_fragments;
///
/// assert_eq!(sort_query_fragments("b=2&a=1"), "a=1&b=2");
/// ```
#[must_use]
pub fn sort_query_fragments(query: &str) -> String {
    let mut fragments: Vec<&str> = query.split('&').collect();
    fragments.sort_unstable();
    fragments.join("&")
}

/// Resolve the value a signed header contributes to the canonical string.
fn resolve_header_value(parts: &http::request::Parts, name: &str) -> Result<String, AuthError> {
    match canonical_header_name(name).as_str() {
        "Host" => Ok(resolve_authority(parts)),
        "Date" => resolve_canonical_date(parts),
        _ => Ok(first_header_value(parts, name)),
    }
}

/// The request authority (`host:port`), from the URI when the request was
/// made in absolute form, else from the `host` header.
fn resolve_authority(parts: &http::request::Parts) -> String {
    parts.uri.authority().map_or_else(
        || first_header_value(parts, http::header::HOST.as_str()),
        |authority| authority.as_str().to_owned(),
    )
}

/// The `date` header reformatted to the canonical profile, or the empty
/// string when the header is absent.
fn resolve_canonical_date(parts: &http::request::Parts) -> Result<String, AuthError> {
    match parts.headers.get(DATE_HEADER) {
        Some(value) => {
            let text = value.to_str().map_err(|_| AuthError::UnparseableDate)?;
            let instant = parse_timestamp(text).ok_or(AuthError::UnparseableDate)?;
            Ok(format_canonical(instant))
        }
        None => Ok(String::new()),
    }
}

/// The first value of a header, or the empty string when absent.
fn first_header_value(parts: &http::request::Parts, name: &str) -> String {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_request() -> http::request::Parts {
        let (parts, ()) = http::Request::builder()
            .method("PUT")
            .uri("https://127.0.0.1:4567/v1/resources/2686c96868emyj61cgt2ma7vdntg4")
            .header("date", "Sun, 05 Mar 2017 23:53:08 +0000")
            .header("content-type", "application/json")
            .header("content-length", "143")
            .header(
                SIGNED_HEADERS_HEADER,
                "host date content-type content-length",
            )
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    const EXAMPLE_BODY: &[u8] = b"{\"id\":\"2686c96868emyj61cgt2ma7vdntg4\",\"plan\":\"low\",\"product\":\"generators\",\"region\":\"aws::us-east-1\",\"user_id\":\"200e7aeg2kf2d6nud8jran3zxnz5j\"}\n";

    #[test]
    fn test_should_build_the_full_canonical_request() {
        let parts = example_request();
        let signed = ["host", "date", "content-type", "content-length"];
        let canonical = build_canonical_request(&parts, EXAMPLE_BODY, &signed).unwrap();

        let expected = "put /v1/resources/2686c96868emyj61cgt2ma7vdntg4\n\
             host: 127.0.0.1:4567\n\
             date: 2017-03-05T23:53:08Z\n\
             content-type: application/json\n\
             content-length: 143\n\
             x-signed-headers: host date content-type content-length\n\
             {\"id\":\"2686c96868emyj61cgt2ma7vdntg4\",\"plan\":\"low\",\"product\":\"generators\",\"region\":\"aws::us-east-1\",\"user_id\":\"200e7aeg2kf2d6nud8jran3zxnz5j\"}\n";
        assert_eq!(canonical, expected);
    }

    #[test]
    fn test_should_be_deterministic() {
        let parts = example_request();
        let signed = ["host", "date", "content-type", "content-length"];
        let first = build_canonical_request(&parts, EXAMPLE_BODY, &signed).unwrap();
        let second = build_canonical_request(&parts, EXAMPLE_BODY, &signed).unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_should_sort_query_fragments() {
        assert_eq!(sort_query_fragments("b=2&a=1"), "a=1&b=2");
        assert_eq!(sort_query_fragments("c=3&a=1&b=2"), "a=1&b=2&c=3");
        assert_eq!(sort_query_fragments("a=1"), "a=1");
    }

    #[test]
    fn test_should_concatenate_sorted_query_without_separator() {
        let (parts, ()) = http::Request::builder()
            .method("GET")
            .uri("https://example.com/v1/things?b=2&a=1")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(build_canonical_target(&parts), "get /v1/thingsa=1&b=2");
    }

    #[test]
    fn test_should_omit_query_entirely_when_absent() {
        let (parts, ()) = http::Request::builder()
            .method("GET")
            .uri("https://example.com/v1/things")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(build_canonical_target(&parts), "get /v1/things");
    }

    #[test]
    fn test_should_append_the_declaration_header_last() {
        let parts = example_request();
        let canonical = build_canonical_request(&parts, b"", &["host"]).unwrap();
        assert_eq!(
            canonical,
            "put /v1/resources/2686c96868emyj61cgt2ma7vdntg4\n\
             host: 127.0.0.1:4567\n\
             x-signed-headers: host date content-type content-length\n"
        );
    }

    #[test]
    fn test_should_resolve_host_from_the_host_header_for_origin_form_requests() {
        let (parts, ()) = http::Request::builder()
            .method("GET")
            .uri("/v1/things")
            .header("host", "internal.example:8443")
            .body(())
            .unwrap()
            .into_parts();
        let canonical = build_canonical_request(&parts, b"", &["host"]).unwrap();
        assert!(canonical.contains("host: internal.example:8443\n"));
    }

    #[test]
    fn test_should_use_first_value_of_repeated_header() {
        let (parts, ()) = http::Request::builder()
            .method("GET")
            .uri("https://example.com/")
            .header("x-tag", "first")
            .header("x-tag", "second")
            .body(())
            .unwrap()
            .into_parts();
        let canonical = build_canonical_request(&parts, b"", &["x-tag"]).unwrap();
        assert!(canonical.contains("x-tag: first\n"));
        assert!(!canonical.contains("second"));
    }

    #[test]
    fn test_should_emit_empty_values_for_missing_headers() {
        let (parts, ()) = http::Request::builder()
            .method("GET")
            .uri("https://example.com/")
            .body(())
            .unwrap()
            .into_parts();
        let canonical = build_canonical_request(&parts, b"", &["x-absent"]).unwrap();
        assert!(canonical.contains("x-absent: \n"));
    }

    #[test]
    fn test_should_reject_an_unparseable_date() {
        let (parts, ()) = http::Request::builder()
            .method("GET")
            .uri("https://example.com/")
            .header("date", "not a date")
            .body(())
            .unwrap()
            .into_parts();
        let result = build_canonical_request(&parts, b"", &["date"]);
        assert!(matches!(result, Err(AuthError::UnparseableDate)));
    }

    #[test]
    fn test_should_lowercase_the_method() {
        let (parts, ()) = http::Request::builder()
            .method("DELETE")
            .uri("https://example.com/v1/things/42")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(build_canonical_target(&parts), "delete /v1/things/42");
    }
}
