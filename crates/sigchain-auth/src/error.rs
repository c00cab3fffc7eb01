//! Error types for signature chain authentication.
//!
//! All verification failures are represented by [`AuthError`], which provides
//! a specific variant for each failure mode encountered during verification.
//! Every variant belongs to one of two [`ErrorKind`]s: structural problems
//! with the request's signing metadata (`InvalidHeaders`) and cryptographic
//! or chain-parsing failures (`InvalidSignature`). Callers that only need a
//! reject decision can route on [`AuthError::kind`]; the variants themselves
//! exist for diagnostics and logging.

/// The two categories of verification failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A structural problem with the request's signing metadata: a missing
    /// signature, signed-headers, or date header, or a stale date.
    InvalidHeaders,
    /// A cryptographic or chain-parsing failure: a malformed chain, a
    /// component that is not valid base64url, a key the root did not
    /// endorse, or a body signature that does not verify.
    InvalidSignature,
}

/// Errors that can occur during signature chain verification.
///
/// Errors are raised at the point of detection; verification never retries
/// and never aggregates multiple failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The signature header is missing from the request.
    #[error("signature header missing")]
    MissingSignatureHeader,

    /// The signed-headers declaration header is missing from the request.
    #[error("signed-headers header missing")]
    MissingSignedHeaders,

    /// The date header is missing from the request.
    #[error("date header missing")]
    MissingDate,

    /// The date header is outside the freshness window.
    #[error("date not within freshness window")]
    StaleDate,

    /// The date header could not be parsed to an absolute instant.
    #[error("date header could not be parsed")]
    UnparseableDate,

    /// The signature header does not split into exactly three parts.
    #[error("could not parse signature chain")]
    MalformedChain,

    /// A signature chain component or key is not valid base64url.
    #[error("malformed base64url encoding")]
    MalformedEncoding(#[from] base64::DecodeError),

    /// The endorsement does not verify under the trusted root key.
    #[error("public key not endorsed by trusted root")]
    KeyNotEndorsed,

    /// The body signature does not verify under the included public key.
    #[error("request not signed by included public key")]
    BodyNotSigned,
}

impl AuthError {
    /// The category this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingSignatureHeader
            | Self::MissingSignedHeaders
            | Self::MissingDate
            | Self::StaleDate
            | Self::UnparseableDate => ErrorKind::InvalidHeaders,
            Self::MalformedChain | Self::MalformedEncoding(_) | Self::KeyNotEndorsed | Self::BodyNotSigned => {
                ErrorKind::InvalidSignature
            }
        }
    }
}
