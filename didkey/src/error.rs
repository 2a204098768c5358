//! Error types for `did:key` construction and signing.
//!
//! Every operation that can fail returns a [`DidKeyError`]. Each variant is
//! a distinct, matchable failure kind; no operation returns a partially
//! built key alongside an error. Verification is deliberately absent from
//! this list: it answers `false` instead of raising.

use thiserror::Error;

/// Errors that can occur while parsing identifiers, decoding key material,
/// or signing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DidKeyError {
    /// The identifier does not have exactly three `:`-separated segments.
    #[error("invalid DID format: expected 'did:key:<id>', got {segments} segment(s)")]
    InvalidFormat {
        /// How many segments the input actually split into.
        segments: usize,
    },

    /// The first segment is not `did`.
    #[error("invalid DID scheme: expected 'did', got '{0}'")]
    InvalidScheme(String),

    /// The second segment is not `key`.
    #[error("invalid DID method: expected 'key', got '{0}'")]
    InvalidMethod(String),

    /// The method-specific identifier is empty.
    #[error("invalid did:key: method-specific identifier must not be empty")]
    EmptyIdentifier,

    /// The method-specific identifier is not multibase base58btc (`z...`).
    #[error("invalid did:key: identifier must start with 'z' (base58btc)")]
    MissingPrefix,

    /// The identifier body contains characters outside the base58btc alphabet.
    #[error("invalid base58btc encoding: {0}")]
    InvalidEncoding(String),

    /// The multicodec varint tag is truncated, overlong, or non-minimal.
    #[error("malformed multicodec envelope: {0}")]
    MalformedEnvelope(String),

    /// The multicodec tag decoded fine but is not `p256-pub`.
    #[error("unsupported key type: multicodec 0x{0:x}")]
    UnsupportedKeyType(u64),

    /// The compressed point is malformed or not on the curve.
    #[error("invalid P-256 point: {0}")]
    InvalidPoint(String),

    /// The envelope payload is not a 33-byte compressed point.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// Required payload length.
        expected: usize,
        /// Length actually found.
        actual: usize,
    },

    /// The curve provider refused the private scalar (zero or not below
    /// the group order).
    #[error("invalid private scalar: not in [1, n-1]")]
    InvalidPrivateScalar,

    /// Signing was requested on a public-only key.
    #[error("failed to sign: private key not present")]
    NoPrivateKey,

    /// The ECDSA primitive itself failed.
    #[error("failed to sign: {0}")]
    SigningFailure(String),

    /// Raw signature bytes are not a well-formed `r || s` pair.
    #[error("invalid signature encoding: {0}")]
    InvalidSignature(String),
}
