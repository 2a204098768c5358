//! # Method Constants
//!
//! Every fixed value of the `did:key` P-256 method lives here. None of it is
//! configurable at runtime: the identifier format is bit-exact, and a value
//! that differs from these is simply a different (unsupported) format.

// ---------------------------------------------------------------------------
// Identifier Grammar
// ---------------------------------------------------------------------------

/// URI scheme of every decentralized identifier.
pub const DID_SCHEME: &str = "did";

/// The only DID method this crate speaks.
pub const DID_METHOD: &str = "key";

/// Separator between the scheme, method, and method-specific id.
pub const DID_SEPARATOR: char = ':';

/// Number of `:`-separated segments in a `did:key` identifier.
pub const DID_SEGMENT_COUNT: usize = 3;

/// Multibase prefix for base58btc. Mandatory in `did:key`; other multibase
/// encodings are not accepted.
pub const MULTIBASE_BASE58BTC_PREFIX: char = 'z';

// ---------------------------------------------------------------------------
// Multicodec
// ---------------------------------------------------------------------------

/// Multicodec code for a P-256 public key (`p256-pub`), encoded on the wire
/// as the unsigned varint `0x80 0x24`.
pub const MULTICODEC_P256_PUB: u64 = 0x1200;

/// Longest unsigned varint allowed by the multiformats `unsigned-varint` rules.
pub const MAX_VARINT_LENGTH: usize = 9;

// ---------------------------------------------------------------------------
// Curve Parameters
// ---------------------------------------------------------------------------

/// Human-readable curve name, used in diagnostics and CLI output.
pub const CURVE_NAME: &str = "P-256";

/// Byte width of a P-256 field element (256 bits).
pub const FIELD_BYTE_WIDTH: usize = 32;

/// Length of a private scalar in bytes.
pub const PRIVATE_SCALAR_LENGTH: usize = FIELD_BYTE_WIDTH;

/// Length of a compressed SEC1 point: one parity byte plus X.
pub const COMPRESSED_POINT_LENGTH: usize = 1 + FIELD_BYTE_WIDTH;

/// SEC1 tag for a compressed point with even Y.
pub const SEC1_TAG_EVEN: u8 = 0x02;

/// SEC1 tag for a compressed point with odd Y.
pub const SEC1_TAG_ODD: u8 = 0x03;

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

/// Digest length accepted by `sign`/`verify`. The caller hashes; we don't.
pub const DIGEST_LENGTH: usize = 32;

/// Raw `r || s` signature length. Twice the field width, never DER.
pub const SIGNATURE_LENGTH: usize = 2 * FIELD_BYTE_WIDTH;
