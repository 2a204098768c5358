//! # Multicodec Envelope
//!
//! A multicodec envelope is a payload prefixed with an unsigned varint that
//! says what the payload is. For `did:key` the payload is public key
//! material and the tag says which kind of key.
//!
//! ```text
//! +----------------------+---------------------------+
//! | varint(code)         | payload                   |
//! | 0x80 0x24 (p256-pub) | 33-byte compressed point  |
//! +----------------------+---------------------------+
//! ```
//!
//! The registry here is closed: [`Codec`] has exactly the codes this crate
//! understands, and decoding any other code is an
//! [`UnsupportedKeyType`](DidKeyError::UnsupportedKeyType) error. Unknown
//! tags are never passed through.
//!
//! Varints follow the multiformats `unsigned-varint` rules: little-endian
//! base-128, at most 9 bytes, minimal encoding only.

use crate::config::{MAX_VARINT_LENGTH, MULTICODEC_P256_PUB};
use crate::error::DidKeyError;

/// Multicodec codes recognised by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// `p256-pub` — a compressed P-256 public key.
    P256Pub,
}

impl Codec {
    /// The registered numeric code.
    pub const fn code(self) -> u64 {
        match self {
            Codec::P256Pub => MULTICODEC_P256_PUB,
        }
    }

    /// Look up a code in the registry.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            MULTICODEC_P256_PUB => Some(Codec::P256Pub),
            _ => None,
        }
    }
}

/// Wrap `payload` in an envelope tagged with `codec`.
///
/// Infallible: the tag comes from the closed [`Codec`] enum.
pub fn encode(codec: Codec, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT_LENGTH + payload.len());
    encode_varint(codec.code(), &mut out);
    out.extend_from_slice(payload);
    out
}

/// Split an envelope into its codec and payload.
///
/// # Errors
///
/// - [`DidKeyError::MalformedEnvelope`] if the leading varint is truncated,
///   longer than 9 bytes, or not minimally encoded.
/// - [`DidKeyError::UnsupportedKeyType`] if the code is not in the registry.
pub fn decode(bytes: &[u8]) -> Result<(Codec, &[u8]), DidKeyError> {
    let (code, read) = decode_varint(bytes)?;
    let codec = Codec::from_code(code).ok_or(DidKeyError::UnsupportedKeyType(code))?;
    Ok((codec, &bytes[read..]))
}

/// Append the unsigned varint encoding of `value` to `out`.
pub fn encode_varint(mut value: u64, out: &mut Vec<u8>) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Read an unsigned varint from the front of `bytes`.
///
/// Returns the value and the number of bytes consumed.
pub fn decode_varint(bytes: &[u8]) -> Result<(u64, usize), DidKeyError> {
    let mut value = 0u64;

    for (i, &byte) in bytes.iter().enumerate() {
        if i == MAX_VARINT_LENGTH {
            return Err(DidKeyError::MalformedEnvelope(format!(
                "varint longer than {MAX_VARINT_LENGTH} bytes"
            )));
        }

        value |= u64::from(byte & 0x7f) << (7 * i);

        if byte & 0x80 == 0 {
            // A trailing zero group means the same value fits in fewer bytes.
            if byte == 0 && i > 0 {
                return Err(DidKeyError::MalformedEnvelope(
                    "varint is not minimally encoded".into(),
                ));
            }
            return Ok((value, i + 1));
        }
    }

    Err(DidKeyError::MalformedEnvelope("truncated varint".into()))
}
