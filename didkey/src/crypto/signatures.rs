//! # Fixed-Width Signature Codec
//!
//! ECDSA produces a pair of scalars `(r, s)`. On the wire we carry them as a
//! plain concatenation, each half zero-padded to the field width:
//!
//! ```text
//! +-------------------------+-------------------------+
//! | r (32 bytes, big-endian) | s (32 bytes, big-endian) |
//! +-------------------------+-------------------------+
//! ```
//!
//! No ASN.1/DER in either direction. A 70-ish byte DER blob is just a
//! signature of the wrong length.

use p256::ecdsa::Signature;
use p256::FieldBytes;

use crate::config::{FIELD_BYTE_WIDTH, SIGNATURE_LENGTH};
use crate::error::DidKeyError;

/// Encode `(r, s)` as 64 bytes.
pub fn encode_signature(signature: &Signature) -> [u8; SIGNATURE_LENGTH] {
    let (r, s) = signature.split_bytes();

    let mut out = [0u8; SIGNATURE_LENGTH];
    out[..FIELD_BYTE_WIDTH].copy_from_slice(&r);
    out[FIELD_BYTE_WIDTH..].copy_from_slice(&s);
    out
}

/// Decode 64 bytes into `(r, s)`.
///
/// # Errors
///
/// [`DidKeyError::InvalidSignature`] if the length is not exactly 64, or
/// either half is zero or not below the group order.
pub fn decode_signature(bytes: &[u8]) -> Result<Signature, DidKeyError> {
    if bytes.len() != SIGNATURE_LENGTH {
        return Err(DidKeyError::InvalidSignature(format!(
            "expected {SIGNATURE_LENGTH} bytes, got {}",
            bytes.len()
        )));
    }

    let r = FieldBytes::clone_from_slice(&bytes[..FIELD_BYTE_WIDTH]);
    let s = FieldBytes::clone_from_slice(&bytes[FIELD_BYTE_WIDTH..]);

    Signature::from_scalars(r, s)
        .map_err(|_| DidKeyError::InvalidSignature("scalar out of range".into()))
}
