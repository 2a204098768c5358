//! # Compressed Point Codec
//!
//! SEC1 compressed form of a P-256 public key:
//!
//! ```text
//! +--------+-------------------------------+
//! | 0x02   | X (32 bytes, big-endian)      |   Y even
//! | 0x03   | X (32 bytes, big-endian)      |   Y odd
//! +--------+-------------------------------+
//! ```
//!
//! Decoding recomputes Y from the curve equation `y^2 = x^3 - 3x + b` and
//! picks the root whose parity matches the prefix. An X with no square root
//! on the right-hand side, or an X that is not a field element at all, is
//! rejected; an off-curve point never makes it into a [`PublicKey`].

use p256::elliptic_curve::point::{AffineCoordinates, DecompressPoint};
use p256::elliptic_curve::subtle::Choice;
use p256::{AffinePoint, FieldBytes, PublicKey};

use crate::config::{COMPRESSED_POINT_LENGTH, SEC1_TAG_EVEN, SEC1_TAG_ODD};
use crate::error::DidKeyError;

/// Encode a public key as 33 compressed bytes.
pub fn encode_compressed(key: &PublicKey) -> [u8; COMPRESSED_POINT_LENGTH] {
    let point = key.as_affine();

    let mut out = [0u8; COMPRESSED_POINT_LENGTH];
    out[0] = if bool::from(point.y_is_odd()) {
        SEC1_TAG_ODD
    } else {
        SEC1_TAG_EVEN
    };
    out[1..].copy_from_slice(&point.x());
    out
}

/// Decode 33 compressed bytes into a validated public key.
///
/// # Errors
///
/// [`DidKeyError::InvalidPoint`] if the input is not 33 bytes, the prefix is
/// not `0x02`/`0x03`, or no curve point has the given X.
pub fn decode_compressed(bytes: &[u8]) -> Result<PublicKey, DidKeyError> {
    if bytes.len() != COMPRESSED_POINT_LENGTH {
        return Err(DidKeyError::InvalidPoint(format!(
            "expected {COMPRESSED_POINT_LENGTH} bytes, got {}",
            bytes.len()
        )));
    }

    let y_is_odd = match bytes[0] {
        SEC1_TAG_EVEN => Choice::from(0),
        SEC1_TAG_ODD => Choice::from(1),
        other => {
            return Err(DidKeyError::InvalidPoint(format!(
                "unexpected SEC1 prefix 0x{other:02x}"
            )))
        }
    };

    let x = FieldBytes::clone_from_slice(&bytes[1..]);
    let point: Option<AffinePoint> = AffinePoint::decompress(&x, y_is_odd).into();
    let point = point.ok_or_else(|| DidKeyError::InvalidPoint("point is not on the curve".into()))?;

    PublicKey::from_affine(point)
        .map_err(|_| DidKeyError::InvalidPoint("identity point is not a public key".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use p256::elliptic_curve::sec1::ToEncodedPoint;
    use p256::SecretKey;
    use rand::rngs::OsRng;

    fn random_key() -> PublicKey {
        SecretKey::random(&mut OsRng).public_key()
    }

    #[test]
    fn encoding_matches_sec1_compressed() {
        for _ in 0..16 {
            let key = random_key();
            let ours = encode_compressed(&key);
            let reference = key.to_encoded_point(true);
            assert_eq!(&ours[..], reference.as_bytes());
        }
    }

    #[test]
    fn prefix_reflects_y_parity() {
        for _ in 0..16 {
            let key = random_key();
            let uncompressed = key.to_encoded_point(false);
            let y_last = uncompressed.as_bytes()[64];
            let expected = if y_last & 1 == 0 { 0x02 } else { 0x03 };
            assert_eq!(encode_compressed(&key)[0], expected);
        }
    }

    #[test]
    fn decode_recovers_key() {
        let key = random_key();
        let bytes = encode_compressed(&key);
        assert_eq!(decode_compressed(&bytes).unwrap(), key);
    }

    #[test]
    fn flipped_parity_gives_negated_point() {
        let key = random_key();
        let mut bytes = encode_compressed(&key);
        bytes[0] ^= 0x01;
        let other = decode_compressed(&bytes).unwrap();
        assert_ne!(other, key);
        assert_eq!(encode_compressed(&other)[1..], bytes[1..]);
    }

    #[test]
    fn wrong_length_rejected() {
        let bytes = encode_compressed(&random_key());
        assert!(matches!(
            decode_compressed(&bytes[..32]),
            Err(DidKeyError::InvalidPoint(_))
        ));

        let mut long = bytes.to_vec();
        long.push(0);
        assert!(matches!(
            decode_compressed(&long),
            Err(DidKeyError::InvalidPoint(_))
        ));
    }

    #[test]
    fn bad_prefix_rejected() {
        let mut bytes = encode_compressed(&random_key());
        for prefix in [0x00, 0x01, 0x04, 0x06, 0xff] {
            bytes[0] = prefix;
            assert!(matches!(
                decode_compressed(&bytes),
                Err(DidKeyError::InvalidPoint(_))
            ));
        }
    }

    #[test]
    fn x_outside_field_rejected() {
        // All-0xff exceeds the P-256 prime, so it is not a field element.
        let mut bytes = [0xffu8; COMPRESSED_POINT_LENGTH];
        bytes[0] = SEC1_TAG_EVEN;
        assert!(matches!(
            decode_compressed(&bytes),
            Err(DidKeyError::InvalidPoint(_))
        ));
    }

    #[test]
    fn x_without_curve_point_rejected() {
        // X = 1 is a field element, but x^3 - 3x + b is a non-residue, so
        // no Y exists for either parity.
        for prefix in [SEC1_TAG_EVEN, SEC1_TAG_ODD] {
            let mut bytes = [0u8; COMPRESSED_POINT_LENGTH];
            bytes[0] = prefix;
            bytes[COMPRESSED_POINT_LENGTH - 1] = 0x01;
            assert_eq!(
                decode_compressed(&bytes).unwrap_err(),
                DidKeyError::InvalidPoint("point is not on the curve".into())
            );
        }
    }
}
