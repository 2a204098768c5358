//! # Key Entity
//!
//! [`DidKey`] ties a P-256 public key to its `did:key` identifier and, when
//! the private scalar is known, to the ability to sign.
//!
//! Whether a private key is present is a variant, not a nullable field:
//!
//! - `PublicOnly` — built by parsing an identifier. Can verify.
//! - `FullKeyPair` — built from a private scalar. Can verify and sign.
//!
//! The variants are private so that the one invariant that matters
//! (`public == D * G`) can only be established by the constructors here.
//!
//! ## Signing
//!
//! `sign` and `verify` operate on a 32-byte digest the caller has already
//! hashed. ECDSA nonces come from `OsRng`, which is safe to use from any
//! number of threads at once.
//!
//! ## Serialization
//!
//! A `DidKey` serializes as its identifier string. The private scalar is
//! never serialized; deserializing always yields a public-only key. Use
//! [`DidKey::secret_scalar_bytes`] when you mean to export the secret.

use std::fmt;
use std::str::FromStr;

use p256::ecdsa::signature::hazmat::{PrehashVerifier, RandomizedPrehashSigner};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::{FieldBytes, PublicKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, trace};

use crate::config::{
    COMPRESSED_POINT_LENGTH, DIGEST_LENGTH, PRIVATE_SCALAR_LENGTH, SIGNATURE_LENGTH,
};
use crate::crypto::point::encode_compressed;
use crate::crypto::signatures::{decode_signature, encode_signature};
use crate::error::DidKeyError;
use crate::identity::did;

#[derive(Clone)]
enum KeyMaterial {
    PublicOnly(PublicKey),
    FullKeyPair {
        public: PublicKey,
        signing: SigningKey,
    },
}

/// A P-256 `did:key` identity.
///
/// # Examples
///
/// ```
/// use didkey::DidKey;
///
/// let alice = DidKey::generate();
/// let did = alice.to_did();
///
/// // Somebody else only sees the identifier.
/// let bob_view: DidKey = did.parse().unwrap();
/// assert!(!bob_view.has_private_key());
///
/// let challenge = [7u8; 32];
/// let signature = alice.sign(&challenge).unwrap();
/// assert!(bob_view.verify(&challenge, &signature));
/// ```
#[derive(Clone)]
pub struct DidKey {
    material: KeyMaterial,
}

impl DidKey {
    /// Generate a fresh key pair from the OS CSPRNG.
    pub fn generate() -> Self {
        let signing = SigningKey::random(&mut OsRng);
        Self::from_signing_key(signing)
    }

    /// Build a full key pair from a raw 32-byte big-endian private scalar.
    ///
    /// The public point is computed as `D * G`.
    ///
    /// # Errors
    ///
    /// [`DidKeyError::InvalidPrivateScalar`] if the curve implementation
    /// refuses the scalar (zero, or not below the group order). No range
    /// check beyond that is performed here.
    pub fn from_private_scalar(scalar: &[u8; PRIVATE_SCALAR_LENGTH]) -> Result<Self, DidKeyError> {
        let bytes = FieldBytes::from(*scalar);
        let signing =
            SigningKey::from_bytes(&bytes).map_err(|_| DidKeyError::InvalidPrivateScalar)?;
        Ok(Self::from_signing_key(signing))
    }

    /// Build a full key pair from a hex-encoded private scalar.
    ///
    /// Handy for test fixtures and the command line. Surrounding whitespace
    /// is ignored.
    pub fn from_private_scalar_hex(hex_str: &str) -> Result<Self, DidKeyError> {
        let bytes = hex::decode(hex_str.trim()).map_err(|_| DidKeyError::InvalidPrivateScalar)?;
        let scalar: [u8; PRIVATE_SCALAR_LENGTH] = bytes
            .try_into()
            .map_err(|_| DidKeyError::InvalidPrivateScalar)?;
        Self::from_private_scalar(&scalar)
    }

    /// Wrap an already validated public key. The result cannot sign.
    pub fn from_public_key(public: PublicKey) -> Self {
        Self {
            material: KeyMaterial::PublicOnly(public),
        }
    }

    /// Parse a `did:key` identifier. The result cannot sign.
    ///
    /// # Errors
    ///
    /// Any of the parsing errors listed on [`did::parse_public_key`].
    pub fn from_did(identifier: &str) -> Result<Self, DidKeyError> {
        let public = did::parse_public_key(identifier)?;
        debug!(identifier, "parsed did:key");
        Ok(Self::from_public_key(public))
    }

    fn from_signing_key(signing: SigningKey) -> Self {
        let public = PublicKey::from(signing.verifying_key());
        Self {
            material: KeyMaterial::FullKeyPair { public, signing },
        }
    }

    /// The `did:key:z...` identifier for this key.
    pub fn to_did(&self) -> String {
        did::build(self.public_key())
    }

    /// The public point.
    pub fn public_key(&self) -> &PublicKey {
        match &self.material {
            KeyMaterial::PublicOnly(public) => public,
            KeyMaterial::FullKeyPair { public, .. } => public,
        }
    }

    /// The public point in 33-byte compressed SEC1 form.
    pub fn compressed_public_key(&self) -> [u8; COMPRESSED_POINT_LENGTH] {
        encode_compressed(self.public_key())
    }

    /// Whether this key holds a private scalar and can therefore sign.
    pub fn has_private_key(&self) -> bool {
        matches!(self.material, KeyMaterial::FullKeyPair { .. })
    }

    /// Export the private scalar, big-endian. `None` for public-only keys.
    ///
    /// **Handle with care.** This is the whole secret.
    pub fn secret_scalar_bytes(&self) -> Option<[u8; PRIVATE_SCALAR_LENGTH]> {
        match &self.material {
            KeyMaterial::PublicOnly(_) => None,
            KeyMaterial::FullKeyPair { signing, .. } => Some(signing.to_bytes().into()),
        }
    }

    /// Sign a 32-byte digest, returning the 64-byte `r || s` signature.
    ///
    /// The digest is signed as-is; hash your message first. Signatures are
    /// randomized, so signing the same digest twice gives different bytes.
    ///
    /// # Errors
    ///
    /// - [`DidKeyError::NoPrivateKey`] for a public-only key.
    /// - [`DidKeyError::SigningFailure`] if the ECDSA primitive fails.
    pub fn sign(
        &self,
        digest: &[u8; DIGEST_LENGTH],
    ) -> Result<[u8; SIGNATURE_LENGTH], DidKeyError> {
        let KeyMaterial::FullKeyPair { signing, .. } = &self.material else {
            return Err(DidKeyError::NoPrivateKey);
        };

        let signature: Signature = signing
            .sign_prehash_with_rng(&mut OsRng, digest)
            .map_err(|e| DidKeyError::SigningFailure(e.to_string()))?;

        trace!("signed digest");
        Ok(encode_signature(&signature))
    }

    /// Check a 64-byte `r || s` signature over a 32-byte digest.
    ///
    /// Never fails loudly. Wrong length, out-of-range scalars, and a failed
    /// verification equation all come back as `false`. The curve is always
    /// P-256 by construction, so there is no curve mismatch to check for.
    pub fn verify(&self, digest: &[u8; DIGEST_LENGTH], signature: &[u8]) -> bool {
        let Ok(signature) = decode_signature(signature) else {
            trace!("signature rejected before verification");
            return false;
        };

        let verifying_key = VerifyingKey::from(self.public_key());
        verifying_key.verify_prehash(digest, &signature).is_ok()
    }
}

impl PartialEq for DidKey {
    /// Two keys are equal when they have the same public point and the
    /// same capability. The public point fixes the scalar, so comparing
    /// secrets is unnecessary.
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key() && self.has_private_key() == other.has_private_key()
    }
}

impl Eq for DidKey {}

impl fmt::Debug for DidKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DidKey")
            .field("did", &self.to_did())
            .field(
                "private_key",
                &if self.has_private_key() {
                    "<redacted>"
                } else {
                    "<none>"
                },
            )
            .finish()
    }
}

impl fmt::Display for DidKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_did())
    }
}

impl FromStr for DidKey {
    type Err = DidKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_did(s)
    }
}

impl Serialize for DidKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_did())
    }
}

impl<'de> Deserialize<'de> for DidKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let identifier = String::deserialize(deserializer)?;
        Self::from_did(&identifier).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A fixed scalar well inside `[1, n-1]`.
    const SCALAR: [u8; 32] = [
        0xc9, 0xaf, 0xa9, 0xd8, 0x45, 0xba, 0x75, 0x16, 0x6b, 0x5c, 0x21, 0x57, 0x67, 0xb1, 0xd6,
        0x93, 0x4e, 0x50, 0xc3, 0xdb, 0x36, 0xe8, 0x9b, 0x12, 0x7b, 0x8a, 0x62, 0x2b, 0x12, 0x0f,
        0x67, 0x21,
    ];

    #[test]
    fn from_private_scalar_is_deterministic() {
        let a = DidKey::from_private_scalar(&SCALAR).unwrap();
        let b = DidKey::from_private_scalar(&SCALAR).unwrap();
        assert_eq!(a.to_did(), b.to_did());
        assert!(a.has_private_key());
        assert_eq!(a.secret_scalar_bytes(), Some(SCALAR));
    }

    #[test]
    fn public_point_is_scalar_times_generator() {
        let key = DidKey::from_private_scalar(&SCALAR).unwrap();
        let secret = p256::SecretKey::from_bytes(&FieldBytes::from(SCALAR)).unwrap();
        assert_eq!(key.public_key(), &secret.public_key());
    }

    #[test]
    fn hex_constructor_matches_raw() {
        let raw = DidKey::from_private_scalar(&SCALAR).unwrap();
        let padded = format!(" {}\n", hex::encode(SCALAR));
        let from_hex = DidKey::from_private_scalar_hex(&padded).unwrap();
        assert_eq!(raw, from_hex);
    }

    #[test]
    fn hex_constructor_rejects_garbage() {
        assert_eq!(
            DidKey::from_private_scalar_hex("not hex").unwrap_err(),
            DidKeyError::InvalidPrivateScalar
        );
        assert_eq!(
            DidKey::from_private_scalar_hex("abcd").unwrap_err(),
            DidKeyError::InvalidPrivateScalar
        );
    }

    #[test]
    fn zero_scalar_refused_by_curve() {
        assert_eq!(
            DidKey::from_private_scalar(&[0u8; 32]).unwrap_err(),
            DidKeyError::InvalidPrivateScalar
        );
    }

    #[test]
    fn scalar_above_order_refused_by_curve() {
        assert_eq!(
            DidKey::from_private_scalar(&[0xff; 32]).unwrap_err(),
            DidKeyError::InvalidPrivateScalar
        );
    }

    #[test]
    fn parsed_key_is_public_only() {
        let full = DidKey::generate();
        let parsed = DidKey::from_did(&full.to_did()).unwrap();
        assert!(!parsed.has_private_key());
        assert_eq!(parsed.secret_scalar_bytes(), None);
        assert_eq!(parsed.public_key(), full.public_key());
        // Same point, different capability.
        assert_ne!(parsed, full);
    }

    #[test]
    fn sign_without_private_key_fails() {
        let parsed = DidKey::from_did(&DidKey::generate().to_did()).unwrap();
        assert_eq!(
            parsed.sign(&[0u8; 32]).unwrap_err(),
            DidKeyError::NoPrivateKey
        );
    }

    #[test]
    fn sign_and_verify() {
        let key = DidKey::generate();
        let digest = [0x5a; 32];
        let sig = key.sign(&digest).unwrap();
        assert_eq!(sig.len(), 64);
        assert!(key.verify(&digest, &sig));
    }

    #[test]
    fn signatures_are_randomized() {
        let key = DidKey::generate();
        let digest = [1u8; 32];
        let a = key.sign(&digest).unwrap();
        let b = key.sign(&digest).unwrap();
        assert_ne!(a, b);
        assert!(key.verify(&digest, &a));
        assert!(key.verify(&digest, &b));
    }

    #[test]
    fn verify_with_wrong_key_fails() {
        let signer = DidKey::generate();
        let other = DidKey::generate();
        let digest = [9u8; 32];
        let sig = signer.sign(&digest).unwrap();
        assert!(!other.verify(&digest, &sig));
    }

    #[test]
    fn verify_wrong_digest_fails() {
        let key = DidKey::generate();
        let sig = key.sign(&[1u8; 32]).unwrap();
        assert!(!key.verify(&[2u8; 32], &sig));
    }

    #[test]
    fn verify_rejects_bad_lengths_without_error() {
        let key = DidKey::generate();
        let digest = [3u8; 32];
        for len in [0usize, 1, 63, 65, 70, 72] {
            assert!(!key.verify(&digest, &vec![0xab; len]), "length {len}");
        }
    }

    #[test]
    fn verify_accepts_either_s_form() {
        // Plain ECDSA: (r, s) and (r, n - s) both verify. No low-s rule.
        let key = DidKey::generate();
        let digest = [0x77u8; 32];
        let sig = key.sign(&digest).unwrap();

        let parsed = decode_signature(&sig).unwrap();
        let (r, s) = parsed.split_scalars();
        let negated_s = -*s;
        let flipped = Signature::from_scalars(r, negated_s).unwrap();
        let flipped = encode_signature(&flipped);

        assert_ne!(flipped, sig);
        assert_eq!(flipped[..32], sig[..32]);
        assert!(key.verify(&digest, &sig));
        assert!(key.verify(&digest, &flipped));
    }

    #[test]
    fn verify_rejects_zero_signature() {
        let key = DidKey::generate();
        assert!(!key.verify(&[0u8; 32], &[0u8; 64]));
    }

    #[test]
    fn display_and_from_str_agree() {
        let key = DidKey::generate();
        let did = key.to_string();
        assert_eq!(did, key.to_did());
        let parsed: DidKey = did.parse().unwrap();
        assert_eq!(parsed.public_key(), key.public_key());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let key = DidKey::from_private_scalar(&SCALAR).unwrap();
        let debug = format!("{key:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains(&hex::encode(SCALAR)));
    }

    #[test]
    fn serde_uses_identifier_and_drops_secret() {
        let key = DidKey::generate();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", key.to_did()));

        let back: DidKey = serde_json::from_str(&json).unwrap();
        assert!(!back.has_private_key());
        assert_eq!(back.public_key(), key.public_key());
    }

    #[test]
    fn serde_rejects_malformed_identifier() {
        let result: Result<DidKey, _> = serde_json::from_str("\"did:key:ABC\"");
        assert!(result.is_err());
    }

    #[test]
    fn compressed_key_matches_identifier_payload() {
        let key = DidKey::generate();
        let did = key.to_did();
        let bytes = bs58::decode(&did["did:key:z".len()..]).into_vec().unwrap();
        assert_eq!(&bytes[2..], &key.compressed_public_key());
    }

    #[test]
    fn key_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DidKey>();
    }
}
