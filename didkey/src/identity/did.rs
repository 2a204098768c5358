//! # `did:key` Identifier Grammar
//!
//! ```text
//! did:key:z<base58btc( varint(0x1200) || 0x02|0x03 || X )>
//! ^^^ ^^^ ^
//!  |   |  multibase marker for base58btc
//!  |   method
//!  scheme
//! ```
//!
//! Parsing is strict and checks in a fixed order, so each malformed input
//! maps to exactly one [`DidKeyError`] variant:
//!
//! 1. three `:`-separated segments ([`InvalidFormat`](DidKeyError::InvalidFormat))
//! 2. scheme `did` ([`InvalidScheme`](DidKeyError::InvalidScheme))
//! 3. method `key` ([`InvalidMethod`](DidKeyError::InvalidMethod))
//! 4. non-empty id ([`EmptyIdentifier`](DidKeyError::EmptyIdentifier))
//! 5. leading `z` ([`MissingPrefix`](DidKeyError::MissingPrefix))
//! 6. base58btc body ([`InvalidEncoding`](DidKeyError::InvalidEncoding))
//! 7. multicodec tag (`MalformedEnvelope` / `UnsupportedKeyType`)
//! 8. 33-byte payload ([`InvalidKeyLength`](DidKeyError::InvalidKeyLength))
//! 9. point on curve ([`InvalidPoint`](DidKeyError::InvalidPoint))
//!
//! ## Standards References
//!
//! - [The did:key Method](https://w3c-ccg.github.io/did-method-key/)
//! - [Multicodec table](https://github.com/multiformats/multicodec)

use p256::PublicKey;
use tracing::debug;

use crate::config::{
    COMPRESSED_POINT_LENGTH, DID_METHOD, DID_SCHEME, DID_SEPARATOR, MULTIBASE_BASE58BTC_PREFIX,
};
use crate::crypto::point::{decode_compressed, encode_compressed};
use crate::error::DidKeyError;
use crate::multicodec::{self, Codec};

/// Render a public key as a `did:key` identifier.
///
/// Total: every [`PublicKey`] is a valid curve point, so there is nothing
/// to fail on.
pub fn build(key: &PublicKey) -> String {
    let envelope = multicodec::encode(Codec::P256Pub, &encode_compressed(key));
    format!(
        "{DID_SCHEME}{DID_SEPARATOR}{DID_METHOD}{DID_SEPARATOR}{MULTIBASE_BASE58BTC_PREFIX}{}",
        bs58::encode(envelope).into_string()
    )
}

/// Parse a `did:key` identifier into the public key it embeds.
///
/// # Errors
///
/// One [`DidKeyError`] variant per failed check; see the module docs for
/// the order in which checks run.
pub fn parse_public_key(did: &str) -> Result<PublicKey, DidKeyError> {
    let result = parse_inner(did);
    if let Err(err) = &result {
        debug!(error = %err, "rejected did:key identifier");
    }
    result
}

fn parse_inner(did: &str) -> Result<PublicKey, DidKeyError> {
    let segments: Vec<&str> = did.split(DID_SEPARATOR).collect();
    let (scheme, method, id) = match segments.as_slice() {
        [scheme, method, id] => (*scheme, *method, *id),
        other => {
            return Err(DidKeyError::InvalidFormat {
                segments: other.len(),
            })
        }
    };

    if scheme != DID_SCHEME {
        return Err(DidKeyError::InvalidScheme(scheme.to_string()));
    }
    if method != DID_METHOD {
        return Err(DidKeyError::InvalidMethod(method.to_string()));
    }
    if id.is_empty() {
        return Err(DidKeyError::EmptyIdentifier);
    }

    let body = id
        .strip_prefix(MULTIBASE_BASE58BTC_PREFIX)
        .ok_or(DidKeyError::MissingPrefix)?;

    let decoded = bs58::decode(body)
        .into_vec()
        .map_err(|e| DidKeyError::InvalidEncoding(e.to_string()))?;

    let (Codec::P256Pub, payload) = multicodec::decode(&decoded)?;

    if payload.len() != COMPRESSED_POINT_LENGTH {
        return Err(DidKeyError::InvalidKeyLength {
            expected: COMPRESSED_POINT_LENGTH,
            actual: payload.len(),
        });
    }

    decode_compressed(payload)
}
