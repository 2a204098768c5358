//! # Curve Codecs
//!
//! Byte-level codecs between `p256` types and the wire formats `did:key`
//! uses. All curve arithmetic (point validation, square roots, ECDSA) is
//! delegated to the `p256` crate; this module only decides which bytes go
//! where and which inputs get rejected.
//!
//! - [`point`] — 33-byte compressed SEC1 public keys.
//! - [`signatures`] — 64-byte fixed-width `r || s` ECDSA signatures.

pub mod point;
pub mod signatures;

pub use point::{decode_compressed, encode_compressed};
pub use signatures::{decode_signature, encode_signature};
