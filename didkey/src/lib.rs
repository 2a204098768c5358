// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # did:key for P-256
//!
//! A `did:key` identifier is a public key wearing a name tag. There is no
//! registry, no resolver round-trip, no blockchain: the identifier *is* the
//! key, spelled out in base58btc behind a multicodec type tag.
//!
//! ```text
//! did:key:z<base58btc( varint(0x1200) || compressed P-256 point )>
//! ```
//!
//! This crate implements that method for NIST P-256 (secp256r1) keys and
//! the challenge-response plumbing that goes with it: signing a 32-byte
//! digest and verifying the resulting 64-byte `r || s` signature.
//!
//! ## Architecture
//!
//! Leaf-first, the layers are:
//!
//! - **multicodec** — the self-describing binary envelope (varint tag + payload).
//! - **crypto::point** — 33-byte compressed SEC1 point codec.
//! - **crypto::signatures** — fixed-width `r || s` ECDSA signature codec.
//! - **identity::did** — the `did:key:z...` grammar, strict on input.
//! - **identity::key** — [`DidKey`], which composes all of the above.
//! - **config** — method constants. **error** — [`DidKeyError`].
//!
//! Curve arithmetic and ECDSA come from the `p256` crate and base58btc from
//! `bs58`. Nothing here reimplements field math.
//!
//! ## Errors vs. booleans
//!
//! Parsing and signing return typed errors. Verification returns `bool`
//! and never fails loudly: it is a predicate that sits on hot paths and
//! sees adversarial input.

pub mod config;
pub mod crypto;
pub mod error;
pub mod identity;
pub mod multicodec;

pub use error::DidKeyError;
pub use identity::DidKey;
