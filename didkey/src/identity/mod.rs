//! # Identity Module
//!
//! The `did:key` identity layer. Two pieces:
//!
//! 1. **did** — the textual grammar. Builds `did:key:z...` from a public key
//!    and takes an untrusted string apart, rejecting anything that is not
//!    exactly a P-256 `did:key`.
//! 2. **key** — [`DidKey`], the key entity. Either public-only (what you get
//!    from parsing someone else's identifier) or a full key pair (what you
//!    build from your own private scalar). Only the latter can sign.
//!
//! A `DidKey` is immutable once built and is `Send + Sync`; share it across
//! threads freely.

pub mod did;
pub mod key;

pub use did::{build, parse_public_key};
pub use key::DidKey;
