//! # CLI Interface
//!
//! Defines the command-line argument structure for `didkey` using `clap`
//! derive. Subcommands: `generate`, `resolve`, `sign`, `verify`, `version`.

use clap::{Args, Parser, Subcommand};

use crate::logging::LogFormat;

/// did:key toolkit for P-256 keys.
///
/// Mints key pairs, turns `did:key` identifiers back into public keys, and
/// signs or verifies 32-byte challenge digests.
#[derive(Parser, Debug)]
#[command(
    name = "didkey",
    about = "did:key toolkit for P-256 keys",
    version,
    propagate_version = true
)]
pub struct DidKeyCli {
    /// Log output format.
    #[arg(
        long,
        global = true,
        value_enum,
        env = "DIDKEY_LOG_FORMAT",
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Default log filter when `RUST_LOG` is not set.
    #[arg(long, global = true, env = "DIDKEY_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new key pair and print its identifier and private scalar.
    Generate(GenerateArgs),
    /// Parse a did:key identifier and print the embedded public key.
    Resolve(ResolveArgs),
    /// Sign a digest with a private scalar.
    Sign(SignArgs),
    /// Verify a signature against a did:key identifier.
    Verify(VerifyArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Print a JSON object instead of plain lines.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `resolve` subcommand.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// The `did:key:z...` identifier.
    pub did: String,

    /// Print a JSON object instead of plain lines.
    #[arg(long)]
    pub json: bool,
}

/// What gets signed or verified: a ready-made digest or a message to hash.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct DigestSource {
    /// Hex-encoded 32-byte digest, signed as-is.
    #[arg(long)]
    pub digest: Option<String>,

    /// UTF-8 message, hashed with SHA-256 before signing.
    #[arg(long)]
    pub message: Option<String>,
}

/// Arguments for the `sign` subcommand.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Hex-encoded 32-byte P-256 private scalar.
    ///
    /// Prefer the environment variable over the flag so the secret stays
    /// out of shell history.
    #[arg(long, env = "DIDKEY_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    #[command(flatten)]
    pub input: DigestSource,
}

/// Arguments for the `verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// The signer's `did:key:z...` identifier.
    pub did: String,

    #[command(flatten)]
    pub input: DigestSource,

    /// Hex-encoded 64-byte `r || s` signature.
    #[arg(long)]
    pub signature: String,
}
