// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # didkey
//!
//! Entry point for the `didkey` binary. Parses CLI arguments, initializes
//! logging, and dispatches to the library.
//!
//! - `generate` — mint a key pair
//! - `resolve`  — identifier to public key
//! - `sign`     — sign a digest (or the SHA-256 of a message)
//! - `verify`   — check a signature against an identifier
//! - `version`  — print build version information

mod cli;
mod logging;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use sha2::{Digest, Sha256};

use didkey::config::{CURVE_NAME, DIGEST_LENGTH, SIGNATURE_LENGTH};
use didkey::DidKey;

use cli::{Commands, DidKeyCli, DigestSource};

fn main() -> Result<ExitCode> {
    let cli = DidKeyCli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Resolve(args) => resolve(args),
        Commands::Sign(args) => sign(args),
        Commands::Verify(args) => verify(args),
        Commands::Version => {
            print_version();
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// JSON shape printed by `generate --json`.
#[derive(Serialize)]
struct GeneratedKey {
    did: String,
    curve: &'static str,
    public_key: String,
    private_key: String,
}

/// JSON shape printed by `resolve --json`.
#[derive(Serialize)]
struct ResolvedKey {
    did: String,
    curve: &'static str,
    public_key: String,
}

fn generate(args: cli::GenerateArgs) -> Result<ExitCode> {
    let key = DidKey::generate();
    let secret = key
        .secret_scalar_bytes()
        .context("freshly generated key has no private scalar")?;

    let report = GeneratedKey {
        did: key.to_did(),
        curve: CURVE_NAME,
        public_key: hex::encode(key.compressed_public_key()),
        private_key: hex::encode(secret),
    };
    tracing::info!(did = %report.did, "generated key pair");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("did:         {}", report.did);
        println!("public key:  {}", report.public_key);
        println!("private key: {}", report.private_key);
    }
    Ok(ExitCode::SUCCESS)
}

fn resolve(args: cli::ResolveArgs) -> Result<ExitCode> {
    let key = DidKey::from_did(&args.did)
        .with_context(|| format!("failed to parse identifier {}", args.did))?;

    let report = ResolvedKey {
        did: key.to_did(),
        curve: CURVE_NAME,
        public_key: hex::encode(key.compressed_public_key()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("did:        {}", report.did);
        println!("curve:      {}", report.curve);
        println!("public key: {}", report.public_key);
    }
    Ok(ExitCode::SUCCESS)
}

fn sign(args: cli::SignArgs) -> Result<ExitCode> {
    let key = DidKey::from_private_scalar_hex(&args.secret_key)
        .context("failed to load private scalar")?;
    let digest = digest_from(&args.input)?;

    let signature = key.sign(&digest).context("failed to sign digest")?;
    tracing::info!(did = %key.to_did(), "signed digest");

    println!("{}", hex::encode(signature));
    Ok(ExitCode::SUCCESS)
}

fn verify(args: cli::VerifyArgs) -> Result<ExitCode> {
    let key = DidKey::from_did(&args.did)
        .with_context(|| format!("failed to parse identifier {}", args.did))?;
    let digest = digest_from(&args.input)?;
    let signature = hex::decode(args.signature.trim()).with_context(|| {
        format!("signature must be {SIGNATURE_LENGTH} hex-encoded bytes")
    })?;

    if key.verify(&digest, &signature) {
        println!("valid");
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!(did = %args.did, "signature did not verify");
        println!("invalid");
        Ok(ExitCode::FAILURE)
    }
}

/// Resolve `--digest`/`--message` into the 32 bytes that get signed.
fn digest_from(input: &DigestSource) -> Result<[u8; DIGEST_LENGTH]> {
    match (&input.digest, &input.message) {
        (Some(hex_digest), _) => {
            let bytes = hex::decode(hex_digest.trim()).context("digest is not valid hex")?;
            let len = bytes.len();
            bytes
                .try_into()
                .map_err(|_| anyhow::anyhow!("digest must be {DIGEST_LENGTH} bytes, got {len}"))
        }
        (None, Some(message)) => Ok(Sha256::digest(message.as_bytes()).into()),
        (None, None) => anyhow::bail!("either --digest or --message is required"),
    }
}

fn print_version() {
    println!("didkey {}", env!("CARGO_PKG_VERSION"));
    println!("curve:  {CURVE_NAME}");
    println!("method: did:key (multicodec p256-pub)");
}
