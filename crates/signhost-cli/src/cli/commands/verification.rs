//! `signhost verification` - inspect verification payloads.

use anyhow::{Context, Result};
use signhost_api::{decode_verification, VerificationRegistry};

use super::read_input;
use crate::cli::args::VerificationDecodeArgs;
use crate::exit_codes;

pub fn cmd_decode(args: &VerificationDecodeArgs) -> Result<i32> {
    let input = read_input(&args.input)?;
    let verification = decode_verification(&input)?;

    if verification.is_unknown() {
        tracing::warn!(
            verification_type = verification.verification_type(),
            "verification type not known to this build, fields kept as-is"
        );
    }
    let out =
        serde_json::to_string_pretty(&verification).context("failed to encode verification")?;
    println!("{out}");
    Ok(exit_codes::SUCCESS)
}

pub fn cmd_types() -> Result<i32> {
    for name in VerificationRegistry::global().registered_types() {
        println!("{name}");
    }
    Ok(exit_codes::SUCCESS)
}
