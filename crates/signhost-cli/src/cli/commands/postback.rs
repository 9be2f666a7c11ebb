//! `signhost postback` - check stored postbacks.

use anyhow::{Context, Result};
use signhost_api::{compute_postback_checksum, PostbackReceiver, ReceiverConfig, CHECKSUM_HEADER};

use super::read_input;
use crate::cli::args::{PostbackChecksumArgs, PostbackVerifyArgs};
use crate::exit_codes;

fn receiver_config(shared_secret: Option<&str>) -> Result<ReceiverConfig> {
    match shared_secret {
        Some(secret) if !secret.trim().is_empty() => Ok(ReceiverConfig::new(secret)),
        _ => Ok(ReceiverConfig::from_env()?),
    }
}

pub fn cmd_verify(args: &PostbackVerifyArgs) -> Result<i32> {
    let config = receiver_config(args.shared_secret.as_deref())?;
    let body = read_input(&args.body)?;

    let headers: Vec<(&str, &str)> = args
        .checksum
        .as_deref()
        .map(|c| (CHECKSUM_HEADER, c))
        .into_iter()
        .collect();

    let Some(transaction) = PostbackReceiver::new(config).validate(headers, &body) else {
        eprintln!("postback is not valid");
        return Ok(exit_codes::POSTBACK_INVALID);
    };

    tracing::info!(transaction_id = %transaction.id, status = transaction.status, "postback valid");
    if args.json {
        let out = serde_json::to_string_pretty(&transaction)
            .context("failed to encode transaction")?;
        println!("{out}");
    } else {
        let status = transaction
            .status_kind()
            .map_or_else(|| "unknown".to_string(), |s| format!("{s:?}"));
        println!(
            "valid: transaction {} status {} ({status})",
            transaction.id, transaction.status
        );
    }
    Ok(exit_codes::SUCCESS)
}

pub fn cmd_checksum(args: &PostbackChecksumArgs) -> Result<i32> {
    let config = receiver_config(args.shared_secret.as_deref())?;
    println!(
        "{}",
        compute_postback_checksum(&args.id, args.status, &config.shared_secret)
    );
    Ok(exit_codes::SUCCESS)
}
