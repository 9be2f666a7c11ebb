use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "signhost",
    version,
    about = "Check Signhost postbacks, verification payloads and upload digests"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Postback (webhook) checksums
    Postback(PostbackArgs),
    /// Compute the `Digest` header for an upload
    Digest(DigestArgs),
    /// Verification method payloads
    Verification(VerificationArgs),
}

#[derive(Parser, Debug)]
pub struct PostbackArgs {
    #[command(subcommand)]
    pub cmd: PostbackSub,
}

#[derive(Subcommand, Debug)]
pub enum PostbackSub {
    /// Validate a stored postback body
    Verify(PostbackVerifyArgs),
    /// Print the expected checksum for a transaction id and status
    Checksum(PostbackChecksumArgs),
}

#[derive(Args, Debug, Clone)]
pub struct PostbackVerifyArgs {
    /// Postback body (JSON file, or `-` for stdin)
    pub body: PathBuf,

    /// Value of the `Checksum` request header, if one was received
    #[arg(long)]
    pub checksum: Option<String>,

    /// Shared secret configured for the postback url
    #[arg(long, env = "SIGNHOST_SHARED_SECRET", hide_env_values = true)]
    pub shared_secret: Option<String>,

    /// Print the validated transaction as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct PostbackChecksumArgs {
    /// Transaction id
    #[arg(long)]
    pub id: String,

    /// Transaction status code
    #[arg(long, allow_negative_numbers = true)]
    pub status: i64,

    /// Shared secret configured for the postback url
    #[arg(long, env = "SIGNHOST_SHARED_SECRET", hide_env_values = true)]
    pub shared_secret: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DigestArgs {
    /// File to digest (`-` reads stdin, which cannot be rewound)
    pub file: PathBuf,

    /// Digest algorithm (SHA-256, SHA-512)
    #[arg(long, default_value = "SHA-256")]
    pub algorithm: String,

    /// Use this digest (hex) instead of reading the file
    #[arg(long)]
    pub precomputed: Option<String>,
}

#[derive(Parser, Debug)]
pub struct VerificationArgs {
    #[command(subcommand)]
    pub cmd: VerificationSub,
}

#[derive(Subcommand, Debug)]
pub enum VerificationSub {
    /// Decode a verification payload and print its normalized form
    Decode(VerificationDecodeArgs),
    /// List the verification types this build understands
    Types,
}

#[derive(Args, Debug, Clone)]
pub struct VerificationDecodeArgs {
    /// Verification JSON (file, or `-` for stdin)
    pub input: PathBuf,
}
