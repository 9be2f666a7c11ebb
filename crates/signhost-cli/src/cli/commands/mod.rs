use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use super::args::*;

pub mod digest;
pub mod postback;
pub mod verification;

pub fn dispatch(cli: Cli) -> Result<i32> {
    match cli.cmd {
        Command::Postback(args) => match args.cmd {
            PostbackSub::Verify(args) => postback::cmd_verify(&args),
            PostbackSub::Checksum(args) => postback::cmd_checksum(&args),
        },
        Command::Digest(args) => digest::run(&args),
        Command::Verification(args) => match args.cmd {
            VerificationSub::Decode(args) => verification::cmd_decode(&args),
            VerificationSub::Types => verification::cmd_types(),
        },
    }
}

pub(crate) fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read a text input; `-` means stdin.
pub(crate) fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
