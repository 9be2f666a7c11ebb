//! `signhost digest` - compute an upload `Digest` header.

use std::fs::File;

use anyhow::{Context, Result};
use signhost_api::{
    compute_digest_header, DigestAlgorithm, DigestOptions, UploadStream, DIGEST_HEADER,
};

use super::is_stdin;
use crate::cli::args::DigestArgs;
use crate::exit_codes;

pub fn run(args: &DigestArgs) -> Result<i32> {
    let algorithm = DigestAlgorithm::from_name(&args.algorithm);
    let mut options = DigestOptions::default().with_algorithm(algorithm);
    if let Some(hex_digest) = &args.precomputed {
        let bytes = hex::decode(hex_digest.trim()).context("--precomputed is not valid hex")?;
        options = options.with_precomputed(bytes);
    }

    let header = if is_stdin(&args.file) {
        let mut stdin = std::io::stdin().lock();
        compute_digest_header(UploadStream::Forward(&mut stdin), &mut options)?
    } else {
        let mut file = File::open(&args.file)
            .with_context(|| format!("failed to open {}", args.file.display()))?;
        compute_digest_header(UploadStream::Seekable(&mut file), &mut options)?
    };

    match header {
        Some(value) => println!("{DIGEST_HEADER}: {value}"),
        None => eprintln!("no digest: input cannot be rewound or digesting is off"),
    }
    Ok(exit_codes::SUCCESS)
}
