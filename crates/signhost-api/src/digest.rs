//! Upload integrity digests (the `Digest` request header).
//!
//! Hashing reads the whole remaining stream synchronously. Async callers
//! should run it on a blocking thread.

use std::convert::Infallible;
use std::fmt;
use std::io::{Read, Seek, SeekFrom};
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use sha2::{Digest, Sha256, Sha512};
use tracing::debug;

use crate::error::{SignhostError, SignhostResult};

/// Name of the request header carrying the digest.
pub const DIGEST_HEADER: &str = "Digest";

/// Digest algorithm for uploads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DigestAlgorithm {
    /// No digest.
    None,
    #[default]
    Sha256,
    Sha512,
    /// An algorithm this crate cannot compute. Usable only with a
    /// precomputed digest.
    Other(String),
}

impl DigestAlgorithm {
    /// Resolve an algorithm name. Names this crate cannot compute become
    /// [`DigestAlgorithm::Other`].
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        match name.to_ascii_uppercase().as_str() {
            "" | "NONE" => Self::None,
            "SHA-256" | "SHA256" => Self::Sha256,
            "SHA-512" | "SHA512" => Self::Sha512,
            _ => Self::Other(name.to_string()),
        }
    }

    /// Name used in the header value (`SHA-256=...`).
    pub fn wire_name(&self) -> &str {
        match self {
            Self::None => "",
            Self::Sha256 => "SHA-256",
            Self::Sha512 => "SHA-512",
            Self::Other(name) => name,
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            other => f.write_str(other.wire_name()),
        }
    }
}

/// Per-upload digest settings. A computed digest is cached in
/// `precomputed`, so reusing the options never hashes twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestOptions {
    pub enabled: bool,
    pub algorithm: DigestAlgorithm,
    pub precomputed: Option<Vec<u8>>,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            algorithm: DigestAlgorithm::Sha256,
            precomputed: None,
        }
    }
}

impl DigestOptions {
    /// Options that never produce a header.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Use a digest computed elsewhere; the stream is then never read.
    pub fn with_precomputed(mut self, digest: impl Into<Vec<u8>>) -> Self {
        self.precomputed = Some(digest.into());
        self
    }
}

/// Readers that can also seek.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// The body of an upload, as far as digesting is concerned.
pub enum UploadStream<'a> {
    /// Can be rewound after hashing.
    Seekable(&'a mut dyn ReadSeek),
    /// Forward-only; reading it would consume the upload.
    Forward(&'a mut dyn Read),
}

impl fmt::Debug for UploadStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seekable(_) => f.write_str("UploadStream::Seekable"),
            Self::Forward(_) => f.write_str("UploadStream::Forward"),
        }
    }
}

/// Compute the `Digest` header value for an upload.
///
/// Returns `Ok(None)` when digesting is disabled, or when the stream is
/// forward-only and nothing was precomputed. A seekable stream is hashed
/// from its current position to the end and then put back where it was.
pub fn compute_digest_header(
    stream: UploadStream<'_>,
    options: &mut DigestOptions,
) -> SignhostResult<Option<String>> {
    if !options.enabled || options.algorithm == DigestAlgorithm::None {
        return Ok(None);
    }

    if options.precomputed.is_none() {
        let Some(digest) = digest_stream(stream, &options.algorithm)? else {
            return Ok(None);
        };
        options.precomputed = Some(digest);
    }

    Ok(options
        .precomputed
        .as_ref()
        .map(|digest| format!("{}={}", options.algorithm.wire_name(), BASE64.encode(digest))))
}

/// [`compute_digest_header`] for any seekable reader.
pub fn compute_digest_header_seekable<S: Read + Seek>(
    stream: &mut S,
    options: &mut DigestOptions,
) -> SignhostResult<Option<String>> {
    compute_digest_header(UploadStream::Seekable(stream), options)
}

fn digest_stream(
    stream: UploadStream<'_>,
    algorithm: &DigestAlgorithm,
) -> SignhostResult<Option<Vec<u8>>> {
    if let DigestAlgorithm::Other(name) = algorithm {
        return Err(SignhostError::HashAlgorithmUnavailable {
            algorithm: name.clone(),
        });
    }

    let stream = match stream {
        UploadStream::Seekable(s) => s,
        UploadStream::Forward(_) => {
            debug!(algorithm = %algorithm, "stream is not seekable, skipping digest");
            return Ok(None);
        }
    };

    let position = match stream.stream_position() {
        Ok(p) => p,
        Err(e) => {
            debug!(error = %e, "stream position unavailable, skipping digest");
            return Ok(None);
        }
    };

    let hashed = match algorithm {
        DigestAlgorithm::Sha512 => hash_reader::<Sha512, _>(&mut *stream),
        _ => hash_reader::<Sha256, _>(&mut *stream),
    };
    let restored = stream.seek(SeekFrom::Start(position));

    let digest = hashed?;
    restored?;
    debug!(algorithm = %algorithm, position, "computed upload digest");
    Ok(Some(digest))
}

fn hash_reader<D: Digest, R: Read + ?Sized>(reader: &mut R) -> std::io::Result<Vec<u8>> {
    let mut hasher = D::new();
    let mut buf = [0_u8; 8192];

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hasher.finalize().to_vec())
}
