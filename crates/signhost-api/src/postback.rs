//! Postback (webhook) authentication.
//!
//! Signhost signs every postback with a SHA-1 checksum over
//! `"{Id}||{Status}|{SharedSecret}"`, sent in the `Checksum` header and
//! embedded in the body. Validation collapses every failure into "not
//! valid": callers learn nothing about why a postback was rejected. The
//! reason is logged at `debug` level without the secret or checksums.

use sha1::{Digest, Sha1};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::config::ReceiverConfig;
use crate::error::SignhostResult;
use crate::types::{PostbackTransaction, Transaction};

/// Header carrying the postback checksum.
pub const CHECKSUM_HEADER: &str = "Checksum";

/// Expected checksum for a postback, as lowercase hex.
pub fn compute_postback_checksum(id: &str, status: i64, shared_secret: &str) -> String {
    let input = format!("{id}||{status}|{shared_secret}");
    hex::encode(Sha1::digest(input.as_bytes()))
}

/// Validates inbound postbacks against a shared secret.
#[derive(Debug, Clone)]
pub struct PostbackReceiver {
    config: ReceiverConfig,
}

impl PostbackReceiver {
    pub fn new(config: ReceiverConfig) -> Self {
        Self { config }
    }

    /// Create a receiver from `SIGNHOST_SHARED_SECRET`.
    pub fn from_env() -> SignhostResult<Self> {
        Ok(Self::new(ReceiverConfig::from_env()?))
    }

    /// Validate a postback and return its transaction when authentic.
    ///
    /// `headers` yields `(name, value)` pairs in arrival order; a repeated
    /// header appears once per value. The first `Checksum` header (matched
    /// case-insensitively) takes precedence over the checksum in the body.
    pub fn validate<'a, I>(&self, headers: I, body: &str) -> Option<Transaction>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let postback: PostbackTransaction = match serde_json::from_str(body) {
            Ok(p) => p,
            Err(e) => {
                debug!(error = %e, "postback rejected: body does not decode");
                return None;
            }
        };

        let supplied = match checksum_header(headers) {
            Some(value) => Some(value.to_string()),
            None => postback.checksum.clone(),
        };

        let Some(supplied) = supplied.filter(|c| !c.trim().is_empty()) else {
            debug!("postback rejected: no checksum supplied");
            return None;
        };
        let transaction = postback.into_transaction();
        if transaction.id.trim().is_empty() {
            debug!("postback rejected: transaction id is empty");
            return None;
        }

        let expected = compute_postback_checksum(
            &transaction.id,
            transaction.status,
            &self.config.shared_secret,
        );
        if bool::from(expected.as_bytes().ct_eq(supplied.as_bytes())) {
            debug!(transaction_id = %transaction.id, status = transaction.status, "postback accepted");
            Some(transaction)
        } else {
            debug!(transaction_id = %transaction.id, "postback rejected: checksum mismatch");
            None
        }
    }

    /// Like [`PostbackReceiver::validate`], without the transaction.
    pub fn is_postback_checksum_valid<'a, I>(&self, headers: I, body: &str) -> bool
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.validate(headers, body).is_some()
    }
}

/// One-shot validation with an explicit secret.
pub fn validate_postback<'a, I>(headers: I, body: &str, shared_secret: &str) -> Option<Transaction>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    PostbackReceiver::new(ReceiverConfig::new(shared_secret)).validate(headers, body)
}

fn checksum_header<'a, I>(headers: I) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    headers
        .into_iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(CHECKSUM_HEADER))
        .map(|(_, value)| value)
}
