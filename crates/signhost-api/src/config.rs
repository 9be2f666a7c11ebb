//! Receiver configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SignhostError, SignhostResult};

/// Environment variable holding the postback shared secret.
pub const SHARED_SECRET_ENV: &str = "SIGNHOST_SHARED_SECRET";

/// Configuration for validating incoming postbacks.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverConfig {
    /// Secret shared with Signhost, mixed into every postback checksum.
    #[serde(default)]
    pub shared_secret: String,
}

impl ReceiverConfig {
    pub fn new(shared_secret: impl Into<String>) -> Self {
        Self {
            shared_secret: shared_secret.into(),
        }
    }

    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `SIGNHOST_SHARED_SECRET` | Postback shared secret (required) |
    pub fn from_env() -> SignhostResult<Self> {
        match std::env::var(SHARED_SECRET_ENV) {
            Ok(secret) if !secret.trim().is_empty() => Ok(Self::new(secret)),
            _ => Err(SignhostError::Config {
                message: format!("{SHARED_SECRET_ENV} is not set"),
            }),
        }
    }

    /// Set the shared secret.
    pub fn with_shared_secret(mut self, shared_secret: impl Into<String>) -> Self {
        self.shared_secret = shared_secret.into();
        self
    }
}

impl fmt::Debug for ReceiverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiverConfig")
            .field("shared_secret", &"[REDACTED]")
            .finish()
    }
}
