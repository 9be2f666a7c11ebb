//! Error types for the Signhost client core.

/// Signhost client errors.
#[derive(Debug, thiserror::Error)]
pub enum SignhostError {
    /// Structurally invalid JSON, or a required discriminator/field is missing.
    #[error("malformed payload: {message}")]
    MalformedPayload { message: String },

    /// A field value was an object or an array.
    #[error("unsupported value shape: {shape} (only string, number, boolean or null are allowed)")]
    UnsupportedValueShape { shape: String },

    /// The requested digest algorithm has no implementation and no
    /// precomputed digest was supplied.
    #[error("no hash algorithm available for '{algorithm}'")]
    HashAlgorithmUnavailable { algorithm: String },

    /// Reading or repositioning an upload stream failed.
    #[error("i/o error: {message}")]
    Io { message: String },

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl SignhostError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload {
            message: message.into(),
        }
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } => 2,

            // Payload problems
            Self::MalformedPayload { .. } => 3,
            Self::UnsupportedValueShape { .. } => 3,

            // Digest problems
            Self::HashAlgorithmUnavailable { .. } => 4,
            Self::Io { .. } => 5,
        }
    }
}

impl From<std::io::Error> for SignhostError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SignhostError {
    fn from(err: serde_json::Error) -> Self {
        let message = err.to_string();
        match message.strip_prefix(crate::field_value::UNSUPPORTED_SHAPE_PREFIX) {
            Some(rest) => Self::UnsupportedValueShape {
                shape: rest.split_whitespace().next().unwrap_or("unknown").to_string(),
            },
            None => Self::MalformedPayload { message },
        }
    }
}

/// Result type for Signhost client operations.
pub type SignhostResult<T> = Result<T, SignhostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(SignhostError::malformed("x").exit_code(), 3);
        assert_eq!(
            SignhostError::HashAlgorithmUnavailable {
                algorithm: "MD5".into()
            }
            .exit_code(),
            4
        );
    }

    #[test]
    fn test_json_syntax_error_is_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(
            SignhostError::from(err),
            SignhostError::MalformedPayload { .. }
        ));
    }
}
