//! Signhost client core.
//!
//! The parts of a Signhost API client that carry real logic, independent of
//! any HTTP transport:
//!
//! - Polymorphic verification decoding through a runtime-extensible registry
//! - Field values restricted to string, number, boolean or null
//! - Lenient decoding of enums whose vocabulary grows server-side ([`Level`])
//! - Postback (webhook) authentication with a shared secret
//! - Upload `Digest` headers computed from seekable streams
//!
//! # Quick Start
//!
//! ```
//! use signhost_api::{PostbackReceiver, ReceiverConfig};
//!
//! let receiver = PostbackReceiver::new(ReceiverConfig::new("SharedSecret"));
//! let body = r#"{"Id":"b10ae331-af78-4e79-a39e-5b64693b6b68","Status":20}"#;
//! let headers = [("Checksum", "cdc09eee2ed6df2846dcc193aedfef59f2834f8d")];
//!
//! let transaction = receiver.validate(headers, body).expect("authentic postback");
//! assert_eq!(transaction.status, 20);
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `SIGNHOST_SHARED_SECRET` | Shared secret for postback checksums |

pub mod config;
pub mod digest;
pub mod error;
pub mod field_value;
pub mod lenient;
pub mod postback;
pub mod types;
pub mod verification;

// Re-export main types
pub use config::{ReceiverConfig, SHARED_SECRET_ENV};
pub use digest::{
    compute_digest_header, compute_digest_header_seekable, DigestAlgorithm, DigestOptions,
    ReadSeek, UploadStream, DIGEST_HEADER,
};
pub use error::{SignhostError, SignhostResult};
pub use field_value::{decode_field_value, encode_field_value, FieldValue};
pub use lenient::{decode_lenient, encode_lenient, LenientEnum, Level};
pub use postback::{
    compute_postback_checksum, validate_postback, PostbackReceiver, CHECKSUM_HEADER,
};
pub use types::{
    Activity, ActivityType, Field, FileEntry, FileFieldType, FileLink, Location,
    PostbackTransaction, Receiver, Signer, Transaction, TransactionStatus,
};
pub use verification::{
    decode_verification, register_verification, CustomVerification, Verification,
    VerificationKind, VerificationRegistry,
};
