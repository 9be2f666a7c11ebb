//! Transaction snapshot and file metadata types.
//!
//! Only the parts of the Signhost data model that postbacks and field
//! metadata touch are modelled here. Free-form `Context` blobs are carried
//! as opaque JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::field_value::FieldValue;
use crate::verification::Verification;

mod serde_null {
    use serde::{Deserialize, Deserializer};

    /// `null` decodes to the type's default instead of failing.
    pub fn default_on_null<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
    }
}

mod serde_date_time {
    use chrono::{DateTime, FixedOffset, NaiveDateTime};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use tracing::debug;

    const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    /// RFC 3339, or a timestamp without an offset read as UTC. Anything
    /// else decodes to `None`.
    pub fn lenient<'de, D>(d: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(d)?;
        Ok(match raw {
            Some(Value::String(s)) => parse(&s),
            Some(Value::Null) | None => None,
            Some(other) => {
                debug!(value = %other, "ignoring non-string date");
                None
            }
        })
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<FixedOffset>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt);
        }
        let parsed = NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc().fixed_offset());
        if parsed.is_none() {
            debug!(value = raw, "ignoring unparseable date");
        }
        parsed
    }
}

/// A transaction as returned by the API and embedded in postbacks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Transaction {
    pub id: String,

    /// Raw status code; see [`Transaction::status_kind`].
    pub status: i64,

    pub seal: bool,

    #[serde(deserialize_with = "serde_null::default_on_null")]
    pub files: BTreeMap<String, FileEntry>,

    #[serde(deserialize_with = "serde_null::default_on_null")]
    pub signers: Vec<Signer>,

    #[serde(deserialize_with = "serde_null::default_on_null")]
    pub receivers: Vec<Receiver>,

    pub reference: Option<String>,

    pub postback_url: Option<String>,

    pub sign_request_mode: i64,

    pub days_to_expire: i64,

    pub send_email_notifications: bool,

    #[serde(deserialize_with = "serde_date_time::lenient")]
    pub created_date_time: Option<DateTime<FixedOffset>>,

    #[serde(deserialize_with = "serde_date_time::lenient")]
    pub modified_date_time: Option<DateTime<FixedOffset>>,

    #[serde(
        rename = "CanceledDateTime",
        alias = "CancelledDateTime",
        deserialize_with = "serde_date_time::lenient"
    )]
    pub canceled_date_time: Option<DateTime<FixedOffset>>,

    /// Caller-defined context, passed through untouched.
    pub context: Option<Value>,
}

impl Transaction {
    /// Known status, or `None` for a code this client does not know.
    pub fn status_kind(&self) -> Option<TransactionStatus> {
        TransactionStatus::from_code(self.status)
    }
}

/// Transaction body of a postback: the snapshot plus its checksum.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostbackTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,

    #[serde(rename = "Checksum", default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

impl PostbackTransaction {
    pub fn into_transaction(self) -> Transaction {
        self.transaction
    }
}

/// Transaction status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    /// Not started yet, waiting for its documents.
    WaitingForDocument = 5,
    WaitingForSigner = 10,
    InProgress = 20,
    Signed = 30,
    Rejected = 40,
    Expired = 50,
    Cancelled = 60,
    Failed = 70,
}

impl TransactionStatus {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            5 => Some(Self::WaitingForDocument),
            10 => Some(Self::WaitingForSigner),
            20 => Some(Self::InProgress),
            30 => Some(Self::Signed),
            40 => Some(Self::Rejected),
            50 => Some(Self::Expired),
            60 => Some(Self::Cancelled),
            70 => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

/// A signer of a transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Signer {
    pub id: Option<String>,

    #[serde(deserialize_with = "serde_date_time::lenient")]
    pub expires: Option<DateTime<FixedOffset>>,

    pub email: Option<String>,

    /// Verification methods the signer has to complete.
    #[serde(deserialize_with = "serde_null::default_on_null")]
    pub verifications: Vec<Verification>,

    /// Authentication methods required before the signer can view documents.
    #[serde(deserialize_with = "serde_null::default_on_null")]
    pub authentications: Vec<Verification>,

    pub send_sign_request: bool,

    pub send_sign_confirmation: Option<bool>,

    pub sign_request_message: Option<String>,

    pub days_to_remind: Option<i64>,

    pub language: Option<String>,

    pub scribble_name: Option<String>,

    pub scribble_name_fixed: bool,

    pub reference: Option<String>,

    pub return_url: Option<String>,

    pub reject_reason: Option<String>,

    pub sign_url: Option<String>,

    #[serde(deserialize_with = "serde_null::default_on_null")]
    pub activities: Vec<Activity>,

    pub context: Option<Value>,
}

/// A receiver of the signed documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Receiver {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub language: Option<String>,
    pub message: Option<String>,
    pub reference: Option<String>,

    #[serde(deserialize_with = "serde_null::default_on_null")]
    pub activities: Vec<Activity>,

    pub context: Option<Value>,
}

/// Something that happened to a signer or receiver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Activity {
    pub id: Option<String>,

    /// Raw activity code; see [`Activity::activity_type`].
    pub code: i64,

    pub info: Option<String>,

    #[serde(deserialize_with = "serde_date_time::lenient")]
    pub created_date_time: Option<DateTime<FixedOffset>>,
}

impl Activity {
    pub fn activity_type(&self) -> Option<ActivityType> {
        ActivityType::from_code(self.code)
    }
}

/// Activity codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityType {
    InvitationSent = 101,
    InvitationReceived = 102,
    /// The sign url was opened.
    Opened = 103,
    InvitationReminderResent = 104,
    /// A document was opened; `info` holds the file id.
    DocumentOpened = 105,
    IdentityApproved = 110,
    IdentityFailed = 111,
    Cancelled = 201,
    Rejected = 202,
    Signed = 203,
    SignerDelegated = 204,
    SignedDocumentSent = 301,
    SignedDocumentOpened = 302,
    SignedDocumentDownloaded = 303,
    ReceiptSent = 401,
    ReceiptOpened = 402,
    ReceiptDownloaded = 403,
    Finished = 500,
    Deleted = 600,
    Expired = 700,
    EmailBounceHard = 901,
    EmailBounceSoft = 902,
    EmailBounceBlocked = 903,
    EmailBounceUndetermined = 904,
    Failed = 999,
}

impl ActivityType {
    const ALL: [ActivityType; 25] = [
        Self::InvitationSent,
        Self::InvitationReceived,
        Self::Opened,
        Self::InvitationReminderResent,
        Self::DocumentOpened,
        Self::IdentityApproved,
        Self::IdentityFailed,
        Self::Cancelled,
        Self::Rejected,
        Self::Signed,
        Self::SignerDelegated,
        Self::SignedDocumentSent,
        Self::SignedDocumentOpened,
        Self::SignedDocumentDownloaded,
        Self::ReceiptSent,
        Self::ReceiptOpened,
        Self::ReceiptDownloaded,
        Self::Finished,
        Self::Deleted,
        Self::Expired,
        Self::EmailBounceHard,
        Self::EmailBounceSoft,
        Self::EmailBounceBlocked,
        Self::EmailBounceUndetermined,
        Self::Failed,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    pub fn code(self) -> i64 {
        self as i64
    }
}

/// A file attached to a transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FileEntry {
    pub display_name: Option<String>,

    #[serde(deserialize_with = "serde_null::default_on_null")]
    pub links: Vec<FileLink>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FileLink {
    pub rel: Option<String>,
    #[serde(rename = "Type")]
    pub media_type: Option<String>,
    pub link: Option<String>,
}

/// Kind of form field placed on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileFieldType {
    Seal,
    Signature,
    Check,
    Radio,
    SingleLine,
    Number,
    Date,
}

/// A form field in file metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Field {
    #[serde(rename = "Type")]
    pub field_type: FileFieldType,

    #[serde(default)]
    pub value: FieldValue,

    pub location: Location,
}

/// Where a field is placed: by search text or by coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Which occurrence of `search` to use. The wire spelling is `Occurence`.
    #[serde(rename = "Occurence", skip_serializing_if = "Option::is_none")]
    pub occurrence: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<i32>,
}
