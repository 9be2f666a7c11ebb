//! Built-in verification and authentication methods.
//!
//! Each struct holds the fields of one method; the `"Type"` discriminator is
//! not a field, it comes from [`VerificationKind::TYPE`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{Verification, VerificationKind};
use crate::lenient::Level;

/// Adds a consent screen to the signing flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsentVerification {}

impl VerificationKind for ConsentVerification {
    const TYPE: &'static str = "Consent";

    fn into_verification(self) -> Verification {
        Verification::Consent(self)
    }
}

/// DigiD login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DigidVerification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bsn: Option<String>,
}

impl VerificationKind for DigidVerification {
    const TYPE: &'static str = "DigiD";

    fn into_verification(self) -> Verification {
        Verification::DigiD(self)
    }
}

/// eIDAS login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EidasLoginVerification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Level of assurance. `None` when the server sent `null` or nothing.
    pub level: Option<Level>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(with = "date_of_birth", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,
}

impl VerificationKind for EidasLoginVerification {
    const TYPE: &'static str = "eIDAS Login";

    fn into_verification(self) -> Verification {
        Verification::EidasLogin(self)
    }
}

/// iDEAL bank account check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IdealVerification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_holder_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_holder_city: Option<String>,
}

impl VerificationKind for IdealVerification {
    const TYPE: &'static str = "iDeal";

    fn into_verification(self) -> Verification {
        Verification::Ideal(self)
    }
}

/// iDIN bank identification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct IdinVerification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_holder_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_holder_address1: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_holder_address2: Option<String>,

    #[serde(with = "date_of_birth", skip_serializing_if = "Option::is_none")]
    pub account_holder_date_of_birth: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,
}

impl VerificationKind for IdinVerification {
    const TYPE: &'static str = "iDIN";

    fn into_verification(self) -> Verification {
        Verification::Idin(self)
    }
}

/// IP address recorded while signing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IpAddressVerification {
    #[serde(rename = "IPAddress", skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
}

impl VerificationKind for IpAddressVerification {
    const TYPE: &'static str = "IPAddress";

    fn into_verification(self) -> Verification {
        Verification::IpAddress(self)
    }
}

/// itsme identification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItsmeIdentificationVerification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl VerificationKind for ItsmeIdentificationVerification {
    const TYPE: &'static str = "itsme Identification";

    fn into_verification(self) -> Verification {
        Verification::ItsmeIdentification(self)
    }
}

/// itsme sign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItsmeSignVerification {}

impl VerificationKind for ItsmeSignVerification {
    const TYPE: &'static str = "itsme sign";

    fn into_verification(self) -> Verification {
        Verification::ItsmeSign(self)
    }
}

/// SMS code sent to a phone number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PhoneNumberVerification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure_download: Option<bool>,
}

impl VerificationKind for PhoneNumberVerification {
    const TYPE: &'static str = "PhoneNumber";

    fn into_verification(self) -> Verification {
        Verification::PhoneNumber(self)
    }
}

/// Handwritten or typed scribble.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ScribbleVerification {
    pub require_handsignature: bool,

    pub scribble_name_fixed: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scribble_name: Option<String>,
}

impl VerificationKind for ScribbleVerification {
    const TYPE: &'static str = "Scribble";

    fn into_verification(self) -> Verification {
        Verification::Scribble(self)
    }
}

/// Signing with the signer's own (qualified) certificate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SigningCertificateVerification {}

impl VerificationKind for SigningCertificateVerification {
    const TYPE: &'static str = "SigningCertificate";

    fn into_verification(self) -> Verification {
        Verification::SigningCertificate(self)
    }
}

/// SURFconext login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SurfnetVerification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,
}

impl VerificationKind for SurfnetVerification {
    const TYPE: &'static str = "SURFnet";

    fn into_verification(self) -> Verification {
        Verification::Surfnet(self)
    }
}

/// Cloud Signature Consortium qualified signing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CscVerification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbprint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_user_data: Option<BTreeMap<String, String>>,
}

impl VerificationKind for CscVerification {
    const TYPE: &'static str = "CSC Qualified";

    fn into_verification(self) -> Verification {
        Verification::Csc(self)
    }
}

/// eHerkenning business login.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EherkenningVerification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Entity concern ID (KvK number).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_concern_id_kvk_nr: Option<String>,
}

impl VerificationKind for EherkenningVerification {
    const TYPE: &'static str = "eHerkenning";

    fn into_verification(self) -> Verification {
        Verification::Eherkenning(self)
    }
}

/// OpenID Connect identification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OidcVerification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_name: Option<String>,
}

impl VerificationKind for OidcVerification {
    const TYPE: &'static str = "OpenID Providers";

    fn into_verification(self) -> Verification {
        Verification::Oidc(self)
    }
}

/// Onfido identity verification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct OnfidoVerification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_run_id: Option<Uuid>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,

    /// Raw Onfido attributes; availability is not guaranteed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
}

impl VerificationKind for OnfidoVerification {
    const TYPE: &'static str = "Onfido";

    fn into_verification(self) -> Verification {
        Verification::Onfido(self)
    }
}

/// Dates of birth arrive either as `YYYY-MM-DD` or as a date-time string.
mod date_of_birth {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(v: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match v {
            Some(d) => s.serialize_str(&d.format("%Y-%m-%d").to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let opt: Option<String> = Option::deserialize(d)?;
        let Some(raw) = opt else {
            return Ok(None);
        };
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Some(date));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Some(dt.date_naive()));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|dt| Some(dt.date()))
            .map_err(|e| serde::de::Error::custom(format!("invalid date '{raw}': {e}")))
    }
}
