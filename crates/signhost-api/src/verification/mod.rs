//! Polymorphic verification and authentication methods.
//!
//! On the wire every method is an object with a `"Type"` discriminator and
//! method-specific fields:
//!
//! ```json
//! { "Type": "IPAddress", "IPAddress": "1.2.3.4" }
//! ```
//!
//! Decoding goes through the [`VerificationRegistry`]: a known discriminator
//! yields its typed variant, an unknown one yields [`Verification::Unknown`]
//! with the raw fields retained, so new server-side methods never break
//! decoding.
//!
//! Callers can add their own methods at runtime:
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use signhost_api::{register_verification, Verification, VerificationKind};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! #[serde(rename_all = "PascalCase")]
//! struct Kennisnet {
//!     uid: String,
//! }
//!
//! impl VerificationKind for Kennisnet {
//!     const TYPE: &'static str = "Kennisnet";
//! }
//!
//! register_verification::<Kennisnet>();
//!
//! let v: Verification = serde_json::from_str(r#"{"Type":"Kennisnet","Uid":"k-1"}"#).unwrap();
//! assert_eq!(v.downcast_ref::<Kennisnet>().unwrap().uid, "k-1");
//! ```

mod kinds;
mod registry;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

pub use kinds::{
    ConsentVerification, CscVerification, DigidVerification, EherkenningVerification,
    EidasLoginVerification, IdealVerification, IdinVerification, IpAddressVerification,
    ItsmeIdentificationVerification, ItsmeSignVerification, OidcVerification, OnfidoVerification,
    PhoneNumberVerification, ScribbleVerification, SigningCertificateVerification,
    SurfnetVerification,
};
pub use registry::{decode_verification, register_verification, VerificationRegistry};

/// JSON property holding the discriminator.
pub const TYPE_PROPERTY: &str = "Type";

/// A verification method with a fixed discriminator.
///
/// Built-in methods map themselves onto their own [`Verification`] variant.
/// Caller-defined methods keep the default and become
/// [`Verification::Custom`]. Unit structs work too: a payload carrying only
/// `"Type"` decodes to them.
pub trait VerificationKind:
    Serialize + DeserializeOwned + fmt::Debug + Send + Sync + 'static
{
    /// Value of the `"Type"` property.
    const TYPE: &'static str;

    fn into_verification(self) -> Verification {
        Verification::Custom(Arc::new(self))
    }
}

/// Object-safe view of a caller-registered method.
pub trait CustomVerification: fmt::Debug + Send + Sync {
    fn verification_type(&self) -> &str;

    /// Method fields, without the discriminator.
    fn to_fields(&self) -> serde_json::Result<Value>;

    fn as_any(&self) -> &dyn Any;
}

impl<T: VerificationKind> CustomVerification for T {
    fn verification_type(&self) -> &str {
        T::TYPE
    }

    fn to_fields(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A decoded verification or authentication method.
#[derive(Debug, Clone)]
pub enum Verification {
    Consent(ConsentVerification),
    DigiD(DigidVerification),
    EidasLogin(EidasLoginVerification),
    Ideal(IdealVerification),
    Idin(IdinVerification),
    IpAddress(IpAddressVerification),
    ItsmeIdentification(ItsmeIdentificationVerification),
    ItsmeSign(ItsmeSignVerification),
    PhoneNumber(PhoneNumberVerification),
    Scribble(ScribbleVerification),
    SigningCertificate(SigningCertificateVerification),
    Surfnet(SurfnetVerification),
    Csc(CscVerification),
    Eherkenning(EherkenningVerification),
    Oidc(OidcVerification),
    Onfido(OnfidoVerification),

    /// A method registered at runtime with [`register_verification`].
    Custom(Arc<dyn CustomVerification>),

    /// A discriminator this client has no mapping for.
    Unknown {
        type_name: String,
        fields: Map<String, Value>,
    },
}

impl Verification {
    /// Wrap a typed method.
    pub fn new<T: VerificationKind>(kind: T) -> Self {
        kind.into_verification()
    }

    /// The `"Type"` discriminator.
    pub fn verification_type(&self) -> &str {
        match self {
            Self::Consent(_) => ConsentVerification::TYPE,
            Self::DigiD(_) => DigidVerification::TYPE,
            Self::EidasLogin(_) => EidasLoginVerification::TYPE,
            Self::Ideal(_) => IdealVerification::TYPE,
            Self::Idin(_) => IdinVerification::TYPE,
            Self::IpAddress(_) => IpAddressVerification::TYPE,
            Self::ItsmeIdentification(_) => ItsmeIdentificationVerification::TYPE,
            Self::ItsmeSign(_) => ItsmeSignVerification::TYPE,
            Self::PhoneNumber(_) => PhoneNumberVerification::TYPE,
            Self::Scribble(_) => ScribbleVerification::TYPE,
            Self::SigningCertificate(_) => SigningCertificateVerification::TYPE,
            Self::Surfnet(_) => SurfnetVerification::TYPE,
            Self::Csc(_) => CscVerification::TYPE,
            Self::Eherkenning(_) => EherkenningVerification::TYPE,
            Self::Oidc(_) => OidcVerification::TYPE,
            Self::Onfido(_) => OnfidoVerification::TYPE,
            Self::Custom(c) => c.verification_type(),
            Self::Unknown { type_name, .. } => type_name.as_str(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }

    /// Borrow a caller-registered method as its concrete type.
    pub fn downcast_ref<T: VerificationKind>(&self) -> Option<&T> {
        match self {
            Self::Custom(c) => c.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Method fields, without the discriminator.
    pub fn to_fields(&self) -> serde_json::Result<Value> {
        match self {
            Self::Consent(v) => serde_json::to_value(v),
            Self::DigiD(v) => serde_json::to_value(v),
            Self::EidasLogin(v) => serde_json::to_value(v),
            Self::Ideal(v) => serde_json::to_value(v),
            Self::Idin(v) => serde_json::to_value(v),
            Self::IpAddress(v) => serde_json::to_value(v),
            Self::ItsmeIdentification(v) => serde_json::to_value(v),
            Self::ItsmeSign(v) => serde_json::to_value(v),
            Self::PhoneNumber(v) => serde_json::to_value(v),
            Self::Scribble(v) => serde_json::to_value(v),
            Self::SigningCertificate(v) => serde_json::to_value(v),
            Self::Surfnet(v) => serde_json::to_value(v),
            Self::Csc(v) => serde_json::to_value(v),
            Self::Eherkenning(v) => serde_json::to_value(v),
            Self::Oidc(v) => serde_json::to_value(v),
            Self::Onfido(v) => serde_json::to_value(v),
            Self::Custom(c) => c.to_fields(),
            Self::Unknown { fields, .. } => Ok(Value::Object(fields.clone())),
        }
    }
}

impl Serialize for Verification {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let fields = self.to_fields().map_err(serde::ser::Error::custom)?;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(TYPE_PROPERTY, self.verification_type())?;
        if let Value::Object(fields) = fields {
            for (key, value) in fields.iter().filter(|(k, _)| *k != TYPE_PROPERTY) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Verification {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        VerificationRegistry::global()
            .decode_value(value)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize_writes_type_first_then_fields() {
        let v = Verification::new(PhoneNumberVerification {
            number: Some("+31612345678".into()),
            secure_download: Some(true),
        });
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.starts_with(r#"{"Type":"PhoneNumber""#), "{json}");
        assert_eq!(
            serde_json::from_str::<Value>(&json).unwrap(),
            json!({"Type": "PhoneNumber", "Number": "+31612345678", "SecureDownload": true})
        );
    }

    #[test]
    fn test_serialize_fieldless_kind() {
        let v = Verification::new(ConsentVerification {});
        assert_eq!(serde_json::to_value(&v).unwrap(), json!({"Type": "Consent"}));
    }

    #[test]
    fn test_unknown_reencodes_raw_fields() {
        let raw = json!({"Type": "Brand New", "Score": 7, "Nested": {"a": [1, 2]}});
        let v: Verification = serde_json::from_value(raw.clone()).unwrap();
        assert!(v.is_unknown());
        assert_eq!(v.verification_type(), "Brand New");
        assert_eq!(serde_json::to_value(&v).unwrap(), raw);
    }

    #[test]
    fn test_downcast_only_for_custom() {
        let v = Verification::new(ConsentVerification {});
        assert!(v.downcast_ref::<ConsentVerification>().is_none());
    }
}
