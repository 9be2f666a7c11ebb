//! Discriminator → constructor table for verification methods.
//!
//! The table starts from the built-in methods and can be extended (or
//! overridden) at runtime. It is shared process state: decodes take a read
//! lock only long enough to copy out a constructor, registrations take the
//! write lock. A decode racing a registration may or may not see the new
//! mapping.

use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use serde_json::{Map, Value};

use super::kinds::{
    ConsentVerification, CscVerification, DigidVerification, EherkenningVerification,
    EidasLoginVerification, IdealVerification, IdinVerification, IpAddressVerification,
    ItsmeIdentificationVerification, ItsmeSignVerification, OidcVerification, OnfidoVerification,
    PhoneNumberVerification, ScribbleVerification, SigningCertificateVerification,
    SurfnetVerification,
};
use super::{Verification, VerificationKind, TYPE_PROPERTY};
use crate::error::{SignhostError, SignhostResult};

/// Builds a variant from the payload's properties (discriminator removed).
pub type Constructor = fn(Map<String, Value>) -> SignhostResult<Verification>;

static BUILTIN_VERIFICATIONS: &[(&str, Constructor)] = &[
    (ConsentVerification::TYPE, construct::<ConsentVerification>),
    (DigidVerification::TYPE, construct::<DigidVerification>),
    (EidasLoginVerification::TYPE, construct::<EidasLoginVerification>),
    (IdealVerification::TYPE, construct::<IdealVerification>),
    (IdinVerification::TYPE, construct::<IdinVerification>),
    (IpAddressVerification::TYPE, construct::<IpAddressVerification>),
    (
        ItsmeIdentificationVerification::TYPE,
        construct::<ItsmeIdentificationVerification>,
    ),
    (ItsmeSignVerification::TYPE, construct::<ItsmeSignVerification>),
    (PhoneNumberVerification::TYPE, construct::<PhoneNumberVerification>),
    (ScribbleVerification::TYPE, construct::<ScribbleVerification>),
    (
        SigningCertificateVerification::TYPE,
        construct::<SigningCertificateVerification>,
    ),
    (SurfnetVerification::TYPE, construct::<SurfnetVerification>),
    (CscVerification::TYPE, construct::<CscVerification>),
    (EherkenningVerification::TYPE, construct::<EherkenningVerification>),
    (OidcVerification::TYPE, construct::<OidcVerification>),
    (OnfidoVerification::TYPE, construct::<OnfidoVerification>),
];

fn construct<T: VerificationKind>(fields: Map<String, Value>) -> SignhostResult<Verification> {
    let no_fields = fields.is_empty();
    let kind = serde_json::from_value::<T>(Value::Object(fields))
        .or_else(|e| {
            // A unit struct only accepts `null`.
            if no_fields {
                serde_json::from_value::<T>(Value::Null).map_err(|_| e)
            } else {
                Err(e)
            }
        })
        .map_err(|e| {
            SignhostError::malformed(format!("invalid '{}' verification: {}", T::TYPE, e))
        })?;
    Ok(kind.into_verification())
}

/// Registry of verification discriminators.
#[derive(Debug)]
pub struct VerificationRegistry {
    constructors: RwLock<HashMap<String, Constructor>>,
}

impl VerificationRegistry {
    /// Create a registry holding the built-in methods.
    pub fn new() -> Self {
        let constructors = BUILTIN_VERIFICATIONS
            .iter()
            .map(|(type_name, ctor)| ((*type_name).to_string(), *ctor))
            .collect();
        Self {
            constructors: RwLock::new(constructors),
        }
    }

    /// The process-wide registry used by `Deserialize for Verification`.
    pub fn global() -> &'static VerificationRegistry {
        static GLOBAL: OnceLock<VerificationRegistry> = OnceLock::new();
        GLOBAL.get_or_init(VerificationRegistry::new)
    }

    /// Map `T::TYPE` to `T`, replacing any existing mapping.
    ///
    /// Returns `true` if a previous mapping was replaced.
    pub fn register<T: VerificationKind>(&self) -> bool {
        self.register_constructor(T::TYPE, construct::<T>)
    }

    /// Map a discriminator to an explicit constructor.
    pub fn register_constructor(&self, type_name: impl Into<String>, ctor: Constructor) -> bool {
        let type_name = type_name.into();
        let mut constructors = self
            .constructors
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let replaced = constructors.insert(type_name.clone(), ctor).is_some();
        tracing::debug!(type_name = %type_name, replaced, "registered verification type");
        replaced
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.lookup(type_name).is_some()
    }

    /// Registered discriminators, sorted.
    pub fn registered_types(&self) -> Vec<String> {
        let constructors = self
            .constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut types: Vec<String> = constructors.keys().cloned().collect();
        types.sort();
        types
    }

    fn lookup(&self, type_name: &str) -> Option<Constructor> {
        self.constructors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(type_name)
            .copied()
    }

    /// Decode a parsed verification payload.
    ///
    /// # Errors
    ///
    /// `MalformedPayload` when the payload is not an object, when `"Type"`
    /// is missing or not a string, or when the fields do not fit the
    /// registered variant. An unmapped discriminator is not an error.
    pub fn decode_value(&self, value: Value) -> SignhostResult<Verification> {
        let Value::Object(mut fields) = value else {
            return Err(SignhostError::malformed(
                "verification payload must be a JSON object",
            ));
        };

        let type_name = match fields.remove(TYPE_PROPERTY) {
            Some(Value::String(s)) => s,
            Some(other) => {
                return Err(SignhostError::malformed(format!(
                    "verification \"{TYPE_PROPERTY}\" must be a string, got {other}"
                )))
            }
            None => {
                return Err(SignhostError::malformed(format!(
                    "verification payload has no \"{TYPE_PROPERTY}\" property"
                )))
            }
        };

        match self.lookup(&type_name) {
            Some(ctor) => ctor(fields),
            None => {
                tracing::debug!(type_name = %type_name, "unmapped verification type, keeping raw fields");
                Ok(Verification::Unknown { type_name, fields })
            }
        }
    }

    /// Decode a verification payload from JSON text.
    pub fn decode(&self, json: &str) -> SignhostResult<Verification> {
        let value: Value = serde_json::from_str(json)?;
        self.decode_value(value)
    }
}

impl Default for VerificationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Register a caller-defined method in the process-wide registry.
pub fn register_verification<T: VerificationKind>() -> bool {
    VerificationRegistry::global().register::<T>()
}

/// Decode a verification payload with the process-wide registry.
pub fn decode_verification(json: &str) -> SignhostResult<Verification> {
    VerificationRegistry::global().decode(json)
}
