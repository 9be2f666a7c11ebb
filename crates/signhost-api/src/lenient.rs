//! Lenient decoding for closed enums whose server-side vocabulary can grow.
//!
//! A known label decodes to its member. Any other string, or a number,
//! decodes to the enum's `UNKNOWN` sentinel instead of failing. `null` and a
//! missing property stay distinct from `UNKNOWN`: they decode to `None` when
//! the field is an `Option<T>` marked `#[serde(default)]`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A closed enum decoded leniently from its string label.
pub trait LenientEnum: Copy + Sized + 'static {
    /// Sentinel for labels this client does not know.
    const UNKNOWN: Self;

    /// All members with their canonical wire labels.
    const MEMBERS: &'static [(Self, &'static str)];

    /// Resolve a label exactly; `None` when unknown.
    fn from_label(label: &str) -> Option<Self>;

    /// Canonical wire label.
    fn label(self) -> &'static str;

    /// Resolve a label, falling back to [`LenientEnum::UNKNOWN`].
    fn from_label_lenient(label: &str) -> Self {
        Self::from_label(label).unwrap_or(Self::UNKNOWN)
    }
}

/// Decode a lenient enum from an optional JSON value.
///
/// `None` and `null` give "no value"; everything else yields a member.
pub fn decode_lenient<T: LenientEnum>(value: Option<&Value>) -> Option<T> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(T::from_label_lenient(s)),
        other => {
            tracing::debug!(value = %other, "non-string enum value, using unknown sentinel");
            Some(T::UNKNOWN)
        }
    }
}

/// Encode an optional lenient enum: the label, or `null` for no value.
pub fn encode_lenient<T: LenientEnum>(value: Option<T>) -> Value {
    value.map_or(Value::Null, |v| Value::String(v.label().to_string()))
}

pub(crate) fn deserialize_member<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: LenientEnum,
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    // Reached only for a present value; `Option<T>` consumes `null` first.
    Ok(decode_lenient(Some(&value)).unwrap_or(T::UNKNOWN))
}

pub(crate) fn serialize_member<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: LenientEnum,
    S: Serializer,
{
    serializer.serialize_str(value.label())
}

/// Level of assurance reported by an identity verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
    #[default]
    Unknown = 0,
    Low,
    Substantial,
    High,
}

impl LenientEnum for Level {
    const UNKNOWN: Self = Level::Unknown;

    const MEMBERS: &'static [(Self, &'static str)] = &[
        (Level::Unknown, "Unknown"),
        (Level::Low, "Low"),
        (Level::Substantial, "Substantial"),
        (Level::High, "High"),
    ];

    fn from_label(label: &str) -> Option<Self> {
        Self::MEMBERS
            .iter()
            .find(|(_, l)| *l == label)
            .map(|(member, _)| *member)
    }

    fn label(self) -> &'static str {
        match self {
            Level::Unknown => "Unknown",
            Level::Low => "Low",
            Level::Substantial => "Substantial",
            Level::High => "High",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Level {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serialize_member(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserialize_member(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize)]
    struct Holder {
        #[serde(rename = "Level", default)]
        level: Option<Level>,
    }

    fn decode(json: &str) -> Option<Level> {
        serde_json::from_str::<Holder>(json).unwrap().level
    }

    #[test]
    fn test_every_member_decodes_from_its_label() {
        for (member, label) in Level::MEMBERS {
            assert_eq!(decode(&format!(r#"{{"Level":"{label}"}}"#)), Some(*member));
        }
    }

    #[test]
    fn test_unknown_label_decodes_to_unknown() {
        assert_eq!(decode(r#"{"Level":"foobar"}"#), Some(Level::Unknown));
        assert_eq!(decode(r#"{"Level":"low"}"#), Some(Level::Unknown));
        assert_eq!(decode(r#"{"Level":3}"#), Some(Level::Unknown));
    }

    #[test]
    fn test_null_and_missing_are_no_value() {
        assert_eq!(decode(r#"{"Level":null}"#), None);
        assert_eq!(decode("{}"), None);
    }

    #[test]
    fn test_encode_labels_and_null() {
        let json = serde_json::to_value(Holder {
            level: Some(Level::Substantial),
        })
        .unwrap();
        assert_eq!(json, json!({"Level": "Substantial"}));

        let json = serde_json::to_value(Holder { level: None }).unwrap();
        assert_eq!(json, json!({"Level": null}));
    }

    #[test]
    fn test_decode_lenient_helpers() {
        assert_eq!(decode_lenient::<Level>(None), None);
        assert_eq!(decode_lenient::<Level>(Some(&Value::Null)), None);
        assert_eq!(
            decode_lenient::<Level>(Some(&json!("High"))),
            Some(Level::High)
        );
        assert_eq!(encode_lenient(Some(Level::Low)), json!("Low"));
        assert_eq!(encode_lenient::<Level>(None), Value::Null);
    }
}
