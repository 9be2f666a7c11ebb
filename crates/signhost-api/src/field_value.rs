//! Scalar-only JSON values for file field metadata.
//!
//! The `Value` of a form field is a string, a number, a boolean or `null`.
//! Objects and arrays are protocol violations and are rejected on decode;
//! they cannot be constructed on encode.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{SignhostError, SignhostResult};

/// Message prefix used when a value shape is rejected inside serde.
pub(crate) const UNSUPPORTED_SHAPE_PREFIX: &str = "unsupported value shape: ";

/// A scalar field value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// JSON `null`, or no value at all.
    #[default]
    Absent,
}

impl FieldValue {
    /// Decode from a parsed JSON value.
    ///
    /// Numbers become `Integer` when they are integral and fit an `i64`,
    /// otherwise `Float`. The parser turns `-0` into a negative zero float,
    /// which decodes as `Integer(0)`.
    pub fn from_json(value: &Value) -> SignhostResult<Self> {
        match value {
            Value::String(s) => Ok(Self::String(s.clone())),
            Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Ok(Self::Integer(i)),
                (None, Some(f)) if f == 0.0 && f.is_sign_negative() => Ok(Self::Integer(0)),
                (None, Some(f)) => Ok(Self::Float(f)),
                (None, None) => Err(SignhostError::malformed(format!(
                    "number {n} is not representable"
                ))),
            },
            Value::Bool(b) => Ok(Self::Boolean(*b)),
            Value::Null => Ok(Self::Absent),
            Value::Object(_) => Err(SignhostError::UnsupportedValueShape {
                shape: "object".to_string(),
            }),
            Value::Array(_) => Err(SignhostError::UnsupportedValueShape {
                shape: "array".to_string(),
            }),
        }
    }

    /// Encode to its native JSON shape.
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Integer(i) => Value::from(*i),
            // Non-finite floats have no JSON form and collapse to null.
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Boolean(b) => Value::Bool(*b),
            Self::Absent => Value::Null,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// Decode a field value from JSON text.
pub fn decode_field_value(json: &str) -> SignhostResult<FieldValue> {
    let value: Value = serde_json::from_str(json)?;
    FieldValue::from_json(&value)
}

/// Encode a field value to JSON text.
pub fn encode_field_value(value: &FieldValue) -> String {
    value.to_json().to_string()
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Absent => Ok(()),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Absent => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        FieldValue::from_json(&value).map_err(|e| match e {
            SignhostError::UnsupportedValueShape { shape } => {
                serde::de::Error::custom(format!("{UNSUPPORTED_SHAPE_PREFIX}{shape}"))
            }
            other => serde::de::Error::custom(other),
        })
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_scalars() {
        assert_eq!(
            decode_field_value(r#""Test Name""#).unwrap(),
            FieldValue::String("Test Name".into())
        );
        assert_eq!(decode_field_value("123").unwrap(), FieldValue::Integer(123));
        assert_eq!(decode_field_value("45.67").unwrap(), FieldValue::Float(45.67));
        assert_eq!(decode_field_value("true").unwrap(), FieldValue::Boolean(true));
        assert_eq!(decode_field_value("false").unwrap(), FieldValue::Boolean(false));
        assert_eq!(decode_field_value("null").unwrap(), FieldValue::Absent);
    }

    #[test]
    fn test_decode_number_outside_i64_is_float() {
        let v = decode_field_value("18446744073709551615").unwrap();
        assert!(matches!(v, FieldValue::Float(_)));
        assert_eq!(
            decode_field_value("-9223372036854775808").unwrap(),
            FieldValue::Integer(i64::MIN)
        );
    }

    #[test]
    fn test_negative_zero_is_integer() {
        assert_eq!(decode_field_value("-0").unwrap(), FieldValue::Integer(0));
        assert_eq!(decode_field_value("0").unwrap(), FieldValue::Integer(0));
        assert_eq!(decode_field_value("0.0").unwrap(), FieldValue::Float(0.0));
        let field: FieldValue = serde_json::from_str("-0").unwrap();
        assert_eq!(field, FieldValue::Integer(0));
    }

    #[test]
    fn test_decode_rejects_object_and_array() {
        match decode_field_value("{}") {
            Err(SignhostError::UnsupportedValueShape { shape }) => assert_eq!(shape, "object"),
            other => panic!("expected UnsupportedValueShape, got {other:?}"),
        }
        match decode_field_value("[1,2,3]") {
            Err(SignhostError::UnsupportedValueShape { shape }) => assert_eq!(shape, "array"),
            other => panic!("expected UnsupportedValueShape, got {other:?}"),
        }
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn test_round_trip_permitted_shapes() {
        let values = [
            FieldValue::from("x"),
            FieldValue::from(42i64),
            FieldValue::from(3.14f64),
            FieldValue::from(true),
            FieldValue::from(false),
            FieldValue::Absent,
        ];
        for v in values {
            let json = encode_field_value(&v);
            assert_eq!(decode_field_value(&json).unwrap(), v, "round trip of {json}");
        }
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn test_encode_native_shapes() {
        assert_eq!(encode_field_value(&FieldValue::from(42)), "42");
        assert_eq!(encode_field_value(&FieldValue::from(3.14)), "3.14");
        assert_eq!(encode_field_value(&FieldValue::from(true)), "true");
        assert_eq!(encode_field_value(&FieldValue::Absent), "null");
        assert_eq!(encode_field_value(&FieldValue::from("42")), r#""42""#);
    }

    #[test]
    fn test_integral_float_keeps_fractional_form() {
        let json = serde_json::to_string(&FieldValue::Float(3.0)).unwrap();
        assert_eq!(json, "3.0");
        assert_eq!(decode_field_value(&json).unwrap(), FieldValue::Float(3.0));
    }

    #[test]
    fn test_nested_object_value_maps_to_unsupported_shape() {
        #[derive(Debug, Deserialize)]
        struct Holder {
            #[serde(rename = "Value")]
            _value: FieldValue,
        }
        let err = serde_json::from_str::<Holder>(r#"{"Value": {"a": 1}}"#).unwrap_err();
        match SignhostError::from(err) {
            SignhostError::UnsupportedValueShape { shape } => assert_eq!(shape, "object"),
            other => panic!("expected UnsupportedValueShape, got {other:?}"),
        }
    }
}
