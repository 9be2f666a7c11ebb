//! Decoding through the process-wide registry, as library users see it.

use serde::{Deserialize, Serialize};
use serde_json::json;
use signhost_api::{
    decode_field_value, decode_verification, encode_field_value, register_verification, Field,
    FieldValue, Level, SignhostError, Verification, VerificationKind, VerificationRegistry,
};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
struct Kennisnet {
    uid: String,
    #[serde(default)]
    school: Option<String>,
}

impl VerificationKind for Kennisnet {
    const TYPE: &'static str = "Kennisnet";
}

#[test]
fn test_custom_kind_round_trips_through_signer_json() {
    register_verification::<Kennisnet>();
    assert!(VerificationRegistry::global().contains("Kennisnet"));

    let v = decode_verification(r#"{"Type":"Kennisnet","Uid":"k-1","Extra":true}"#).unwrap();
    let kennisnet = v.downcast_ref::<Kennisnet>().expect("custom kind");
    assert_eq!(kennisnet.uid, "k-1");
    assert_eq!(kennisnet.school, None);

    let encoded = serde_json::to_value(&v).unwrap();
    assert_eq!(encoded, json!({"Type": "Kennisnet", "Uid": "k-1", "School": null}));
}

#[test]
fn test_eidas_level_is_lenient() {
    let v = decode_verification(r#"{"Type":"eIDAS Login","Uid":"u","Level":"Very High"}"#).unwrap();
    match v {
        Verification::EidasLogin(e) => assert_eq!(e.level, Some(Level::Unknown)),
        other => panic!("expected eIDAS Login, got {other:?}"),
    }

    let v = decode_verification(r#"{"Type":"eIDAS Login","Level":null}"#).unwrap();
    match v {
        Verification::EidasLogin(e) => assert_eq!(e.level, None),
        other => panic!("expected eIDAS Login, got {other:?}"),
    }
}

#[test]
fn test_missing_type_is_malformed() {
    let err = decode_verification(r#"{"Uid":"u"}"#).unwrap_err();
    assert!(matches!(err, SignhostError::MalformedPayload { .. }));
}

#[test]
fn test_field_values_keep_their_shape() {
    for (json, expected) in [
        (r#""x""#, FieldValue::from("x")),
        ("42", FieldValue::Integer(42)),
        ("2.5", FieldValue::Float(2.5)),
        ("true", FieldValue::Boolean(true)),
        ("false", FieldValue::Boolean(false)),
        ("null", FieldValue::Absent),
    ] {
        let decoded = decode_field_value(json).unwrap();
        assert_eq!(decoded, expected);
        assert_eq!(decode_field_value(&encode_field_value(&decoded)).unwrap(), expected);
    }

    for json in ["{}", "[1,2,3]"] {
        assert!(matches!(
            decode_field_value(json),
            Err(SignhostError::UnsupportedValueShape { .. })
        ));
    }
}

#[test]
fn test_file_metadata_fields_decode() {
    let fields: Vec<Field> = serde_json::from_value(json!([
        {"Type": "SingleLine", "Value": "John Smith", "Location": {"Search": "name", "Occurence": 1}},
        {"Type": "Check", "Value": true, "Location": {"PageNumber": 2, "Top": 10, "Left": 20}},
        {"Type": "Signature", "Value": null, "Location": {"Search": "sign here"}}
    ]))
    .unwrap();

    assert_eq!(fields[0].value.as_str(), Some("John Smith"));
    assert_eq!(fields[0].location.occurrence, Some(1));
    assert_eq!(fields[1].value.as_bool(), Some(true));
    assert_eq!(fields[1].location.page_number, Some(2));
    assert!(fields[2].value.is_absent());
}
