use crate::availability::util::{date, samples};
use opds_availability::errors::RecordError;
use opds_availability::record::{Record, SCHEMA_VERSION, keys};
use opds_availability::{Availability, AvailabilityKind, Copies, Limited, Ready, Reserved};
use serde_json::{Value, json};
use wasm_bindgen_test::wasm_bindgen_test;

fn record(value: Value) -> Record {
    match value {
        Value::Object(record) => record,
        other => panic!("not an object: {other}"),
    }
}

#[test]
#[wasm_bindgen_test]
fn test_round_trip() {
    for availability in samples() {
        let record = availability.to_record();

        assert_eq!(
            Some(&availability),
            Availability::from_record(&record).as_ref(),
            "{record:?}",
        );
    }
}

#[test]
#[wasm_bindgen_test]
fn test_round_trip_through_json_text() {
    for availability in samples() {
        let text = serde_json::to_string(&availability).unwrap();
        let decoded: Availability = serde_json::from_str(&text).unwrap();

        assert_eq!(availability, decoded, "{text}");
    }
}

#[test]
#[wasm_bindgen_test]
fn test_encoding_is_minimal() {
    let limited = Availability::from(Limited::new(Copies::new(0), Copies::new(5), None, None));
    let unlimited = Availability::Unlimited;
    let ready = Availability::from(Ready::new(None, Some(date("2024-03-04T10:00:00Z"))));

    assert_eq!(
        record(json!({
            "type": "Limited",
            "version": SCHEMA_VERSION,
            "copiesAvailable": "0",
            "copiesTotal": "5",
        })),
        limited.to_record(),
    );
    assert_eq!(
        record(json!({ "type": "Unlimited", "version": SCHEMA_VERSION })),
        unlimited.to_record(),
    );
    assert_eq!(
        record(json!({
            "type": "Ready",
            "version": SCHEMA_VERSION,
            "until": "2024-03-04T10:00:00Z",
        })),
        ready.to_record(),
    );
}

#[test]
#[wasm_bindgen_test]
fn test_unknown_is_not_zero() {
    let reserved = Availability::from(
        Reserved::new(3, Copies::new(10), Copies::UNKNOWN, Copies::new(0), None, None).unwrap(),
    );
    let record = reserved.to_record();

    assert_eq!(Some("3"), record[keys::HOLDS_POSITION].as_str());
    assert_eq!(Some("unknown"), record[keys::COPIES_AVAILABLE].as_str());
    assert_eq!(Some("0"), record[keys::COPIES_TOTAL].as_str());
}

#[test]
#[wasm_bindgen_test]
fn test_reject_partial_records() {
    #[rustfmt::skip]
    let expected = [
        (
            RecordError::MissingField { kind: AvailabilityKind::Reserved, key: keys::HOLDS_POSITION },
            json!({ "type": "Reserved", "holdsTotal": "10", "copiesAvailable": "unknown", "copiesTotal": "10" }),
        ),
        (
            RecordError::MissingField { kind: AvailabilityKind::Unavailable, key: keys::COPIES_TOTAL },
            json!({ "type": "Unavailable", "holdsTotal": "1", "copiesAvailable": "0" }),
        ),
        (
            RecordError::MissingField { kind: AvailabilityKind::Limited, key: keys::COPIES_AVAILABLE },
            json!({ "type": "Limited", "copiesTotal": null }),
        ),
    ];

    for (error, value) in expected {
        let record = record(value);

        assert_eq!(Err(error), Availability::try_from_record(&record));
        assert_eq!(None, Availability::from_record(&record));
    }
}

#[test]
#[wasm_bindgen_test]
fn test_reject_invalid_records() {
    #[rustfmt::skip]
    let expected = [
        json!({}),
        json!({ "copiesAvailable": "1", "copiesTotal": "2" }),
        json!({ "type": "limited", "copiesAvailable": "1", "copiesTotal": "2" }),
        json!({ "type": "OnOrder" }),
        json!({ "type": 2 }),
        json!({ "type": "Unlimited", "version": SCHEMA_VERSION + 1 }),
        json!({ "type": "Unlimited", "version": "one" }),
        json!({ "type": "Unlimited", "version": 0 }),
        json!({ "type": "Reserved", "holdsPosition": "0", "holdsTotal": "1", "copiesAvailable": "0", "copiesTotal": "1" }),
        json!({ "type": "Reserved", "holdsPosition": "unknown", "holdsTotal": "1", "copiesAvailable": "0", "copiesTotal": "1" }),
        json!({ "type": "Limited", "copiesAvailable": "-1", "copiesTotal": "2" }),
        json!({ "type": "Ready", "since": "soon" }),
        json!({ "type": "Ready", "until": 1700000000 }),
    ];

    for value in expected {
        assert_eq!(None, Availability::from_record(&record(value.clone())), "{value}");
    }
}

#[test]
#[wasm_bindgen_test]
fn test_reject_reasons() {
    let unsupported = record(json!({ "type": "Ready", "version": 7 }));
    let unknown = record(json!({ "type": "OnOrder", "version": 1 }));
    let unversioned = record(json!({ "type": "Unlimited", "version": 0 }));
    let zero = record(json!({
        "type": "Reserved",
        "holdsPosition": 0,
        "holdsTotal": 1,
        "copiesAvailable": 0,
        "copiesTotal": 1,
    }));

    assert_eq!(
        Err(RecordError::UnsupportedVersion(7)),
        Availability::try_from_record(&unsupported),
    );
    assert_eq!(
        Err(RecordError::UnknownVariant("OnOrder".to_owned())),
        Availability::try_from_record(&unknown),
    );
    assert_eq!(
        Err(RecordError::InvalidField {
            key: keys::VERSION,
            value: "0".to_owned(),
        }),
        Availability::try_from_record(&unversioned),
    );
    assert!(matches!(
        Availability::try_from_record(&zero),
        Err(RecordError::Availability(_)),
    ));
    assert_eq!(
        Err(RecordError::MissingDiscriminator),
        Availability::try_from_record(&Record::new()),
    );
}

#[test]
#[wasm_bindgen_test]
fn test_legacy_records() {
    // Unversioned, with numeric counts
    let legacy = record(json!({
        "type": "Reserved",
        "holdsPosition": 2,
        "holdsTotal": 6,
        "copiesAvailable": 0,
        "copiesTotal": 3,
        "since": "2023-11-02T08:00:00Z",
    }));

    let expected = Reserved::new(
        2,
        Copies::new(6),
        Copies::new(0),
        Copies::new(3),
        Some(date("2023-11-02T08:00:00Z")),
        None,
    )
    .unwrap();
    assert_eq!(Some(Availability::Reserved(expected)), Availability::from_record(&legacy));
}

#[test]
#[wasm_bindgen_test]
fn test_unrelated_keys_are_ignored() {
    let record = record(json!({
        "type": "Ready",
        "version": 1,
        "holdsPosition": "4",
        "copiesTotal": "9",
    }));

    assert_eq!(
        Some(Availability::Ready(Ready::new(None, None))),
        Availability::from_record(&record),
    );
}

#[test]
#[wasm_bindgen_test]
fn test_deserialize_error() {
    let result = serde_json::from_str::<Availability>(r#"{ "type": "Reserved" }"#);

    assert!(result.is_err());
    assert!(serde_json::from_str::<Availability>(r#"["Unlimited"]"#).is_err());
}
