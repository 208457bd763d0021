//! Encode/decode contract for transform configs
//!
//! - Decoding an encoded config yields the same config, absent fields included
//! - Strict decoding rejects unknown fields; lenient decoding drops them
//! - Nested decode failures keep the nested message and path

mod common;

use proptest::prelude::*;
use rstest::rstest;
use serde_json::{Value, json};
use xform_core::{Error, PreviewTransformRequest, Strictness, TransformConfig};

use common::transform_config_strategy;

proptest! {
    #[test]
    fn prop_decode_inverts_encode(config in transform_config_strategy()) {
        let document = config.to_document().unwrap();
        let decoded = TransformConfig::from_document(&document, Strictness::Strict).unwrap();
        prop_assert_eq!(decoded, config);
    }

    #[test]
    fn prop_json_text_round_trips(config in transform_config_strategy()) {
        let text = config.to_json_string().unwrap();
        let decoded = TransformConfig::from_json_str(&text, Strictness::Strict).unwrap();
        prop_assert_eq!(decoded, config);
    }

    #[test]
    fn prop_encoding_is_deterministic(config in transform_config_strategy()) {
        prop_assert_eq!(config.to_json_string().unwrap(), config.clone().to_json_string().unwrap());
    }

    #[test]
    fn prop_request_body_round_trips(config in transform_config_strategy()) {
        let request = PreviewTransformRequest::from(config);
        let document = request.to_document().unwrap();
        let decoded = PreviewTransformRequest::from_document(&document, Strictness::Strict).unwrap();
        prop_assert_eq!(decoded, request);
    }

    #[test]
    fn prop_absent_fields_are_never_written(config in transform_config_strategy()) {
        let document = config.to_document().unwrap();
        let fields = document.as_object().unwrap();
        prop_assert!(fields.values().all(|v| !v.is_null()));
        prop_assert_eq!(fields.contains_key("id"), config.id().is_some());
        prop_assert_eq!(fields.contains_key("dest"), config.dest().is_some());
        prop_assert_eq!(fields.contains_key("settings"), config.settings().is_some());
    }
}

fn preview_document() -> Value {
    json!({
        "source": {"index": ["orders"]},
        "pivot": {
            "group_by": {"customer": {"terms": {"field": "customer_id"}}},
            "aggregations": {"spend": {"sum": {"field": "total"}}}
        }
    })
}

fn with_field(path: &[&str], name: &str) -> Value {
    let mut document = preview_document();
    let mut target = &mut document;
    for segment in path {
        target = target.get_mut(*segment).unwrap();
    }
    target
        .as_object_mut()
        .unwrap()
        .insert(name.to_string(), json!("unexpected"));
    document
}

#[rstest]
#[case::top_level(&[], "unknown_field", "unknown_field")]
#[case::source(&["source"], "extra", "source.extra")]
#[case::pivot(&["pivot"], "extra", "pivot.extra")]
#[case::group_source(&["pivot", "group_by", "customer", "terms"], "extra", "pivot.group_by.customer.terms.extra")]
fn test_strict_decode_rejects_unknown_field(
    #[case] path: &[&str],
    #[case] name: &str,
    #[case] expected_path: &str,
) {
    let document = with_field(path, name);
    let err = TransformConfig::from_document(&document, Strictness::Strict).unwrap_err();

    assert!(
        err.to_string().contains(&format!("unknown field [{}]", expected_path)),
        "unexpected error: {}",
        err
    );
}

#[rstest]
#[case::top_level(&[], "unknown_field")]
#[case::source(&["source"], "extra")]
#[case::pivot(&["pivot"], "extra")]
#[case::group_source(&["pivot", "group_by", "customer", "terms"], "extra")]
fn test_lenient_decode_drops_unknown_field(#[case] path: &[&str], #[case] name: &str) {
    let document = with_field(path, name);
    let config = TransformConfig::from_document(&document, Strictness::Lenient).unwrap();

    assert_eq!(config.to_document().unwrap(), preview_document());
}

#[test]
fn test_top_level_unknown_field_is_unknown_field_error() {
    let document = with_field(&[], "unknown_field");
    let err = TransformConfig::from_document(&document, Strictness::Strict).unwrap_err();
    assert!(matches!(err, Error::UnknownField { ref path } if path == "unknown_field"));
}

#[test]
fn test_malformed_nested_object_keeps_nested_message() {
    let document = json!({
        "source": {"index": ["orders"]},
        "latest": {"unique_key": "customer_id", "sort": "ts"}
    });
    let err = TransformConfig::from_document(&document, Strictness::Lenient).unwrap_err();

    match &err {
        Error::MalformedNested { path, source } => {
            assert_eq!(path, "latest");
            assert!(
                matches!(**source, Error::InvalidField { ref path, .. } if path == "latest.unique_key")
            );
        }
        other => panic!("Expected malformed nested error, got {other:?}"),
    }
    assert!(err.to_string().contains("latest.unique_key"));
}

#[test]
fn test_missing_nested_required_field() {
    let document = json!({"source": {"query": {"match_all": {}}}});
    let err = TransformConfig::from_document(&document, Strictness::Strict).unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to parse field [source]: missing required field [source.index]"
    );
}

#[test]
fn test_conflicting_functions_fail_decode() {
    let mut document = preview_document();
    document["latest"] = json!({"unique_key": ["customer_id"], "sort": "ts"});

    for strictness in [Strictness::Strict, Strictness::Lenient] {
        let err = TransformConfig::from_document(&document, strictness).unwrap_err();
        assert!(matches!(err, Error::ConflictingFunctions { .. }));
    }
}

#[test]
fn test_explicit_null_decodes_as_absent() {
    let mut document = preview_document();
    document["id"] = Value::Null;
    document["dest"] = Value::Null;

    let config = TransformConfig::from_document(&document, Strictness::Strict).unwrap();
    assert!(config.id().is_none());
    assert!(config.dest().is_none());
    assert_eq!(config.to_document().unwrap(), preview_document());
}
