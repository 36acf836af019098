use serde::Deserialize;
use serde_json::json;
use shopdesk_core::{FieldSpec, InputSchema, ToolError};

fn return_schema() -> InputSchema {
    InputSchema::new()
        .field(FieldSpec::string("order_id", "The order ID"))
        .field(FieldSpec::string("reason", "Reason for return").with_default(""))
}

#[derive(Debug, Deserialize, PartialEq)]
struct ReturnArgs {
    order_id: String,
    reason: String,
}

#[test]
fn bare_text_fills_first_field_and_defaults_apply() {
    let input = return_schema().parse("ORD003").expect("valid input");
    let args: ReturnArgs = input.deserialize().expect("typed args");
    assert_eq!(
        args,
        ReturnArgs {
            order_id: "ORD003".to_string(),
            reason: String::new(),
        }
    );
}

#[test]
fn quoted_text_is_unquoted() {
    let input = return_schema().parse("\"ORD003\"").expect("valid input");
    assert_eq!(input.get_str("order_id"), Some("ORD003"));
}

#[test]
fn json_object_is_matched_by_name() {
    let input = return_schema()
        .parse(r#"{"order_id": "ORD003", "reason": "too small", "extra": 1}"#)
        .expect("valid input");
    assert_eq!(input.get_str("reason"), Some("too small"));
    assert!(input.get("extra").is_none());
}

#[test]
fn fenced_json_is_accepted() {
    let input = return_schema()
        .parse("```json\n{\"order_id\": \"ORD005\"}\n```")
        .expect("valid input");
    assert_eq!(input.get_str("order_id"), Some("ORD005"));
}

#[test]
fn missing_required_field_is_reported() {
    let err = return_schema()
        .parse(r#"{"reason": "broken"}"#)
        .expect_err("order_id is required");
    assert!(matches!(err, ToolError::InvalidInput(_)));
    assert!(err.to_string().contains("order_id"));
}

#[test]
fn empty_literals_count_as_no_input() {
    let err = return_schema().parse("None").expect_err("order_id is required");
    assert!(err.to_string().contains("missing required field"));
}

#[test]
fn malformed_json_is_invalid_input() {
    let err = return_schema().parse("{order_id: ORD001").expect_err("bad json");
    assert!(err.to_string().contains("not a valid JSON object"));
}

#[test]
fn numbers_coerce_to_strings() {
    let input = return_schema()
        .parse(r#"{"order_id": 42}"#)
        .expect("valid input");
    assert_eq!(input.get_str("order_id"), Some("42"));
}

#[test]
fn object_fields_reject_scalars() {
    let schema = InputSchema::new()
        .field(FieldSpec::string("customer_id", "Customer ID"))
        .field(FieldSpec::object("preferences", "Preferences to update"));
    let err = schema
        .parse(r#"{"customer_id": "CUST001", "preferences": 3}"#)
        .expect_err("preferences must be an object");
    assert!(err.to_string().contains("preferences"));

    let input = schema
        .parse(r#"{"customer_id": "CUST001", "preferences": {"communication": "sms"}}"#)
        .expect("valid input");
    assert_eq!(input.get("preferences"), Some(&json!({"communication": "sms"})));
}

#[test]
fn schema_without_fields_ignores_input() {
    let input = InputSchema::new().parse("anything at all").expect("valid input");
    assert_eq!(input, Default::default());
}
