use super::*;

#[test]
fn errcode_reply_is_failure_with_full_payload() {
    let failure = parse_reply(r#"{"errcode":"E1","errstr":"bad"}"#).unwrap_err();
    assert_eq!(failure.errcode, "E1");
    assert_eq!(failure.errstr.as_deref(), Some("bad"));
    assert_eq!(failure.payload, json!({ "errcode": "E1", "errstr": "bad" }));
}

#[test]
fn plain_object_is_success() {
    let payload = parse_reply(r#"{"result":42}"#).unwrap();
    assert_eq!(payload, json!({ "result": 42 }));
}

#[test]
fn falsy_errcode_is_success() {
    for body in [
        r#"{"errcode":"","result":1}"#,
        r#"{"errcode":0,"result":1}"#,
        r#"{"errcode":null,"result":1}"#,
        r#"{"errcode":false,"result":1}"#,
    ] {
        assert!(parse_reply(body).is_ok(), "{body} should be a success");
    }
}

#[test]
fn non_string_errcode_is_rendered_as_json() {
    let failure = parse_reply(r#"{"errcode":500}"#).unwrap_err();
    assert_eq!(failure.errcode, "500");
    assert_eq!(failure.errstr, None);
}

#[test]
fn non_object_payloads_are_success() {
    assert_eq!(parse_reply("42").unwrap(), json!(42));
    assert_eq!(parse_reply(r#"["errcode"]"#).unwrap(), json!(["errcode"]));
    assert_eq!(parse_reply("null").unwrap(), Value::Null);
}

#[test]
fn invalid_json_is_parse_failure() {
    let failure = parse_reply("<html>oops</html>").unwrap_err();
    assert_eq!(failure.errcode, ERR_PARSE);
    assert!(failure.errstr.is_some());
}

#[test]
fn unknown_failure_matches_wire_shape() {
    let failure = Failure::unknown("Internal Error");
    assert_eq!(failure.errcode, ERR_UNKNOWN);
    assert_eq!(failure.errstr.as_deref(), Some("Internal Error"));
    assert_eq!(failure.payload, json!({ "errcode": "ERR_UNKNOWN", "errstr": "Internal Error" }));
}

#[test]
fn failure_display() {
    assert_eq!(Failure::unknown("Bad Gateway").to_string(), "ERR_UNKNOWN: Bad Gateway");
    let bare = parse_reply(r#"{"errcode":"E_DENIED"}"#).unwrap_err();
    assert_eq!(bare.to_string(), "E_DENIED");
}

#[test]
fn truthiness_follows_javascript() {
    assert!(!is_truthy(&json!(null)));
    assert!(!is_truthy(&json!(0.0)));
    assert!(!is_truthy(&json!("")));
    assert!(is_truthy(&json!("0")));
    assert!(is_truthy(&json!(-1)));
    assert!(is_truthy(&json!([])));
    assert!(is_truthy(&json!({})));
}
