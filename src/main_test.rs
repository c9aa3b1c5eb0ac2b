use super::*;
use serde_json::json;

#[test]
fn parses_call_with_args() {
    let cli = Cli::try_parse_from([
        "modexec",
        "--secure",
        "call",
        "Inventory",
        "list_items",
        "--args",
        r#"{"page":1}"#,
    ])
    .unwrap();
    assert!(cli.secure);
    let Command::Call { module, function, args } = cli.command else {
        panic!("expected call");
    };
    assert_eq!(module, "Inventory");
    assert_eq!(function, "list_items");
    assert_eq!(parse_args(args.as_deref()).unwrap(), Some(json!({ "page": 1 })));
}

#[test]
fn call_without_args_sends_none() {
    let cli = Cli::try_parse_from(["modexec", "call", "M", "f"]).unwrap();
    assert!(!cli.secure);
    let Command::Call { args, .. } = cli.command else {
        panic!("expected call");
    };
    assert_eq!(parse_args(args.as_deref()).unwrap(), None);
}

#[test]
fn invalid_args_json_is_rejected() {
    let err = parse_args(Some("{page:")).unwrap_err();
    assert!(matches!(err, CliError::InvalidJson(_)));
}

#[test]
fn failure_message_uses_errcode_and_errstr() {
    let err = CliError::from(Failure::unknown("Bad Gateway"));
    assert_eq!(err.to_string(), "ERR_UNKNOWN: Bad Gateway");
}
