use super::*;

#[test]
fn error_code_config_parse() {
    let err = ModExecError::ConfigParse("bad".into());
    assert_eq!(err.error_code(), "E_CONFIG_PARSE");
    assert!(!err.retryable());
}

#[test]
fn error_code_transport_unavailable() {
    let err = ModExecError::TransportUnavailable("tls".into());
    assert_eq!(err.error_code(), "E_TRANSPORT_UNAVAILABLE");
    assert!(err.retryable());
}

#[test]
fn error_code_invalid_url() {
    let err = ModExecError::InvalidUrl { url: "dispenser.pl".into(), reason: "relative URL without a base".into() };
    assert_eq!(err.error_code(), "E_INVALID_URL");
    assert!(err.to_string().contains("dispenser.pl"));
}

#[test]
fn error_code_encode() {
    let err = ModExecError::Encode("nan".into());
    assert_eq!(err.error_code(), "E_ENCODE");
    assert!(!err.retryable());
}

#[test]
fn display_includes_detail() {
    let err = ModExecError::TransportUnavailable("no tls backend".into());
    assert_eq!(err.to_string(), "transport unavailable: no tls backend");
}
