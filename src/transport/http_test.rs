use super::*;

#[test]
fn connector_hands_out_a_transport_per_call() {
    let connector = HttpConnector::new(Timeouts { request_secs: 5, connect_secs: 1 });
    assert!(connector.connect().is_ok());
    assert!(connector.connect().is_ok());
}

#[test]
fn failed_client_build_is_reported_on_every_connect() {
    let connector = HttpConnector { http: Err("no tls backend".into()) };
    for _ in 0..2 {
        let Err(err) = connector.connect() else {
            panic!("expected transport to be unavailable");
        };
        assert!(matches!(err, ModExecError::TransportUnavailable(ref e) if e == "no tls backend"));
    }
}
