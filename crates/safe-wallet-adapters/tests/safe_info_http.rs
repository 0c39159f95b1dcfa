use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value};
use tiny_http::{Method, Response, Server, StatusCode};

use safe_wallet_adapters::{AppConfig, SafeInfoAdapter};
use safe_wallet_core::{ImplementationVersionState, PortError, SafeInfoPort};

mod common;

use common::{owner, safe_address};

#[test]
fn fetches_owners_threshold_and_version_state() {
    let calls = Arc::new(Mutex::new(Vec::<String>::new()));
    let body = json!({
        "address": safe_address().to_checksum(None),
        "nonce": "12",
        "threshold": 2,
        "owners": [owner(0x11).to_checksum(None), owner(0x22).to_checksum(None)],
        "version": "1.3.0+L2",
    });
    let (base_url, _join) = spawn_mock_server(Arc::clone(&calls), body);

    let adapter = SafeInfoAdapter::new(&AppConfig {
        safe_service_base_url: base_url,
        safe_service_timeout_ms: 5_000,
        ..AppConfig::default()
    })
    .expect("adapter");

    let info = adapter
        .fetch_safe_info(11155111, safe_address())
        .expect("safe info");
    assert_eq!(info.chain_id, 11155111);
    assert_eq!(info.owners, vec![owner(0x11), owner(0x22)]);
    assert_eq!(info.threshold, 2);
    assert_eq!(info.nonce, 12);
    assert_eq!(info.version.as_deref(), Some("1.3.0"));
    assert_eq!(
        info.implementation_version_state,
        ImplementationVersionState::Outdated
    );

    let calls = calls.lock().expect("calls lock");
    assert_eq!(
        calls.as_slice(),
        [format!("/api/v1/safes/{}/", safe_address().to_checksum(None))]
    );
}

#[test]
fn unknown_safe_maps_to_not_found() {
    let calls = Arc::new(Mutex::new(Vec::<String>::new()));
    let (base_url, _join) = spawn_mock_server(Arc::clone(&calls), Value::Null);

    let adapter = SafeInfoAdapter::new(&AppConfig {
        safe_service_base_url: format!("{base_url}/"),
        ..AppConfig::default()
    })
    .expect("adapter");

    let err = adapter
        .fetch_safe_info(1, owner(0x99))
        .expect_err("no such safe");
    assert!(matches!(err, PortError::NotFound(_)));
}

#[test]
fn invalid_latest_version_is_rejected_up_front() {
    let err = SafeInfoAdapter::new(&AppConfig {
        latest_safe_version: "latest".to_owned(),
        ..AppConfig::default()
    })
    .expect_err("bad version");
    assert!(matches!(err, PortError::Validation(_)));
}

fn spawn_mock_server(
    calls: Arc<Mutex<Vec<String>>>,
    safe_body: Value,
) -> (String, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = format!("http://{}", server.server_addr());
    let safe_path = format!("/api/v1/safes/{}/", safe_address().to_checksum(None));

    let join = thread::spawn(move || {
        for _ in 0..4 {
            let req = match server.recv() {
                Ok(r) => r,
                Err(_) => break,
            };
            let path = req.url().to_owned();
            if let Ok(mut g) = calls.lock() {
                g.push(path.clone());
            }
            let (code, payload) = match req.method() {
                Method::Get if path == safe_path && !safe_body.is_null() => {
                    (200, safe_body.clone())
                }
                _ => (404, json!({"detail": "Not found."})),
            };
            let response =
                Response::from_string(payload.to_string()).with_status_code(StatusCode(code));
            let _ = req.respond(response);
        }
    });

    (addr, join)
}
