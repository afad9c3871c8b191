//! Status checks, payload access and form submission against a mock server
//! through the real reqwest transport.

use super::{init_test_env, ROOT_BODY};
use http_walkthrough::executor::{Connector, HttpClient, ReqwestConnector};
use http_walkthrough::session::Session;
use http_walkthrough::walkthrough::{check_targets, TargetOutcome};
use http_walkthrough::Error;

fn open_session() -> Session<http_walkthrough::executor::ReqwestTransport> {
    init_test_env();
    Session::open(ReqwestConnector::default().connect().expect("client builds"))
}

#[test]
fn test_one_success_and_one_404_in_list_order() {
    let mut server = mockito::Server::new();
    let root = server.mock("GET", "/").with_status(200).with_body("{}").create();
    let missing = server
        .mock("GET", "/blahblahblah")
        .with_status(404)
        .with_body(r#"{"message": "Not Found"}"#)
        .create();

    let good = server.url();
    let bad = format!("{}/blahblahblah", server.url());
    let mut session = open_session();
    let outcomes = check_targets(&mut session, &[good.as_str(), bad.as_str()]);

    let messages: Vec<String> = outcomes.iter().map(TargetOutcome::message).collect();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], "Request and response successful");
    assert!(messages[1].starts_with("HTTP Error: "));
    assert!(messages[1].contains("404"));
    assert_eq!(
        messages.iter().filter(|m| m.starts_with("HTTP Error")).count(),
        1
    );

    match &outcomes[1] {
        TargetOutcome::HttpError {
            error: Error::HttpStatus { status, url, .. },
            ..
        } => {
            assert_eq!(*status, 404);
            assert!(url.ends_with("/blahblahblah"));
        }
        other => panic!("Expected HttpError, got {:?}", other),
    }

    root.assert();
    missing.assert();
}

#[test]
fn test_server_error_is_http_error() {
    let mut server = mockito::Server::new();
    let _broken = server.mock("GET", "/broken").with_status(503).create();

    let url = format!("{}/broken", server.url());
    let mut session = open_session();
    let outcomes = check_targets(&mut session, &[url]);

    assert!(outcomes[0].message().starts_with("HTTP Error: 503 Server Error"));
}

#[test]
fn test_unreachable_target_is_other_error_and_scan_continues() {
    let mut server = mockito::Server::new();
    let root = server.mock("GET", "/").with_status(200).create();

    let good = server.url();
    let mut session = open_session();
    let outcomes = check_targets(&mut session, &["http://127.0.0.1:1/", good.as_str()]);

    assert!(outcomes[0].message().starts_with("Other error: "));
    assert!(outcomes[1].is_success());
    root.assert();
}

#[test]
fn test_payload_text_json_and_headers() {
    let mut server = mockito::Server::new();
    let _root = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "application/json; charset=utf-8")
        .with_header("server", "test-server")
        .with_body(ROOT_BODY)
        .create();

    let mut session = open_session();
    let response = session.get(&server.url()).unwrap();

    assert_eq!(response.content(), ROOT_BODY.as_bytes());
    assert_eq!(response.text(), ROOT_BODY);
    assert_eq!(
        response.json().unwrap().field_text("current_user_url").unwrap(),
        "https://api.github.com/user"
    );
    for name in ["server", "SERVER", "Server"] {
        assert_eq!(response.headers.get(name), Some("test-server"));
    }
}

#[test]
fn test_form_post_sends_encoded_body() {
    let mut server = mockito::Server::new();
    let echo = server
        .mock("POST", "/post")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body("key=value")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"form": {"key": "value"}}"#)
        .create();

    let url = format!("{}/post", server.url());
    let mut session = open_session();
    let response = session.post_form(&url, &[("key", "value")]).unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.request.url, url);
    assert_eq!(response.request.body.as_deref(), Some(&b"key=value"[..]));
    echo.assert();
}

#[test]
fn test_non_ascii_and_repeated_headers_are_kept() {
    let mut server = mockito::Server::new();
    let _root = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("server", "café-server")
        .with_header("x-multi", "a")
        .with_header("x-multi", "b")
        .with_body("{}")
        .create();

    let mut session = open_session();
    let response = session.get(&server.url()).unwrap();

    assert_eq!(response.headers.require("Server").unwrap(), "café-server");
    assert_eq!(response.headers.get("X-Multi"), Some("a, b"));
    assert!(response.headers.to_string().contains("server: café-server\n"));
}
