//! End-to-end runs of the walkthrough driver against a mock API.

use super::{config_for, init_test_env, CountingConnector, ROOT_BODY};
use http_walkthrough::auth::basic::basic_auth;
use http_walkthrough::auth::{CredentialError, CredentialProvider, Credentials, StaticCredentials};
use http_walkthrough::walkthrough::{Step, Walkthrough};
use http_walkthrough::Error;

struct FailingPrompt;

impl CredentialProvider for FailingPrompt {
    fn obtain_credentials(&self, _username: &str) -> Result<Credentials, CredentialError> {
        Err(CredentialError::Prompt(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no terminal",
        )))
    }
}

fn mock_root(server: &mut mockito::ServerGuard, with_server_header: bool, hits: usize) -> mockito::Mock {
    let mut mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "application/json; charset=utf-8");
    if with_server_header {
        mock = mock.with_header("server", "test-server");
    }
    mock.with_body(ROOT_BODY).expect(hits).create()
}

#[test]
fn test_full_walkthrough_output() {
    init_test_env();
    let mut server = mockito::Server::new();
    let root = mock_root(&mut server, true, 3);
    let missing = server.mock("GET", "/blahblahblah").with_status(404).create();
    let echo = server
        .mock("POST", "/post")
        .match_body("key=value")
        .with_status(200)
        .with_body("{}")
        .create();
    let user = server
        .mock("GET", "/user")
        .match_header("authorization", basic_auth("octocat", "hunter2").as_str())
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_header("x-ratelimit-limit", "5000")
        .with_body(r#"{"login": "octocat", "id": 1}"#)
        .create();

    let connector = CountingConnector::new();
    let opened = connector.opened.clone();
    let closed = connector.closed.clone();
    let walkthrough = Walkthrough::new(
        config_for(&server.url()),
        connector,
        StaticCredentials::new("hunter2"),
    );

    let mut out = Vec::new();
    let reports = walkthrough.run(&mut out).unwrap();
    let output = String::from_utf8(out).unwrap();

    assert_eq!(reports.len(), Step::ALL.len());
    let order: Vec<Step> = reports.iter().map(|r| r.step).collect();
    assert_eq!(order, Step::ALL.to_vec());

    let status_lines = &reports[1].lines;
    assert_eq!(status_lines[0], "Request and response successful");
    assert!(status_lines[1].starts_with("HTTP Error: 404"));

    assert!(output.contains("Status code: 200 OK"));
    assert!(output.contains("Payload of response in bytes:"));
    assert!(output.contains("Payload of response in string (UTF-8):"));
    assert!(output.contains(
        "Current_user_url value of dictionary created from response payload: https://api.github.com/user"
    ));
    assert!(output.contains("Server name from header: test-server"));
    assert!(output.contains(&format!("Request URL: {}/post", server.url())));
    assert!(output.contains("Request body: key=value"));
    assert!(output.contains("x-ratelimit-limit: 5000"));
    assert!(output.contains("\"login\": \"octocat\""));

    // The shared client plus the authenticated session, each released once.
    assert_eq!(opened.get(), 2);
    assert_eq!(closed.get(), 2);

    root.assert();
    missing.assert();
    echo.assert();
    user.assert();
}

#[test]
fn test_missing_header_stops_the_walkthrough() {
    init_test_env();
    let mut server = mockito::Server::new();
    let root = mock_root(&mut server, false, 3);
    let _missing = server.mock("GET", "/blahblahblah").with_status(404).create();
    let echo = server.mock("POST", "/post").expect(0).create();

    let walkthrough = Walkthrough::new(
        config_for(&server.url()),
        CountingConnector::new(),
        StaticCredentials::new("hunter2"),
    );

    let mut out = Vec::new();
    let err = walkthrough.run(&mut out).unwrap_err();
    assert!(matches!(err, Error::KeyNotFound { ref key } if key == "Server"));

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Current_user_url value"));
    assert!(!output.contains("Request body"));

    root.assert();
    echo.assert();
}

#[test]
fn test_invalid_json_is_fatal() {
    init_test_env();
    let mut server = mockito::Server::new();
    let _root = server
        .mock("GET", "/")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>hello</html>")
        .create();

    let walkthrough = Walkthrough::new(
        config_for(&server.url()),
        CountingConnector::new(),
        StaticCredentials::new("hunter2"),
    )
    .with_steps(&[Step::Payload, Step::JsonField]);

    let err = walkthrough.run(&mut Vec::new()).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn test_simple_get_to_unreachable_host_is_fatal() {
    init_test_env();
    let config = config_for("http://127.0.0.1:1");

    let walkthrough = Walkthrough::new(config, CountingConnector::new(), StaticCredentials::new("x"))
        .with_steps(&[Step::SimpleGet]);

    let err = walkthrough.run(&mut Vec::new()).unwrap_err();
    assert!(matches!(err, Error::Request(_)));
}

#[test]
fn test_credential_failure_still_releases_session() {
    init_test_env();
    let mut server = mockito::Server::new();
    let user = server.mock("GET", "/user").expect(0).create();

    let connector = CountingConnector::new();
    let closed = connector.closed.clone();
    let walkthrough = Walkthrough::new(config_for(&server.url()), connector, FailingPrompt)
        .with_steps(&[Step::AuthenticatedSession]);

    let err = walkthrough.run(&mut Vec::new()).unwrap_err();
    assert!(matches!(err, Error::Credentials(CredentialError::Prompt(_))));
    assert_eq!(closed.get(), 2);
    user.assert();
}
