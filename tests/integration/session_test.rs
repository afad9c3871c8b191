//! Session lifecycle and authentication against real transports.

use super::{init_test_env, CountingConnector};
use http_walkthrough::auth::basic::basic_auth;
use http_walkthrough::auth::Credentials;
use http_walkthrough::executor::{Connector, HttpClient, RequestError};
use http_walkthrough::session::Session;

#[test]
fn test_scoped_session_releases_once_when_get_fails() {
    init_test_env();
    let connector = CountingConnector::new();
    let transport = connector.connect().unwrap();

    let result = Session::scoped(transport, |session| {
        session.set_auth(Credentials::new("octocat", "hunter2"));
        session.get("http://127.0.0.1:1/user")
    });

    assert!(matches!(result, Err(RequestError::NetworkError(_))));
    assert_eq!(connector.opened.get(), 1);
    assert_eq!(connector.closed.get(), 1);
}

#[test]
fn test_scoped_session_sends_basic_auth() {
    init_test_env();
    let mut server = mockito::Server::new();
    let user = server
        .mock("GET", "/user")
        .match_header("authorization", basic_auth("octocat", "hunter2").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"login": "octocat"}"#)
        .expect(2)
        .create();

    let connector = CountingConnector::new();
    let url = format!("{}/user", server.url());

    let logins = Session::scoped(connector.connect().unwrap(), |session| {
        session.set_auth(Credentials::new("octocat", "hunter2"));
        let first = session.get(&url)?;
        let second = session.get(&url)?;
        Ok::<_, RequestError>((first, second))
    })
    .unwrap();

    for response in [&logins.0, &logins.1] {
        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.json().unwrap().field_text("login").unwrap(),
            "octocat"
        );
    }
    assert_eq!(connector.closed.get(), 1);
    user.assert();
}

#[test]
fn test_dropped_session_releases_transport() {
    init_test_env();
    let connector = CountingConnector::new();
    {
        let _session = Session::open(connector.connect().unwrap());
        assert_eq!(connector.closed.get(), 0);
    }
    assert_eq!(connector.closed.get(), 1);
}
