//! HTTP request execution.
//!
//! The walkthrough never talks to reqwest directly. It goes through three
//! small seams:
//!
//! - [`Transport`]: sends one request and can be released.
//! - [`Connector`]: opens new transports (one per session).
//! - [`HttpClient`]: the capability the walkthrough steps are written against.
//!
//! [`native`] provides the reqwest-backed implementations; tests substitute
//! their own transports.

pub mod config;
pub mod error;
pub mod native;

pub use config::ExecutionConfig;
pub use error::RequestError;
pub use native::{ReqwestConnector, ReqwestTransport};

use crate::models::request::HttpRequest;
use crate::models::response::HttpResponse;

/// Sends fully prepared requests.
///
/// Implementations own their connection state. `close` releases it; after
/// that, `send` must fail with `RequestError::ConnectionClosed`.
pub trait Transport {
    /// Sends `request` and waits for the complete response.
    ///
    /// Any status code, including 4xx and 5xx, is a successful send.
    fn send(&mut self, request: &HttpRequest) -> Result<HttpResponse, RequestError>;

    /// Releases the underlying connection(s).
    fn close(&mut self);
}

/// Opens transports.
pub trait Connector {
    type Transport: Transport;

    fn connect(&self) -> Result<Self::Transport, RequestError>;
}

/// Something that can issue requests on the caller's behalf.
///
/// # Examples
///
/// ```no_run
/// use http_walkthrough::executor::{Connector, HttpClient, ReqwestConnector};
/// use http_walkthrough::session::Session;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut session = Session::open(ReqwestConnector::default().connect()?);
/// let response = session.get("https://api.github.com")?;
/// println!("Status: {}", response.status_code);
/// # Ok(())
/// # }
/// ```
pub trait HttpClient {
    /// Issues `request` and returns its response.
    fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, RequestError>;

    /// Issues a GET to `url`.
    fn get(&mut self, url: &str) -> Result<HttpResponse, RequestError> {
        self.execute(HttpRequest::get(url)?)
    }

    /// Issues a POST to `url` with `form` as a form-encoded body.
    fn post_form<K, V>(&mut self, url: &str, form: &[(K, V)]) -> Result<HttpResponse, RequestError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.execute(HttpRequest::post_form(url, form)?)
    }
}
