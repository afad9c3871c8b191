//! HTTP request data models.
//!
//! This module defines the request side of an exchange: the method, the
//! resolved target URL, headers, and the encoded body bytes that are actually
//! put on the wire.

use crate::executor::error::RequestError;
use crate::models::headers::Headers;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use url::form_urlencoded;

/// Content type used for form-encoded request bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// HTTP request method.
///
/// The walkthrough only ever reads resources or submits forms, so only the
/// two methods it issues are modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    GET,
    /// HTTP POST method - submit data to a resource
    POST,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::GET),
            "POST" => Ok(HttpMethod::POST),
            other => Err(RequestError::BuildError(format!(
                "unsupported method: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An HTTP request ready to be handed to a transport.
///
/// The URL is stored in its parsed, normalised form, so reading it back after
/// a call shows what was actually requested rather than the literal input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,

    /// Resolved target URL.
    pub url: String,

    /// Request headers, in insertion order.
    pub headers: Headers,

    /// Encoded request body, if any.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a request for `url`, validating that it is an absolute
    /// `http` or `https` URL.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::InvalidUrl` if the URL cannot be parsed and
    /// `RequestError::UnsupportedProtocol` for any other scheme.
    pub fn new(method: HttpMethod, url: &str) -> Result<Self, RequestError> {
        let parsed = resolve_url(url)?;
        Ok(Self {
            method,
            url: parsed.to_string(),
            headers: Headers::new(),
            body: None,
        })
    }

    /// Shorthand for a GET request.
    pub fn get(url: &str) -> Result<Self, RequestError> {
        Self::new(HttpMethod::GET, url)
    }

    /// Builds a POST request whose body is the form encoding of `form`.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_walkthrough::models::HttpRequest;
    ///
    /// let request = HttpRequest::post_form("https://httpbin.org/post", &[("key", "value")]).unwrap();
    /// assert_eq!(request.body.as_deref(), Some(&b"key=value"[..]));
    /// assert_eq!(request.content_type(), Some("application/x-www-form-urlencoded"));
    /// ```
    pub fn post_form<K, V>(url: &str, form: &[(K, V)]) -> Result<Self, RequestError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut request = Self::new(HttpMethod::POST, url)?;
        request.set_form_body(form);
        Ok(request)
    }

    /// Replaces the body with the form encoding of `form` and sets the
    /// matching `Content-Type`.
    pub fn set_form_body<K, V>(&mut self, form: &[(K, V)])
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in form {
            serializer.append_pair(key.as_ref(), value.as_ref());
        }
        self.body = Some(serializer.finish().into_bytes());
        self.headers.insert("Content-Type", FORM_CONTENT_TYPE);
    }

    /// Adds a header, replacing any existing header with the same name.
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name, value);
    }

    /// Checks if the request has a non-empty body.
    pub fn has_body(&self) -> bool {
        self.body.as_ref().is_some_and(|b| !b.is_empty())
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type")
    }
}

/// Parses `url` and checks that the scheme is one the transport can speak.
pub fn resolve_url(url: &str) -> Result<url::Url, RequestError> {
    let parsed = url::Url::parse(url)?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(RequestError::UnsupportedProtocol(format!(
            "Only HTTP and HTTPS are supported, got: {}",
            scheme
        ))),
    }
}
