//! HTTP request execution error types.
//!
//! This module defines the transport-level failures: anything that prevents a
//! request from producing a response at all. A response with a 4xx/5xx status
//! is *not* a `RequestError`; see [`crate::error::Error::HttpStatus`].

use thiserror::Error;

/// Errors that can occur while sending a request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Connection failures, DNS resolution errors and other network issues.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Request timed out before completion.
    ///
    /// Only possible when a timeout has been configured.
    #[error("Request timed out")]
    Timeout,

    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Certificate validation or handshake failure.
    #[error("TLS/SSL error: {0}")]
    TlsError(String),

    /// The request or the client could not be built.
    #[error("Request build error: {0}")]
    BuildError(String),

    /// Only HTTP and HTTPS are supported.
    #[error("Unsupported protocol: {0}")]
    UnsupportedProtocol(String),

    /// The transport has already been released.
    #[error("Connection already closed")]
    ConnectionClosed,
}

/// Maps reqwest's error kinds onto our variants.
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            RequestError::Timeout
        } else if err.is_builder() {
            RequestError::BuildError(message)
        } else if is_tls_failure(&err) {
            RequestError::TlsError(message)
        } else {
            RequestError::NetworkError(message)
        }
    }
}

/// Looks for a TLS failure among the causes of `err`.
///
/// Only the sources are inspected: reqwest's own message embeds the URL.
fn is_tls_failure(err: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let message = cause.to_string();
        if message.contains("certificate") || message.contains("TLS") || message.contains("SSL") {
            return true;
        }
        source = cause.source();
    }
    false
}

impl From<url::ParseError> for RequestError {
    fn from(err: url::ParseError) -> Self {
        RequestError::InvalidUrl(err.to_string())
    }
}
