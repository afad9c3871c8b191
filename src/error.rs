//! The walkthrough's error taxonomy.
//!
//! Every failure a step can hit falls into one of these variants. Only the
//! status-check step recovers from any of them; everywhere else they are
//! fatal and propagate to the binary.

use crate::auth::CredentialError;
use crate::config::ConfigError;
use crate::executor::error::RequestError;
use thiserror::Error;

/// Errors produced by the walkthrough.
#[derive(Debug, Error)]
pub enum Error {
    /// The request completed but the status was 4xx or 5xx.
    #[error("{status} {} Error: {reason} for url: {url}", status_class(.status))]
    HttpStatus {
        status: u16,
        reason: String,
        url: String,
    },

    /// The request failed before a response was received.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The payload was not valid JSON.
    #[error("Invalid JSON payload: {0}")]
    Decode(String),

    /// A named field or header was absent.
    #[error("Key not found: {key}")]
    KeyNotFound { key: String },

    /// Credentials could not be obtained.
    #[error(transparent)]
    Credentials(#[from] CredentialError),

    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing walkthrough output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

fn status_class(status: &u16) -> &'static str {
    if *status >= 500 {
        "Server"
    } else {
        "Client"
    }
}
