//! HTTP authentication.
//!
//! Sessions authenticate with HTTP Basic credentials. Where those credentials
//! come from is abstracted behind [`CredentialProvider`], so the binary can
//! prompt on the terminal while tests hand in fixed values.

pub mod basic;

use std::fmt;
use thiserror::Error;

/// Errors raised while obtaining credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The password prompt could not be shown or read.
    #[error("Failed to read password: {0}")]
    Prompt(#[from] std::io::Error),

    /// No username was available.
    #[error("Missing credentials: {0}")]
    MissingUsername(String),
}

/// A username/password pair for Basic authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// The `Authorization` header value for these credentials.
    pub fn authorization(&self) -> String {
        basic::basic_auth(&self.username, &self.password)
    }
}

// Keep the password out of logs and panic messages.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Supplies credentials for an authenticated session.
pub trait CredentialProvider {
    /// Obtains credentials for `username`.
    fn obtain_credentials(&self, username: &str) -> Result<Credentials, CredentialError>;
}

/// Reads the password from the terminal without echoing it.
#[derive(Debug, Clone)]
pub struct PromptCredentials {
    prompt: String,
}

impl PromptCredentials {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

impl Default for PromptCredentials {
    fn default() -> Self {
        Self::new("Password: ")
    }
}

impl CredentialProvider for PromptCredentials {
    fn obtain_credentials(&self, username: &str) -> Result<Credentials, CredentialError> {
        if username.is_empty() {
            return Err(CredentialError::MissingUsername(
                "no username configured".to_string(),
            ));
        }
        let password = rpassword::prompt_password(&self.prompt)?;
        Ok(Credentials::new(username, password))
    }
}

/// Always returns the same password.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    password: String,
}

impl StaticCredentials {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
}

impl CredentialProvider for StaticCredentials {
    fn obtain_credentials(&self, username: &str) -> Result<Credentials, CredentialError> {
        Ok(Credentials::new(username, self.password.clone()))
    }
}
