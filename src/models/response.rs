//! HTTP response data models.
//!
//! This module defines the response side of an exchange: status information,
//! headers, the raw body, and the accessors that turn that body into text or
//! structured JSON.

use crate::error::Error;
use crate::models::headers::Headers;
use crate::models::request::HttpRequest;
use encoding_rs::{Encoding, UTF_8};
use serde_json::Value;
use std::time::Duration;

/// Represents an HTTP response received from a server.
///
/// The response keeps the request that produced it, as it was actually sent,
/// so callers can verify the resolved URL and the encoded body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code (e.g., 200, 404, 500).
    pub status_code: u16,

    /// HTTP status text (e.g., "OK", "Not Found").
    pub status_text: String,

    /// Response headers.
    pub headers: Headers,

    /// Response body as raw bytes.
    pub body: Vec<u8>,

    /// Final URL of the response, after any redirects.
    pub url: String,

    /// Time from sending the request to receiving the full body.
    pub duration: Duration,

    /// The request that produced this response.
    pub request: HttpRequest,
}

impl HttpResponse {
    /// Creates a response to `request` with an empty body and no headers.
    pub fn new(request: HttpRequest, status_code: u16, status_text: &str) -> Self {
        Self {
            status_code,
            status_text: status_text.to_string(),
            headers: Headers::new(),
            body: Vec::new(),
            url: request.url.clone(),
            duration: Duration::ZERO,
            request,
        }
    }

    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Checks if the response status indicates a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    /// Checks if the response status indicates a server error (5xx).
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    /// Fails with `Error::HttpStatus` when the status is 4xx or 5xx.
    ///
    /// Informational, success and redirect statuses pass through unchanged.
    pub fn raise_for_status(&self) -> Result<&Self, Error> {
        if self.is_client_error() || self.is_server_error() {
            return Err(Error::HttpStatus {
                status: self.status_code,
                reason: self.status_text.clone(),
                url: self.url.clone(),
            });
        }
        Ok(self)
    }

    /// Raw body bytes.
    pub fn content(&self) -> &[u8] {
        &self.body
    }

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type")
    }

    /// The `charset` parameter of the Content-Type header, if declared.
    pub fn charset(&self) -> Option<&str> {
        self.content_type()?
            .split(';')
            .skip(1)
            .filter_map(|param| param.split_once('='))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("charset"))
            .map(|(_, value)| value.trim().trim_matches('"'))
    }

    /// The encoding used to decode the body.
    ///
    /// Falls back to UTF-8 when no charset is declared or the label is not
    /// recognised.
    pub fn encoding(&self) -> &'static Encoding {
        self.charset()
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .unwrap_or(UTF_8)
    }

    /// Body decoded as text using [`encoding`](Self::encoding).
    ///
    /// Malformed sequences are replaced with U+FFFD rather than failing.
    pub fn text(&self) -> String {
        let (text, _) = self
            .encoding()
            .decode_without_bom_handling(&self.body);
        text.into_owned()
    }

    /// Parses the decoded body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `Error::Decode` if the text is not valid JSON.
    pub fn json(&self) -> Result<JsonPayload, Error> {
        JsonPayload::parse(&self.text())
    }

    /// Renders the raw body as an escaped byte-string literal.
    pub fn content_literal(&self) -> String {
        format!("b\"{}\"", self.body.escape_ascii())
    }
}

/// A JSON document parsed from a response body.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPayload(Value);

impl JsonPayload {
    /// Parses `text` as JSON.
    pub fn parse(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text)
            .map(JsonPayload)
            .map_err(|e| Error::Decode(e.to_string()))
    }

    /// Looks up a top-level field.
    ///
    /// # Errors
    ///
    /// Returns `Error::KeyNotFound` if the payload is not an object or has no
    /// such field.
    pub fn field(&self, key: &str) -> Result<&Value, Error> {
        self.0
            .as_object()
            .and_then(|map| map.get(key))
            .ok_or_else(|| Error::KeyNotFound {
                key: key.to_string(),
            })
    }

    /// Looks up a top-level field and renders it for display.
    ///
    /// Strings are returned without their JSON quotes.
    pub fn field_text(&self, key: &str) -> Result<String, Error> {
        Ok(match self.field(key)? {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// Pretty-printed JSON text.
    pub fn to_pretty_string(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}
