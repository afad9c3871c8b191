//! Blocking HTTP transport backed by reqwest.
//!
//! Each `ReqwestTransport` owns one `reqwest::blocking::Client`, and with it
//! the client's connection pool. Closing the transport drops the client,
//! which releases every pooled connection.

use crate::executor::config::ExecutionConfig;
use crate::executor::error::RequestError;
use crate::executor::{Connector, Transport};
use crate::models::headers::Headers;
use crate::models::request::{HttpMethod, HttpRequest};
use crate::models::response::HttpResponse;
use reqwest::header::HeaderMap;
use std::time::Instant;

/// A transport that sends requests over the network with reqwest.
#[derive(Debug)]
pub struct ReqwestTransport {
    client: Option<reqwest::blocking::Client>,
}

impl ReqwestTransport {
    /// Builds a transport from the execution configuration.
    pub fn new(config: &ExecutionConfig) -> Result<Self, RequestError> {
        // reqwest's blocking client defaults to a 30s timeout; pass ours explicitly.
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout_duration())
            .build()
            .map_err(|e| RequestError::BuildError(e.to_string()))?;

        Ok(Self {
            client: Some(client),
        })
    }

    /// Whether the underlying client is still held.
    pub fn is_open(&self) -> bool {
        self.client.is_some()
    }
}

impl Transport for ReqwestTransport {
    fn send(&mut self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        let client = self.client.as_ref().ok_or(RequestError::ConnectionClosed)?;

        let method = match request.method {
            HttpMethod::GET => reqwest::Method::GET,
            HttpMethod::POST => reqwest::Method::POST,
        };

        let mut req_builder = client.request(method, request.url.as_str());
        for (name, value) in request.headers.iter() {
            req_builder = req_builder.header(name, value);
        }
        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let started = Instant::now();
        let response = req_builder.send()?;

        let status = response.status();
        let final_url = response.url().to_string();
        let headers = collect_headers(response.headers());

        let body = response.bytes()?.to_vec();

        let mut http_response = HttpResponse::new(
            request.clone(),
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown"),
        );
        http_response.headers = headers;
        http_response.body = body;
        http_response.url = final_url;
        http_response.duration = started.elapsed();

        Ok(http_response)
    }

    fn close(&mut self) {
        if self.client.take().is_some() {
            log::debug!("released reqwest client");
        }
    }
}

/// Copies response headers, one entry per name.
///
/// Repeated headers are joined with ", ". Values that are not valid UTF-8
/// are decoded as Latin-1 so no header is lost.
fn collect_headers(map: &HeaderMap) -> Headers {
    map.keys()
        .map(|name| {
            let values: Vec<String> = map
                .get_all(name)
                .iter()
                .map(|value| header_text(value.as_bytes()))
                .collect();
            (name.as_str(), values.join(", "))
        })
        .collect()
}

fn header_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => encoding_rs::mem::decode_latin1(bytes).into_owned(),
    }
}

/// Opens a fresh [`ReqwestTransport`] per connection.
#[derive(Debug, Clone, Default)]
pub struct ReqwestConnector {
    config: ExecutionConfig,
}

impl ReqwestConnector {
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }
}

impl Connector for ReqwestConnector {
    type Transport = ReqwestTransport;

    fn connect(&self) -> Result<ReqwestTransport, RequestError> {
        ReqwestTransport::new(&self.config)
    }
}
