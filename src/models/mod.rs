//! Data models for HTTP requests and responses.
//!
//! This module contains the core data structures the walkthrough passes
//! between the transport and the individual steps.

pub mod headers;
pub mod request;
pub mod response;

pub use headers::Headers;
pub use request::{HttpMethod, HttpRequest};
pub use response::{HttpResponse, JsonPayload};
