//! HTTP Walkthrough
//!
//! A guided tour of everyday HTTP client usage, run as a fixed sequence of
//! steps against live endpoints:
//!
//! 1. a simple GET and its status code
//! 2. turning 4xx/5xx statuses into errors and handling them per target
//! 3. the response payload as raw bytes and as decoded text
//! 4. parsing the payload as JSON and reading a field
//! 5. reading a response header (case-insensitively)
//! 6. POSTing a form and reading back what was actually sent
//! 7. a scoped, authenticated session
//!
//! # Architecture
//!
//! - **models**: requests, responses, headers and JSON payloads
//! - **executor**: the transport seams and the reqwest-backed transport
//! - **session**: scoped sessions with default credentials
//! - **auth**: Basic auth and credential providers
//! - **config**: settings, defaults and validation
//! - **walkthrough**: the ordered steps and the driver that runs them
//!
//! # Usage
//!
//! ```no_run
//! use http_walkthrough::auth::PromptCredentials;
//! use http_walkthrough::config::WalkthroughConfig;
//! use http_walkthrough::executor::{ExecutionConfig, ReqwestConnector};
//! use http_walkthrough::walkthrough::Walkthrough;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = WalkthroughConfig::default();
//! let connector = ReqwestConnector::new(ExecutionConfig::from(&config));
//! let walkthrough = Walkthrough::new(config, connector, PromptCredentials::default());
//! walkthrough.run(&mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod executor;
pub mod models;
pub mod session;
pub mod walkthrough;

pub use error::Error;
