//! HTTP request execution configuration.
//!
//! This module defines the options that shape how a transport is built.

use crate::config::WalkthroughConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("http-walkthrough/", env!("CARGO_PKG_VERSION"));

/// Configuration for HTTP request execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Request timeout in seconds.
    ///
    /// `None` means the client waits indefinitely, which is the default.
    pub timeout_secs: Option<u64>,

    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl ExecutionConfig {
    /// Creates a new ExecutionConfig with the given timeout.
    pub fn new(timeout_secs: Option<u64>) -> Self {
        Self {
            timeout_secs,
            ..Self::default()
        }
    }

    /// Returns the timeout as a `Duration`, if one is set.
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&WalkthroughConfig> for ExecutionConfig {
    fn from(config: &WalkthroughConfig) -> Self {
        Self {
            timeout_secs: config.timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}
