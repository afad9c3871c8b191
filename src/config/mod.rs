//! Configuration management for the walkthrough.
//!
//! Configuration comes from an optional JSON settings value (the
//! `"http-walkthrough"` key), merged over the defaults and validated. There
//! is no configuration file; the binary passes settings and overrides on the
//! command line or through the environment.

pub mod schema;

pub use schema::{WalkthroughConfig, PLACEHOLDER_USERNAME};

use serde_json::Value;
use thiserror::Error;

/// Key under which walkthrough settings live in a settings object.
pub const SETTINGS_KEY: &str = "http-walkthrough";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The merged configuration failed validation.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Settings text was not JSON.
    #[error("Settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads configuration from a JSON settings value.
///
/// A malformed `"http-walkthrough"` section is logged and ignored, keeping
/// the defaults; the result is always validated.
///
/// # Example
///
/// ```
/// use http_walkthrough::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "http-walkthrough": {
///         "username": "octocat",
///         "timeoutSecs": 10
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.username, "octocat");
/// assert_eq!(config.timeout_secs, Some(10));
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<WalkthroughConfig, ConfigError> {
    let mut config = WalkthroughConfig::default();

    if let Some(section) = settings_json.as_ref().and_then(|s| s.get(SETTINGS_KEY)) {
        match serde_json::from_value::<WalkthroughConfig>(section.clone()) {
            Ok(user_config) => config = config.merge(&user_config),
            Err(e) => log::warn!(
                "Failed to parse {} settings: {}. Using defaults.",
                SETTINGS_KEY,
                e
            ),
        }
    }

    config.validate().map_err(ConfigError::Invalid)?;
    Ok(config)
}

/// Parses settings text and loads configuration from it.
pub fn load_config_str(settings: &str) -> Result<WalkthroughConfig, ConfigError> {
    let value: Value = serde_json::from_str(settings)?;
    load_config(Some(value))
}
