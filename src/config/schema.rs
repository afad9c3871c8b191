//! Configuration schema for the walkthrough.
//!
//! This module defines every user-configurable setting together with its
//! default and validation rules.

use crate::executor::config::DEFAULT_USER_AGENT;
use crate::models::request::resolve_url;
use serde::{Deserialize, Serialize};

/// Username used until the operator substitutes their own.
pub const PLACEHOLDER_USERNAME: &str = "<your github username here>";

/// Main configuration structure.
///
/// Settings are read from the `"http-walkthrough"` key of a JSON settings
/// value. Missing settings fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkthroughConfig {
    /// Root of the REST API used by most steps.
    #[serde(default = "default_api_root")]
    pub api_root: String,

    /// A path on the same API that does not exist, used to provoke a 404.
    #[serde(default = "default_invalid_url")]
    pub invalid_url: String,

    /// Credential-gated endpoint queried by the authenticated session.
    #[serde(default = "default_user_endpoint")]
    pub user_endpoint: String,

    /// Endpoint that echoes form submissions back.
    #[serde(default = "default_echo_url")]
    pub echo_url: String,

    /// Username for Basic authentication.
    #[serde(default = "default_username")]
    pub username: String,

    /// Request timeout in seconds. No timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Value of the `User-Agent` header.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_api_root() -> String {
    "https://api.github.com".to_string()
}

fn default_invalid_url() -> String {
    "https://api.github.com/blahblahblah".to_string()
}

fn default_user_endpoint() -> String {
    "https://api.github.com/user".to_string()
}

fn default_echo_url() -> String {
    "https://httpbin.org/post".to_string()
}

fn default_username() -> String {
    PLACEHOLDER_USERNAME.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for WalkthroughConfig {
    fn default() -> Self {
        Self {
            api_root: default_api_root(),
            invalid_url: default_invalid_url(),
            user_endpoint: default_user_endpoint(),
            echo_url: default_echo_url(),
            username: default_username(),
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl WalkthroughConfig {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// `Ok(())` if valid, or `Err(String)` describing the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        for (name, url) in [
            ("apiRoot", &self.api_root),
            ("invalidUrl", &self.invalid_url),
            ("userEndpoint", &self.user_endpoint),
            ("echoUrl", &self.echo_url),
        ] {
            resolve_url(url).map_err(|e| format!("{} is not usable: {}", name, e))?;
        }

        if self.timeout_secs == Some(0) {
            return Err("timeoutSecs must be greater than 0".to_string());
        }

        if self.user_agent.trim().is_empty() {
            return Err("userAgent must not be empty".to_string());
        }

        Ok(())
    }

    /// Overlays `other` onto `self`.
    ///
    /// A field of `other` wins when it differs from the default, so a partial
    /// settings object only changes what it mentions.
    pub fn merge(&self, other: &WalkthroughConfig) -> WalkthroughConfig {
        let defaults = WalkthroughConfig::default();
        let pick = |ours: &String, theirs: &String, default: &String| {
            if theirs != default {
                theirs.clone()
            } else {
                ours.clone()
            }
        };

        WalkthroughConfig {
            api_root: pick(&self.api_root, &other.api_root, &defaults.api_root),
            invalid_url: pick(&self.invalid_url, &other.invalid_url, &defaults.invalid_url),
            user_endpoint: pick(
                &self.user_endpoint,
                &other.user_endpoint,
                &defaults.user_endpoint,
            ),
            echo_url: pick(&self.echo_url, &other.echo_url, &defaults.echo_url),
            username: pick(&self.username, &other.username, &defaults.username),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
            user_agent: pick(&self.user_agent, &other.user_agent, &defaults.user_agent),
        }
    }

    /// Moves the config to another API root.
    ///
    /// `invalid_url` and `user_endpoint` follow the root when they live under
    /// the current one, keeping their paths. Endpoints on other hosts are left
    /// alone.
    pub fn rebase(&mut self, api_root: &str) {
        let old_root = self.api_root.trim_end_matches('/').to_string();
        let new_root = api_root.trim_end_matches('/');

        for url in [&mut self.invalid_url, &mut self.user_endpoint] {
            let rebased = url
                .strip_prefix(old_root.as_str())
                .filter(|path| path.is_empty() || path.starts_with('/'))
                .map(|path| format!("{}{}", new_root, path));
            if let Some(rebased) = rebased {
                *url = rebased;
            }
        }
        self.api_root = api_root.to_string();
    }

    /// Whether the username is still the placeholder.
    pub fn has_placeholder_username(&self) -> bool {
        self.username == PLACEHOLDER_USERNAME
    }
}
