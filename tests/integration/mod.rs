//! Integration tests module for HTTP Walkthrough
//!
//! Shared fixtures: a mock API server standing in for the live endpoints,
//! and a transport wrapper that counts how often it is released.

pub mod session_test;
pub mod status_check_test;
pub mod walkthrough_test;

use http_walkthrough::config::WalkthroughConfig;
use http_walkthrough::executor::{
    Connector, ExecutionConfig, ReqwestConnector, ReqwestTransport, RequestError, Transport,
};
use http_walkthrough::models::{HttpRequest, HttpResponse};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Body served by the mock API root.
pub const ROOT_BODY: &str = r#"{"current_user_url": "https://api.github.com/user", "emojis_url": "https://api.github.com/emojis"}"#;

/// Points every endpoint of the walkthrough at `base`.
pub fn config_for(base: &str) -> WalkthroughConfig {
    let mut config = WalkthroughConfig {
        echo_url: format!("{}/post", base),
        username: "octocat".to_string(),
        ..WalkthroughConfig::default()
    };
    config.rebase(base);
    config
}

/// A reqwest transport that counts `close` calls.
pub struct CountingTransport {
    inner: ReqwestTransport,
    closes: Rc<Cell<usize>>,
}

impl Transport for CountingTransport {
    fn send(&mut self, request: &HttpRequest) -> Result<HttpResponse, RequestError> {
        self.inner.send(request)
    }

    fn close(&mut self) {
        self.closes.set(self.closes.get() + 1);
        self.inner.close();
    }
}

/// Opens counting transports, tracking opens and closes across all of them.
#[derive(Default)]
pub struct CountingConnector {
    inner: ReqwestConnector,
    pub opened: Rc<Cell<usize>>,
    pub closed: Rc<Cell<usize>>,
}

impl CountingConnector {
    pub fn new() -> Self {
        Self {
            inner: ReqwestConnector::new(ExecutionConfig::default()),
            ..Self::default()
        }
    }
}

impl Connector for CountingConnector {
    type Transport = CountingTransport;

    fn connect(&self) -> Result<CountingTransport, RequestError> {
        self.opened.set(self.opened.get() + 1);
        Ok(CountingTransport {
            inner: self.inner.connect()?,
            closes: self.closed.clone(),
        })
    }
}
