//! Persistent HTTP sessions.
//!
//! A [`Session`] owns one transport (and therefore its connection pool) and
//! carries default credentials and headers that apply to every request it
//! issues. The transport is released exactly once: by an explicit
//! [`Session::close`], at the end of [`Session::scoped`], or when the session
//! is dropped, whichever happens first.

use crate::auth::Credentials;
use crate::executor::error::RequestError;
use crate::executor::{HttpClient, Transport};
use crate::models::headers::Headers;
use crate::models::request::HttpRequest;
use crate::models::response::HttpResponse;

/// A reusable client context over a single transport.
pub struct Session<T: Transport> {
    transport: T,
    auth: Option<Credentials>,
    headers: Headers,
    released: bool,
}

impl<T: Transport> Session<T> {
    /// Opens a session that owns `transport`.
    pub fn open(transport: T) -> Self {
        log::debug!("session opened");
        Self {
            transport,
            auth: None,
            headers: Headers::new(),
            released: false,
        }
    }

    /// Runs `f` with a session over `transport`, then releases it.
    ///
    /// Release happens whatever `f` returns, including an `Err`. If `f`
    /// panics, the session's `Drop` releases the transport during unwinding.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use http_walkthrough::auth::Credentials;
    /// use http_walkthrough::executor::{Connector, HttpClient, ReqwestConnector};
    /// use http_walkthrough::session::Session;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let transport = ReqwestConnector::default().connect()?;
    /// let response = Session::scoped(transport, |session| {
    ///     session.set_auth(Credentials::new("octocat", "secret"));
    ///     session.get("https://api.github.com/user")
    /// })?;
    /// println!("{}", response.headers);
    /// # Ok(())
    /// # }
    /// ```
    pub fn scoped<R, F>(transport: T, f: F) -> R
    where
        F: FnOnce(&mut Session<T>) -> R,
    {
        let mut session = Session::open(transport);
        let result = f(&mut session);
        session.close();
        result
    }

    /// Sets the credentials used for every subsequent request.
    pub fn set_auth(&mut self, credentials: Credentials) {
        log::debug!("session credentials set for {}", credentials.username);
        self.auth = Some(credentials);
    }

    pub fn auth(&self) -> Option<&Credentials> {
        self.auth.as_ref()
    }

    /// Adds a default header sent with every request that does not set it.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name, value);
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Releases the transport. Further calls are no-ops.
    pub fn close(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.transport.close();
        log::debug!("session closed");
    }

    pub fn is_closed(&self) -> bool {
        self.released
    }

    fn prepare(&self, request: &mut HttpRequest) {
        for (name, value) in self.headers.iter() {
            if !request.headers.contains(name) {
                request.headers.insert(name, value);
            }
        }
        if let Some(credentials) = &self.auth {
            if !request.headers.contains("Authorization") {
                request
                    .headers
                    .insert("Authorization", &credentials.authorization());
            }
        }
    }
}

impl<T: Transport> HttpClient for Session<T> {
    fn execute(&mut self, mut request: HttpRequest) -> Result<HttpResponse, RequestError> {
        if self.released {
            return Err(RequestError::ConnectionClosed);
        }

        self.prepare(&mut request);
        log::debug!("{} {}", request.method, request.url);

        match self.transport.send(&request) {
            Ok(response) => {
                log::debug!(
                    "{} {} -> {} {} ({} bytes in {:?})",
                    request.method,
                    request.url,
                    response.status_code,
                    response.status_text,
                    response.body.len(),
                    response.duration
                );
                Ok(response)
            }
            Err(e) => {
                log::debug!("{} {} failed: {}", request.method, request.url, e);
                Err(e)
            }
        }
    }
}

impl<T: Transport> Drop for Session<T> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<T: Transport> std::fmt::Debug for Session<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("auth", &self.auth)
            .field("headers", &self.headers)
            .field("released", &self.released)
            .finish()
    }
}
