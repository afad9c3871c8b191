//! Basic HTTP authentication (RFC 7617).

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Encodes a username/password pair as a `Basic` Authorization header value.
///
/// # Examples
///
/// ```
/// use http_walkthrough::auth::basic::basic_auth;
///
/// assert_eq!(basic_auth("user", "pass123"), "Basic dXNlcjpwYXNzMTIz");
/// ```
pub fn basic_auth(username: &str, password: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", username, password));
    format!("Basic {}", encoded)
}

/// Decodes a `Basic` Authorization header value into `(username, password)`.
///
/// Returns `None` for other schemes, invalid base64, non-UTF-8 credentials,
/// or a decoded value without a colon.
#[cfg(test)]
pub(crate) fn parse_basic_auth_header(header: &str) -> Option<(String, String)> {
    let encoded = header.trim().strip_prefix("Basic ")?.trim();
    let decoded = String::from_utf8(STANDARD.decode(encoded).ok()?).ok()?;

    // The password may itself contain colons.
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}
