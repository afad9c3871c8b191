//! Case-insensitive HTTP header collection.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered list of header name/value pairs.
///
/// Names keep the spelling they were inserted with, but every lookup compares
/// names ASCII case-insensitively, as HTTP requires.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Creates an empty header collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a header, replacing the value of an existing header with the
    /// same name (in place, keeping its position).
    pub fn insert(&mut self, name: &str, value: &str) {
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    /// Appends a header without replacing earlier values of the same name.
    pub fn append(&mut self, name: &str, value: &str) {
        self.entries.push((name.to_string(), value.to_string()));
    }

    /// Returns the first value for `name`, if any.
    ///
    /// Responses from the reqwest transport hold one entry per name, with
    /// repeated headers already joined by ", ".
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the first value for `name`, or `Error::KeyNotFound`.
    ///
    /// # Examples
    ///
    /// ```
    /// use http_walkthrough::models::Headers;
    ///
    /// let mut headers = Headers::new();
    /// headers.insert("Server", "test-server");
    /// assert_eq!(headers.require("SERVER").unwrap(), "test-server");
    /// assert!(headers.require("Date").is_err());
    /// ```
    pub fn require(&self, name: &str) -> Result<&str, Error> {
        self.get(name).ok_or_else(|| Error::KeyNotFound {
            key: name.to_string(),
        })
    }

    /// Checks whether a header named `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.append(name.as_ref(), value.as_ref());
        }
        headers
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{}: {}", name, value)?;
        }
        Ok(())
    }
}
