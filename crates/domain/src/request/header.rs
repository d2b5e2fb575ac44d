//! HTTP Header types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single HTTP header with name and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// The header name (e.g., "Accept")
    pub name: String,
    /// The header value (e.g., "application/json")
    pub value: String,
}

impl Header {
    /// Creates a new header.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A mapping of header names to values.
///
/// Serialized as a plain map so scenario files can write
/// `headers: { Accept: application/json }`. Lookups ignore ASCII case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers {
    items: BTreeMap<String, String>,
}

impl Headers {
    /// Creates an empty header collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: BTreeMap::new(),
        }
    }

    /// Inserts a header, replacing any existing one with the same name
    /// regardless of case.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.items.retain(|k, _| !k.eq_ignore_ascii_case(&name));
        self.items.insert(name, value.into());
    }

    /// Adds a header (builder pattern).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Returns the value of a header, ignoring case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if a header with this name is present, ignoring case.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns an iterator over the headers.
    pub fn iter(&self) -> impl Iterator<Item = Header> + '_ {
        self.items.iter().map(|(k, v)| Header::new(k, v))
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Header> for Headers {
    fn from_iter<T: IntoIterator<Item = Header>>(iter: T) -> Self {
        let mut headers = Self::new();
        for header in iter {
            headers.insert(header.name, header.value);
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_creation() {
        let header = Header::new("Accept", "application/json");
        assert_eq!(header.name, "Accept");
        assert_eq!(header.value, "application/json");
    }

    #[test]
    fn test_get_ignores_case() {
        let headers = Headers::new().with("Content-Type", "application/json");
        assert_eq!(headers.get("content-type"), Some("application/json"));
        assert!(headers.contains("CONTENT-TYPE"));
        assert!(!headers.contains("Accept"));
    }

    #[test]
    fn test_insert_replaces_case_insensitively() {
        let mut headers = Headers::new();
        headers.insert("accept", "text/plain");
        headers.insert("Accept", "application/json");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("accept"), Some("application/json"));
    }

    #[test]
    fn test_deserialize_from_map() {
        let headers: Headers = serde_json::from_str(r#"{"Accept": "application/json"}"#).unwrap();
        assert_eq!(headers.get("accept"), Some("application/json"));
    }
}
