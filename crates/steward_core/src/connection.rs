//! Secret values produced by Create or Observe.

use std::collections::BTreeMap;
use std::fmt;

/// Secret material (tokens, URLs) that must be persisted out-of-band.
///
/// Values never appear in `Debug` output.
///
/// # Examples
///
/// ```
/// use steward_core::ConnectionDetails;
///
/// let mut details = ConnectionDetails::new();
/// details.insert("token", "s3cr3t");
/// assert_eq!(details.get_str("token"), Some("s3cr3t"));
/// assert!(!format!("{:?}", details).contains("s3cr3t"));
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConnectionDetails(BTreeMap<String, Vec<u8>>);

impl ConnectionDetails {
    /// Create an empty set of details.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.insert(key, value);
        self
    }

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// Value for `key` when it is valid UTF-8.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| std::str::from_utf8(v).ok())
    }

    /// Whether no details were produced.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Merge `other` into `self`, overwriting duplicate keys.
    pub fn extend(&mut self, other: ConnectionDetails) {
        self.0.extend(other.0);
    }
}

impl fmt::Debug for ConnectionDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.keys().map(|k| (k, "<redacted>")))
            .finish()
    }
}
