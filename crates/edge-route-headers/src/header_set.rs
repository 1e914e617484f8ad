//! Ordered, case-insensitive header collections.

use thiserror::Error;

/// Errors converting a [`HeaderSet`] into an `http::HeaderMap`.
#[derive(Error, Debug)]
pub enum HeaderError {
    /// Header name rejected by the `http` crate.
    #[error("invalid header name: {0}")]
    InvalidName(#[from] http::header::InvalidHeaderName),

    /// Header value rejected by the `http` crate.
    #[error("invalid header value: {0}")]
    InvalidValue(#[from] http::header::InvalidHeaderValue),
}

/// A collection of HTTP headers.
///
/// Headers keep insertion order and support case-insensitive name lookup.
/// Multiple entries with the same name are allowed (`Vary`, `Set-Cookie`
/// semantics). Names are stored in their original case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    /// Create an empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether a header is present (case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|(entry, _)| entry.eq_ignore_ascii_case(name))
    }

    /// Get the first value for a header (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry, _)| entry.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Get every value for a header, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |(entry, _)| entry.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Get all values for a header joined with `", "`.
    ///
    /// Matches the Fetch API's `Headers.get` view of repeated headers.
    pub fn get_joined(&self, name: &str) -> Option<String> {
        let values: Vec<&str> = self.get_all(name).collect();
        if values.is_empty() {
            None
        } else {
            Some(values.join(", "))
        }
    }

    /// Set a header, replacing all existing values for that name.
    ///
    /// The new value takes the position of the first existing entry.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        let mut replaced = false;
        self.entries.retain_mut(|(entry, existing)| {
            if !entry.eq_ignore_ascii_case(&name) {
                return true;
            }
            if replaced {
                return false;
            }
            replaced = true;
            *existing = value.clone();
            true
        });

        if !replaced {
            self.entries.push((name, value));
        }
    }

    /// Append a header, keeping any existing values for that name.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Remove every value for a header (case-insensitive).
    pub fn remove(&mut self, name: &str) {
        self.entries
            .retain(|(entry, _)| !entry.eq_ignore_ascii_case(name));
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Build from an `http::HeaderMap` at the host framework boundary.
    ///
    /// Non-UTF-8 header values are replaced lossily.
    pub fn from_http(map: &http::HeaderMap) -> Self {
        let mut set = HeaderSet::new();
        for (name, value) in map {
            set.append(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }
        set
    }

    /// Convert into an `http::HeaderMap` for the outgoing response.
    pub fn to_http(&self) -> Result<http::HeaderMap, HeaderError> {
        let mut map = http::HeaderMap::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            map.append(
                http::HeaderName::try_from(name.as_str())?,
                http::HeaderValue::try_from(value.as_str())?,
            );
        }
        Ok(map)
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        for (name, value) in iter {
            set.append(name, value);
        }
        set
    }
}
