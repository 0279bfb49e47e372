//! Decoded view of a raw query string.

use std::fmt;

/// An ordered multi-map of decoded query parameters.
///
/// Keys keep the order in which they first appeared; repeated keys collect
/// their values in order of appearance.
///
/// # Examples
///
/// ```
/// use handler_filters::QueryParams;
///
/// let params = QueryParams::parse("tag=a&page=2&tag=b");
/// assert_eq!(params.get("page"), Some("2"));
/// assert_eq!(params.get_all("tag"), &["a".to_string(), "b".to_string()]);
///
/// // Canonical form sorts keys
/// assert_eq!(params.encode(), "page=2&tag=a&tag=b");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Vec<String>)>,
}

impl QueryParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes an `application/x-www-form-urlencoded` query string.
    ///
    /// Empty pairs (as produced by a leading, doubled or trailing `&`) are
    /// skipped. Malformed percent sequences are kept as literal text.
    pub fn parse(raw: &str) -> Self {
        let pairs: Vec<(String, String)> = match serde_urlencoded::from_str(raw) {
            Ok(pairs) => pairs,
            Err(e) => {
                tracing::warn!(error = %e, "discarding undecodable query string");
                Vec::new()
            }
        };

        let mut params = Self::new();
        for (key, value) in pairs {
            params.append(key, value);
        }
        params
    }

    /// Returns the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key).first().map(String::as_str)
    }

    /// Returns every value for `key`, in order of appearance.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Appends a value for `key`, creating the key if needed.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// Removes `key` and returns its values.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over keys and their values in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, values)| (k.as_str(), values.as_slice()))
    }

    /// Encodes to the canonical raw form.
    ///
    /// Keys are sorted ascending, values keep their order, and every
    /// component is form-encoded (a space becomes `+`).
    pub fn encode(&self) -> String {
        let mut sorted: Vec<&(String, Vec<String>)> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));

        let pairs: Vec<(&str, &str)> = sorted
            .into_iter()
            .flat_map(|(key, values)| values.iter().map(move |v| (key.as_str(), v.as_str())))
            .collect();

        match serde_urlencoded::to_string(&pairs) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(error = %e, "failed to encode query parameters");
                String::new()
            }
        }
    }
}

/// Form-encodes a single query component.
pub(crate) fn encode_component(value: &str) -> String {
    // Serialize with an empty key and drop the `=`.
    match serde_urlencoded::to_string([("", value)]) {
        Ok(pair) => pair.strip_prefix('=').unwrap_or(&pair).to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to encode query component");
            String::new()
        }
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
