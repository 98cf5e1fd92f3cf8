//! Message header handling.

use std::collections::BTreeMap;
use std::fmt;

/// Collection of message headers.
///
/// Names are case-insensitive and unique; setting an existing name replaces
/// its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Headers {
    headers: BTreeMap<String, String>,
}

impl Headers {
    /// Creates a new empty header collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header value, replacing any existing value for that name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into().to_lowercase(), value.into());
    }

    /// Gets the value for a header.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Removes the value for a header.
    pub fn remove(&mut self, name: &str) {
        self.headers.remove(&name.to_lowercase());
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns an iterator over all headers in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.headers {
            // Capitalize header name (e.g., "content-type" -> "Content-Type")
            let capitalized = name
                .split('-')
                .map(|part| {
                    let mut chars = part.chars();
                    chars.next().map_or_else(String::new, |first| {
                        first.to_uppercase().collect::<String>() + chars.as_str()
                    })
                })
                .collect::<Vec<_>>()
                .join("-");

            writeln!(f, "{capitalized}: {value}\r")?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_new() {
        let headers = Headers::new();
        assert!(headers.is_empty());
    }

    #[test]
    fn test_headers_set_get() {
        let mut headers = Headers::new();
        headers.set("X-Priority", "1");
        assert_eq!(headers.get("X-Priority"), Some("1"));
        assert_eq!(headers.get("x-priority"), Some("1")); // Case insensitive
    }

    #[test]
    fn test_headers_last_write_wins() {
        let mut headers = Headers::new();
        headers.set("X-Tag", "first");
        headers.set("x-tag", "second");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("X-Tag"), Some("second"));
    }

    #[test]
    fn test_headers_remove() {
        let mut headers = Headers::new();
        headers.set("X-Loop", "on");
        assert!(headers.get("X-Loop").is_some());

        headers.remove("x-loop");
        assert!(headers.get("X-Loop").is_none());
    }

    #[test]
    fn test_headers_display_capitalizes() {
        let mut headers = Headers::new();
        headers.set("x-mailer", "mailwright");
        headers.set("list-unsubscribe", "<mailto:u@b.com>");

        let s = headers.to_string();
        assert!(s.contains("X-Mailer: mailwright"));
        assert!(s.contains("List-Unsubscribe: <mailto:u@b.com>"));
    }

    #[test]
    fn test_headers_iter() {
        let mut headers = Headers::new();
        headers.set("A", "1");
        headers.set("B", "2");

        let collected: Vec<_> = headers.iter().collect();
        assert_eq!(collected, vec![("a", "1"), ("b", "2")]);
    }
}
