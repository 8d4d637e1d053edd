//! Node attributes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Insertion-ordered `key="value"` attributes of a djot node.
///
/// Order is preserved so rendered attributes come out the way the author
/// wrote them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    /// Create an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get an attribute value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Set an attribute, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Remove an attribute, keeping the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check whether the space-separated `class` attribute contains `name`.
    #[must_use]
    pub fn has_class(&self, name: &str) -> bool {
        self.get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == name))
    }

    /// The `class` attribute, or an empty string.
    #[must_use]
    pub fn class_attr(&self) -> String {
        self.class_attr_extra("")
    }

    /// The `class` attribute with `extra` appended as another token.
    ///
    /// # Example
    ///
    /// ```
    /// use quill_renderer::Attributes;
    ///
    /// let mut attrs = Attributes::new();
    /// assert_eq!(attrs.class_attr_extra("callout"), "callout");
    ///
    /// attrs.insert("class", "steps");
    /// assert_eq!(attrs.class_attr_extra("callout"), "steps callout");
    /// assert_eq!(attrs.class_attr(), "steps");
    /// ```
    #[must_use]
    pub fn class_attr_extra(&self, extra: &str) -> String {
        let class = self.get("class").unwrap_or_default();
        match (class.is_empty(), extra.is_empty()) {
            (_, true) => class.to_owned(),
            (true, false) => extra.to_owned(),
            (false, false) => format!("{class} {extra}"),
        }
    }

    /// Copy of these attributes without `key`.
    #[must_use]
    pub fn without(&self, key: &str) -> Self {
        let mut copy = self.clone();
        copy.remove(key);
        copy
    }

    /// Lay `self` over `base`: own values win, classes are concatenated.
    ///
    /// Used when a link or image picks up attributes from its reference
    /// definition.
    #[must_use]
    pub fn over(&self, base: &Self) -> Self {
        let mut merged = base.clone();
        for (key, value) in self.iter() {
            if key == "class" {
                let class = merged.class_attr_extra(value);
                merged.insert("class", class);
            } else {
                merged.insert(key, value);
            }
        }
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_has_class_matches_whole_tokens() {
        let attrs: Attributes = [("class", "note warning")].into_iter().collect();
        assert!(attrs.has_class("note"));
        assert!(attrs.has_class("warning"));
        assert!(!attrs.has_class("warn"));
    }

    #[test]
    fn test_has_class_without_class_attribute() {
        assert!(!Attributes::new().has_class("note"));
    }

    #[test]
    fn test_class_attr_empty() {
        assert_eq!(Attributes::new().class_attr(), "");
    }

    #[test]
    fn test_without_keeps_order() {
        let attrs: Attributes = [("id", "a"), ("cap", "Title"), ("class", "wide")]
            .into_iter()
            .collect();
        let stripped = attrs.without("cap");
        let keys: Vec<_> = stripped.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["id", "class"]);
    }

    #[test]
    fn test_over_merges_classes_and_overrides_values() {
        let base: Attributes = [("class", "ref"), ("title", "Base")].into_iter().collect();
        let own: Attributes = [("class", "own"), ("title", "Own")].into_iter().collect();
        let merged = own.over(&base);
        assert_eq!(merged.get("class"), Some("ref own"));
        assert_eq!(merged.get("title"), Some("Own"));
    }

    #[test]
    fn test_deserialize_preserves_order() {
        let attrs: Attributes =
            serde_json::from_str(r#"{"z": "1", "a": "2", "m": "3"}"#).unwrap();
        let keys: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
