//! Insertion-ordered key/value map used by every tag builder.

use serde::Serialize;
use std::fmt;

/// Value stored under a tag key.
///
/// `Many` renders one tag per element, which is how Open Graph expresses
/// repeated properties such as `article:author`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    One(String),
    Many(Vec<String>),
}

impl PropertyValue {
    /// The value when it holds exactly one string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::One(s) => Some(s),
            Self::Many(_) => None,
        }
    }

    /// Every string held, in order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::One(s) => vec![s.as_str()],
            Self::Many(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One(s) => f.write_str(s),
            Self::Many(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl PartialEq<&str> for PropertyValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

/// Ordered map from tag key to value. Keys are unique; the last write wins
/// and keeps the position of the first insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove a key. Removing a missing key is a no-op.
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Flatten into `(key, value)` pairs, expanding `Many` into one pair per element.
    pub fn flatten(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().flat_map(|(k, v)| {
            let values: Vec<&str> = match v {
                PropertyValue::One(s) => vec![s.as_str()],
                PropertyValue::Many(items) => items.iter().map(String::as_str).collect(),
            };
            values.into_iter().map(move |value| (k.as_str(), value))
        })
    }
}

impl Serialize for PropertyMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins_in_place() {
        let mut map = PropertyMap::new();
        map.insert("a", "1");
        map.insert("b", "2");
        map.insert("a", "3");

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get("a").unwrap(), &"3");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut map = PropertyMap::new();
        map.insert("a", "1");
        assert!(map.remove("a").is_some());
        assert!(map.remove("a").is_none());
        assert!(map.remove("never").is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn test_flatten_expands_lists() {
        let mut map = PropertyMap::new();
        map.insert("og:title", "Title");
        map.insert(
            "article:tag",
            vec!["rust".to_string(), "seo".to_string()],
        );

        let pairs: Vec<(&str, &str)> = map.flatten().collect();
        assert_eq!(
            pairs,
            vec![
                ("og:title", "Title"),
                ("article:tag", "rust"),
                ("article:tag", "seo"),
            ]
        );
    }

    #[test]
    fn test_serializes_in_order() {
        let mut map = PropertyMap::new();
        map.insert("z", "last");
        map.insert("a", "first");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"z":"last","a":"first"}"#);
    }
}
