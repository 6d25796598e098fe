//! Ordered source → destination mapping.
//!
//! A mapping file is a plain object of strings, but the order of its keys is
//! load-bearing: it decides the trial order of regex alternatives and which of
//! two equal-length destinations wins a collision. `RouteMapping` therefore
//! keeps entries as an explicit list in document order.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single `source → destination` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub source: String,
    pub destination: String,
}

impl RouteEntry {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// The same entry with source and destination swapped.
    pub fn reversed(&self) -> Self {
        Self {
            source: self.destination.clone(),
            destination: self.source.clone(),
        }
    }
}

/// Ordered list of route entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMapping {
    entries: Vec<RouteEntry>,
}

impl RouteMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping from `(source, destination)` pairs, keeping their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs.into_iter().collect()
    }

    pub fn push(&mut self, source: impl Into<String>, destination: impl Into<String>) {
        self.entries.push(RouteEntry::new(source, destination));
    }

    /// Every entry with source and destination swapped, in the same order.
    pub fn reversed(&self) -> Self {
        Self {
            entries: self.entries.iter().map(RouteEntry::reversed).collect(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RouteMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(source, destination)| RouteEntry::new(source, destination))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RouteMapping {
    type Item = &'a RouteEntry;
    type IntoIter = std::slice::Iter<'a, RouteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for RouteMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.source, &entry.destination)?;
        }
        map.end()
    }
}

struct RouteMappingVisitor;

impl<'de> Visitor<'de> for RouteMappingVisitor {
    type Value = RouteMapping;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of source paths to destination paths")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        // Duplicate keys are kept; the tree builder settles them.
        while let Some((source, destination)) = access.next_entry::<String, String>()? {
            entries.push(RouteEntry { source, destination });
        }
        Ok(RouteMapping { entries })
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(RouteMapping::default())
    }
}

impl<'de> Deserialize<'de> for RouteMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RouteMappingVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_preserves_document_order() {
        let json = r#"{"/z": "Z", "/a": "A", "/m": "M"}"#;
        let mapping: RouteMapping = serde_json::from_str(json).unwrap();
        let sources: Vec<&str> = mapping.iter().map(|e| e.source.as_str()).collect();
        assert_eq!(sources, vec!["/z", "/a", "/m"]);
    }

    #[test]
    fn test_deserialize_null_is_empty() {
        let mapping: RouteMapping = serde_json::from_str("null").unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_non_string_values() {
        assert!(serde_json::from_str::<RouteMapping>(r#"{"/a": 1}"#).is_err());
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut mapping = RouteMapping::new();
        mapping.push("/a", "A");
        mapping.push("/a", "Again");
        assert_eq!(mapping.len(), 2);
        let destinations: Vec<&str> = mapping.iter().map(|e| e.destination.as_str()).collect();
        assert_eq!(destinations, vec!["A", "Again"]);
    }

    #[test]
    fn test_reversed() {
        let mapping = RouteMapping::from_pairs([("/a", "A"), ("/b", "B")]);
        let reversed = mapping.reversed();
        assert_eq!(reversed.iter().next(), Some(&RouteEntry::new("A", "/a")));
        assert_eq!(reversed.len(), 2);
    }

    #[test]
    fn test_serialize_round_trip_keeps_order() {
        let mapping = RouteMapping::from_pairs([("/b", "B"), ("/a", "A")]);
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"{"/b":"B","/a":"A"}"#);
    }
}
