//! Route tree construction.
//!
//! # Responsibilities
//! - Turn an ordered mapping into a prefix tree keyed by path segments
//! - Compile `regex:` segment keys once, at build time
//! - Settle destination collisions (shorter destination wins)
//!
//! # Design Decisions
//! - Children are an ordered list; a side index gives O(1) literal lookup
//! - The source `/` never enters the tree, it sets `root_route`
//! - Equal-length collisions keep the first-seen destination

use std::collections::HashMap;

use regex::Regex;

use crate::routing::error::{RouteError, RouteResult};
use crate::routing::mapping::{RouteEntry, RouteMapping};
use crate::routing::path::normalize_path;

/// Prefix that marks a segment key as a regular expression.
pub const REGEX_MARKER: &str = "regex:";

/// Key of a child edge in the route tree.
#[derive(Debug, Clone)]
pub enum SegmentKey {
    /// Matches one path segment exactly.
    Literal(String),
    /// Matches one whole path segment against a compiled pattern.
    Regex { pattern: String, regex: Regex },
}

impl SegmentKey {
    /// Parse a raw segment, compiling it when it carries the regex marker.
    pub fn parse(segment: &str) -> RouteResult<Self> {
        match segment.strip_prefix(REGEX_MARKER) {
            Some(pattern) => {
                let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
                    RouteError::InvalidRegex {
                        pattern: pattern.to_string(),
                        source,
                    }
                })?;
                Ok(SegmentKey::Regex {
                    pattern: pattern.to_string(),
                    regex,
                })
            }
            None => Ok(SegmentKey::Literal(segment.to_string())),
        }
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, SegmentKey::Regex { .. })
    }
}

/// A node in the route tree.
#[derive(Debug, Clone, Default)]
pub struct RouteTreeNode {
    value: Option<String>,
    children: Vec<(SegmentKey, RouteTreeNode)>,
    /// Raw segment key → position in `children`.
    index: HashMap<String, usize>,
}

impl RouteTreeNode {
    /// Destination stored at this node, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&SegmentKey, &RouteTreeNode)> {
        self.children.iter().map(|(key, node)| (key, node))
    }

    /// The literal child whose key equals `segment`.
    pub fn literal_child(&self, segment: &str) -> Option<&RouteTreeNode> {
        let &position = self.index.get(segment)?;
        match &self.children[position] {
            (SegmentKey::Literal(_), node) => Some(node),
            (SegmentKey::Regex { .. }, _) => None,
        }
    }

    /// Regex children in insertion order.
    pub fn regex_children(&self) -> impl Iterator<Item = (&Regex, &RouteTreeNode)> {
        self.children.iter().filter_map(|(key, node)| match key {
            SegmentKey::Regex { regex, .. } => Some((regex, node)),
            SegmentKey::Literal(_) => None,
        })
    }

    fn child_or_insert(&mut self, segment: &str) -> RouteResult<&mut RouteTreeNode> {
        let existing = self.index.get(segment).copied();
        let position = match existing {
            Some(position) => position,
            None => {
                let key = SegmentKey::parse(segment)?;
                self.children.push((key, RouteTreeNode::default()));
                let position = self.children.len() - 1;
                self.index.insert(segment.to_string(), position);
                position
            }
        };
        Ok(&mut self.children[position].1)
    }

    /// Store `destination` unless an existing destination is already shorter
    /// or of equal length.
    fn offer_value(&mut self, destination: &str) {
        let replace = match self.value() {
            None => true,
            Some(existing) => existing.chars().count() > destination.chars().count(),
        };
        if replace {
            self.value = Some(destination.to_string());
        }
    }
}

/// A compiled, immutable route tree.
#[derive(Debug, Clone, Default)]
pub struct RouteTree {
    root: RouteTreeNode,
    root_route: Option<String>,
}

impl RouteTree {
    /// An empty tree that matches nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a tree from every entry of `mapping`, in order.
    pub fn from_mapping(mapping: &RouteMapping) -> RouteResult<Self> {
        let mut builder = RouteTreeBuilder::new();
        for entry in mapping {
            builder.insert(entry)?;
        }
        Ok(builder.finish())
    }

    pub fn root(&self) -> &RouteTreeNode {
        &self.root
    }

    /// Destination for the path `/`, already prefixed with a slash.
    pub fn root_route(&self) -> Option<&str> {
        self.root_route.as_deref()
    }
}

/// Incremental builder for a [`RouteTree`].
#[derive(Debug, Default)]
pub struct RouteTreeBuilder {
    tree: RouteTree,
    inserted: usize,
}

impl RouteTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one entry.
    ///
    /// Fails only when a `regex:` segment of the source does not compile.
    pub fn insert(&mut self, entry: &RouteEntry) -> RouteResult<()> {
        self.inserted += 1;

        if entry.source == "/" {
            self.tree.root_route = Some(format!("/{}", normalize_path(&entry.destination)));
            return Ok(());
        }

        let mut node = &mut self.tree.root;
        for segment in normalize_path(&entry.source).split('/') {
            node = node.child_or_insert(segment)?;
        }
        node.offer_value(&entry.destination);
        Ok(())
    }

    pub fn finish(self) -> RouteTree {
        tracing::debug!(
            entries = self.inserted,
            top_level = self.tree.root.children.len(),
            root_route = ?self.tree.root_route,
            "Route tree built"
        );
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(pairs: &[(&str, &str)]) -> RouteTree {
        RouteTree::from_mapping(&RouteMapping::from_pairs(pairs.iter().copied())).unwrap()
    }

    #[test]
    fn test_empty_mapping() {
        let tree = build(&[]);
        assert!(!tree.root().has_children());
        assert_eq!(tree.root_route(), None);
    }

    #[test]
    fn test_root_entry_sets_root_route() {
        let tree = build(&[("/", "OnlineSbisRu/")]);
        assert_eq!(tree.root_route(), Some("/OnlineSbisRu"));
        assert!(!tree.root().has_children());
    }

    #[test]
    fn test_nested_segments() {
        let tree = build(&[("/a/b", "X")]);
        let a = tree.root().literal_child("a").unwrap();
        assert_eq!(a.value(), None);
        let b = a.literal_child("b").unwrap();
        assert_eq!(b.value(), Some("X"));
    }

    #[test]
    fn test_shorter_destination_wins() {
        let tree = build(&[("/a", "Long1"), ("/a/", "Sho")]);
        assert_eq!(tree.root().literal_child("a").unwrap().value(), Some("Sho"));

        let tree = build(&[("/a", "Sho"), ("/a/", "Long1")]);
        assert_eq!(tree.root().literal_child("a").unwrap().value(), Some("Sho"));
    }

    #[test]
    fn test_equal_length_keeps_first() {
        let tree = build(&[("/a", "One"), ("/a/", "Two")]);
        assert_eq!(tree.root().literal_child("a").unwrap().value(), Some("One"));
    }

    #[test]
    fn test_regex_children_keep_insertion_order() {
        let tree = build(&[
            ("/regex:^b.*$", "B"),
            ("/lit", "L"),
            ("/regex:^a.*$", "A"),
        ]);
        let values: Vec<_> = tree
            .root()
            .regex_children()
            .map(|(_, node)| node.value().unwrap())
            .collect();
        assert_eq!(values, vec!["B", "A"]);
        assert!(tree.root().literal_child("regex:^b.*$").is_none());
    }

    #[test]
    fn test_invalid_regex_fails_build() {
        let mapping = RouteMapping::from_pairs([("/regex:([0-9]", "X")]);
        let err = RouteTree::from_mapping(&mapping).unwrap_err();
        assert!(matches!(err, RouteError::InvalidRegex { ref pattern, .. } if pattern == "([0-9]"));
    }

    #[test]
    fn test_segment_key_parse() {
        assert!(SegmentKey::parse("regex:^x$").unwrap().is_regex());
        assert!(!SegmentKey::parse("plain").unwrap().is_regex());
    }
}
