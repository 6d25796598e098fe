//! Rewriters and the priority chain that consults them.
//!
//! # Responsibilities
//! - Pair a forward tree with an independently built reverse tree
//! - Try rewriters in priority order, first match wins
//! - Fall back to the input URL when nothing matches
//!
//! # Design Decisions
//! - The reverse tree is compiled from swapped entries, never by inverting
//!   the forward tree, so the two directions may differ
//! - Rewriters are shared behind `Arc`; a chain only orders them

use std::sync::Arc;

use crate::observability::metrics;
use crate::routing::error::RouteResult;
use crate::routing::mapping::RouteMapping;
use crate::routing::tree::RouteTree;

/// Lookup direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Pretty URL → application route.
    Forward,
    /// Application route → pretty URL.
    Reverse,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }
}

/// An immutable (forward, reverse) tree pair compiled from one mapping.
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    forward: RouteTree,
    reverse: RouteTree,
}

impl Rewriter {
    /// Compile both trees from `mapping`.
    pub fn from_mapping(mapping: &RouteMapping) -> RouteResult<Self> {
        let forward = RouteTree::from_mapping(mapping)?;
        let reverse = RouteTree::from_mapping(&mapping.reversed())?;
        Ok(Self { forward, reverse })
    }

    pub fn forward_tree(&self) -> &RouteTree {
        &self.forward
    }

    pub fn reverse_tree(&self) -> &RouteTree {
        &self.reverse
    }

    fn tree(&self, direction: Direction) -> &RouteTree {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Reverse => &self.reverse,
        }
    }

    /// Forward rewrite, or `None` when this rewriter has no match.
    pub fn try_get(&self, url: &str) -> Option<String> {
        self.forward.find(url)
    }

    /// Reverse rewrite, or `None` when this rewriter has no match.
    pub fn try_get_reverse(&self, url: &str) -> Option<String> {
        self.reverse.find(url)
    }

    /// Forward rewrite with identity fallback.
    pub fn get(&self, url: &str) -> String {
        self.try_get(url).unwrap_or_else(|| url.to_string())
    }

    /// Reverse rewrite with identity fallback.
    pub fn get_reverse(&self, url: &str) -> String {
        self.try_get_reverse(url).unwrap_or_else(|| url.to_string())
    }
}

/// Ordered rewriters; index 0 has the highest priority.
#[derive(Debug, Clone, Default)]
pub struct RewriterChain {
    rewriters: Vec<Arc<Rewriter>>,
}

impl RewriterChain {
    pub fn new(rewriters: Vec<Arc<Rewriter>>) -> Self {
        Self { rewriters }
    }

    pub fn len(&self) -> usize {
        self.rewriters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewriters.is_empty()
    }

    fn lookup(&self, url: &str, direction: Direction) -> Option<String> {
        let found = self
            .rewriters
            .iter()
            .enumerate()
            .find_map(|(priority, rewriter)| {
                rewriter
                    .tree(direction)
                    .find(url)
                    .map(|rewritten| (priority, rewritten))
            });

        metrics::record_lookup(direction, found.is_some());
        match found {
            Some((priority, rewritten)) => {
                tracing::trace!(
                    url,
                    rewritten = %rewritten,
                    priority,
                    direction = direction.as_str(),
                    "URL rewritten"
                );
                Some(rewritten)
            }
            None => {
                tracing::trace!(url, direction = direction.as_str(), "No rewrite matched");
                None
            }
        }
    }

    /// First forward match across the chain.
    pub fn try_resolve(&self, url: &str) -> Option<String> {
        self.lookup(url, Direction::Forward)
    }

    /// First reverse match across the chain.
    pub fn try_resolve_reverse(&self, url: &str) -> Option<String> {
        self.lookup(url, Direction::Reverse)
    }

    /// Forward rewrite; returns `url` unchanged when no rewriter matches.
    pub fn resolve(&self, url: &str) -> String {
        self.try_resolve(url).unwrap_or_else(|| url.to_string())
    }

    /// Reverse rewrite; returns `url` unchanged when no rewriter matches.
    pub fn resolve_reverse(&self, url: &str) -> String {
        self.try_resolve_reverse(url).unwrap_or_else(|| url.to_string())
    }
}
