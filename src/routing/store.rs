//! Shared holder for the current base rewriter.
//!
//! # Design Decisions
//! - `ArcSwap` gives lock-free reads; scopes take a snapshot `Arc`
//! - Reload compiles first and swaps only on success
//! - A scope keeps the snapshot it started with, even across a reload

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::observability::metrics;
use crate::routing::error::RouteResult;
use crate::routing::mapping::RouteMapping;
use crate::routing::rewriter::Rewriter;
use crate::routing::scope::RouteScope;

#[derive(Debug)]
pub struct RewriterStore {
    base: ArcSwap<Rewriter>,
}

impl RewriterStore {
    pub fn new(base: Rewriter) -> Self {
        Self {
            base: ArcSwap::from_pointee(base),
        }
    }

    /// Compile `mapping` and hold it as the base rewriter.
    pub fn from_mapping(mapping: &RouteMapping) -> RouteResult<Self> {
        Ok(Self::new(Rewriter::from_mapping(mapping)?))
    }

    /// Snapshot of the current base rewriter.
    pub fn current(&self) -> Arc<Rewriter> {
        self.base.load_full()
    }

    /// Replace the base rewriter with one compiled from `mapping`.
    ///
    /// On error the current rewriter stays in place.
    pub fn reload(&self, mapping: &RouteMapping) -> RouteResult<()> {
        match Rewriter::from_mapping(mapping) {
            Ok(rewriter) => {
                self.base.store(Arc::new(rewriter));
                metrics::record_reload(true);
                tracing::info!(entries = mapping.len(), "Route mapping reloaded");
                Ok(())
            }
            Err(e) => {
                metrics::record_reload(false);
                Err(e)
            }
        }
    }

    /// Open a scope over the current base, optionally preceded by `override_rewriter`.
    pub fn scope(&self, override_rewriter: Option<Arc<Rewriter>>) -> RouteScope {
        let scope = RouteScope::new(self.current());
        match override_rewriter {
            Some(rewriter) => scope.with_override(rewriter),
            None => scope,
        }
    }
}

impl Default for RewriterStore {
    fn default() -> Self {
        Self::new(Rewriter::default())
    }
}
