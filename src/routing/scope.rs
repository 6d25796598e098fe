//! Per-scope routing context.
//!
//! A `RouteScope` is created by the caller for one logical scope (typically
//! one incoming request) and passed to whatever needs URL rewriting. The
//! chain is assembled on first use and reused for every later lookup in the
//! same scope.

use std::sync::{Arc, OnceLock};

use uuid::Uuid;

use crate::routing::rewriter::{Rewriter, RewriterChain};

#[derive(Debug)]
pub struct RouteScope {
    id: Uuid,
    base: Arc<Rewriter>,
    override_rewriter: Option<Arc<Rewriter>>,
    chain: OnceLock<RewriterChain>,
}

impl RouteScope {
    /// Scope consulting only the base rewriter.
    pub fn new(base: Arc<Rewriter>) -> Self {
        Self {
            id: Uuid::new_v4(),
            base,
            override_rewriter: None,
            chain: OnceLock::new(),
        }
    }

    /// Consult `rewriter` ahead of the base rewriter.
    pub fn with_override(mut self, rewriter: Arc<Rewriter>) -> Self {
        self.override_rewriter = Some(rewriter);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The chain for this scope. Built once, then returned as-is.
    pub fn chain(&self) -> &RewriterChain {
        self.chain.get_or_init(|| {
            let mut rewriters = Vec::with_capacity(2);
            if let Some(rewriter) = &self.override_rewriter {
                rewriters.push(Arc::clone(rewriter));
            }
            rewriters.push(Arc::clone(&self.base));
            tracing::debug!(scope = %self.id, rewriters = rewriters.len(), "Rewriter chain assembled");
            RewriterChain::new(rewriters)
        })
    }

    /// Forward rewrite with identity fallback.
    pub fn get(&self, url: &str) -> String {
        self.chain().resolve(url)
    }

    /// Reverse rewrite with identity fallback.
    pub fn get_reverse(&self, url: &str) -> String {
        self.chain().resolve_reverse(url)
    }
}
