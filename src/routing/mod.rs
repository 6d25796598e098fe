//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup or reload):
//!     RouteMapping (ordered source → destination pairs)
//!     → tree.rs (forward tree from entries, reverse tree from swapped entries)
//!     → Freeze as immutable Rewriter
//!
//! Lookup (per URL):
//!     scope.rs (per-request RouteScope, chain built once)
//!     → rewriter.rs (RewriterChain: override first, base second)
//!     → matcher.rs (walk tree, substitute captures, reattach tail)
//!     → Return: rewritten URL, or the input unchanged
//! ```
//!
//! # Design Decisions
//! - Trees compiled once, immutable afterwards (shared without locks)
//! - Regex segments compiled eagerly; bad patterns fail the build, not the lookup
//! - Child order is insertion order, never container iteration order
//! - Forward and reverse trees are built independently (asymmetry is allowed)
//! - Lookups are total: no match means identity

pub mod error;
pub mod mapping;
pub mod matcher;
pub mod path;
pub mod rewriter;
pub mod scope;
pub mod store;
pub mod tree;

pub use error::RouteError;
pub use mapping::{RouteEntry, RouteMapping};
pub use rewriter::{Rewriter, RewriterChain};
pub use scope::RouteScope;
pub use store::RewriterStore;
pub use tree::{RouteTree, RouteTreeBuilder, RouteTreeNode, SegmentKey};
