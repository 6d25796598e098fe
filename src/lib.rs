//! URL rewriting between pretty external paths and internal application routes.

pub mod config;
pub mod observability;
pub mod routing;

pub use config::RewriterConfig;
pub use routing::{
    Rewriter, RewriterChain, RewriterStore, RouteError, RouteMapping, RouteScope, RouteTree,
};
