//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routing and config produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (lookup and reload counters via `metrics`)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → whatever metrics recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Metrics go through the `metrics` facade; without a recorder they are no-ops
//! - Lookup events are trace level to keep the hot path quiet by default

pub mod logging;
pub mod metrics;
