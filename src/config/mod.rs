//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RewriterConfig (validated, immutable)
//!
//! mapping files (JSON object, source → destination)
//!     → loader.rs (ordered RouteMapping)
//!     → routing (compiled into Rewriter)
//!
//! On mapping change:
//!     watcher.rs detects change
//!     → loader.rs loads new mapping
//!     → RewriterStore::reload compiles and swaps
//!     → new scopes observe new rewriter
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{
    load_config, load_config_with_overrides, load_mapping, load_mappings, parse_config, ConfigError,
};
pub use schema::{LogFormat, LoggingConfig, RewriterConfig};
