//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check file references are usable and distinct
//! - Check the log level is one `tracing` understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RewriterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::path::Path;

use thiserror::Error;

use crate::config::schema::RewriterConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyPath { field: &'static str },

    #[error("override_path must differ from mapping_path")]
    OverrideIsBase,

    #[error("watch requires mapping_path")]
    WatchWithoutMapping,

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}

pub fn validate_config(config: &RewriterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let is_empty = |path: &Path| path.as_os_str().is_empty();
    if config.mapping_path.as_deref().is_some_and(is_empty) {
        errors.push(ValidationError::EmptyPath { field: "mapping_path" });
    }
    if config.override_path.as_deref().is_some_and(is_empty) {
        errors.push(ValidationError::EmptyPath { field: "override_path" });
    }

    if let (Some(base), Some(custom)) = (&config.mapping_path, &config.override_path) {
        if base == custom {
            errors.push(ValidationError::OverrideIsBase);
        }
    }

    if config.watch && config.mapping_path.is_none() {
        errors.push(ValidationError::WatchWithoutMapping);
    }

    let level = config.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.logging.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
