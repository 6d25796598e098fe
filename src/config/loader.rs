//! Configuration and mapping loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::RewriterConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::{RouteError, RouteMapping};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Mapping parse error: {0}")]
    Mapping(#[from] serde_json::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Route error: {0}")]
    Route(#[from] RouteError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse configuration from a TOML file without semantic checks.
pub fn parse_config(path: &Path) -> Result<RewriterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RewriterConfig, ConfigError> {
    let config = parse_config(path)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load configuration (or defaults when `path` is `None`), apply explicit
/// mapping paths on top, then validate the result once.
pub fn load_config_with_overrides(
    path: Option<&Path>,
    mapping_path: Option<PathBuf>,
    override_path: Option<PathBuf>,
) -> Result<RewriterConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(path)?,
        None => RewriterConfig::default(),
    };
    if mapping_path.is_some() {
        config.mapping_path = mapping_path;
    }
    if override_path.is_some() {
        config.override_path = override_path;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load an ordered mapping from a JSON object file.
///
/// A file containing `null` yields an empty mapping.
pub fn load_mapping(path: &Path) -> Result<RouteMapping, ConfigError> {
    let content = fs::read_to_string(path)?;
    let mapping: RouteMapping = serde_json::from_str(&content)?;
    tracing::debug!(path = %path.display(), entries = mapping.len(), "Route mapping loaded");
    Ok(mapping)
}

/// Load the base mapping and, when configured, the override mapping.
pub fn load_mappings(
    config: &RewriterConfig,
) -> Result<(RouteMapping, Option<RouteMapping>), ConfigError> {
    let base = match &config.mapping_path {
        Some(path) => load_mapping(path)?,
        None => RouteMapping::new(),
    };
    let custom = config
        .override_path
        .as_deref()
        .map(load_mapping)
        .transpose()?;
    Ok((base, custom))
}
