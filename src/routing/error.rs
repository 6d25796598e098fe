//! Route compilation errors.

use thiserror::Error;

/// Errors raised while compiling a mapping into route trees.
///
/// Lookups never fail; only tree construction does.
#[derive(Debug, Error)]
pub enum RouteError {
    /// A `regex:` segment key does not compile.
    #[error("invalid regex segment '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for route compilation.
pub type RouteResult<T> = Result<T, RouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let source = regex::Regex::new("([0-9]").unwrap_err();
        let err = RouteError::InvalidRegex {
            pattern: "([0-9]".into(),
            source,
        };
        assert!(err.to_string().starts_with("invalid regex segment '([0-9]'"));
    }
}
