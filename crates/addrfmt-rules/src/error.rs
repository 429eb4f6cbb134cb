//! Error and diagnostic types for rule loading.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that make a rule bundle unusable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RulesError {
    /// Bundle file could not be read.
    #[error("failed to read rule bundle {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bundle is not valid JSON or does not match the bundle shape.
    #[error("failed to parse rule bundle {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// No `default` template entry, so records without a country have
    /// nothing to render with.
    #[error("rule bundle has no '{key}' template entry")]
    MissingDefault { key: &'static str },

    /// The `default` entry exists but carries no address template.
    #[error("'{key}' template entry has no address_template")]
    MissingDefaultTemplate { key: &'static str },
}

impl RulesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for rule loading operations.
pub type Result<T> = std::result::Result<T, RulesError>;

/// A rule that was skipped while building the store.
///
/// `location` names where the rule came from, e.g. `templates.DE.replace[2]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleWarning {
    pub location: String,
    pub message: String,
}

impl RuleWarning {
    pub(crate) fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        let warning = Self {
            location: location.into(),
            message: message.into(),
        };
        tracing::warn!(
            location = %warning.location,
            reason = %warning.message,
            "Skipping unusable rule"
        );
        warning
    }
}

impl fmt::Display for RuleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}
