//! Rule bundle source selection.

use std::path::PathBuf;

/// Environment variable naming a JSON rule bundle to load instead of the
/// embedded one.
pub const RULES_ENV_VAR: &str = "ADDRFMT_RULES";

/// Where the rule bundle comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RulesSource {
    /// The bundle compiled into this crate.
    #[default]
    Embedded,
    /// A JSON bundle on disk.
    File(PathBuf),
}

/// Configuration for loading the rule store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulesConfig {
    pub source: RulesSource,
}

impl RulesConfig {
    /// Use the embedded bundle.
    pub fn embedded() -> Self {
        Self::default()
    }

    /// Use a bundle file.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            source: RulesSource::File(path.into()),
        }
    }

    /// Resolve the source from the environment.
    ///
    /// Resolution order:
    /// 1. `ADDRFMT_RULES` environment variable (path to a JSON bundle)
    /// 2. The embedded bundle
    pub fn from_env() -> Self {
        match std::env::var(RULES_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path),
            _ => Self::embedded(),
        }
    }
}
