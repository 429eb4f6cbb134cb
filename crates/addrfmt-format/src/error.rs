//! Error types for the formatter.

use addrfmt_rules::RulesError;
use thiserror::Error;

pub use crate::template::TemplateError;

/// Errors raised while building an [`AddressFormatter`](crate::AddressFormatter).
///
/// Formatting itself never fails; everything here happens at construction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatterError {
    /// The rule bundle could not be loaded.
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// A template in the rule store does not compile.
    #[error("template for '{country}' does not compile: {source}")]
    Template {
        country: String,
        #[source]
        source: TemplateError,
    },
}

/// Result type for formatter construction.
pub type Result<T> = std::result::Result<T, FormatterError>;

/// Why abbreviation could not run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AbbreviationError {
    /// The record has no valid `country_code`.
    #[error("cannot abbreviate without a country code")]
    MissingCountryCode,

    /// The country has no language mapping.
    #[error("no languages known for country '{country}'")]
    NoLanguages { country: String },
}
