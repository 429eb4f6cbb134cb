//! Per-call formatting options.

use serde::{Deserialize, Serialize};

/// Options controlling a single formatting call.
///
/// Built with the `with_*` methods or deserialized from configuration;
/// missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// ISO 3166-1 alpha-2 code overriding the record's `country_code`.
    pub country: Option<String>,

    /// Abbreviate component values using the country's languages.
    pub abbreviate: bool,

    /// Code to use when no valid code can be determined otherwise.
    pub fallback_country: Option<String>,

    /// Fill a missing `country` from the rule store's country names.
    pub append_country: bool,

    /// Apply the postcode sanity rules (length, ranges, lists).
    pub cleanup_postcode: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            country: None,
            abbreviate: false,
            fallback_country: None,
            append_country: false,
            cleanup_postcode: true,
        }
    }
}

impl FormatOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the country code.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Enable or disable abbreviation.
    #[must_use]
    pub fn with_abbreviate(mut self, enable: bool) -> Self {
        self.abbreviate = enable;
        self
    }

    /// Set the fallback country code.
    #[must_use]
    pub fn with_fallback_country(mut self, country: impl Into<String>) -> Self {
        self.fallback_country = Some(country.into());
        self
    }

    /// Enable or disable appending the country name.
    #[must_use]
    pub fn with_append_country(mut self, enable: bool) -> Self {
        self.append_country = enable;
        self
    }

    /// Enable or disable postcode cleanup.
    #[must_use]
    pub fn with_cleanup_postcode(mut self, enable: bool) -> Self {
        self.cleanup_postcode = enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = FormatOptions::default();
        assert!(options.country.is_none());
        assert!(!options.abbreviate);
        assert!(options.cleanup_postcode);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: FormatOptions =
            serde_json::from_str(r#"{"country": "us", "abbreviate": true}"#).unwrap();

        assert_eq!(options.country.as_deref(), Some("us"));
        assert!(options.abbreviate);
        assert!(options.cleanup_postcode);
    }
}
