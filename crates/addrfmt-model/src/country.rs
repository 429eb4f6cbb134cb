//! ISO 3166-1 alpha-2 country codes.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not a two-letter country code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid country code '{0}': expected two ASCII letters")]
pub struct InvalidCountryCode(pub String);

/// A validated, upper-case, two-letter country code.
///
/// Parsing is case-insensitive and maps the common `uk` spelling to `GB`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Parse a country code, returning `None` for anything that is not
    /// exactly two ASCII letters.
    ///
    /// ```
    /// use addrfmt_model::CountryCode;
    ///
    /// assert_eq!(CountryCode::parse("de").unwrap().as_str(), "DE");
    /// assert_eq!(CountryCode::parse("UK").unwrap().as_str(), "GB");
    /// assert!(CountryCode::parse("deu").is_none());
    /// assert!(CountryCode::parse("d1").is_none());
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.len() != 2 || !value.bytes().all(|b| b.is_ascii_alphabetic()) {
            return None;
        }
        let upper = value.to_ascii_uppercase();
        if upper == "UK" {
            return Some(Self("GB".to_string()));
        }
        Some(Self(upper))
    }

    /// The code as an upper-case string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CountryCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for CountryCode {
    type Err = InvalidCountryCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidCountryCode(s.to_string()))
    }
}

impl TryFrom<String> for CountryCode {
    type Error = InvalidCountryCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

impl PartialEq<str> for CountryCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CountryCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
