//! Value-dependent territory overrides.
//!
//! Some territories share a parent country's code in geocoder output and can
//! only be told apart by a component value, e.g. a `state` of "Curaçao" under
//! `NL`. Each override is evaluated after `use_country` resolution; the first
//! one that applies wins.

use addrfmt_model::{AddressComponents, CountryCode};
use serde::{Deserialize, Serialize};

/// Case-insensitive predicate on a component value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueMatcher {
    /// The whole value equals the text.
    Equals(String),
    /// The value starts with the text.
    StartsWith(String),
}

impl ValueMatcher {
    pub fn matches(&self, value: &str) -> bool {
        let value = value.trim().to_lowercase();
        match self {
            Self::Equals(expected) => value == expected.to_lowercase(),
            Self::StartsWith(prefix) => value.starts_with(&prefix.to_lowercase()),
        }
    }
}

/// Switch `country` → `code` when `component` matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritoryOverride {
    pub country: CountryCode,
    pub component: String,
    pub matcher: ValueMatcher,
    pub code: CountryCode,
    pub country_name: String,
}

impl TerritoryOverride {
    /// Whether this override applies to a record resolved to `resolved`.
    pub fn applies(&self, resolved: &CountryCode, components: &AddressComponents) -> bool {
        *resolved == self.country
            && components
                .get(&self.component)
                .is_some_and(|value| self.matcher.matches(value))
    }

    /// The built-in table: Dutch Caribbean countries reported under `NL`.
    pub fn defaults() -> Vec<Self> {
        [
            (ValueMatcher::Equals("Curaçao".to_string()), "CW", "Curaçao"),
            (
                ValueMatcher::StartsWith("sint maarten".to_string()),
                "SX",
                "Sint Maarten",
            ),
            (ValueMatcher::StartsWith("aruba".to_string()), "AW", "Aruba"),
        ]
        .into_iter()
        .filter_map(|(matcher, code, name)| {
            Some(Self {
                country: CountryCode::parse("NL")?,
                component: "state".to_string(),
                matcher,
                code: CountryCode::parse(code)?,
                country_name: name.to_string(),
            })
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nl() -> CountryCode {
        CountryCode::parse("NL").unwrap()
    }

    #[test]
    fn test_defaults_cover_dutch_caribbean() {
        let defaults = TerritoryOverride::defaults();
        let codes: Vec<&str> = defaults.iter().map(|o| o.code.as_str()).collect();
        assert_eq!(codes, vec!["CW", "SX", "AW"]);
    }

    #[test]
    fn test_curacao_is_case_insensitive() {
        let defaults = TerritoryOverride::defaults();
        let components: AddressComponents = [("state", "CURAÇAO")].into_iter().collect();
        assert!(defaults[0].applies(&nl(), &components));
    }

    #[test]
    fn test_prefix_match() {
        let defaults = TerritoryOverride::defaults();
        let components: AddressComponents =
            [("state", "Sint Maarten (Dutch part)")].into_iter().collect();
        assert!(!defaults[0].applies(&nl(), &components));
        assert!(defaults[1].applies(&nl(), &components));
    }

    #[test]
    fn test_requires_parent_country() {
        let defaults = TerritoryOverride::defaults();
        let components: AddressComponents = [("state", "Aruba")].into_iter().collect();
        let us = CountryCode::parse("US").unwrap();
        assert!(!defaults[2].applies(&us, &components));
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{
            "country": "NL",
            "component": "state",
            "matcher": {"starts_with": "aruba"},
            "code": "AW",
            "country_name": "Aruba"
        }"#;
        let parsed: TerritoryOverride = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, TerritoryOverride::defaults()[2]);
    }
}
