//! Address formatting rule store.
//!
//! This crate provides:
//!
//! - **Bundle types** ([`RuleBundle`]): the pre-parsed, serde-deserializable
//!   shape in which an external loader hands over the rule tables
//! - **Compiled rules** ([`ReplaceRule`]): exact-key and regex replacement
//!   rules, compiled once at load time
//! - **Lookup tables**: component vocabulary, state codes, country languages,
//!   abbreviations, country names, territory overrides
//! - **The store** ([`RuleStore`]): validated, immutable, shareable
//!
//! Invalid rules never fail a load. They are skipped and reported as
//! [`RuleWarning`]s; only a bundle without a usable `default` entry is
//! rejected.
//!
//! # Bundle Structure
//!
//! ```text
//! {
//!   "components":          [{"name": "road", "aliases": ["street"]}, ...],
//!   "templates":           {"default": {...}, "DE": {...}, ...},
//!   "state_codes":         {"US": {"CA": "California", ...}, ...},
//!   "country_to_language": {"CH": "de,fr,it,rm", ...},
//!   "abbreviations":       {"en": {"road": [["Avenue", "Ave"], ...]}, ...},
//!   "country_names":       {"DE": "Germany", ...},
//!   "territory_overrides": [...]            (optional)
//! }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use addrfmt_rules::{RuleStore, RulesConfig};
//!
//! // Embedded bundle, or the file named by ADDRFMT_RULES
//! let store = RuleStore::load(&RulesConfig::from_env())?;
//!
//! let de = store.template("DE").expect("DE entry");
//! println!("{}", de.address_template.as_deref().unwrap_or_default());
//! ```

pub mod abbreviation;
pub mod bundle;
pub mod config;
pub mod embedded;
pub mod error;
pub mod replace;
pub mod store;
pub mod territory;
pub mod vocabulary;

// Error types
pub use error::{Result, RuleWarning, RulesError};

// Configuration
pub use config::{RULES_ENV_VAR, RulesConfig, RulesSource};

// Bundle and compiled types
pub use abbreviation::{Abbreviation, AbbreviationTable, LanguageAbbreviations};
pub use bundle::{ComponentEntry, RawCountryTemplate, RuleBundle};
pub use replace::ReplaceRule;
pub use store::{AddComponent, CountryTemplate, DEFAULT_TEMPLATE_KEY, RuleStore};
pub use territory::{TerritoryOverride, ValueMatcher};
pub use vocabulary::{ComponentDef, ComponentVocabulary};
