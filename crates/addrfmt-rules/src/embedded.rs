//! Embedded rule data.
//!
//! The default bundle is embedded at compile time using `include_str!()`, so
//! a formatter can be built without any runtime file I/O.
//!
//! # Contents
//!
//! - Component vocabulary with aliases
//! - Templates: `default` plus a representative set of countries and
//!   dependent territories
//! - State codes for US, CA, AU, DE, GB
//! - Country languages, abbreviations (en, de, fr, nl, es, pt, it), and
//!   country names

/// The embedded rule bundle (JSON).
pub const RULES_JSON: &str = include_str!("../data/rules.json");

/// Name used for the embedded bundle in diagnostics.
pub const RULES_ORIGIN: &str = "embedded rules.json";
