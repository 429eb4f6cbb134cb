//! Pre-parsed rule bundle.
//!
//! This is the shape in which an external loader hands the rule tables to
//! the store. Nothing here is validated or compiled; see
//! [`RuleStore::from_bundle`](crate::RuleStore::from_bundle).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::territory::TerritoryOverride;

/// All rule tables, as handed over by a loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleBundle {
    /// Ordered canonical components with their aliases.
    pub components: Vec<ComponentEntry>,

    /// Templates keyed by country code, plus the `default` entry.
    pub templates: BTreeMap<String, RawCountryTemplate>,

    /// Country code → (region code → full region name).
    pub state_codes: BTreeMap<String, BTreeMap<String, String>>,

    /// Country code → comma-separated language codes, in priority order.
    pub country_to_language: BTreeMap<String, String>,

    /// Language → component → ordered `[long, short]` pairs.
    pub abbreviations: BTreeMap<String, BTreeMap<String, Vec<(String, String)>>>,

    /// Country code → display name, used when appending a missing country.
    pub country_names: BTreeMap<String, String>,

    /// Value-dependent territory overrides. `None` selects the built-in table.
    pub territory_overrides: Option<Vec<TerritoryOverride>>,
}

/// A canonical component and the aliases that merge into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEntry {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// A country's formatting rules before compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCountryTemplate {
    /// Mustache template used when the record has enough components.
    pub address_template: Option<String>,

    /// Mustache template used when both `road` and `postcode` are missing.
    pub fallback_template: Option<String>,

    /// `[pattern, replacement]` pairs applied to component values.
    /// A pattern of the form `key=literal` matches one component exactly.
    pub replace: Vec<(String, String)>,

    /// `[pattern, replacement]` pairs applied to the rendered text.
    pub postformat_replace: Vec<(String, String)>,

    /// Borrow another country's rules (dependent territories).
    pub use_country: Option<String>,

    /// New `country` value; may reference a component as `$name`.
    pub change_country: Option<String>,

    /// `key=value` component to add when borrowing rules.
    pub add_component: Option<String>,
}
