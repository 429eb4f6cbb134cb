//! Country resolution.

use std::sync::LazyLock;

use addrfmt_model::component::{COUNTRY, COUNTRY_CODE, STATE};
use addrfmt_model::{AddressComponents, CountryCode, FormatOptions};
use addrfmt_rules::RuleStore;
use regex::{Captures, Regex};

use crate::logging::redact_value;

/// Components an `add_component` directive may set.
pub const ADD_COMPONENT_WHITELIST: &[&str] = &[STATE];

static COMPONENT_REF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(\w+)").expect("Invalid component reference regex"));

/// Determine the effective country and write it back to `country_code`.
///
/// The code comes from `options.country`, then the record's `country_code`,
/// then `options.fallback_country`; the first valid one is used. A
/// `use_country` entry then redirects to its parent (one level only),
/// applying its `change_country` and `add_component` directives. Finally the
/// store's territory overrides may replace the code based on component
/// values.
///
/// Returns `None` when no valid code is found; the record is left untouched
/// in that case.
pub fn resolve_country(
    components: &mut AddressComponents,
    options: &FormatOptions,
    rules: &RuleStore,
) -> Option<CountryCode> {
    let mut code = options
        .country
        .as_deref()
        .and_then(CountryCode::parse)
        .or_else(|| components.get(COUNTRY_CODE).and_then(CountryCode::parse))
        .or_else(|| options.fallback_country.as_deref().and_then(CountryCode::parse))?;

    if let Some(entry) = rules.template(code.as_str())
        && let Some(parent) = &entry.use_country
    {
        tracing::debug!(country = %code, parent = %parent, "Using parent country rules");

        if let Some(change) = &entry.change_country {
            let country = interpolate(change, components);
            components.insert(COUNTRY, country);
        }

        if let Some(add) = &entry.add_component {
            if ADD_COMPONENT_WHITELIST.contains(&add.key.as_str()) {
                components.insert(add.key.clone(), add.value.clone());
            } else {
                tracing::debug!(
                    country = %code,
                    component = %add.key,
                    "Ignoring add_component for a component outside the whitelist"
                );
            }
        }

        code = parent.clone();
    }

    if let Some(territory) = rules
        .territory_overrides()
        .iter()
        .find(|territory| territory.applies(&code, &*components))
    {
        tracing::debug!(
            country = %code,
            territory = %territory.code,
            state = %redact_value(components.get(&territory.component).unwrap_or_default()),
            "Applied territory override"
        );
        code = territory.code.clone();
        components.insert(COUNTRY, territory.country_name.clone());
    }

    components.insert(COUNTRY_CODE, code.as_str());
    Some(code)
}

/// Replace `$name` with the current value of component `name` (empty when
/// absent).
fn interpolate(template: &str, components: &AddressComponents) -> String {
    COMPONENT_REF_REGEX
        .replace_all(template, |caps: &Captures<'_>| {
            components.get(&caps[1]).unwrap_or_default().to_string()
        })
        .into_owned()
}
