//! Region name → official code lookup.

use std::collections::BTreeMap;

use addrfmt_model::{AddressComponents, CountryCode};
use addrfmt_model::component::{COUNTRY_CODE, STATE, STATE_CODE};
use addrfmt_rules::RuleStore;

/// Leading phrase rewritten to `US` on a second lookup attempt for `US`.
const US_PREFIX: &str = "united states";

/// Look up the official code for the record's `state`.
///
/// Names match case-insensitively; when several codes share a name the
/// lexically first code wins. For `US`, a `state` beginning with
/// "United States" is retried with that phrase shortened to "US", so
/// "United States Virgin Islands" finds "US Virgin Islands".
pub fn resolve_state_code(components: &AddressComponents, rules: &RuleStore) -> Option<String> {
    let state = components.get(STATE)?.trim();
    let country = components.get(COUNTRY_CODE).and_then(CountryCode::parse)?;
    let table = rules.state_codes(country.as_str())?;

    if let Some(code) = find_code(table, state) {
        return Some(code);
    }

    if country.as_str() == "US"
        && let Some(rest) = state
            .get(..US_PREFIX.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(US_PREFIX))
            .and_then(|_| state.get(US_PREFIX.len()..))
    {
        return find_code(table, &format!("US{rest}"));
    }

    None
}

/// Set `state_code` from `state` unless it is already present.
pub fn add_state_code(components: &mut AddressComponents, rules: &RuleStore) {
    if components.contains(STATE_CODE) {
        return;
    }
    if let Some(code) = resolve_state_code(components, rules) {
        tracing::trace!(state_code = %code, "Resolved state code");
        components.insert(STATE_CODE, code);
    }
}

fn find_code(table: &BTreeMap<String, String>, state: &str) -> Option<String> {
    let wanted = state.to_lowercase();
    table
        .iter()
        .find(|(_, name)| name.to_lowercase() == wanted)
        .map(|(code, _)| code.to_uppercase())
}
