//! Alias merging and unknown-component aggregation.

use addrfmt_model::AddressComponents;
use addrfmt_model::component::{ATTENTION, PIPELINE};
use addrfmt_rules::ComponentVocabulary;

use crate::logging::redact_value;

/// Copy aliased values into their canonical component.
///
/// Components are visited in vocabulary order; for each canonical name that
/// is absent, the first present alias (in declared order) supplies the value.
/// Present canonical values are never overwritten and alias keys are left in
/// place.
pub fn merge_aliases(components: &mut AddressComponents, vocabulary: &ComponentVocabulary) {
    for def in vocabulary.components() {
        if components.contains(&def.name) {
            continue;
        }
        let found = def
            .aliases
            .iter()
            .find_map(|alias| components.get(alias).map(|value| (alias, value.to_string())));
        if let Some((alias, value)) = found {
            tracing::trace!(
                alias = %alias,
                component = %def.name,
                value = %redact_value(&value),
                "Merged alias"
            );
            components.insert(def.name.clone(), value);
        }
    }
}

/// Move components outside the vocabulary into `attention`.
///
/// Names in [`PIPELINE`] are always kept. Unknown values are joined with ", " in lexical key order, after any
/// existing `attention` value.
pub fn aggregate_unknown(components: &mut AddressComponents, vocabulary: &ComponentVocabulary) {
    let unknown: Vec<String> = components
        .names()
        .filter(|name| !vocabulary.is_known(name) && !PIPELINE.contains(name))
        .map(ToString::to_string)
        .collect();
    if unknown.is_empty() {
        return;
    }

    let mut parts: Vec<String> = components
        .get(ATTENTION)
        .map(ToString::to_string)
        .into_iter()
        .collect();
    for name in &unknown {
        if let Some(value) = components.remove(name) {
            parts.push(value);
        }
    }

    tracing::debug!(count = unknown.len(), "Moved unknown components to attention");
    components.insert(ATTENTION, parts.join(", "));
}
