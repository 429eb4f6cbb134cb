//! Recognized component vocabulary.

use std::collections::{HashMap, HashSet};

use crate::bundle::ComponentEntry;
use crate::error::RuleWarning;

/// A canonical component with its aliases, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDef {
    pub name: String,
    pub aliases: Vec<String>,
}

/// The ordered component list and the alias → canonical map derived from it.
#[derive(Debug, Clone, Default)]
pub struct ComponentVocabulary {
    components: Vec<ComponentDef>,
    aliases: HashMap<String, String>,
    canonical: HashSet<String>,
}

impl ComponentVocabulary {
    /// Build the vocabulary.
    ///
    /// A name may appear once, either as a canonical component or as an
    /// alias; later duplicates are dropped with a warning.
    pub(crate) fn build(entries: &[ComponentEntry], warnings: &mut Vec<RuleWarning>) -> Self {
        let mut vocabulary = Self::default();
        let mut accepted: Vec<(usize, &ComponentEntry)> = Vec::with_capacity(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            let name = entry.name.trim();
            if name.is_empty() || vocabulary.is_known(name) {
                warnings.push(RuleWarning::new(
                    format!("components[{idx}]"),
                    format!("duplicate or empty component name '{name}'"),
                ));
                continue;
            }
            vocabulary.canonical.insert(name.to_string());
            vocabulary.components.push(ComponentDef {
                name: name.to_string(),
                aliases: Vec::new(),
            });
            accepted.push((idx, entry));
        }

        // Aliases are registered after all canonical names so an alias can
        // never shadow a component declared further down the list.
        for (def_idx, (idx, entry)) in accepted.into_iter().enumerate() {
            let name = entry.name.trim();
            for alias in &entry.aliases {
                let alias = alias.trim();
                if alias.is_empty() || vocabulary.is_known(alias) {
                    warnings.push(RuleWarning::new(
                        format!("components[{idx}].aliases"),
                        format!("alias '{alias}' is already a known component"),
                    ));
                    continue;
                }
                vocabulary
                    .aliases
                    .insert(alias.to_string(), name.to_string());
                vocabulary.components[def_idx]
                    .aliases
                    .push(alias.to_string());
            }
        }

        vocabulary
    }

    /// Canonical components in declaration order.
    pub fn components(&self) -> &[ComponentDef] {
        &self.components
    }

    /// Canonical name for an alias.
    pub fn canonical_name(&self, alias: &str) -> Option<&str> {
        self.aliases.get(alias).map(String::as_str)
    }

    /// Whether `name` is a canonical component.
    pub fn is_canonical(&self, name: &str) -> bool {
        self.canonical.contains(name)
    }

    /// Whether `name` is a canonical component or an alias.
    pub fn is_known(&self, name: &str) -> bool {
        self.canonical.contains(name) || self.aliases.contains_key(name)
    }
}
