//! Structured address record.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// A structured address record: component name → value.
///
/// Values are never empty. Inserting an empty or whitespace-only value
/// removes the component instead, so "missing" and "blank" are the same
/// state everywhere in the pipeline.
///
/// Iteration is in lexical key order.
///
/// # Example
///
/// ```
/// use addrfmt_model::AddressComponents;
///
/// let mut address: AddressComponents =
///     [("road", "Hamilton Avenue"), ("city", "")].into_iter().collect();
///
/// assert_eq!(address.get("road"), Some("Hamilton Avenue"));
/// assert!(!address.contains("city"));
///
/// address.insert("road", "  ");
/// assert!(address.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct AddressComponents(BTreeMap<String, String>);

impl AddressComponents {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a component value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Check whether a component is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Set a component, returning the previous value.
    ///
    /// A blank value removes the component.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.0.remove(&name)
        } else {
            self.0.insert(name, value)
        }
    }

    /// Remove a component, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    /// Keep only the components for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&str, &str) -> bool) {
        self.0.retain(|name, value| keep(name, value));
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the record has no components.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, value)` pairs in lexical name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over component names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<BTreeMap<String, String>> for AddressComponents {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<HashMap<String, String>> for AddressComponents {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl From<AddressComponents> for BTreeMap<String, String> {
    fn from(components: AddressComponents) -> Self {
        components.0
    }
}

impl<K, V> FromIterator<(K, V)> for AddressComponents
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut components = Self::new();
        for (name, value) in iter {
            components.insert(name, value);
        }
        components
    }
}

impl IntoIterator for AddressComponents {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
