//! Language-specific abbreviation tables.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

use regex::{NoExpand, Regex};

use crate::error::RuleWarning;

/// A single long → short abbreviation with its whole-word matcher.
#[derive(Debug, Clone)]
pub struct Abbreviation {
    pub long: String,
    pub short: String,
    pattern: Regex,
}

impl Abbreviation {
    /// Build an abbreviation matching `long` as a whole word, case-sensitively.
    pub fn new(long: &str, short: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!(r"\b{}\b", regex::escape(long)))?;
        Ok(Self {
            long: long.to_string(),
            short: short.to_string(),
            pattern,
        })
    }

    /// Replace every whole-word occurrence of the long form.
    pub fn apply<'a>(&self, value: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(value, NoExpand(&self.short))
    }
}

/// Abbreviations for one language, grouped by component.
#[derive(Debug, Clone, Default)]
pub struct LanguageAbbreviations {
    components: BTreeMap<String, Vec<Abbreviation>>,
}

impl LanguageAbbreviations {
    /// Iterate over `(component, abbreviations)` in component name order.
    pub fn components(&self) -> impl Iterator<Item = (&str, &[Abbreviation])> {
        self.components
            .iter()
            .map(|(name, list)| (name.as_str(), list.as_slice()))
    }

    /// Abbreviations for one component.
    pub fn for_component(&self, component: &str) -> &[Abbreviation] {
        self.components
            .get(component)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Language code → abbreviations.
#[derive(Debug, Clone, Default)]
pub struct AbbreviationTable {
    languages: HashMap<String, LanguageAbbreviations>,
}

impl AbbreviationTable {
    pub(crate) fn build(
        raw: &BTreeMap<String, BTreeMap<String, Vec<(String, String)>>>,
        warnings: &mut Vec<RuleWarning>,
    ) -> Self {
        let mut languages = HashMap::with_capacity(raw.len());

        for (lang, components) in raw {
            let mut compiled = BTreeMap::new();
            for (component, pairs) in components {
                let mut list = Vec::with_capacity(pairs.len());
                for (idx, (long, short)) in pairs.iter().enumerate() {
                    if long.trim().is_empty() {
                        warnings.push(RuleWarning::new(
                            format!("abbreviations.{lang}.{component}[{idx}]"),
                            "empty long form",
                        ));
                        continue;
                    }
                    match Abbreviation::new(long, short) {
                        Ok(abbreviation) => list.push(abbreviation),
                        Err(err) => warnings.push(RuleWarning::new(
                            format!("abbreviations.{lang}.{component}[{idx}]"),
                            err.to_string(),
                        )),
                    }
                }
                compiled.insert(component.clone(), list);
            }
            languages.insert(
                lang.to_ascii_lowercase(),
                LanguageAbbreviations {
                    components: compiled,
                },
            );
        }

        Self { languages }
    }

    /// Abbreviations for a language code (case-insensitive).
    pub fn language(&self, lang: &str) -> Option<&LanguageAbbreviations> {
        self.languages.get(&lang.to_ascii_lowercase())
    }

    /// Number of languages with a table.
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Whether no language has a table.
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_word_only() {
        let avenue = Abbreviation::new("Avenue", "Ave").unwrap();
        assert_eq!(avenue.apply("Hamilton Avenue"), "Hamilton Ave");
        assert_eq!(avenue.apply("Avenues End"), "Avenues End");
        assert_eq!(avenue.apply("hamilton avenue"), "hamilton avenue");
    }

    #[test]
    fn test_replacement_is_literal() {
        let abbreviation = Abbreviation::new("Dollar", "$1").unwrap();
        assert_eq!(abbreviation.apply("Dollar Road"), "$1 Road");
    }

    #[test]
    fn test_non_ascii_word() {
        let strasse = Abbreviation::new("Straße", "Str.").unwrap();
        assert_eq!(strasse.apply("Warschauer Straße"), "Warschauer Str.");
        assert_eq!(strasse.apply("Hauptstraße"), "Hauptstraße");
    }
}
