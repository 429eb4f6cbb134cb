//! The compiled, read-only rule store.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use addrfmt_model::CountryCode;

use crate::abbreviation::{AbbreviationTable, LanguageAbbreviations};
use crate::bundle::{RawCountryTemplate, RuleBundle};
use crate::config::{RulesConfig, RulesSource};
use crate::embedded;
use crate::error::{Result, RuleWarning, RulesError};
use crate::replace::{ReplaceRule, compile_component_rules, compile_text_rules};
use crate::territory::TerritoryOverride;
use crate::vocabulary::ComponentVocabulary;

/// Key of the template entry used when no country is determined.
pub const DEFAULT_TEMPLATE_KEY: &str = "default";

/// Parsed `add_component` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddComponent {
    pub key: String,
    pub value: String,
}

impl AddComponent {
    /// Parse `key=value`; both sides must be non-empty.
    pub fn parse(raw: &str) -> Option<Self> {
        let (key, value) = raw.split_once('=')?;
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            return None;
        }
        Some(Self {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

/// A country's compiled formatting rules.
#[derive(Debug, Clone, Default)]
pub struct CountryTemplate {
    pub address_template: Option<String>,
    pub fallback_template: Option<String>,
    pub replace: Vec<ReplaceRule>,
    pub postformat_replace: Vec<ReplaceRule>,
    pub use_country: Option<CountryCode>,
    pub change_country: Option<String>,
    pub add_component: Option<AddComponent>,
}

impl CountryTemplate {
    fn compile(key: &str, raw: &RawCountryTemplate, warnings: &mut Vec<RuleWarning>) -> Self {
        let location = format!("templates.{key}");

        let use_country = raw.use_country.as_deref().and_then(|value| {
            let parsed = CountryCode::parse(value);
            if parsed.is_none() {
                warnings.push(RuleWarning::new(
                    format!("{location}.use_country"),
                    format!("'{value}' is not a country code"),
                ));
            }
            parsed
        });

        let add_component = raw.add_component.as_deref().and_then(|value| {
            let parsed = AddComponent::parse(value);
            if parsed.is_none() {
                warnings.push(RuleWarning::new(
                    format!("{location}.add_component"),
                    format!("'{value}' is not of the form key=value"),
                ));
            }
            parsed
        });

        Self {
            address_template: non_blank(raw.address_template.as_deref()),
            fallback_template: non_blank(raw.fallback_template.as_deref()),
            replace: compile_component_rules(
                &raw.replace,
                &format!("{location}.replace"),
                warnings,
            ),
            postformat_replace: compile_text_rules(
                &raw.postformat_replace,
                &format!("{location}.postformat_replace"),
                warnings,
            ),
            use_country,
            change_country: non_blank(raw.change_country.as_deref()),
            add_component,
        }
    }

    /// Template texts carried by this entry (primary, then fallback).
    pub fn template_texts(&self) -> impl Iterator<Item = &str> {
        self.address_template
            .iter()
            .chain(self.fallback_template.iter())
            .map(String::as_str)
    }
}

/// All formatting rules, compiled and validated.
///
/// Built once, then shared read-only (typically behind an `Arc`).
#[derive(Debug, Clone)]
pub struct RuleStore {
    default: CountryTemplate,
    countries: HashMap<CountryCode, CountryTemplate>,
    vocabulary: ComponentVocabulary,
    state_codes: HashMap<CountryCode, BTreeMap<String, String>>,
    languages: HashMap<CountryCode, Vec<String>>,
    abbreviations: AbbreviationTable,
    country_names: HashMap<CountryCode, String>,
    territory_overrides: Vec<TerritoryOverride>,
    warnings: Vec<RuleWarning>,
}

impl RuleStore {
    /// Compile and validate a bundle.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundle has no `default` entry or the entry has
    /// no address template. Every other problem is recorded as a warning and
    /// the offending rule is skipped.
    pub fn from_bundle(bundle: &RuleBundle) -> Result<Self> {
        let mut warnings = Vec::new();

        let vocabulary = ComponentVocabulary::build(&bundle.components, &mut warnings);

        let mut default = None;
        let mut countries = HashMap::with_capacity(bundle.templates.len());
        for (key, raw) in &bundle.templates {
            if key.eq_ignore_ascii_case(DEFAULT_TEMPLATE_KEY) {
                default = Some(CountryTemplate::compile(DEFAULT_TEMPLATE_KEY, raw, &mut warnings));
                continue;
            }
            let Some(code) = parse_key("templates", key, &mut warnings) else {
                continue;
            };
            let template = CountryTemplate::compile(code.as_str(), raw, &mut warnings);
            countries.insert(code, template);
        }

        let default = default.ok_or(RulesError::MissingDefault {
            key: DEFAULT_TEMPLATE_KEY,
        })?;
        if default.address_template.is_none() {
            return Err(RulesError::MissingDefaultTemplate {
                key: DEFAULT_TEMPLATE_KEY,
            });
        }

        check_use_country(&mut countries, &mut warnings);

        let state_codes = bundle
            .state_codes
            .iter()
            .filter_map(|(key, table)| {
                let code = parse_key("state_codes", key, &mut warnings)?;
                Some((code, table.clone()))
            })
            .collect();

        let languages = bundle
            .country_to_language
            .iter()
            .filter_map(|(key, list)| {
                let code = parse_key("country_to_language", key, &mut warnings)?;
                let langs = list
                    .split(',')
                    .map(|lang| lang.trim().to_ascii_lowercase())
                    .filter(|lang| !lang.is_empty())
                    .collect();
                Some((code, langs))
            })
            .collect();

        let abbreviations = AbbreviationTable::build(&bundle.abbreviations, &mut warnings);

        let country_names = bundle
            .country_names
            .iter()
            .filter_map(|(key, name)| {
                let code = parse_key("country_names", key, &mut warnings)?;
                Some((code, name.trim().to_string()))
            })
            .filter(|(_, name)| !name.is_empty())
            .collect();

        let territory_overrides = bundle
            .territory_overrides
            .clone()
            .unwrap_or_else(TerritoryOverride::defaults);

        tracing::debug!(
            countries = countries.len(),
            components = vocabulary.components().len(),
            languages = abbreviations.len(),
            warnings = warnings.len(),
            "Rule store built"
        );

        Ok(Self {
            default,
            countries,
            vocabulary,
            state_codes,
            languages,
            abbreviations,
            country_names,
            territory_overrides,
            warnings,
        })
    }

    /// Parse a JSON bundle and compile it.
    ///
    /// `origin` names the bundle in error messages.
    pub fn from_json_str(json: &str, origin: &str) -> Result<Self> {
        let bundle: RuleBundle =
            serde_json::from_str(json).map_err(|source| RulesError::Json {
                origin: origin.to_string(),
                source,
            })?;
        Self::from_bundle(&bundle)
    }

    /// Load a JSON bundle from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| RulesError::io(path, e))?;
        Self::from_json_str(&json, &path.display().to_string())
    }

    /// Load the embedded bundle.
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(embedded::RULES_JSON, embedded::RULES_ORIGIN)
    }

    /// Load the bundle selected by `config`.
    pub fn load(config: &RulesConfig) -> Result<Self> {
        match &config.source {
            RulesSource::Embedded => Self::embedded(),
            RulesSource::File(path) => Self::from_path(path),
        }
    }

    /// The `default` entry.
    pub fn default_template(&self) -> &CountryTemplate {
        &self.default
    }

    /// The `default` entry's address template, present in every valid store.
    pub fn default_address_template(&self) -> &str {
        self.default.address_template.as_deref().unwrap_or_default()
    }

    /// A country's entry, by upper-case code.
    pub fn template(&self, code: &str) -> Option<&CountryTemplate> {
        self.countries.get(code)
    }

    /// A country's entry, or the `default` entry.
    pub fn template_or_default(&self, code: Option<&CountryCode>) -> &CountryTemplate {
        code.and_then(|code| self.template(code.as_str()))
            .unwrap_or(&self.default)
    }

    /// Every entry, `default` first, with its key.
    pub fn templates(&self) -> impl Iterator<Item = (&str, &CountryTemplate)> {
        std::iter::once((DEFAULT_TEMPLATE_KEY, &self.default)).chain(
            self.countries
                .iter()
                .map(|(code, template)| (code.as_str(), template)),
        )
    }

    /// The recognized component vocabulary.
    pub fn vocabulary(&self) -> &ComponentVocabulary {
        &self.vocabulary
    }

    /// Region code → name table for a country.
    pub fn state_codes(&self, code: &str) -> Option<&BTreeMap<String, String>> {
        self.state_codes.get(code)
    }

    /// Language codes for a country, in priority order.
    pub fn languages(&self, code: &str) -> &[String] {
        self.languages
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Abbreviations for a language.
    pub fn abbreviations(&self, lang: &str) -> Option<&LanguageAbbreviations> {
        self.abbreviations.language(lang)
    }

    /// Display name for a country.
    pub fn country_name(&self, code: &str) -> Option<&str> {
        self.country_names.get(code).map(String::as_str)
    }

    /// Territory overrides, in evaluation order.
    pub fn territory_overrides(&self) -> &[TerritoryOverride] {
        &self.territory_overrides
    }

    /// Rules skipped while building the store.
    pub fn warnings(&self) -> &[RuleWarning] {
        &self.warnings
    }
}

/// `use_country` resolves through one level only; flag entries that would
/// need more, or that point nowhere.
fn check_use_country(
    countries: &mut HashMap<CountryCode, CountryTemplate>,
    warnings: &mut Vec<RuleWarning>,
) {
    let mut codes: Vec<CountryCode> = countries.keys().cloned().collect();
    codes.sort();

    for code in codes {
        let Some(target) = countries.get(&code).and_then(|t| t.use_country.clone()) else {
            continue;
        };
        let location = format!("templates.{code}.use_country");

        if target == code {
            warnings.push(RuleWarning::new(location, "entry refers to itself"));
            if let Some(template) = countries.get_mut(&code) {
                template.use_country = None;
            }
            continue;
        }

        match countries.get(&target) {
            None => warnings.push(RuleWarning::new(
                location,
                format!("target '{target}' has no entry, the default template will be used"),
            )),
            Some(parent) if parent.use_country.is_some() => warnings.push(RuleWarning::new(
                location,
                format!("target '{target}' borrows rules itself, which is not followed"),
            )),
            Some(_) => {}
        }
    }
}

fn parse_key(table: &str, key: &str, warnings: &mut Vec<RuleWarning>) -> Option<CountryCode> {
    let code = CountryCode::parse(key);
    if code.is_none() {
        warnings.push(RuleWarning::new(
            format!("{table}.{key}"),
            "key is not a country code",
        ));
    }
    code
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(ToString::to_string)
}
