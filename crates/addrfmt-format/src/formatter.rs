//! The formatting pipeline.

use std::sync::{Arc, LazyLock};

use addrfmt_model::component::COUNTRY;
use addrfmt_model::{AddressComponents, FormatOptions};
use addrfmt_rules::{RuleStore, RulesConfig};
use regex::Regex;

use crate::abbreviate::abbreviate;
use crate::clean::clean;
use crate::error::{FormatterError, Result};
use crate::normalize::{aggregate_unknown, merge_aliases, resolve_country, sanitize};
use crate::select::choose_template;
use crate::state_code::add_state_code;
use crate::substitute::{SEGMENT_SEPARATOR, apply_replacements, postformat_replace};
use crate::template::TemplateCache;

static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w").expect("Invalid word regex"));

/// Formats address records using a rule store.
///
/// Construction compiles every template in the store, so a formatter that
/// exists can format anything. The formatter is `Send + Sync`; share it
/// across threads behind an `Arc` or by reference.
///
/// # Example
///
/// ```
/// use addrfmt_format::AddressFormatter;
/// use addrfmt_model::{AddressComponents, FormatOptions};
///
/// let formatter = AddressFormatter::with_embedded_rules().unwrap();
/// let address: AddressComponents = [
///     ("house_number", "57"),
///     ("road", "Warschauer Straße"),
///     ("postcode", "10243"),
///     ("city", "Berlin"),
///     ("country", "Deutschland"),
///     ("country_code", "de"),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(
///     formatter.format_one_line(&address, &FormatOptions::default()),
///     "Warschauer Straße 57, 10243 Berlin, Deutschland"
/// );
/// ```
#[derive(Debug)]
pub struct AddressFormatter {
    rules: Arc<RuleStore>,
    templates: TemplateCache,
}

impl AddressFormatter {
    /// Build a formatter, compiling every template in the store.
    ///
    /// # Errors
    ///
    /// Returns [`FormatterError::Template`] naming the first entry whose
    /// template does not compile.
    pub fn new(rules: RuleStore) -> Result<Self> {
        Self::from_shared(Arc::new(rules))
    }

    /// Build a formatter over a store shared with other owners.
    pub fn from_shared(rules: Arc<RuleStore>) -> Result<Self> {
        let templates = TemplateCache::new();
        for (key, entry) in rules.templates() {
            for source in entry.template_texts() {
                templates
                    .get_or_compile(source)
                    .map_err(|source| FormatterError::Template {
                        country: key.to_string(),
                        source,
                    })?;
            }
        }

        tracing::debug!(
            templates = templates.len(),
            skipped_rules = rules.warnings().len(),
            "Address formatter ready"
        );
        Ok(Self { rules, templates })
    }

    /// Build a formatter over the embedded rule bundle.
    pub fn with_embedded_rules() -> Result<Self> {
        Self::new(RuleStore::embedded()?)
    }

    /// Build a formatter over the bundle selected by `config`.
    pub fn load(config: &RulesConfig) -> Result<Self> {
        Self::new(RuleStore::load(config)?)
    }

    pub fn rules(&self) -> &RuleStore {
        &self.rules
    }

    /// Format a record as multi-line text ending in one line break.
    ///
    /// Never fails: missing or malformed data only affects what is rendered.
    /// The caller's record is not modified.
    pub fn format(&self, input: &AddressComponents, options: &FormatOptions) -> String {
        let rules = self.rules.as_ref();
        let mut components = input.clone();

        merge_aliases(&mut components, rules.vocabulary());
        aggregate_unknown(&mut components, rules.vocabulary());
        sanitize(&mut components, options.cleanup_postcode);

        let country = resolve_country(&mut components, options, rules);
        let entry = rules.template_or_default(country.as_ref());
        let source = choose_template(rules, country.as_ref(), &components);

        apply_replacements(&mut components, &entry.replace);
        add_state_code(&mut components, rules);

        if options.abbreviate
            && let Err(err) = abbreviate(&mut components, rules)
        {
            tracing::debug!(error = %err, "Abbreviation skipped");
        }

        if options.append_country
            && !components.contains(COUNTRY)
            && let Some(name) = country
                .as_ref()
                .and_then(|code| rules.country_name(code.as_str()))
        {
            components.insert(COUNTRY, name);
        }

        let rendered = match self.templates.get_or_compile(source) {
            Ok(template) => template.render(&components),
            Err(err) => {
                // Unreachable for templates from the store, which were all
                // compiled in `new`.
                tracing::warn!(error = %err, "Template failed to compile");
                String::new()
            }
        };

        let rendered = match single_value(input, &components) {
            Some(value) if !WORD_REGEX.is_match(&rendered) => value.to_string(),
            _ => rendered,
        };

        let text = clean(&rendered);
        let text = postformat_replace(&text, &entry.postformat_replace);
        clean(&text)
    }

    /// Format a record as a list of lines.
    pub fn format_lines(&self, input: &AddressComponents, options: &FormatOptions) -> Vec<String> {
        self.format(input, options)
            .lines()
            .map(ToString::to_string)
            .collect()
    }

    /// Format a record on a single line, joining lines with ", ".
    pub fn format_one_line(&self, input: &AddressComponents, options: &FormatOptions) -> String {
        self.format_lines(input, options).join(SEGMENT_SEPARATOR)
    }
}

/// The normalized value of the record's only input component, if it survived.
fn single_value<'a>(
    input: &AddressComponents,
    components: &'a AddressComponents,
) -> Option<&'a str> {
    let mut names = input.names();
    match (names.next(), names.next()) {
        (Some(name), None) => components.get(name),
        _ => None,
    }
}
