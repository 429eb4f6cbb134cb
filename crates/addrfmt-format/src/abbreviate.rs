//! Language-aware abbreviation of component values.

use std::borrow::Cow;

use addrfmt_model::component::COUNTRY_CODE;
use addrfmt_model::{AddressComponents, CountryCode};
use addrfmt_rules::RuleStore;

use crate::error::AbbreviationError;

/// Abbreviate component values, e.g. "Avenue" → "Ave".
///
/// The record's `country_code` selects the languages; each language's table
/// is applied in order, so a later language sees the output of an earlier
/// one. Every whole-word, case-sensitive occurrence of a long form is
/// replaced. Only canonical components are touched.
///
/// # Errors
///
/// Fails without changing the record when `country_code` is missing or
/// invalid, or the country has no languages.
pub fn abbreviate(
    components: &mut AddressComponents,
    rules: &RuleStore,
) -> Result<(), AbbreviationError> {
    let country = components
        .get(COUNTRY_CODE)
        .and_then(CountryCode::parse)
        .ok_or(AbbreviationError::MissingCountryCode)?;

    let languages = rules.languages(country.as_str());
    if languages.is_empty() {
        return Err(AbbreviationError::NoLanguages {
            country: country.to_string(),
        });
    }

    for language in languages {
        let Some(table) = rules.abbreviations(language) else {
            continue;
        };
        for (component, abbreviations) in table.components() {
            if !rules.vocabulary().is_canonical(component) {
                continue;
            }
            let Some(original) = components.get(component) else {
                continue;
            };

            let mut value = original.to_string();
            for abbreviation in abbreviations {
                let updated = match abbreviation.apply(&value) {
                    Cow::Owned(updated) => Some(updated),
                    Cow::Borrowed(_) => None,
                };
                if let Some(updated) = updated {
                    value = updated;
                }
            }

            if value != original {
                tracing::trace!(component, language = %language, "Abbreviated component");
                components.insert(component, value);
            }
        }
    }

    Ok(())
}
