//! Template selection.

use addrfmt_model::component::{POSTCODE, ROAD};
use addrfmt_model::{AddressComponents, CountryCode};
use addrfmt_rules::RuleStore;

/// Components whose absence pushes a record onto the fallback template.
pub const REQUIRED_COMPONENTS: [&str; 2] = [ROAD, POSTCODE];

/// Pick the template source for a record.
///
/// The primary template is the country's, or the `default` entry's when the
/// country has none. A record missing every [`REQUIRED_COMPONENTS`] entry
/// uses a fallback template instead: the country's, then the `default`
/// entry's, then the primary one.
pub fn choose_template<'a>(
    rules: &'a RuleStore,
    country: Option<&CountryCode>,
    components: &AddressComponents,
) -> &'a str {
    let entry = rules.template_or_default(country);
    let primary = entry
        .address_template
        .as_deref()
        .unwrap_or_else(|| rules.default_address_template());

    let missing = REQUIRED_COMPONENTS
        .iter()
        .filter(|name| !components.contains(name))
        .count();
    if missing < REQUIRED_COMPONENTS.len() {
        return primary;
    }

    match entry
        .fallback_template
        .as_deref()
        .or(rules.default_template().fallback_template.as_deref())
    {
        Some(fallback) => {
            tracing::debug!(
                country = country.map(CountryCode::as_str).unwrap_or("default"),
                "Using fallback template"
            );
            fallback
        }
        None => primary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE: &str = r#"{
        "templates": {
            "default": {"address_template": "DEFAULT", "fallback_template": "DEFAULT FALLBACK"},
            "US": {"address_template": "US", "fallback_template": "US FALLBACK"},
            "DE": {"address_template": "DE"},
            "BQ": {"use_country": "NL"}
        }
    }"#;

    fn select(country: Option<&str>, pairs: &[(&str, &str)]) -> String {
        let rules = RuleStore::from_json_str(BUNDLE, "test").unwrap();
        let code = country.and_then(CountryCode::parse);
        let components: AddressComponents = pairs.iter().copied().collect();
        choose_template(&rules, code.as_ref(), &components).to_string()
    }

    #[test]
    fn test_one_missing_component_is_tolerated() {
        assert_eq!(select(Some("US"), &[("road", "Main St")]), "US");
        assert_eq!(select(Some("US"), &[("postcode", "94303")]), "US");
    }

    #[test]
    fn test_both_missing_uses_country_fallback() {
        assert_eq!(select(Some("US"), &[("city", "Palo Alto")]), "US FALLBACK");
    }

    #[test]
    fn test_default_fallback_when_country_has_none() {
        assert_eq!(select(Some("DE"), &[("city", "Berlin")]), "DEFAULT FALLBACK");
        assert_eq!(select(None, &[]), "DEFAULT FALLBACK");
    }

    #[test]
    fn test_unknown_country_uses_default() {
        assert_eq!(select(Some("ZZ"), &[("road", "x")]), "DEFAULT");
        assert_eq!(select(Some("BQ"), &[("road", "x")]), "DEFAULT");
    }

    #[test]
    fn test_primary_when_no_fallback_anywhere() {
        let rules = RuleStore::from_json_str(
            r#"{"templates": {"default": {"address_template": "ONLY"}}}"#,
            "test",
        )
        .unwrap();
        assert_eq!(choose_template(&rules, None, &AddressComponents::new()), "ONLY");
    }
}
