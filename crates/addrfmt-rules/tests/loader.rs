use std::fs;
use std::path::PathBuf;

use addrfmt_model::CountryCode;
use addrfmt_rules::{ReplaceRule, RuleStore, RulesConfig, RulesError};

fn unique_temp_file(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "addrfmt-{}-{}-{}.json",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    path
}

#[test]
fn embedded_bundle_loads_without_warnings() {
    let store = RuleStore::embedded().expect("load embedded rules");
    assert!(
        store.warnings().is_empty(),
        "unexpected warnings: {:?}",
        store.warnings()
    );
    assert!(store.default_template().address_template.is_some());
    assert!(store.default_template().fallback_template.is_some());
}

#[test]
fn embedded_bundle_covers_listed_countries() {
    let store = RuleStore::embedded().expect("load embedded rules");
    for code in [
        "DE", "AT", "CH", "FR", "GB", "US", "CA", "AU", "NL", "BE", "BR", "ES", "IT", "CW", "SX",
        "AW",
    ] {
        let template = store
            .template(code)
            .unwrap_or_else(|| panic!("{code} entry missing"));
        assert!(template.address_template.is_some(), "{code} has no template");
    }
}

#[test]
fn dependent_territories_borrow_parent_rules() {
    let store = RuleStore::embedded().expect("load embedded rules");
    let expected = [("BQ", "NL"), ("PR", "US"), ("GU", "US"), ("IM", "GB"), ("GF", "FR")];
    for (territory, parent) in expected {
        let entry = store.template(territory).expect("territory entry");
        assert_eq!(
            entry.use_country.as_ref().map(CountryCode::as_str),
            Some(parent),
            "{territory}"
        );
        assert!(store.template(parent).unwrap().use_country.is_none());
    }

    let pr = store.template("PR").unwrap();
    let add = pr.add_component.as_ref().expect("PR adds a state");
    assert_eq!((add.key.as_str(), add.value.as_str()), ("state", "Puerto Rico"));
}

#[test]
fn exact_key_rules_are_recognized() {
    let store = RuleStore::embedded().expect("load embedded rules");
    let us = store.template("US").unwrap();
    assert!(us.replace.iter().any(|rule| matches!(
        rule,
        ReplaceRule::ExactKeyMatch { key, .. } if key == "state"
    )));
    assert!(
        us.postformat_replace
            .iter()
            .all(|rule| matches!(rule, ReplaceRule::PatternMatch { .. }))
    );
}

#[test]
fn lookup_tables_are_populated() {
    let store = RuleStore::embedded().expect("load embedded rules");

    let us_states = store.state_codes("US").expect("US state codes");
    assert_eq!(us_states.get("CA").map(String::as_str), Some("California"));
    assert!(store.state_codes("BR").is_none());

    assert_eq!(store.languages("CA"), ["en", "fr"]);
    assert!(store.languages("ZZ").is_empty());

    let en = store.abbreviations("en").expect("english abbreviations");
    assert!(
        en.for_component("road")
            .iter()
            .any(|a| a.long == "Avenue" && a.short == "Ave")
    );

    assert_eq!(store.country_name("DE"), Some("Deutschland"));
    assert_eq!(store.territory_overrides().len(), 3);

    let vocabulary = store.vocabulary();
    assert_eq!(vocabulary.canonical_name("street"), Some("road"));
    assert!(vocabulary.is_canonical("country_code"));
    assert!(!vocabulary.is_known("one"));
}

#[test]
fn invalid_rules_are_skipped_not_fatal() {
    let store = RuleStore::from_json_str(
        r#"{
            "templates": {
                "default": {
                    "address_template": "{{{road}}}",
                    "replace": [["(unclosed", "x"], ["^Rue ", "R. "]]
                }
            }
        }"#,
        "inline",
    )
    .expect("bundle with a bad rule still loads");

    assert_eq!(store.default_template().replace.len(), 1);
    assert_eq!(store.warnings().len(), 1);
    assert_eq!(
        store.warnings()[0].location,
        "templates.default.replace[0]"
    );
}

#[test]
fn malformed_json_names_its_origin() {
    let err = RuleStore::from_json_str("{ not json", "broken.json").unwrap_err();
    assert!(matches!(err, RulesError::Json { .. }));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn loads_bundle_from_file() {
    let path = unique_temp_file("rules");
    fs::write(
        &path,
        r#"{
            "components": [{"name": "road"}],
            "templates": {"default": {"address_template": "{{{road}}}"}}
        }"#,
    )
    .unwrap();

    let store = RuleStore::load(&RulesConfig::from_file(&path)).expect("load from file");
    assert!(store.template("DE").is_none());
    assert_eq!(store.vocabulary().components().len(), 1);

    fs::remove_file(&path).ok();
}

#[test]
fn missing_file_is_an_io_error() {
    let path = unique_temp_file("missing");
    let err = RuleStore::from_path(&path).unwrap_err();
    assert!(matches!(err, RulesError::Io { .. }));
}

#[test]
fn warnings_name_every_skipped_rule() {
    let store = RuleStore::from_json_str(
        r#"{
            "components": [
                {"name": "road", "aliases": ["street"]},
                {"name": "road"},
                {"name": "city", "aliases": ["street"]}
            ],
            "templates": {
                "default": {"address_template": "{{{road}}}"},
                "XYZ": {"address_template": "{{{road}}}"},
                "PR": {"use_country": "US", "add_component": "state"}
            },
            "state_codes": {"USA": {"CA": "California"}}
        }"#,
        "inline",
    )
    .expect("bundle still loads");

    let report: Vec<String> = store.warnings().iter().map(ToString::to_string).collect();
    insta::assert_snapshot!(report.join("\n"), @r"
    components[1]: duplicate or empty component name 'road'
    components[2].aliases: alias 'street' is already a known component
    templates.PR.add_component: 'state' is not of the form key=value
    templates.XYZ: key is not a country code
    templates.PR.use_country: target 'US' has no entry, the default template will be used
    state_codes.USA: key is not a country code
    ");
}
