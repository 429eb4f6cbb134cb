//! Log output of rule loading and formatting.

use addrfmt_format::AddressFormatter;
use addrfmt_format::logging::{LogConfig, LogFormat, REDACTED_VALUE, SharedWriter, build_subscriber};
use addrfmt_model::{AddressComponents, FormatOptions};
use addrfmt_rules::RuleStore;
use tracing::Level;

fn capture<T>(level: Level, f: impl FnOnce() -> T) -> (T, String) {
    let buffer = SharedWriter::new(Vec::<u8>::new());
    let config = LogConfig::default()
        .with_level(level)
        .with_ansi(false)
        .with_format(LogFormat::Compact);
    let subscriber = build_subscriber(&config, buffer.clone());
    let result = tracing::subscriber::with_default(subscriber, f);
    let output = String::from_utf8_lossy(&buffer.lock()).to_string();
    (result, output)
}

#[test]
fn invalid_rule_is_logged_and_skipped() {
    let (store, logs) = capture(Level::WARN, || {
        RuleStore::from_json_str(
            r#"{
                "templates": {
                    "default": {"address_template": "{{{road}}}"},
                    "DE": {
                        "address_template": "{{{road}}}",
                        "replace": [["[unclosed", "x"], ["^Stadtteil ", ""]]
                    }
                }
            }"#,
            "inline",
        )
    });

    let store = store.expect("bundle still loads");
    assert_eq!(store.template("DE").unwrap().replace.len(), 1);
    assert_eq!(store.warnings().len(), 1);
    assert!(logs.contains("Skipping unusable rule"), "{logs}");
    assert!(logs.contains("templates.DE.replace[0]"), "{logs}");

    // The formatter still works with the remaining rule
    let formatter = AddressFormatter::new(store).expect("formatter");
    let input: AddressComponents = [("road", "Stadtteil Mitte"), ("country_code", "de")]
        .into_iter()
        .collect();
    assert_eq!(formatter.format(&input, &FormatOptions::default()), "Mitte\n");
}

#[test]
fn component_values_are_redacted() {
    let formatter = AddressFormatter::with_embedded_rules().expect("embedded rules");
    let input: AddressComponents = [
        ("street", "Secret Lane"),
        ("postcode", "12345678901234567890123"),
        ("country_code", "de"),
    ]
    .into_iter()
    .collect();

    let (_, logs) = capture(Level::TRACE, || {
        formatter.format(&input, &FormatOptions::default())
    });

    assert!(logs.contains("Merged alias"), "{logs}");
    assert!(logs.contains(REDACTED_VALUE), "{logs}");
    assert!(!logs.contains("Secret Lane"), "{logs}");
    assert!(!logs.contains("12345678901234567890123"), "{logs}");
}

#[test]
fn fallback_template_choice_is_logged() {
    let formatter = AddressFormatter::with_embedded_rules().expect("embedded rules");
    let input: AddressComponents = [("city", "Berlin"), ("country_code", "de")]
        .into_iter()
        .collect();

    let (text, logs) = capture(Level::DEBUG, || {
        formatter.format(&input, &FormatOptions::default())
    });

    assert_eq!(text, "Berlin\n");
    assert!(logs.contains("Using fallback template"), "{logs}");
}
