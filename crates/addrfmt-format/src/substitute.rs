//! Rule-driven text substitution, before and after rendering.

use std::borrow::Cow;
use std::sync::LazyLock;

use addrfmt_model::AddressComponents;
use addrfmt_rules::ReplaceRule;
use regex::{Captures, NoExpand, Regex};

use crate::logging::redact_value;

/// Separator between segments of a rendered line.
pub const SEGMENT_SEPARATOR: &str = ", ";

static BACKREF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([1-9])").expect("Invalid backreference regex"));

/// Apply `replace` rules to component values.
///
/// Rules run in order, each once over every present component; a component
/// is not re-scanned by the same rule. Exact-key rules only touch their named
/// component and only on an exact value match. Pattern rules replace the
/// first match, literally. A value left blank removes the component.
pub fn apply_replacements(components: &mut AddressComponents, rules: &[ReplaceRule]) {
    for rule in rules {
        match rule {
            ReplaceRule::ExactKeyMatch { key, from, to } => {
                if components.get(key) == Some(from.as_str()) {
                    tracing::trace!(component = %key, "Exact replacement");
                    components.insert(key.clone(), to.clone());
                }
            }
            ReplaceRule::PatternMatch {
                pattern,
                replacement,
            } => {
                let updates: Vec<(String, String)> = components
                    .iter()
                    .filter_map(|(name, value)| {
                        match pattern.replacen(value, 1, NoExpand(replacement)) {
                            Cow::Owned(updated) => Some((name.to_string(), updated)),
                            Cow::Borrowed(_) => None,
                        }
                    })
                    .collect();
                for (name, value) in updates {
                    tracing::trace!(
                        component = %name,
                        pattern = pattern.as_str(),
                        value = %redact_value(&value),
                        "Pattern replacement"
                    );
                    components.insert(name, value);
                }
            }
        }
    }
}

/// Apply `postformat_replace` rules to rendered text.
///
/// Repeated ", " segments are dropped first (keep-first). Each rule then
/// replaces its first match; `$1`..`$9` in the replacement expand to the
/// rule's capture groups, and a group that did not participate expands to
/// nothing.
pub fn postformat_replace(text: &str, rules: &[ReplaceRule]) -> String {
    let mut text = dedupe_segments(text);

    for rule in rules {
        let ReplaceRule::PatternMatch {
            pattern,
            replacement,
        } = rule
        else {
            tracing::debug!("Exact-key rule has no effect on rendered text");
            continue;
        };

        let Some((range, expanded)) = pattern.captures(&text).map(|caps| {
            let range = caps.get(0).map(|whole| whole.range()).unwrap_or_default();
            (range, expand_backrefs(replacement, &caps))
        }) else {
            continue;
        };
        text.replace_range(range, &expanded);
    }

    text
}

fn expand_backrefs(replacement: &str, caps: &Captures<'_>) -> String {
    BACKREF_REGEX
        .replace_all(replacement, |refs: &Captures<'_>| {
            refs[1]
                .parse::<usize>()
                .ok()
                .and_then(|group| caps.get(group))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        })
        .into_owned()
}

fn dedupe_segments(text: &str) -> String {
    let mut seen = Vec::new();
    for segment in text.split(SEGMENT_SEPARATOR) {
        if !seen.contains(&segment) {
            seen.push(segment);
        }
    }
    seen.join(SEGMENT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(pairs: &[(&str, &str)]) -> Vec<ReplaceRule> {
        pairs
            .iter()
            .map(|(pattern, replacement)| ReplaceRule::component(pattern, replacement).unwrap())
            .collect()
    }

    fn text_rules(pairs: &[(&str, &str)]) -> Vec<ReplaceRule> {
        pairs
            .iter()
            .map(|(pattern, replacement)| ReplaceRule::pattern(pattern, replacement).unwrap())
            .collect()
    }

    #[test]
    fn test_rules_apply_in_order_once() {
        let mut components: AddressComponents = [("street", "Hello World")].into_iter().collect();
        apply_replacements(&mut components, &rules(&[("^Hello", "Bye"), ("d", "t")]));
        assert_eq!(components.get("street"), Some("Bye Worlt"));
    }

    #[test]
    fn test_first_occurrence_only() {
        let mut components: AddressComponents = [("road", "a a a")].into_iter().collect();
        apply_replacements(&mut components, &rules(&[("a", "b")]));
        assert_eq!(components.get("road"), Some("b a a"));
    }

    #[test]
    fn test_exact_key_rule() {
        let mut components: AddressComponents =
            [("state", "Alt-Berlin"), ("city", "Alt-Berlin")].into_iter().collect();
        apply_replacements(&mut components, &rules(&[("state=Alt-Berlin", "Berlin")]));
        assert_eq!(components.get("state"), Some("Berlin"));
        assert_eq!(components.get("city"), Some("Alt-Berlin"));

        let mut partial: AddressComponents = [("state", "Alt-Berlin Mitte")].into_iter().collect();
        apply_replacements(&mut partial, &rules(&[("state=Alt-Berlin", "Berlin")]));
        assert_eq!(partial.get("state"), Some("Alt-Berlin Mitte"));
    }

    #[test]
    fn test_replacement_is_literal() {
        let mut components: AddressComponents = [("road", "Main")].into_iter().collect();
        apply_replacements(&mut components, &rules(&[("(Main)", "$1 St")]));
        assert_eq!(components.get("road"), Some("$1 St"));
    }

    #[test]
    fn test_empty_result_removes_component() {
        let mut components: AddressComponents = [("county", "Landkreis ")].into_iter().collect();
        apply_replacements(&mut components, &rules(&[("^Landkreis ", "")]));
        assert!(!components.contains("county"));
    }

    #[test]
    fn test_postformat_dedupes_segments() {
        assert_eq!(
            postformat_replace("Berlin, Berlin, Mitte, Berlin", &[]),
            "Berlin, Mitte"
        );
    }

    #[test]
    fn test_postformat_backreferences() {
        let rules = text_rules(&[(r"\b(\d{5})(\d{4})\b", "$1-$2")]);
        assert_eq!(
            postformat_replace("Palo Alto, CA 943031234\n", &rules),
            "Palo Alto, CA 94303-1234\n"
        );
    }

    #[test]
    fn test_unmatched_group_expands_empty() {
        let rules = text_rules(&[(r"(a)|(b)", "[$1$2]")]);
        assert_eq!(postformat_replace("xb", &rules), "x[b]");
    }

    #[test]
    fn test_unmatched_pattern_leaves_text() {
        let rules = text_rules(&[(r"(\d{9})", "$1!")]);
        assert_eq!(postformat_replace("no digits\n", &rules), "no digits\n");
    }
}
