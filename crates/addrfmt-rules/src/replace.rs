//! Replacement rules.
//!
//! Rules are compiled once when the store is built. A pattern that does not
//! compile is dropped with a [`RuleWarning`]; the remaining rules keep their
//! order.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::RuleWarning;

/// `key=literal` form of a component rule.
static EXACT_KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^([A-Za-z_][A-Za-z0-9_]*)=(.*)$").expect("Invalid exact-key regex")
});

/// A compiled replacement rule.
#[derive(Debug, Clone)]
pub enum ReplaceRule {
    /// Replace the whole value of component `key` when it equals `from`.
    ExactKeyMatch {
        key: String,
        from: String,
        to: String,
    },

    /// Replace the first match of `pattern`.
    PatternMatch { pattern: Regex, replacement: String },
}

impl ReplaceRule {
    /// Compile a rule for component values, recognising `key=literal`.
    pub fn component(pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        if let Some(caps) = EXACT_KEY_REGEX.captures(pattern) {
            return Ok(Self::ExactKeyMatch {
                key: caps[1].to_string(),
                from: caps[2].to_string(),
                to: replacement.to_string(),
            });
        }
        Self::pattern(pattern, replacement)
    }

    /// Compile a plain pattern rule.
    pub fn pattern(pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        Ok(Self::PatternMatch {
            pattern: Regex::new(pattern)?,
            replacement: replacement.to_string(),
        })
    }
}

/// Compile `replace` rules for component values.
pub(crate) fn compile_component_rules(
    raw: &[(String, String)],
    location: &str,
    warnings: &mut Vec<RuleWarning>,
) -> Vec<ReplaceRule> {
    compile_with(raw, location, warnings, ReplaceRule::component)
}

/// Compile `postformat_replace` rules for rendered text.
pub(crate) fn compile_text_rules(
    raw: &[(String, String)],
    location: &str,
    warnings: &mut Vec<RuleWarning>,
) -> Vec<ReplaceRule> {
    compile_with(raw, location, warnings, ReplaceRule::pattern)
}

fn compile_with(
    raw: &[(String, String)],
    location: &str,
    warnings: &mut Vec<RuleWarning>,
    compile: fn(&str, &str) -> Result<ReplaceRule, regex::Error>,
) -> Vec<ReplaceRule> {
    let mut rules = Vec::with_capacity(raw.len());
    for (idx, (pattern, replacement)) in raw.iter().enumerate() {
        match compile(pattern, replacement) {
            Ok(rule) => rules.push(rule),
            Err(err) => warnings.push(RuleWarning::new(
                format!("{location}[{idx}]"),
                format!("invalid pattern '{pattern}': {err}"),
            )),
        }
    }
    rules
}
