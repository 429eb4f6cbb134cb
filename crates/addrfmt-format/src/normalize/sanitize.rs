//! Removal of malformed component values.

use std::sync::LazyLock;

use addrfmt_model::AddressComponents;
use addrfmt_model::component::POSTCODE;
use regex::Regex;

use crate::logging::redact_value;

/// Longest postcode kept, in characters.
pub const MAX_POSTCODE_CHARS: usize = 20;

static POSTCODE_RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+;\d+").expect("Invalid postcode range regex"));

static POSTCODE_LIST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{5}),\d{5}").expect("Invalid postcode list regex"));

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://").expect("Invalid URL regex"));

/// Drop or repair values that would corrupt the rendered address.
///
/// Components containing a URL are always dropped. The postcode rules
/// (overlong values, `;` ranges, `12345,67890` lists) apply only when
/// `cleanup_postcode` is set.
pub fn sanitize(components: &mut AddressComponents, cleanup_postcode: bool) {
    if cleanup_postcode && let Some(postcode) = components.get(POSTCODE) {
        match clean_postcode(postcode) {
            PostcodeAction::Keep => {}
            PostcodeAction::Drop => {
                tracing::debug!(postcode = %redact_value(postcode), "Dropped malformed postcode");
                components.remove(POSTCODE);
            }
            PostcodeAction::Replace(first) => {
                components.insert(POSTCODE, first);
            }
        }
    }

    components.retain(|name, value| {
        let keep = !URL_REGEX.is_match(value);
        if !keep {
            tracing::debug!(component = name, "Dropped component containing a URL");
        }
        keep
    });
}

enum PostcodeAction {
    Keep,
    Drop,
    Replace(String),
}

fn clean_postcode(postcode: &str) -> PostcodeAction {
    if postcode.chars().count() > MAX_POSTCODE_CHARS || POSTCODE_RANGE_REGEX.is_match(postcode) {
        return PostcodeAction::Drop;
    }
    if let Some(caps) = POSTCODE_LIST_REGEX.captures(postcode) {
        return PostcodeAction::Replace(caps[1].to_string());
    }
    PostcodeAction::Keep
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitized(pairs: &[(&str, &str)], cleanup_postcode: bool) -> AddressComponents {
        let mut components: AddressComponents = pairs.iter().copied().collect();
        sanitize(&mut components, cleanup_postcode);
        components
    }

    #[test]
    fn test_overlong_postcode_dropped() {
        let components = sanitized(&[("postcode", "123456789012345678901")], true);
        assert!(!components.contains("postcode"));
        let components = sanitized(&[("postcode", "12345678901234567890")], true);
        assert!(components.contains("postcode"));
    }

    #[test]
    fn test_postcode_range_dropped() {
        let components = sanitized(&[("postcode", "10115;10117")], true);
        assert!(!components.contains("postcode"));
    }

    #[test]
    fn test_postcode_list_truncated() {
        let components = sanitized(&[("postcode", "12345,67890")], true);
        assert_eq!(components.get("postcode"), Some("12345"));
    }

    #[test]
    fn test_postcode_rules_can_be_disabled() {
        let components = sanitized(&[("postcode", "10115;10117")], false);
        assert_eq!(components.get("postcode"), Some("10115;10117"));
    }

    #[test]
    fn test_urls_dropped() {
        let components = sanitized(
            &[("house", "see https://example.org"), ("road", "Main St")],
            false,
        );
        assert!(!components.contains("house"));
        assert_eq!(components.get("road"), Some("Main St"));
    }
}
