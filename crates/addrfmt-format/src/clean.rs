//! Canonicalization of rendered addresses.

use std::sync::LazyLock;

use regex::Regex;

/// Upper bound on normalization passes. Real input settles in two.
const MAX_PASSES: usize = 16;

static REPEATED_COMMA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r",(?:[\t\p{Zs}]*,)+[\t\p{Zs}]*").expect("Invalid repeated comma regex")
});

static SPACED_COMMA_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\t\p{Zs}]+,[\t\p{Zs}]+").expect("Invalid spaced comma regex")
});

static HSPACE_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\t\p{Zs}]+").expect("Invalid whitespace regex"));

static SPACE_BEFORE_BREAK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\t\p{Zs}]+\n").expect("Invalid space before break regex")
});

static COMMA_BEFORE_BREAK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\n").expect("Invalid comma before break regex"));

static BREAK_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("Invalid line break regex"));

static SPACE_AFTER_BREAK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n[\t\p{Zs}]+").expect("Invalid space after break regex")
});

/// Normalize punctuation, whitespace, and duplicates in rendered text.
///
/// The result has no blank lines, no repeated lines, no repeated segments
/// within a line, and exactly one trailing line break. `clean` is
/// idempotent.
///
/// ```
/// use addrfmt_format::clean;
///
/// assert_eq!(clean(" ,Berlin ,, Mitte\n\n\nBerlin, Mitte "), "Berlin, Mitte\n");
/// ```
pub fn clean(text: &str) -> String {
    let mut current = clean_pass(text);
    for _ in 1..MAX_PASSES {
        let next = clean_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current.push('\n');
    current
}

fn clean_pass(text: &str) -> String {
    let text = text.trim_matches(|c: char| c == ',' || c.is_whitespace());
    let text = REPEATED_COMMA_REGEX.replace_all(text, ", ");
    let text = SPACED_COMMA_REGEX.replace_all(&text, ", ");
    let text = HSPACE_RUN_REGEX.replace_all(&text, " ");
    let text = SPACE_BEFORE_BREAK_REGEX.replace_all(&text, "\n");
    let text = COMMA_BEFORE_BREAK_REGEX.replace_all(&text, "\n");
    let text = BREAK_RUN_REGEX.replace_all(&text, "\n");
    let text = SPACE_AFTER_BREAK_REGEX.replace_all(&text, "\n");

    let mut lines: Vec<String> = Vec::new();
    for line in text.split('\n') {
        let line = dedupe_line_segments(line);
        if !line.is_empty() && !lines.contains(&line) {
            lines.push(line);
        }
    }

    lines.join("\n").trim().to_string()
}

fn dedupe_line_segments(line: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in line.split(", ").map(str::trim) {
        if !segment.is_empty() && !segments.contains(&segment) {
            segments.push(segment);
        }
    }
    segments.join(", ")
}
