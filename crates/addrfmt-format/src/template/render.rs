//! Template evaluation against an address record.

use addrfmt_model::AddressComponents;

use super::parser::Node;

/// Name of the implicit iterator inside a section.
const IMPLICIT_ITERATOR: &str = ".";

#[derive(Clone, Copy)]
struct Scope<'a> {
    components: &'a AddressComponents,
    /// Value of the innermost enclosing section.
    current: Option<&'a str>,
}

impl<'a> Scope<'a> {
    fn lookup(&self, name: &str) -> Option<&'a str> {
        if name == IMPLICIT_ITERATOR {
            return self.current;
        }
        self.components.get(name)
    }
}

pub(crate) fn render(nodes: &[Node], components: &AddressComponents) -> String {
    let mut out = String::new();
    let scope = Scope {
        components,
        current: None,
    };
    render_into(nodes, scope, &mut out);
    out
}

fn render_into(nodes: &[Node], scope: Scope<'_>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Variable { name, escape } => {
                if let Some(value) = scope.lookup(name) {
                    if *escape {
                        escape_html(value, out);
                    } else {
                        out.push_str(value);
                    }
                }
            }
            Node::Section {
                name,
                inverted,
                children,
            } => match (scope.lookup(name), inverted) {
                (Some(value), false) => render_into(
                    children,
                    Scope {
                        current: Some(value),
                        ..scope
                    },
                    out,
                ),
                (None, true) => render_into(children, scope, out),
                _ => {}
            },
            Node::First(candidates) => {
                for candidate in candidates {
                    let mut rendered = String::new();
                    render_into(candidate, scope, &mut rendered);
                    let trimmed = rendered.trim();
                    if !trimmed.is_empty() {
                        out.push_str(trimmed);
                        break;
                    }
                }
            }
        }
    }
}

fn escape_html(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::parser::parse;
    use super::*;

    fn render_str(source: &str, pairs: &[(&str, &str)]) -> String {
        let components: AddressComponents = pairs.iter().copied().collect();
        render(&parse(source).unwrap(), &components)
    }

    #[test]
    fn test_missing_components_render_empty() {
        assert_eq!(render_str("{{{road}}} {{{house_number}}}", &[]), " ");
    }

    #[test]
    fn test_double_braces_escape() {
        assert_eq!(
            render_str("{{house}} / {{{house}}}", &[("house", "A & B's <x>")]),
            "A &amp; B&#39;s &lt;x&gt; / A & B's <x>"
        );
    }

    #[test]
    fn test_first_takes_first_non_empty() {
        let source = "[{{#first}} {{{city}}} || {{{town}}} || {{{village}}} {{/first}}]";
        assert_eq!(render_str(source, &[("village", "Oberau")]), "[Oberau]");
        assert_eq!(
            render_str(source, &[("town", "Celle"), ("village", "Oberau")]),
            "[Celle]"
        );
        assert_eq!(render_str(source, &[]), "[]");
    }

    #[test]
    fn test_first_candidate_can_mix_text() {
        let source = "{{#first}} {{{state_code}}} || {{{state}}} state {{/first}}";
        assert_eq!(render_str(source, &[("state", "Bavaria")]), "Bavaria state");
    }

    #[test]
    fn test_sections_and_implicit_iterator() {
        let source = "{{#postcode}}PLZ {{.}}{{/postcode}}{{^postcode}}no postcode{{/postcode}}";
        assert_eq!(render_str(source, &[("postcode", "10243")]), "PLZ 10243");
        assert_eq!(render_str(source, &[]), "no postcode");
    }
}
