//! Template compilation.

use thiserror::Error;

/// Name of the section that picks the first non-empty candidate.
pub const FIRST_HELPER: &str = "first";

/// Separator between `first` candidates.
pub const CANDIDATE_SEPARATOR: &str = "||";

/// Template compile error. Every variant carries the byte offset of the
/// offending tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TemplateError {
    #[error("unclosed tag at byte {offset}")]
    UnclosedTag { offset: usize },

    #[error("empty tag at byte {offset}")]
    EmptyTag { offset: usize },

    #[error("section '{name}' opened at byte {offset} is never closed")]
    UnclosedSection { name: String, offset: usize },

    #[error("closing tag '{name}' at byte {offset} has no open section")]
    UnexpectedClose { name: String, offset: usize },

    #[error("closing tag '{found}' at byte {offset} does not match section '{expected}'")]
    MismatchedClose {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("{what} are not supported (byte {offset})")]
    Unsupported { what: &'static str, offset: usize },
}

impl TemplateError {
    /// Byte offset of the offending tag in the template source.
    pub fn offset(&self) -> usize {
        match self {
            Self::UnclosedTag { offset }
            | Self::EmptyTag { offset }
            | Self::UnclosedSection { offset, .. }
            | Self::UnexpectedClose { offset, .. }
            | Self::MismatchedClose { offset, .. }
            | Self::Unsupported { offset, .. } => *offset,
        }
    }
}

/// A node of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    /// `{{name}}` (escaped) or `{{{name}}}` / `{{& name}}` (raw).
    Variable { name: String, escape: bool },
    /// `{{#name}}…{{/name}}` or, inverted, `{{^name}}…{{/name}}`.
    Section {
        name: String,
        inverted: bool,
        children: Vec<Node>,
    },
    /// `{{#first}} a || b {{/first}}`: candidates in order.
    First(Vec<Vec<Node>>),
}

struct OpenSection {
    name: String,
    inverted: bool,
    offset: usize,
    parent: Vec<Node>,
}

/// Parse template source into nodes.
pub(crate) fn parse(source: &str) -> Result<Vec<Node>, TemplateError> {
    let mut stack: Vec<OpenSection> = Vec::new();
    let mut nodes: Vec<Node> = Vec::new();
    let mut pos = 0;

    while let Some(rel) = source[pos..].find("{{") {
        let start = pos + rel;
        if start > pos {
            nodes.push(Node::Text(source[pos..start].to_string()));
        }

        if source[start..].starts_with("{{{") {
            let body_start = start + 3;
            let len = source[body_start..]
                .find("}}}")
                .ok_or(TemplateError::UnclosedTag { offset: start })?;
            let name = tag_name(&source[body_start..body_start + len], start)?;
            nodes.push(Node::Variable {
                name,
                escape: false,
            });
            pos = body_start + len + 3;
            continue;
        }

        let body_start = start + 2;
        let len = source[body_start..]
            .find("}}")
            .ok_or(TemplateError::UnclosedTag { offset: start })?;
        let body = source[body_start..body_start + len].trim();
        pos = body_start + len + 2;

        let mut chars = body.chars();
        let sigil = chars.next();
        let rest = chars.as_str();
        match sigil {
            None => return Err(TemplateError::EmptyTag { offset: start }),
            Some('!') => {}
            Some('#' | '^') => {
                stack.push(OpenSection {
                    name: tag_name(rest, start)?,
                    inverted: sigil == Some('^'),
                    offset: start,
                    parent: std::mem::take(&mut nodes),
                });
            }
            Some('/') => {
                let name = tag_name(rest, start)?;
                let Some(open) = stack.pop() else {
                    return Err(TemplateError::UnexpectedClose {
                        name,
                        offset: start,
                    });
                };
                if open.name != name {
                    return Err(TemplateError::MismatchedClose {
                        expected: open.name,
                        found: name,
                        offset: start,
                    });
                }
                let children = std::mem::replace(&mut nodes, open.parent);
                nodes.push(close_section(open.name, open.inverted, children));
            }
            Some('&') => nodes.push(Node::Variable {
                name: tag_name(rest, start)?,
                escape: false,
            }),
            Some('>') => {
                return Err(TemplateError::Unsupported {
                    what: "partials",
                    offset: start,
                });
            }
            Some('=') => {
                return Err(TemplateError::Unsupported {
                    what: "set-delimiter tags",
                    offset: start,
                });
            }
            Some(_) => nodes.push(Node::Variable {
                name: tag_name(body, start)?,
                escape: true,
            }),
        }
    }

    if let Some(open) = stack.pop() {
        return Err(TemplateError::UnclosedSection {
            name: open.name,
            offset: open.offset,
        });
    }

    if pos < source.len() {
        nodes.push(Node::Text(source[pos..].to_string()));
    }
    Ok(nodes)
}

fn tag_name(raw: &str, offset: usize) -> Result<String, TemplateError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(TemplateError::EmptyTag { offset });
    }
    Ok(name.to_string())
}

fn close_section(name: String, inverted: bool, children: Vec<Node>) -> Node {
    if !inverted && name == FIRST_HELPER {
        return Node::First(split_candidates(children));
    }
    Node::Section {
        name,
        inverted,
        children,
    }
}

/// Split a `first` body on the separator. Separators are only recognised in
/// literal text at the body's own level.
fn split_candidates(children: Vec<Node>) -> Vec<Vec<Node>> {
    let mut candidates = vec![Vec::new()];

    for node in children {
        let Node::Text(text) = node else {
            if let Some(current) = candidates.last_mut() {
                current.push(node);
            }
            continue;
        };

        for (idx, piece) in text.split(CANDIDATE_SEPARATOR).enumerate() {
            if idx > 0 {
                candidates.push(Vec::new());
            }
            if !piece.is_empty()
                && let Some(current) = candidates.last_mut()
            {
                current.push(Node::Text(piece.to_string()));
            }
        }
    }

    candidates
}
