//! Mustache-style address templates.
//!
//! Supported syntax:
//!
//! | Tag                      | Meaning                                       |
//! |--------------------------|-----------------------------------------------|
//! | `{{name}}`               | component value, HTML-escaped                 |
//! | `{{{name}}}`, `{{& name}}` | component value, raw                        |
//! | `{{#name}}…{{/name}}`    | body rendered when the component is present   |
//! | `{{^name}}…{{/name}}`    | body rendered when the component is absent    |
//! | `{{.}}`                  | value of the enclosing section                |
//! | `{{! … }}`               | comment                                       |
//! | `{{#first}}a \|\| b{{/first}}` | first candidate with non-blank output   |
//!
//! Partials and set-delimiter tags are rejected at compile time.

mod cache;
mod parser;
mod render;

use addrfmt_model::AddressComponents;

pub use cache::TemplateCache;
pub use parser::{CANDIDATE_SEPARATOR, FIRST_HELPER, Node, TemplateError};

/// A compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    nodes: Vec<Node>,
}

impl Template {
    /// Compile template source.
    ///
    /// ```
    /// use addrfmt_format::template::Template;
    /// use addrfmt_model::AddressComponents;
    ///
    /// let template = Template::compile("{{#first}} {{{city}}} || {{{town}}} {{/first}}").unwrap();
    /// let components: AddressComponents = [("town", "Celle")].into_iter().collect();
    /// assert_eq!(template.render(&components), "Celle");
    /// ```
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        Ok(Self {
            source: source.to_string(),
            nodes: parser::parse(source)?,
        })
    }

    /// The source text this template was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Render against a record. Missing components render as empty text.
    pub fn render(&self, components: &AddressComponents) -> String {
        render::render(&self.nodes, components)
    }
}
