//! Country-aware postal address formatting.
//!
//! This crate turns a structured address record into text laid out the way
//! the destination country writes addresses.
//!
//! # Pipeline
//!
//! ```text
//! record ─► merge_aliases ─► aggregate_unknown ─► sanitize ─► resolve_country
//!        ─► choose_template ─► apply_replacements ─► add_state_code
//!        ─► abbreviate (optional) ─► render ─► clean ─► postformat_replace ─► clean
//! ```
//!
//! Every stage is a public function so it can be used and tested on its
//! own; [`AddressFormatter`] runs them in order.
//!
//! # Example
//!
//! ```
//! use addrfmt_format::AddressFormatter;
//! use addrfmt_model::{AddressComponents, FormatOptions};
//!
//! let formatter = AddressFormatter::with_embedded_rules().unwrap();
//! let address: AddressComponents = [
//!     ("house_number", "301"),
//!     ("road", "Hamilton Avenue"),
//!     ("city", "Palo Alto"),
//!     ("state", "California"),
//!     ("postcode", "94301"),
//!     ("country_code", "us"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let text = formatter.format(&address, &FormatOptions::default().with_abbreviate(true));
//! assert_eq!(text, "301 Hamilton Ave\nPalo Alto, CA 94301\n");
//! ```

pub mod abbreviate;
pub mod clean;
pub mod error;
pub mod formatter;
pub mod logging;
pub mod normalize;
pub mod select;
pub mod state_code;
pub mod substitute;
pub mod template;

// Error types
pub use error::{AbbreviationError, FormatterError, Result, TemplateError};

// Formatter
pub use formatter::AddressFormatter;

// Pipeline stages
pub use abbreviate::abbreviate;
pub use clean::clean;
pub use normalize::{aggregate_unknown, merge_aliases, resolve_country, sanitize};
pub use select::choose_template;
pub use state_code::{add_state_code, resolve_state_code};
pub use substitute::{apply_replacements, postformat_replace};

// Templates
pub use template::{Template, TemplateCache};
