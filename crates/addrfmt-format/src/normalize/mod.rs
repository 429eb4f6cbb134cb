//! Component normalization: aliases, unknown components, sanity cleaning and
//! country resolution.

mod aliases;
mod country;
mod sanitize;

pub use aliases::{aggregate_unknown, merge_aliases};
pub use country::{ADD_COMPONENT_WHITELIST, resolve_country};
pub use sanitize::{MAX_POSTCODE_CHARS, sanitize};
