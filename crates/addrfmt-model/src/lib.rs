//! Address data model types.
//!
//! This crate provides the value types shared by the rule store and the
//! formatting pipeline:
//! - [`AddressComponents`]: a structured address record (name → value)
//! - [`CountryCode`]: a validated ISO 3166-1 alpha-2 code
//! - [`FormatOptions`]: per-call formatting options
//!
//! # Example
//!
//! ```
//! use addrfmt_model::{AddressComponents, CountryCode, FormatOptions};
//!
//! let mut address = AddressComponents::new();
//! address.insert("road", "Warschauer Straße");
//! address.insert("house_number", "57");
//! address.insert("country_code", "de");
//!
//! assert_eq!(CountryCode::parse("uk").unwrap().as_str(), "GB");
//!
//! let options = FormatOptions::new().with_abbreviate(true);
//! assert!(options.abbreviate);
//! ```

pub mod component;
mod components;
mod country;
mod options;

pub use components::AddressComponents;
pub use country::{CountryCode, InvalidCountryCode};
pub use options::FormatOptions;
