//! Well-known component names.
//!
//! Records use free-form keys; these are the names the pipeline itself reads
//! or writes. The full recognized vocabulary lives in the rule store.

pub const ATTENTION: &str = "attention";
pub const HOUSE_NUMBER: &str = "house_number";
pub const ROAD: &str = "road";
pub const CITY: &str = "city";
pub const POSTCODE: &str = "postcode";
pub const STATE: &str = "state";
pub const STATE_CODE: &str = "state_code";
pub const COUNTRY: &str = "country";
pub const COUNTRY_CODE: &str = "country_code";

/// Names the pipeline depends on, recognized even when a rule bundle's
/// vocabulary leaves them out.
pub const PIPELINE: &[&str] = &[
    ATTENTION,
    HOUSE_NUMBER,
    ROAD,
    CITY,
    POSTCODE,
    STATE,
    STATE_CODE,
    COUNTRY,
    COUNTRY_CODE,
];
