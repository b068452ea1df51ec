//! config.rs
//! Reader configuration.
//!
//! Defaults are safe for untrusted input; every knob can be loaded from JSON
//! so embedding applications can keep it next to their own settings.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MAX_FIELD_LEN, DEFAULT_MAX_HEADER_LEN};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderConfig {
    /// Largest accepted payload for a single header field, in bytes.
    pub max_field_len: u32,

    /// Largest accepted header, prefix and every field included, in bytes.
    pub max_header_len: u64,

    /// Reject a `MasterSeed` that is not exactly 32 bytes. When false the
    /// seed is kept verbatim, whatever its length.
    pub strict_master_seed: bool,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            max_field_len: DEFAULT_MAX_FIELD_LEN,
            max_header_len: DEFAULT_MAX_HEADER_LEN,
            strict_master_seed: true,
        }
    }
}

impl HeaderConfig {
    /// Lenient profile for reading files written by old or third-party tools.
    pub fn lenient() -> Self {
        Self { strict_master_seed: false, ..Default::default() }
    }

    /// Missing keys fall back to the defaults.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
