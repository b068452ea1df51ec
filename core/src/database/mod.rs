//! database/mod.rs
//! Minimal record tree and the format-version decision made before saving.

pub mod types;
pub mod version;

pub use types::*;
pub use version::*;
