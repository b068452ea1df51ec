//! params/mod.rs
//! Typed key/value parameter map ("variant dictionary").
//!
//! Notes:
//! - Carries KDF parameters and public custom data inside the outer header.
//! - Entries keep insertion-independent order (sorted by key) so encoding is
//!   deterministic.
//! - Decoding is strict: unknown value types and trailing garbage are errors.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
