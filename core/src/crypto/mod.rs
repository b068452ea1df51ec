//! crypto/mod.rs
//! Integrity primitives for the outer header and the KDF parameter view.

pub mod types;
pub mod kdf;
pub mod digest;
pub mod mac;

pub use types::*;
pub use kdf::*;
pub use digest::*;
pub use mac::*;
