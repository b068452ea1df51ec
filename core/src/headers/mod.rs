//! headers/mod.rs
//! KDBX outer header codec.
//!
//! Notes:
//! - Self-describing TLV header; field length width depends on the version.
//! - Every field is validated before it touches the aggregate; any failure
//!   aborts the parse.
//! - The raw bytes are captured while parsing so the hash and HMAC cover
//!   exactly what was interpreted.

pub mod types;
pub mod registry;
pub mod cursor;
pub mod reader;
pub mod dispatch;
pub mod decode;
pub mod encode;
pub mod seal;

pub use types::*;
pub use registry::*;
pub use reader::*;
pub use dispatch::*;
pub use decode::*;
pub use encode::*;
pub use seal::*;
