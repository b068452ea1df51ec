//! kdbx-header
//!
//! Codec for the outer header of KeePass KDBX 3.1 / 4 database files:
//! TLV parsing and validation, header serialization, SHA-256 / HMAC-SHA-256
//! integrity, and the format-version decision made before saving.
//! No decryption, no file I/O of its own.

#![forbid(unsafe_code)]

// Shared and top level
pub mod config;
pub mod constants;

pub mod params;
pub mod crypto;
pub mod headers;
pub mod database;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::HeaderConfig;
    pub use crate::crypto::{
        compute_header_hmac, derive_hmac_key, header_hash, verify_header_hmac, KdfAlgorithm,
        KdfParameters,
    };
    pub use crate::database::{prepare_header, resolve_format_version, Database, Entry, Group};
    pub use crate::headers::{
        decode_header, encode_header, open_sealed_header, read_header, CipherKind,
        CompressionAlgorithm, FormatVersion, HeaderAggregate, HeaderError, InnerStreamAlgorithm,
        ParsedHeader, SealedHeader,
    };
    pub use crate::params::VariantDictionary;
}
