//! crypto/types.rs
//! Fixed-size digest and key types used by the integrity engine.

use crate::constants::{HASH_LEN, HMAC_LEN};

/// SHA-256 of the raw header bytes.
pub type HeaderHash = [u8; HASH_LEN];

/// HMAC-SHA-256 tag written after the header in KDBX 4 files.
pub type HeaderTag = [u8; HMAC_LEN];

/// SHA-512 output; both the HMAC base key and every per-block key.
pub const HMAC_KEY_LEN: usize = 64;
pub type HmacKey = [u8; HMAC_KEY_LEN];
