//! crypto/mac.rs
//! Keyed header authentication.
//!
//! Key schedule (KDBX 4):
//! ```text
//! hmac_key  = SHA-512(master_seed || transformed_key || 0x01)
//! block_key = SHA-512(u64_le(block_index) || hmac_key)
//! tag       = HMAC-SHA-256(block_key, data)
//! ```
//! The header uses block index `u64::MAX`, which no payload block can have.

use hmac::{Hmac, Mac};
use sha2::{Digest as _, Sha256, Sha512};

use crate::constants::HEADER_BLOCK_INDEX;
use crate::crypto::types::{HeaderTag, HmacKey, HMAC_KEY_LEN};
use crate::headers::types::HeaderError;

type HmacSha256 = Hmac<Sha256>;

/// Base HMAC key from the header's master seed and the KDF output.
pub fn derive_hmac_key(master_seed: &[u8], transformed_key: &[u8]) -> HmacKey {
    let mut h = Sha512::new();
    h.update(master_seed);
    h.update(transformed_key);
    h.update([0x01u8]);
    finish_512(h)
}

/// Per-block signing key.
pub fn hmac_block_key(block_index: u64, hmac_key: &[u8]) -> HmacKey {
    let mut h = Sha512::new();
    h.update(block_index.to_le_bytes());
    h.update(hmac_key);
    finish_512(h)
}

fn finish_512(h: Sha512) -> HmacKey {
    let mut out = [0u8; HMAC_KEY_LEN];
    out.copy_from_slice(&h.finalize());
    out
}

fn header_mac(header: &[u8], hmac_key: &[u8]) -> Result<HmacSha256, HeaderError> {
    let block_key = hmac_block_key(HEADER_BLOCK_INDEX, hmac_key);
    let mut mac = <HmacSha256 as Mac>::new_from_slice(&block_key)
        .map_err(|_| HeaderError::CryptoUnavailable("HMAC-SHA-256 key setup failed"))?;
    mac.update(header);
    Ok(mac)
}

/// Authentication tag over the exact raw header bytes.
pub fn compute_header_hmac(header: &[u8], hmac_key: &[u8]) -> Result<HeaderTag, HeaderError> {
    Ok(header_mac(header, hmac_key)?.finalize().into_bytes().into())
}

/// Constant-time check of a stored tag.
pub fn verify_header_hmac(header: &[u8], hmac_key: &[u8], expected: &[u8]) -> Result<(), HeaderError> {
    header_mac(header, hmac_key)?
        .verify_slice(expected)
        .map_err(|_| HeaderError::HeaderHmacMismatch)
}
