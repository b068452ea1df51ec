//! headers/seal.rs
//! KDBX 4 header trailer: SHA-256 followed by the HMAC-SHA-256 tag.
//!
//! ```text
//! header bytes | sha256(header) [32] | hmac(header) [32] | encrypted body...
//! ```
//! The hash catches corruption without any key; the tag catches tampering
//! and a wrong key before any payload decryption is attempted. KDBX 3.1
//! files have no trailer and are refused by both directions.

use std::io::{Read, Write};

use tracing::debug;

use crate::config::HeaderConfig;
use crate::constants::{HASH_LEN, HEADER_PREFIX_LEN, HMAC_LEN};
use crate::crypto::digest::header_hash;
use crate::crypto::mac::{compute_header_hmac, verify_header_hmac};
use crate::crypto::types::{HeaderHash, HeaderTag};
use crate::headers::cursor::{payload_u32, read_array};
use crate::headers::decode::{read_header, ParsedHeader};
use crate::headers::encode::encode_header;
use crate::headers::types::{FormatVersion, HeaderAggregate, HeaderError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SealedHeader {
    pub header: Vec<u8>,
    pub hash: HeaderHash,
    pub hmac: HeaderTag,
}

impl SealedHeader {
    /// Serialize `h` and compute both trailers with `hmac_key`.
    pub fn seal(h: &HeaderAggregate, hmac_key: &[u8]) -> Result<Self, HeaderError> {
        let header = encode_header(h)?;
        Self::from_raw(header, hmac_key)
    }

    /// Compute the trailers over already serialized header bytes.
    pub fn from_raw(header: Vec<u8>, hmac_key: &[u8]) -> Result<Self, HeaderError> {
        if let Some(version) = header.get(8..HEADER_PREFIX_LEN).and_then(payload_u32) {
            require_trailer(FormatVersion::from_file_version(version))?;
        }
        let hash = header_hash(&header);
        let hmac = compute_header_hmac(&header, hmac_key)?;
        Ok(Self { header, hash, hmac })
    }

    /// Header plus both trailers.
    pub fn encoded_len(&self) -> usize {
        self.header.len() + HASH_LEN + HMAC_LEN
    }

    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> Result<(), HeaderError> {
        out.write_all(&self.header)?;
        out.write_all(&self.hash)?;
        out.write_all(&self.hmac)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.header);
        out.extend_from_slice(&self.hash);
        out.extend_from_slice(&self.hmac);
        out
    }
}

fn require_trailer(version: FormatVersion) -> Result<(), HeaderError> {
    match version {
        FormatVersion::Kdbx4 => Ok(()),
        FormatVersion::Kdbx3 => Err(HeaderError::TrailerNotSupported(version)),
    }
}

/// Read a KDBX 4 header plus its trailers and check both.
///
/// The hash is checked first so plain corruption is reported as such rather
/// than as a wrong key.
pub fn open_sealed_header<R: Read + ?Sized>(
    source: &mut R,
    hmac_key: &[u8],
    config: &HeaderConfig,
) -> Result<ParsedHeader, HeaderError> {
    let parsed = read_header(source, config)?;
    // Nothing past the header is consumed for a file without a trailer.
    require_trailer(parsed.header.format_version())?;

    let stored_hash = read_array::<HASH_LEN, R>(source)?;
    if stored_hash != parsed.hash {
        return Err(HeaderError::HeaderHashMismatch);
    }

    let stored_hmac = read_array::<HMAC_LEN, R>(source)?;
    verify_header_hmac(&parsed.raw, hmac_key, &stored_hmac)?;

    debug!(len = parsed.raw.len(), "sealed header verified");
    Ok(parsed)
}
