//! headers/decode.rs
//!
//! Outer header parsing.
//!
//! Layout (little-endian):
//! ```text
//! 0..4    signature1   0x9AA2D903
//! 4..8    signature2   0xB54BFB67 (or the pre-release 0xB54BFB66)
//! 8..12   version      (major << 16) | minor
//! 12..    TLV fields until EndOfHeader (id 0)
//! ```
//! Every byte consumed goes through `HeaderCapture`, so the returned raw
//! bytes and hash cover exactly the header and nothing after it.

use std::io::Read;

use tracing::debug;

use crate::config::HeaderConfig;
use crate::constants::{SIGNATURE_1, SIGNATURE_2, SIGNATURE_2_PRE_RELEASE};
use crate::crypto::digest::HeaderCapture;
use crate::crypto::types::HeaderHash;
use crate::headers::cursor::read_u32_le;
use crate::headers::dispatch::dispatch_field;
use crate::headers::reader::{FieldReader, ReaderState};
use crate::headers::types::{is_version_supported, FormatVersion, HeaderAggregate, HeaderError};

/// A successfully parsed header together with its integrity material.
#[derive(Clone, Debug)]
pub struct ParsedHeader {
    pub header: HeaderAggregate,
    /// Exact header bytes, `EndOfHeader` field included.
    pub raw: Vec<u8>,
    /// SHA-256 of `raw`.
    pub hash: HeaderHash,
}

impl ParsedHeader {
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

fn is_known_signature2(signature2: u32) -> bool {
    signature2 == SIGNATURE_2 || signature2 == SIGNATURE_2_PRE_RELEASE
}

/// Check the signature pair and the critical version mask.
pub fn check_signature_and_version(
    signature1: u32,
    signature2: u32,
    version: u32,
) -> Result<FormatVersion, HeaderError> {
    let signature_ok = signature1 == SIGNATURE_1 && is_known_signature2(signature2);
    if !signature_ok || !is_version_supported(version) {
        return Err(HeaderError::VersionRejected { signature1, signature2, version });
    }
    Ok(FormatVersion::from_file_version(version))
}

/// Parse the outer header from `source`.
///
/// Reads strictly forward and stops right after `EndOfHeader`; the body is
/// left unread in `source`.
pub fn read_header<R: Read + ?Sized>(
    source: &mut R,
    config: &HeaderConfig,
) -> Result<ParsedHeader, HeaderError> {
    let mut capture = HeaderCapture::new(source);
    let mut header = HeaderAggregate::default();

    // Each signature is checked as soon as it is read, so a foreign file is
    // rejected even when it is shorter than the prefix.
    let signature1 = read_u32_le(&mut capture)?;
    if signature1 != SIGNATURE_1 {
        return Err(HeaderError::VersionRejected { signature1, signature2: 0, version: 0 });
    }
    let signature2 = read_u32_le(&mut capture)?;
    if !is_known_signature2(signature2) {
        return Err(HeaderError::VersionRejected { signature1, signature2, version: 0 });
    }
    let raw_version = read_u32_le(&mut capture)?;
    let version = check_signature_and_version(signature1, signature2, raw_version)?;

    header.signature1 = signature1;
    header.signature2 = signature2;
    header.version = raw_version;

    let mut reader = FieldReader::new(&mut capture, version, config);
    for field in reader.by_ref() {
        dispatch_field(version, &field?, &mut header, config)?;
    }
    debug_assert_eq!(reader.state(), ReaderState::Done);
    let fields = reader.fields_read();

    let hash = capture.finalize_digest();
    let (_, raw) = capture.into_parts();

    debug!(fields, len = raw.len(), "header parsed: {}", header.summary());
    Ok(ParsedHeader { header, raw, hash })
}

/// Parse a header at the start of `buf` with the default configuration.
/// Trailing bytes (the encrypted body) are ignored.
pub fn decode_header(buf: &[u8]) -> Result<ParsedHeader, HeaderError> {
    let mut cur = buf;
    read_header(&mut cur, &HeaderConfig::default())
}
