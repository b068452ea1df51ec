//! headers/encode.rs
//!
//! Outer header serialization.
//!
//! Design notes:
//! - Field order follows the reference writer: cipher, compression, master
//!   seed, [3.1: transform seed/rounds], IV, [3.1: inner stream key, stream
//!   start bytes, inner stream id], [4: KDF parameters, public custom data],
//!   end of header.
//! - Length prefixes are 16-bit for KDBX 3.1 and 32-bit for KDBX 4.
//! - The output is exactly what `decode.rs` hashes on the way back in.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::debug;

use crate::constants::{field_ids, kdf_keys, END_OF_HEADER_PAYLOAD};
use crate::crypto::digest::header_hash;
use crate::crypto::types::HeaderHash;
use crate::headers::types::{FormatVersion, HeaderAggregate, HeaderError};
use crate::params::encode_variant_map;

fn put_field<W: Write + ?Sized>(
    out: &mut W,
    version: FormatVersion,
    id: u8,
    payload: &[u8],
) -> Result<(), HeaderError> {
    out.write_u8(id)?;
    match version {
        FormatVersion::Kdbx3 => {
            let len = u16::try_from(payload.len()).map_err(|_| HeaderError::FieldTooLarge {
                id,
                len: payload.len() as u64,
                max: u64::from(u16::MAX),
            })?;
            out.write_u16::<LittleEndian>(len)?;
        }
        FormatVersion::Kdbx4 => {
            let len = u32::try_from(payload.len()).map_err(|_| HeaderError::FieldTooLarge {
                id,
                len: payload.len() as u64,
                max: u64::from(u32::MAX),
            })?;
            out.write_u32::<LittleEndian>(len)?;
        }
    }
    out.write_all(payload)?;
    Ok(())
}

/// Serialize `h` into a fresh buffer.
///
/// # Errors
/// - `MissingKdfParameters` for a KDBX 4 header without KDF parameters.
/// - `FieldTooLarge` if a payload does not fit the length prefix.
pub fn encode_header(h: &HeaderAggregate) -> Result<Vec<u8>, HeaderError> {
    let mut out = Vec::with_capacity(256);
    write_header(&mut out, h)?;
    Ok(out)
}

/// Serialize `h` into `out`, returning the SHA-256 of the written bytes.
pub fn write_header<W: Write + ?Sized>(out: &mut W, h: &HeaderAggregate) -> Result<HeaderHash, HeaderError> {
    let version = h.format_version();
    let mut buf = Vec::with_capacity(256);

    buf.write_u32::<LittleEndian>(h.signature1)?;
    buf.write_u32::<LittleEndian>(h.signature2)?;
    buf.write_u32::<LittleEndian>(h.version)?;

    put_field(&mut buf, version, field_ids::CIPHER_ID, h.cipher_id.as_bytes())?;
    put_field(&mut buf, version, field_ids::COMPRESSION_FLAGS, &h.compression.to_flag().to_le_bytes())?;
    put_field(&mut buf, version, field_ids::MASTER_SEED, &h.master_seed)?;

    match version {
        FormatVersion::Kdbx3 => {
            let kdf = h.kdf_parameters.as_ref();
            let seed = kdf.and_then(|k| k.get_bytes(kdf_keys::AES_SEED)).unwrap_or_default();
            let rounds = kdf.and_then(|k| k.rounds()).unwrap_or(h.transform_rounds);

            put_field(&mut buf, version, field_ids::TRANSFORM_SEED, seed)?;
            put_field(&mut buf, version, field_ids::TRANSFORM_ROUNDS, &rounds.to_le_bytes())?;
            put_field(&mut buf, version, field_ids::ENCRYPTION_IV, &h.encryption_iv)?;
            put_field(&mut buf, version, field_ids::INNER_RANDOM_STREAM_KEY, &h.inner_random_stream_key)?;
            put_field(&mut buf, version, field_ids::STREAM_START_BYTES, &h.stream_start_bytes)?;
            if let Some(stream) = h.inner_random_stream {
                put_field(&mut buf, version, field_ids::INNER_RANDOM_STREAM_ID, &stream.id().to_le_bytes())?;
            }
        }
        FormatVersion::Kdbx4 => {
            let kdf = h.kdf_parameters.as_ref().ok_or(HeaderError::MissingKdfParameters)?;

            put_field(&mut buf, version, field_ids::ENCRYPTION_IV, &h.encryption_iv)?;
            put_field(&mut buf, version, field_ids::KDF_PARAMETERS, &kdf.encode())?;
            if let Some(custom) = h.public_custom_data.as_ref().filter(|c| !c.is_empty()) {
                put_field(&mut buf, version, field_ids::PUBLIC_CUSTOM_DATA, &encode_variant_map(custom))?;
            }
        }
    }

    put_field(&mut buf, version, field_ids::END_OF_HEADER, END_OF_HEADER_PAYLOAD)?;

    out.write_all(&buf)?;
    debug!(len = buf.len(), "header written: {}", h.summary());
    Ok(header_hash(&buf))
}
