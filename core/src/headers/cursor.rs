//! headers/cursor.rs
//! Little-endian primitive readers over a forward-only byte source.
//!
//! A short read is always `TruncatedInput`; nothing is read past the
//! requested length.

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::headers::types::HeaderError;

#[inline]
pub fn read_u8<R: Read + ?Sized>(r: &mut R) -> Result<u8, HeaderError> {
    Ok(r.read_u8()?)
}

#[inline]
pub fn read_u16_le<R: Read + ?Sized>(r: &mut R) -> Result<u16, HeaderError> {
    Ok(r.read_u16::<LittleEndian>()?)
}

#[inline]
pub fn read_u32_le<R: Read + ?Sized>(r: &mut R) -> Result<u32, HeaderError> {
    Ok(r.read_u32::<LittleEndian>()?)
}

/// Read exactly `len` bytes.
///
/// The buffer grows with the data actually received, so a bogus length on
/// a short stream does not allocate up front.
pub fn read_bytes<R: Read + ?Sized>(r: &mut R, len: usize) -> Result<Vec<u8>, HeaderError> {
    let mut out = Vec::with_capacity(len.min(4096));
    r.take(len as u64).read_to_end(&mut out)?;
    if out.len() != len {
        return Err(HeaderError::TruncatedInput);
    }
    Ok(out)
}

#[inline]
pub fn read_array<const N: usize, R: Read + ?Sized>(r: &mut R) -> Result<[u8; N], HeaderError> {
    let mut out = [0u8; N];
    r.read_exact(&mut out)?;
    Ok(out)
}

/// Decode a fixed-width little-endian payload; `None` if the size is wrong.
#[inline]
pub fn payload_u32(payload: &[u8]) -> Option<u32> {
    payload.try_into().ok().map(u32::from_le_bytes)
}

#[inline]
pub fn payload_u64(payload: &[u8]) -> Option<u64> {
    payload.try_into().ok().map(u64::from_le_bytes)
}
