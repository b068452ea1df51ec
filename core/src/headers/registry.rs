//! headers/registry.rs
//! Flag <-> enum tables for the algorithm choices carried in the header.
//!
//! Each registry is a closed bijection over a validated numeric range;
//! anything outside the range is a hard error, never a silent default.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use uuid::Uuid;

use crate::constants::{cipher_uuids, UUID_LEN};
use crate::headers::types::HeaderError;

/// Payload compression, stored as a u32 flag.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
pub enum CompressionAlgorithm {
    None = 0,
    GZip = 1,
}

impl CompressionAlgorithm {
    pub fn from_flag(raw: u32) -> Result<Self, HeaderError> {
        Self::try_from_primitive(raw).map_err(|_| HeaderError::UnrecognizedCompressionFlag { raw })
    }

    pub fn to_flag(self) -> u32 {
        self.into()
    }
}

/// Keystream protecting individual values inside the decrypted payload.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
pub enum InnerStreamAlgorithm {
    None           = 0,
    ArcFourVariant = 1,
    Salsa20        = 2,
    ChaCha20       = 3,
}

impl InnerStreamAlgorithm {
    pub fn from_id(raw: u32) -> Result<Self, HeaderError> {
        Self::try_from_primitive(raw)
            .map_err(|_| HeaderError::InvalidStreamId { len: 4, raw: Some(raw) })
    }

    pub fn id(self) -> u32 {
        self.into()
    }
}

/// Body ciphers with a known UUID. Unknown UUIDs are still carried verbatim
/// in the header; choosing a cipher implementation is not done here.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CipherKind {
    Aes256,
    Twofish,
    ChaCha20,
}

impl CipherKind {
    pub fn from_uuid(id: &Uuid) -> Option<Self> {
        match *id.as_bytes() {
            cipher_uuids::AES256 => Some(CipherKind::Aes256),
            cipher_uuids::TWOFISH => Some(CipherKind::Twofish),
            cipher_uuids::CHACHA20 => Some(CipherKind::ChaCha20),
            _ => None,
        }
    }

    pub fn uuid(self) -> Uuid {
        Uuid::from_bytes(match self {
            CipherKind::Aes256 => cipher_uuids::AES256,
            CipherKind::Twofish => cipher_uuids::TWOFISH,
            CipherKind::ChaCha20 => cipher_uuids::CHACHA20,
        })
    }

    /// Encryption IV length the cipher expects.
    pub fn iv_len(self) -> usize {
        match self {
            CipherKind::ChaCha20 => 12,
            CipherKind::Aes256 | CipherKind::Twofish => 16,
        }
    }
}

/// Validate a `CipherID` payload; only the length is checked here.
pub fn parse_cipher_id(payload: &[u8]) -> Result<Uuid, HeaderError> {
    let bytes: [u8; UUID_LEN] = payload
        .try_into()
        .map_err(|_| HeaderError::InvalidCipherId { len: payload.len() })?;
    Ok(Uuid::from_bytes(bytes))
}
