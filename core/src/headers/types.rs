//! headers/types.rs
//! Header aggregate, format version and the header error taxonomy.
//!
//! Notes:
//! - Little-endian for every multi-byte integer on the wire.
//! - Legacy fields (transform seed/rounds, inner stream key/id) only carry
//!   meaning for KDBX 3.1; in KDBX 4 they live in the KDF parameters and in
//!   the inner header respectively.
//! - One aggregate per parse or write; it is never shared.

use std::fmt;
use std::io;

use num_enum::TryFromPrimitive;
use rand::RngCore;
use thiserror::Error;
use uuid::Uuid;

use crate::constants::{
    cipher_uuids, field_ids, FILE_VERSION_3_1, FILE_VERSION_4, FILE_VERSION_CRITICAL_MASK,
    FILE_VERSION_MAX, SEED_LEN, SIGNATURE_1, SIGNATURE_2,
};
use crate::crypto::kdf::{KdfAlgorithm, KdfParameters};
use crate::headers::registry::{CipherKind, CompressionAlgorithm, InnerStreamAlgorithm};
use crate::params::{ParamsError, VariantDictionary};

/// On-disk format revision. Also the revision threaded into field dispatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormatVersion {
    /// KDBX 3.1 (`0x00030001`): 16-bit field lengths, legacy fields active.
    Kdbx3,
    /// KDBX 4.0 (`0x00040000`): 32-bit field lengths, KDF parameter map.
    Kdbx4,
}

impl FormatVersion {
    /// Packed `(major << 16) | minor` value written to the file.
    pub const fn file_version(self) -> u32 {
        match self {
            FormatVersion::Kdbx3 => FILE_VERSION_3_1,
            FormatVersion::Kdbx4 => FILE_VERSION_4,
        }
    }

    /// Revision whose field rules apply to a raw version number.
    pub const fn from_file_version(version: u32) -> Self {
        if version < FILE_VERSION_4 {
            FormatVersion::Kdbx3
        } else {
            FormatVersion::Kdbx4
        }
    }

    pub const fn is_legacy(self) -> bool {
        matches!(self, FormatVersion::Kdbx3)
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.file_version();
        write!(f, "KDBX {}.{}", v >> 16, v & 0xFFFF)
    }
}

/// Critical-mask compatibility: a newer major version is never readable.
pub const fn is_version_supported(version: u32) -> bool {
    (version & FILE_VERSION_CRITICAL_MASK) <= (FILE_VERSION_MAX & FILE_VERSION_CRITICAL_MASK)
}

/// Outer header field ids.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive)]
pub enum FieldId {
    EndOfHeader          = field_ids::END_OF_HEADER,
    Comment              = field_ids::COMMENT,
    CipherId             = field_ids::CIPHER_ID,
    CompressionFlags     = field_ids::COMPRESSION_FLAGS,
    MasterSeed           = field_ids::MASTER_SEED,
    TransformSeed        = field_ids::TRANSFORM_SEED,
    TransformRounds      = field_ids::TRANSFORM_ROUNDS,
    EncryptionIv         = field_ids::ENCRYPTION_IV,
    InnerRandomStreamKey = field_ids::INNER_RANDOM_STREAM_KEY,
    StreamStartBytes     = field_ids::STREAM_START_BYTES,
    InnerRandomStreamId  = field_ids::INNER_RANDOM_STREAM_ID,
    KdfParameters        = field_ids::KDF_PARAMETERS,
    PublicCustomData     = field_ids::PUBLIC_CUSTOM_DATA,
}

impl FieldId {
    /// Fields that only exist in KDBX 3.1 headers.
    pub const fn is_legacy_only(self) -> bool {
        matches!(
            self,
            FieldId::TransformSeed
                | FieldId::TransformRounds
                | FieldId::InnerRandomStreamKey
                | FieldId::InnerRandomStreamId
        )
    }
}

/// The header under construction (parse) or being serialized (write).
#[derive(Clone, Debug, PartialEq)]
pub struct HeaderAggregate {
    pub signature1: u32,
    pub signature2: u32,
    pub version: u32,
    pub master_seed: Vec<u8>,
    pub encryption_iv: Vec<u8>,
    /// KDBX 3.1: first plaintext bytes, used to detect a wrong key.
    pub stream_start_bytes: Vec<u8>,
    /// KDBX 3.1: inner random stream key.
    pub inner_random_stream_key: Vec<u8>,
    /// KDBX 3.1: inner random stream algorithm.
    pub inner_random_stream: Option<InnerStreamAlgorithm>,
    pub cipher_id: Uuid,
    pub compression: CompressionAlgorithm,
    pub kdf_parameters: Option<KdfParameters>,
    pub public_custom_data: Option<VariantDictionary>,
    /// KDBX 3.1: mirrors the `R` entry of the AES-KDF parameters.
    pub transform_rounds: u64,
}

impl Default for HeaderAggregate {
    /// KDBX 4 header with AES-256, GZip and a zeroed master seed.
    fn default() -> Self {
        Self {
            signature1: SIGNATURE_1,
            signature2: SIGNATURE_2,
            version: FILE_VERSION_4,
            master_seed: vec![0u8; SEED_LEN],
            encryption_iv: Vec::new(),
            stream_start_bytes: Vec::new(),
            inner_random_stream_key: Vec::new(),
            inner_random_stream: None,
            cipher_id: Uuid::from_bytes(cipher_uuids::AES256),
            compression: CompressionAlgorithm::GZip,
            kdf_parameters: None,
            public_custom_data: None,
            transform_rounds: 0,
        }
    }
}

impl HeaderAggregate {
    /// Empty header for the given revision.
    pub fn new(version: FormatVersion) -> Self {
        Self { version: version.file_version(), ..Default::default() }
    }

    pub fn format_version(&self) -> FormatVersion {
        FormatVersion::from_file_version(self.version)
    }

    pub fn cipher(&self) -> Option<CipherKind> {
        CipherKind::from_uuid(&self.cipher_id)
    }

    /// AES-KDF parameters, created with defaults if absent or of another
    /// algorithm. Legacy transform fields always write through this.
    pub fn ensure_aes_kdf(&mut self) -> &mut KdfParameters {
        let is_aes = self
            .kdf_parameters
            .as_ref()
            .is_some_and(|p| p.algorithm() == Some(KdfAlgorithm::AesKdbx3));
        if !is_aes {
            self.kdf_parameters = Some(KdfParameters::aes_default());
        }
        self.kdf_parameters.get_or_insert_with(KdfParameters::aes_default)
    }

    /// Fill every seed and IV with fresh random bytes, as done before each save.
    ///
    /// The IV length follows the selected cipher (12 bytes for ChaCha20,
    /// 16 otherwise). Legacy-only material is regenerated only for KDBX 3.1.
    /// KDF parameters are left alone; their seed changes with the key.
    pub fn randomize<R: RngCore + ?Sized>(&mut self, rng: &mut R) {
        self.master_seed = random_bytes(rng, SEED_LEN);

        let iv_len = self.cipher().map_or(16, CipherKind::iv_len);
        self.encryption_iv = random_bytes(rng, iv_len);

        if self.format_version().is_legacy() {
            self.stream_start_bytes = random_bytes(rng, SEED_LEN);
            self.inner_random_stream_key = random_bytes(rng, SEED_LEN);
            self.inner_random_stream.get_or_insert(InnerStreamAlgorithm::Salsa20);
        }
    }

    /// One-line description for logs. Never includes secret material.
    pub fn summary(&self) -> String {
        format!(
            "{} cipher={} compression={:?} kdf={} seed_len={} iv_len={}",
            self.format_version(),
            self.cipher()
                .map_or_else(|| fmt_bytes(self.cipher_id.as_bytes()), |c| format!("{c:?}")),
            self.compression,
            self.kdf_parameters
                .as_ref()
                .and_then(KdfParameters::algorithm)
                .map_or_else(|| "none".to_owned(), |a| format!("{a:?}")),
            self.master_seed.len(),
            self.encryption_iv.len(),
        )
    }
}

fn random_bytes<R: RngCore + ?Sized>(rng: &mut R, len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    rng.fill_bytes(&mut out);
    out
}

/// Hex for binary, quoted text for printable ASCII.
pub fn fmt_bytes(b: &[u8]) -> String {
    if !b.is_empty() && b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}

/// Every failure aborts the whole parse or write; there is no partial header.
#[derive(Debug, Error)]
pub enum HeaderError {
    /// Signature mismatch or a version newer than the critical mask allows.
    /// Values not read yet are reported as 0.
    #[error("unsupported file: signature 0x{signature1:08x}/0x{signature2:08x}, version 0x{version:08x}")]
    VersionRejected { signature1: u32, signature2: u32, version: u32 },

    /// Stream ended inside a field or before `EndOfHeader`.
    #[error("header truncated")]
    TruncatedInput,

    #[error("invalid cipher id: {len} bytes, expected 16")]
    InvalidCipherId { len: usize },

    #[error("invalid compression flags: {len} bytes, expected 4")]
    InvalidCompressionFlags { len: usize },

    #[error("unrecognized compression flag: {raw}")]
    UnrecognizedCompressionFlag { raw: u32 },

    /// Wrong payload size (`raw` is `None`) or an id outside the registry.
    #[error("invalid inner random stream id: {len} byte payload, value {raw:?}")]
    InvalidStreamId { len: usize, raw: Option<u32> },

    #[error("invalid header field id: {0}")]
    InvalidHeaderField(u8),

    #[error("invalid master seed: {len} bytes, expected 32")]
    InvalidMasterSeed { len: usize },

    #[error("invalid transform rounds: {len} bytes, expected 8")]
    InvalidTransformRounds { len: usize },

    /// Declared payload length above the configured bound.
    #[error("header field {id} too large: {len} > {max}")]
    FieldTooLarge { id: u8, len: u64, max: u64 },

    #[error("invalid parameter map in field {id}: {source}")]
    InvalidParameters {
        id: u8,
        #[source]
        source: ParamsError,
    },

    /// Total header size above the configured bound.
    #[error("header too large: {len} > {max}")]
    HeaderTooLarge { len: u64, max: u64 },

    /// Hash and HMAC trailers only exist after a KDBX 4 header.
    #[error("{0} header has no hash/HMAC trailer")]
    TrailerNotSupported(FormatVersion),

    #[error("KDBX 4 header requires KDF parameters")]
    MissingKdfParameters,

    /// Stored SHA-256 does not match the header bytes.
    #[error("header hash mismatch (file corrupted)")]
    HeaderHashMismatch,

    /// Stored HMAC does not match: tampered header or wrong key.
    #[error("header HMAC mismatch (wrong key or tampered header)")]
    HeaderHmacMismatch,

    #[error("cryptographic primitive unavailable: {0}")]
    CryptoUnavailable(&'static str),

    #[error("I/O error: {0}")]
    Io(#[source] io::Error),
}

/// Allow `?` on std::io::Error; a short read is a truncated header.
impl From<io::Error> for HeaderError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            HeaderError::TruncatedInput
        } else {
            HeaderError::Io(e)
        }
    }
}
