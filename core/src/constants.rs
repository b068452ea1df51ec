//! constants.rs
//! Magic values, format versions, field ids and well-known UUIDs of the KDBX
//! container. Everything here is part of the on-disk contract.

/// Primary file signature shared by every KeePass database generation.
pub const SIGNATURE_1: u32 = 0x9AA2_D903;
/// Secondary signature of KDBX 2.x and later files.
pub const SIGNATURE_2: u32 = 0xB54B_FB67;
/// Secondary signature written by KeePass 2.x pre-releases.
pub const SIGNATURE_2_PRE_RELEASE: u32 = 0xB54B_FB66;

/// Packed `(major << 16) | minor` versions.
pub const FILE_VERSION_3_1: u32 = 0x0003_0001;
pub const FILE_VERSION_4: u32 = 0x0004_0000;
/// Newest version this crate writes.
pub const FILE_VERSION_MAX: u32 = FILE_VERSION_4;
/// High 16 bits: files that differ here are format-incompatible.
pub const FILE_VERSION_CRITICAL_MASK: u32 = 0xFFFF_0000;

/// Signature (8) + version (4).
pub const HEADER_PREFIX_LEN: usize = 12;

/// Payload written into the `EndOfHeader` field.
pub const END_OF_HEADER_PAYLOAD: &[u8] = b"\r\n\r\n";

/// Block index reserved for the header HMAC key; never a real payload block.
pub const HEADER_BLOCK_INDEX: u64 = u64::MAX;

pub const SEED_LEN: usize = 32;
pub const UUID_LEN: usize = 16;
pub const HASH_LEN: usize = 32;
pub const HMAC_LEN: usize = 32;

/// Outer header field ids.
pub mod field_ids {
    pub const END_OF_HEADER: u8 = 0;
    pub const COMMENT: u8 = 1;
    pub const CIPHER_ID: u8 = 2;
    pub const COMPRESSION_FLAGS: u8 = 3;
    pub const MASTER_SEED: u8 = 4;
    pub const TRANSFORM_SEED: u8 = 5; // KDBX 3.1 only
    pub const TRANSFORM_ROUNDS: u8 = 6; // KDBX 3.1 only
    pub const ENCRYPTION_IV: u8 = 7;
    pub const INNER_RANDOM_STREAM_KEY: u8 = 8; // KDBX 3.1 only
    pub const STREAM_START_BYTES: u8 = 9;
    pub const INNER_RANDOM_STREAM_ID: u8 = 10; // KDBX 3.1 only
    pub const KDF_PARAMETERS: u8 = 11; // KDBX 4
    pub const PUBLIC_CUSTOM_DATA: u8 = 12; // KDBX 4
}

/// Cipher UUIDs in file byte order.
pub mod cipher_uuids {
    pub const AES256: [u8; 16] = [
        0x31, 0xC1, 0xF2, 0xE6, 0xBF, 0x71, 0x43, 0x50,
        0xBE, 0x58, 0x05, 0x21, 0x6A, 0xFC, 0x5A, 0xFF,
    ];
    pub const TWOFISH: [u8; 16] = [
        0xAD, 0x68, 0xF2, 0x9F, 0x57, 0x6F, 0x4B, 0xB9,
        0xA3, 0x6A, 0xD4, 0x7A, 0xF9, 0x65, 0x34, 0x6C,
    ];
    pub const CHACHA20: [u8; 16] = [
        0xD6, 0x03, 0x8A, 0x2B, 0x8B, 0x6F, 0x4C, 0xB5,
        0xA5, 0x24, 0x33, 0x9A, 0x31, 0xDB, 0xB5, 0x9A,
    ];
}

/// Key-derivation function UUIDs in file byte order.
pub mod kdf_uuids {
    pub const AES_KDBX3: [u8; 16] = [
        0xC9, 0xD9, 0xF3, 0x9A, 0x62, 0x8A, 0x44, 0x60,
        0xBF, 0x74, 0x0D, 0x08, 0xC1, 0x8A, 0x4F, 0xEA,
    ];
    pub const AES_KDBX4: [u8; 16] = [
        0x7C, 0x02, 0xBB, 0x82, 0x79, 0xA7, 0x4A, 0xC0,
        0x92, 0x7D, 0x11, 0x4A, 0x00, 0x64, 0x82, 0x38,
    ];
    pub const ARGON2D: [u8; 16] = [
        0xEF, 0x63, 0x6D, 0xDF, 0x8C, 0x29, 0x44, 0x4B,
        0x91, 0xF7, 0xA9, 0xA4, 0x03, 0xE3, 0x0A, 0x0C,
    ];
    pub const ARGON2ID: [u8; 16] = [
        0x9E, 0x29, 0x8B, 0x19, 0x56, 0xDB, 0x47, 0x73,
        0xB2, 0x3D, 0xFC, 0x3E, 0xC6, 0xF0, 0xA1, 0xE6,
    ];
}

/// Parameter-map keys understood by the KDF views.
pub mod kdf_keys {
    pub const UUID: &str = "$UUID";
    pub const AES_ROUNDS: &str = "R";
    pub const AES_SEED: &str = "S";
    pub const ARGON2_SALT: &str = "S";
    pub const ARGON2_PARALLELISM: &str = "P";
    pub const ARGON2_MEMORY: &str = "M";
    pub const ARGON2_ITERATIONS: &str = "I";
    pub const ARGON2_VERSION: &str = "V";
}

/// Defaults used when a legacy header needs fresh AES-KDF parameters.
pub const DEFAULT_AES_ROUNDS: u64 = 100_000;

pub const DEFAULT_ARGON2_ITERATIONS: u64 = 10;
pub const DEFAULT_ARGON2_MEMORY: u64 = 64 * 1024 * 1024;
pub const DEFAULT_ARGON2_PARALLELISM: u32 = 2;
pub const ARGON2_VERSION_13: u32 = 0x13;

/// Upper bound for a single header field payload (16 MiB).
pub const DEFAULT_MAX_FIELD_LEN: u32 = 16 * 1024 * 1024;
/// Upper bound for the whole header (32 MiB).
pub const DEFAULT_MAX_HEADER_LEN: u64 = 32 * 1024 * 1024;
