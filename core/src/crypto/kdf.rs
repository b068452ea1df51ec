//! crypto/kdf.rs
//! Typed view over the key-derivation parameter map.
//!
//! The header only carries KDF *parameters*; running the KDF is somebody
//! else's job. The map is adopted wholesale from the `KdfParameters` field
//! (KDBX 4) or synthesized from `TransformSeed`/`TransformRounds` (KDBX 3.1).

use rand::RngCore;
use uuid::Uuid;

use crate::constants::{
    kdf_keys, kdf_uuids, ARGON2_VERSION_13, DEFAULT_AES_ROUNDS, DEFAULT_ARGON2_ITERATIONS,
    DEFAULT_ARGON2_MEMORY, DEFAULT_ARGON2_PARALLELISM, SEED_LEN, UUID_LEN,
};
use crate::params::{decode_variant_map, encode_variant_map, ParamsError, VariantDictionary};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KdfAlgorithm {
    /// AES-KDF as used by KDBX 3.1 (the legacy algorithm).
    AesKdbx3,
    /// AES-KDF under its KDBX 4 identifier.
    AesKdbx4,
    Argon2d,
    Argon2id,
}

impl KdfAlgorithm {
    pub fn from_uuid(id: &Uuid) -> Option<Self> {
        match *id.as_bytes() {
            kdf_uuids::AES_KDBX3 => Some(KdfAlgorithm::AesKdbx3),
            kdf_uuids::AES_KDBX4 => Some(KdfAlgorithm::AesKdbx4),
            kdf_uuids::ARGON2D => Some(KdfAlgorithm::Argon2d),
            kdf_uuids::ARGON2ID => Some(KdfAlgorithm::Argon2id),
            _ => None,
        }
    }

    pub fn uuid(self) -> Uuid {
        Uuid::from_bytes(match self {
            KdfAlgorithm::AesKdbx3 => kdf_uuids::AES_KDBX3,
            KdfAlgorithm::AesKdbx4 => kdf_uuids::AES_KDBX4,
            KdfAlgorithm::Argon2d => kdf_uuids::ARGON2D,
            KdfAlgorithm::Argon2id => kdf_uuids::ARGON2ID,
        })
    }

    pub fn is_argon2(self) -> bool {
        matches!(self, KdfAlgorithm::Argon2d | KdfAlgorithm::Argon2id)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KdfParameters {
    map: VariantDictionary,
}

impl KdfParameters {
    /// Wrap an already decoded map. The `$UUID` entry is not required.
    pub fn from_map(map: VariantDictionary) -> Self {
        Self { map }
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ParamsError> {
        decode_variant_map(bytes).map(Self::from_map)
    }

    pub fn encode(&self) -> Vec<u8> {
        encode_variant_map(&self.map)
    }

    /// Legacy AES-KDF with default rounds and a zero seed.
    pub fn aes_default() -> Self {
        let mut p = Self::default();
        p.set_algorithm(KdfAlgorithm::AesKdbx3);
        p.set_u64(kdf_keys::AES_ROUNDS, DEFAULT_AES_ROUNDS);
        p.set_bytes(kdf_keys::AES_SEED, vec![0u8; SEED_LEN]);
        p
    }

    pub fn argon2(variant: KdfAlgorithm, salt: &[u8], iterations: u64, memory: u64, parallelism: u32) -> Self {
        debug_assert!(variant.is_argon2());
        let mut p = Self::default();
        p.set_algorithm(variant);
        p.set_bytes(kdf_keys::ARGON2_SALT, salt.to_vec());
        p.set_u64(kdf_keys::ARGON2_ITERATIONS, iterations);
        p.set_u64(kdf_keys::ARGON2_MEMORY, memory);
        p.map.set_u32(kdf_keys::ARGON2_PARALLELISM, parallelism);
        p.map.set_u32(kdf_keys::ARGON2_VERSION, ARGON2_VERSION_13);
        p
    }

    /// Argon2id with the default cost settings and a zero salt.
    pub fn argon2_default() -> Self {
        Self::argon2(
            KdfAlgorithm::Argon2id,
            &[0u8; SEED_LEN],
            DEFAULT_ARGON2_ITERATIONS,
            DEFAULT_ARGON2_MEMORY,
            DEFAULT_ARGON2_PARALLELISM,
        )
    }

    /// `$UUID` entry, if present and 16 bytes long.
    pub fn algorithm_id(&self) -> Option<Uuid> {
        let raw: [u8; UUID_LEN] = self.map.get_bytes(kdf_keys::UUID)?.try_into().ok()?;
        Some(Uuid::from_bytes(raw))
    }

    pub fn algorithm(&self) -> Option<KdfAlgorithm> {
        self.algorithm_id().as_ref().and_then(KdfAlgorithm::from_uuid)
    }

    pub fn set_algorithm(&mut self, algorithm: KdfAlgorithm) {
        self.set_bytes(kdf_keys::UUID, algorithm.uuid().as_bytes().to_vec());
    }

    /// Only the KDBX 3.1 AES-KDF can be expressed in a KDBX 3.1 header.
    pub fn is_legacy_aes(&self) -> bool {
        self.algorithm() == Some(KdfAlgorithm::AesKdbx3)
    }

    pub fn get_bytes(&self, key: &str) -> Option<&[u8]> {
        self.map.get_bytes(key)
    }

    pub fn set_bytes(&mut self, key: &str, value: Vec<u8>) {
        self.map.set_bytes(key, value);
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.map.get_u64(key)
    }

    pub fn set_u64(&mut self, key: &str, value: u64) {
        self.map.set_u64(key, value);
    }

    /// AES-KDF transform rounds (`R`).
    pub fn rounds(&self) -> Option<u64> {
        self.get_u64(kdf_keys::AES_ROUNDS)
    }

    /// AES-KDF seed or Argon2 salt (both live under `S`).
    pub fn seed(&self) -> Option<&[u8]> {
        self.get_bytes(kdf_keys::AES_SEED)
    }

    /// Replace the seed/salt with fresh random bytes (at least 32).
    pub fn randomize_seed<R: RngCore + ?Sized>(&mut self, rng: &mut R) {
        let len = self.seed().map_or(SEED_LEN, |s| s.len().max(SEED_LEN));
        let mut seed = vec![0u8; len];
        rng.fill_bytes(&mut seed);
        self.set_bytes(kdf_keys::AES_SEED, seed);
    }

    pub fn as_map(&self) -> &VariantDictionary {
        &self.map
    }

    pub fn into_map(self) -> VariantDictionary {
        self.map
    }
}
