// This suite pins the header registries and version handling:

// * registry drift (compression, inner stream, cipher, field ids)
// * the critical version mask
// * revision chosen from the raw file version
// * formatting of binary fields in logs

#[cfg(test)]
mod tests {

use kdbx_header::{
    constants::{cipher_uuids, field_ids, FILE_VERSION_3_1, FILE_VERSION_4},
    headers::{
        fmt_bytes, is_version_supported, parse_cipher_id, CipherKind, CompressionAlgorithm,
        FieldId, FormatVersion, HeaderAggregate, HeaderError, InnerStreamAlgorithm,
    },
    crypto::KdfParameters,
};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use uuid::Uuid;

// ## 1️⃣ Registry verification

    #[test]
    fn compression_flags_known() {
        assert_eq!(CompressionAlgorithm::from_flag(0).unwrap(), CompressionAlgorithm::None);
        assert_eq!(CompressionAlgorithm::from_flag(1).unwrap(), CompressionAlgorithm::GZip);
        assert_eq!(CompressionAlgorithm::GZip.to_flag(), 1);
    }

    #[test]
    fn compression_flag_unknown_rejected() {
        let err = CompressionAlgorithm::from_flag(2).unwrap_err();
        assert!(matches!(err, HeaderError::UnrecognizedCompressionFlag { raw: 2 }));
    }

    proptest! {
        #[test]
        fn prop_every_other_compression_flag_rejected(raw in 2u32..) {
            let err = CompressionAlgorithm::from_flag(raw).unwrap_err();
            prop_assert!(matches!(err, HeaderError::UnrecognizedCompressionFlag { raw: r } if r == raw), "expected UnrecognizedCompressionFlag {{ raw: {} }}, got {:?}", raw, err);
        }
    }

    #[test]
    fn inner_stream_ids() {
        for (raw, alg) in [
            (0, InnerStreamAlgorithm::None),
            (1, InnerStreamAlgorithm::ArcFourVariant),
            (2, InnerStreamAlgorithm::Salsa20),
            (3, InnerStreamAlgorithm::ChaCha20),
        ] {
            assert_eq!(InnerStreamAlgorithm::from_id(raw).unwrap(), alg);
            assert_eq!(alg.id(), raw);
        }
        assert!(InnerStreamAlgorithm::from_id(4).is_err());
    }

    #[test]
    fn cipher_registry() {
        for kind in [CipherKind::Aes256, CipherKind::Twofish, CipherKind::ChaCha20] {
            assert_eq!(CipherKind::from_uuid(&kind.uuid()), Some(kind));
        }
        assert_eq!(CipherKind::ChaCha20.iv_len(), 12);
        assert_eq!(CipherKind::Aes256.iv_len(), 16);
        assert_eq!(CipherKind::Twofish.iv_len(), 16);
        assert_eq!(CipherKind::from_uuid(&Uuid::nil()), None);
    }

    #[test]
    fn parse_cipher_id_checks_length() {
        assert_eq!(
            parse_cipher_id(&cipher_uuids::CHACHA20).unwrap(),
            Uuid::from_bytes(cipher_uuids::CHACHA20)
        );
        assert!(matches!(parse_cipher_id(&[0; 17]), Err(HeaderError::InvalidCipherId { len: 17 })));
    }

    #[test]
    fn field_ids_match_wire_values() {
        assert_eq!(FieldId::try_from(field_ids::END_OF_HEADER).unwrap(), FieldId::EndOfHeader);
        assert_eq!(FieldId::try_from(field_ids::KDF_PARAMETERS).unwrap(), FieldId::KdfParameters);
        assert_eq!(FieldId::try_from(field_ids::PUBLIC_CUSTOM_DATA).unwrap(), FieldId::PublicCustomData);
        assert!(FieldId::try_from(13u8).is_err());
    }

    #[test]
    fn legacy_only_fields() {
        assert!(FieldId::TransformSeed.is_legacy_only());
        assert!(FieldId::TransformRounds.is_legacy_only());
        assert!(FieldId::InnerRandomStreamKey.is_legacy_only());
        assert!(FieldId::InnerRandomStreamId.is_legacy_only());
        assert!(!FieldId::MasterSeed.is_legacy_only());
        assert!(!FieldId::KdfParameters.is_legacy_only());
    }

// ## 2️⃣ Versions

    #[test]
    fn version_mask() {
        assert!(is_version_supported(FILE_VERSION_3_1));
        assert!(is_version_supported(FILE_VERSION_4));
        assert!(is_version_supported(0x0002_0000));
        assert!(is_version_supported(0x0004_FFFF));
        assert!(!is_version_supported(0x0005_0000));
        assert!(!is_version_supported(u32::MAX));
    }

    #[test]
    fn revision_follows_file_version() {
        assert_eq!(FormatVersion::from_file_version(FILE_VERSION_3_1), FormatVersion::Kdbx3);
        assert_eq!(FormatVersion::from_file_version(0x0003_FFFF), FormatVersion::Kdbx3);
        assert_eq!(FormatVersion::from_file_version(FILE_VERSION_4), FormatVersion::Kdbx4);
        assert!(FormatVersion::Kdbx3 < FormatVersion::Kdbx4);
    }

    #[test]
    fn format_version_display() {
        assert_eq!(FormatVersion::Kdbx3.to_string(), "KDBX 3.1");
        assert_eq!(FormatVersion::Kdbx4.to_string(), "KDBX 4.0");
    }

// ## 3️⃣ Aggregate

    #[test]
    fn default_aggregate() {
        let h = HeaderAggregate::default();
        assert_eq!(h.format_version(), FormatVersion::Kdbx4);
        assert_eq!(h.cipher(), Some(CipherKind::Aes256));
        assert_eq!(h.compression, CompressionAlgorithm::GZip);
        assert_eq!(h.master_seed, vec![0u8; 32]);
        assert!(h.kdf_parameters.is_none());
    }

    #[test]
    fn ensure_aes_kdf_replaces_other_algorithms() {
        let mut h = HeaderAggregate::new(FormatVersion::Kdbx3);
        h.kdf_parameters = Some(KdfParameters::argon2_default());
        assert!(h.ensure_aes_kdf().is_legacy_aes());

        h.ensure_aes_kdf().set_u64("R", 7);
        assert_eq!(h.ensure_aes_kdf().rounds(), Some(7));
    }

    #[test]
    fn randomize_fills_material_for_cipher() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut h = HeaderAggregate::new(FormatVersion::Kdbx4);
        h.cipher_id = CipherKind::ChaCha20.uuid();
        h.randomize(&mut rng);

        assert_eq!(h.master_seed.len(), 32);
        assert_ne!(h.master_seed, vec![0u8; 32]);
        assert_eq!(h.encryption_iv.len(), 12);
        assert!(h.stream_start_bytes.is_empty());
        assert!(h.inner_random_stream_key.is_empty());

        let mut legacy = HeaderAggregate::new(FormatVersion::Kdbx3);
        legacy.randomize(&mut rng);
        assert_eq!(legacy.encryption_iv.len(), 16);
        assert_eq!(legacy.stream_start_bytes.len(), 32);
        assert_eq!(legacy.inner_random_stream_key.len(), 32);
        assert_eq!(legacy.inner_random_stream, Some(InnerStreamAlgorithm::Salsa20));
    }

    #[test]
    fn summary_has_no_seed_bytes() {
        let mut h = HeaderAggregate::default();
        h.master_seed = vec![0xAB; 32];
        let s = h.summary();
        assert!(s.contains("KDBX 4"));
        assert!(!s.contains("abab"));
    }

// ## 4️⃣ Formatting

    #[test]
    fn summary_shows_unknown_cipher_as_hex() {
        let mut h = HeaderAggregate::default();
        h.cipher_id = Uuid::from_bytes([0xC7; 16]);
        assert!(h.summary().contains(&format!("cipher=0x{}", "c7".repeat(16))));
        assert!(HeaderAggregate::default().summary().contains("cipher=Aes256"));
    }

    #[test]
    fn fmt_bytes_ascii_and_binary() {
        assert_eq!(fmt_bytes(b"\r\n\r\n"), "0x0d0a0d0a");
        assert_eq!(fmt_bytes(b"hello"), "b\"hello\"");
        assert_eq!(fmt_bytes(&[]), "0x");
    }
}
