// Header authentication: key schedule, tag verification, sealed headers.

#[cfg(test)]
mod tests {
    use hmac::{Hmac, Mac};
    use sha2::{Digest, Sha256, Sha512};

    use kdbx_header::{
        config::HeaderConfig,
        crypto::{compute_header_hmac, derive_hmac_key, hmac_block_key, verify_header_hmac, KdfParameters},
        headers::{encode_header, open_sealed_header, FormatVersion, HeaderAggregate, HeaderError, SealedHeader},
    };

    fn header() -> HeaderAggregate {
        let mut h = HeaderAggregate::new(FormatVersion::Kdbx4);
        h.master_seed = vec![0x01; 32];
        h.encryption_iv = vec![0x02; 16];
        h.kdf_parameters = Some(KdfParameters::argon2_default());
        h
    }

    fn key() -> [u8; 64] {
        derive_hmac_key(&[0x01; 32], &[0xAA; 32])
    }

// ## 1️⃣ Key schedule

    #[test]
    fn hmac_key_is_sha512_of_seed_key_and_one() {
        let mut h = Sha512::new();
        h.update([0x01; 32]);
        h.update([0xAA; 32]);
        h.update([0x01]);
        assert_eq!(key().as_slice(), h.finalize().as_slice());
    }

    #[test]
    fn block_key_prefixes_index() {
        let k = key();
        let mut h = Sha512::new();
        h.update(u64::MAX.to_le_bytes());
        h.update(k);
        assert_eq!(hmac_block_key(u64::MAX, &k).as_slice(), h.finalize().as_slice());
        assert_ne!(hmac_block_key(0, &k), hmac_block_key(u64::MAX, &k));
    }

    #[test]
    fn tag_uses_header_block_key() {
        let k = key();
        let data = b"some header bytes";

        let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(&hmac_block_key(u64::MAX, &k)).unwrap();
        mac.update(data);
        let expected: [u8; 32] = mac.finalize().into_bytes().into();

        assert_eq!(compute_header_hmac(data, &k).unwrap(), expected);
    }

// ## 2️⃣ Verification

    #[test]
    fn verify_accepts_matching_tag() {
        let k = key();
        let tag = compute_header_hmac(b"header", &k).unwrap();
        verify_header_hmac(b"header", &k, &tag).unwrap();
    }

    #[test]
    fn verify_rejects_mutated_header() {
        let k = key();
        let tag = compute_header_hmac(b"header", &k).unwrap();
        let err = verify_header_hmac(b"headeR", &k, &tag).unwrap_err();
        assert!(matches!(err, HeaderError::HeaderHmacMismatch));
    }

    #[test]
    fn verify_rejects_wrong_key() {
        let tag = compute_header_hmac(b"header", &key()).unwrap();
        let other = derive_hmac_key(&[0x01; 32], &[0xAB; 32]);
        assert!(matches!(
            verify_header_hmac(b"header", &other, &tag),
            Err(HeaderError::HeaderHmacMismatch)
        ));
    }

    #[test]
    fn verify_rejects_short_tag() {
        let k = key();
        let tag = compute_header_hmac(b"header", &k).unwrap();
        assert!(verify_header_hmac(b"header", &k, &tag[..16]).is_err());
    }

// ## 3️⃣ Sealed headers

    #[test]
    fn sealed_header_opens() {
        let sealed = SealedHeader::seal(&header(), &key()).unwrap();
        let mut file = sealed.to_bytes();
        assert_eq!(file.len(), sealed.encoded_len());
        file.extend_from_slice(b"body");

        let mut src = file.as_slice();
        let parsed = open_sealed_header(&mut src, &key(), &HeaderConfig::default()).unwrap();
        assert_eq!(parsed.header, header());
        assert_eq!(parsed.hash, sealed.hash);
        assert_eq!(src, b"body");
    }

    #[test]
    fn write_to_matches_to_bytes() {
        let sealed = SealedHeader::seal(&header(), &key()).unwrap();
        let mut out = Vec::new();
        sealed.write_to(&mut out).unwrap();
        assert_eq!(out, sealed.to_bytes());
    }

    #[test]
    fn corrupted_hash_reported_before_hmac() {
        let sealed = SealedHeader::seal(&header(), &key()).unwrap();
        let mut file = sealed.to_bytes();
        let hash_pos = sealed.header.len();
        file[hash_pos] ^= 0x01;

        let err = open_sealed_header(&mut file.as_slice(), &key(), &HeaderConfig::default()).unwrap_err();
        assert!(matches!(err, HeaderError::HeaderHashMismatch));
    }

    #[test]
    fn wrong_key_reported_as_hmac_mismatch() {
        let sealed = SealedHeader::seal(&header(), &key()).unwrap();
        let other = derive_hmac_key(&[0x01; 32], &[0x00; 32]);

        let err = open_sealed_header(&mut sealed.to_bytes().as_slice(), &other, &HeaderConfig::default())
            .unwrap_err();
        assert!(matches!(err, HeaderError::HeaderHmacMismatch));
    }

    #[test]
    fn tampered_header_with_recomputed_hash_fails_hmac() {
        let sealed = SealedHeader::seal(&header(), &key()).unwrap();

        // Swap one IV byte and fix up the plain hash; only the tag can catch it.
        let mut raw = sealed.header.clone();
        let iv_at = raw.windows(16).position(|w| w == [0x02; 16]).unwrap();
        raw[iv_at] = 0x03;
        let forged = SealedHeader {
            hash: Sha256::digest(&raw).into(),
            header: raw,
            hmac: sealed.hmac,
        };

        let err = open_sealed_header(&mut forged.to_bytes().as_slice(), &key(), &HeaderConfig::default())
            .unwrap_err();
        assert!(matches!(err, HeaderError::HeaderHmacMismatch));
    }

    #[test]
    fn missing_trailer_is_truncated() {
        let sealed = SealedHeader::seal(&header(), &key()).unwrap();
        let bytes = sealed.to_bytes();
        let cut = &bytes[..bytes.len() - 1];
        assert!(matches!(
            open_sealed_header(&mut &cut[..], &key(), &HeaderConfig::default()),
            Err(HeaderError::TruncatedInput)
        ));
    }

    #[test]
    fn kdbx3_header_cannot_be_sealed() {
        let legacy = HeaderAggregate::new(FormatVersion::Kdbx3);
        assert!(matches!(
            SealedHeader::seal(&legacy, &key()),
            Err(HeaderError::TrailerNotSupported(FormatVersion::Kdbx3))
        ));

        let raw = encode_header(&legacy).unwrap();
        assert!(matches!(
            SealedHeader::from_raw(raw, &key()),
            Err(HeaderError::TrailerNotSupported(FormatVersion::Kdbx3))
        ));
    }

    #[test]
    fn opening_kdbx3_leaves_body_unread() {
        let mut file = encode_header(&HeaderAggregate::new(FormatVersion::Kdbx3)).unwrap();
        file.extend_from_slice(&[0x5A; 80]);

        let mut src = file.as_slice();
        let err = open_sealed_header(&mut src, &key(), &HeaderConfig::default()).unwrap_err();
        assert!(matches!(err, HeaderError::TrailerNotSupported(FormatVersion::Kdbx3)));
        assert_eq!(src, &[0x5A; 80][..]);
    }
}
