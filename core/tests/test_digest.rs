// # Header digest
//
// Covers determinism, sensitivity to single-bit changes, and that the
// captured bytes stop exactly at the end of the header.

#[cfg(test)]
mod tests {
    use std::io::Read;

    use kdbx_header::{
        config::HeaderConfig,
        crypto::{header_hash, HeaderCapture, KdfParameters},
        headers::{encode_header, read_header, FormatVersion, HeaderAggregate},
    };
    use proptest::prelude::*;
    use sha2::{Digest, Sha256};

    fn sample_header() -> Vec<u8> {
        let mut h = HeaderAggregate::new(FormatVersion::Kdbx4);
        h.master_seed = vec![0x42; 32];
        h.encryption_iv = vec![0x24; 16];
        h.kdf_parameters = Some(KdfParameters::argon2_default());
        encode_header(&h).unwrap()
    }

    // ## 1️⃣ Plain SHA-256

    #[test]
    fn header_hash_is_sha256() {
        let bytes = sample_header();
        let expected: [u8; 32] = Sha256::digest(&bytes).into();
        assert_eq!(header_hash(&bytes), expected);
    }

    #[test]
    fn header_hash_known_vector() {
        // SHA-256("abc")
        assert_eq!(
            hex::encode(header_hash(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    // ## 2️⃣ Capture reader

    #[test]
    fn capture_forwards_and_records() {
        let data = b"header bytes then body";
        let mut cap = HeaderCapture::new(&data[..]);

        let mut first = [0u8; 12];
        cap.read_exact(&mut first).unwrap();
        assert_eq!(&first, b"header bytes");
        assert_eq!(cap.captured(), b"header bytes");
        assert_eq!(cap.finalize_digest(), header_hash(b"header bytes"));

        let (rest, captured) = cap.into_parts();
        assert_eq!(rest, b" then body");
        assert_eq!(captured, b"header bytes");
    }

    #[test]
    fn parse_digest_excludes_body() {
        let header = sample_header();
        let mut file = header.clone();
        file.extend_from_slice(&[0xEE; 64]);

        let parsed = read_header(&mut file.as_slice(), &HeaderConfig::default()).unwrap();
        assert_eq!(parsed.raw, header);
        assert_eq!(parsed.hash, header_hash(&header));
    }

    #[test]
    fn parse_digest_is_deterministic() {
        let header = sample_header();
        let a = read_header(&mut header.as_slice(), &HeaderConfig::default()).unwrap();
        let b = read_header(&mut header.as_slice(), &HeaderConfig::default()).unwrap();
        assert_eq!(a.hash, b.hash);
    }

    // ## 3️⃣ Bit-flip sensitivity

    proptest! {
        #[test]
        fn prop_any_bit_flip_changes_hash(pos in 0usize..1024, bit in 0u8..8) {
            let header = sample_header();
            let pos = pos % header.len();

            let mut flipped = header.clone();
            flipped[pos] ^= 1 << bit;
            prop_assert_ne!(header_hash(&header), header_hash(&flipped));
        }
    }
}
