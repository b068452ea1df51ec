//! database/version.rs
//! Minimum file format needed to store a database without losing data.

use rand::RngCore;
use tracing::debug;

use crate::crypto::kdf::KdfParameters;
use crate::database::types::{Database, Entry, Group};
use crate::headers::registry::{CipherKind, CompressionAlgorithm};
use crate::headers::types::{FormatVersion, HeaderAggregate};

/// KDBX 4 if the KDF has no KDBX 3.1 encoding or custom data is attached
/// anywhere; KDBX 3.1 otherwise. Read-only.
pub fn resolve_format_version(db: &Database) -> FormatVersion {
    if let Some(kdf) = &db.kdf {
        if !kdf.is_legacy_aes() {
            return FormatVersion::Kdbx4;
        }
    }

    let Some(root) = &db.root else {
        return FormatVersion::Kdbx3;
    };

    if db.has_custom_data() || group_has_custom_data(root) {
        FormatVersion::Kdbx4
    } else {
        FormatVersion::Kdbx3
    }
}

/// Depth-first, stops at the first hit.
fn group_has_custom_data(group: &Group) -> bool {
    group.has_custom_data()
        || group.entries.iter().any(entry_has_custom_data)
        || group.groups.iter().any(group_has_custom_data)
}

fn entry_has_custom_data(entry: &Entry) -> bool {
    entry.has_custom_data() || entry.history.iter().any(Entry::has_custom_data)
}

/// Fresh header for saving `db`: resolved version, random seeds, and the
/// database's KDF parameters (AES-KDF defaults if it has none).
pub fn prepare_header<R: RngCore + ?Sized>(
    db: &Database,
    cipher: CipherKind,
    compression: CompressionAlgorithm,
    rng: &mut R,
) -> HeaderAggregate {
    let version = resolve_format_version(db);

    let mut header = HeaderAggregate::new(version);
    header.cipher_id = cipher.uuid();
    header.compression = compression;

    let kdf = db.kdf.clone().unwrap_or_else(KdfParameters::aes_default);
    if version.is_legacy() {
        header.transform_rounds = kdf.rounds().unwrap_or_default();
    }
    header.kdf_parameters = Some(kdf);
    header.randomize(rng);

    debug!("prepared header for save: {}", header.summary());
    header
}
