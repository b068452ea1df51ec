//! headers/dispatch.rs
//! Field dispatcher: applies one TLV field to the header aggregate.
//!
//! Each effect depends only on the revision, the payload and the aggregate
//! borrowed for this call. Rules:
//! - Unknown ids fail with `InvalidHeaderField`.
//! - KDBX 3.1-only fields are ignored in a KDBX 4 header.
//! - An empty payload skips the field's effect.

use tracing::{trace, warn};

use crate::config::HeaderConfig;
use crate::constants::{kdf_keys, SEED_LEN};
use crate::crypto::kdf::KdfParameters;
use crate::headers::cursor::{payload_u32, payload_u64};
use crate::headers::reader::FieldRecord;
use crate::headers::registry::{parse_cipher_id, CompressionAlgorithm, InnerStreamAlgorithm};
use crate::headers::types::{fmt_bytes, FieldId, FormatVersion, HeaderAggregate, HeaderError};
use crate::params::decode_variant_map;

pub fn dispatch_field(
    version: FormatVersion,
    field: &FieldRecord,
    header: &mut HeaderAggregate,
    config: &HeaderConfig,
) -> Result<(), HeaderError> {
    let id = FieldId::try_from(field.id).map_err(|_| HeaderError::InvalidHeaderField(field.id))?;

    if id.is_legacy_only() && !version.is_legacy() {
        warn!(?id, "legacy header field in {version} header ignored");
        return Ok(());
    }
    if field.is_empty() {
        trace!(?id, "empty header field skipped");
        return Ok(());
    }

    let payload = field.payload.as_slice();
    match id {
        // The reader terminates on this id; never dispatched.
        FieldId::EndOfHeader => {}

        FieldId::Comment => {
            trace!(comment = %fmt_bytes(payload), "header comment ignored");
        }

        FieldId::CipherId => {
            header.cipher_id = parse_cipher_id(payload)?;
        }

        FieldId::CompressionFlags => {
            let raw = payload_u32(payload)
                .ok_or(HeaderError::InvalidCompressionFlags { len: payload.len() })?;
            header.compression = CompressionAlgorithm::from_flag(raw)?;
        }

        FieldId::MasterSeed => {
            if payload.len() != SEED_LEN {
                if config.strict_master_seed {
                    return Err(HeaderError::InvalidMasterSeed { len: payload.len() });
                }
                warn!(len = payload.len(), "master seed is not 32 bytes; kept as is");
            }
            header.master_seed = payload.to_vec();
        }

        FieldId::TransformSeed => {
            header.ensure_aes_kdf().set_bytes(kdf_keys::AES_SEED, payload.to_vec());
        }

        FieldId::TransformRounds => {
            let rounds = payload_u64(payload)
                .ok_or(HeaderError::InvalidTransformRounds { len: payload.len() })?;
            header.ensure_aes_kdf().set_u64(kdf_keys::AES_ROUNDS, rounds);
            header.transform_rounds = rounds;
        }

        FieldId::EncryptionIv => {
            header.encryption_iv = payload.to_vec();
        }

        FieldId::InnerRandomStreamKey => {
            header.inner_random_stream_key = payload.to_vec();
        }

        FieldId::StreamStartBytes => {
            header.stream_start_bytes = payload.to_vec();
        }

        FieldId::InnerRandomStreamId => {
            let raw = payload_u32(payload)
                .ok_or(HeaderError::InvalidStreamId { len: payload.len(), raw: None })?;
            header.inner_random_stream = Some(InnerStreamAlgorithm::from_id(raw)?);
        }

        FieldId::KdfParameters => {
            let map = decode_variant_map(payload)
                .map_err(|source| HeaderError::InvalidParameters { id: field.id, source })?;
            header.kdf_parameters = Some(KdfParameters::from_map(map));
        }

        FieldId::PublicCustomData => {
            let map = decode_variant_map(payload)
                .map_err(|source| HeaderError::InvalidParameters { id: field.id, source })?;
            header.public_custom_data = Some(map);
        }
    }

    trace!(?id, len = payload.len(), "header field applied");
    Ok(())
}
