//! headers/reader.rs
//! Single-pass TLV field reader.
//!
//! State machine:
//! ```text
//! Reading --field--> Reading
//! Reading --id 0---> Done
//! Reading --error--> Error
//! ```
//! `Done` and `Error` are terminal; the iterator is fused once either is
//! reached. The length prefix is 2 bytes for KDBX 3.1 and 4 bytes for
//! KDBX 4, both little-endian. Both the single payload and the running
//! header size are bounded before anything is allocated.

use std::io::Read;

use tracing::{debug, trace};

use crate::config::HeaderConfig;
use crate::constants::{field_ids, END_OF_HEADER_PAYLOAD, HEADER_PREFIX_LEN};
use crate::headers::cursor::{read_bytes, read_u16_le, read_u32_le, read_u8};
use crate::headers::types::{fmt_bytes, FormatVersion, HeaderError};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReaderState {
    Reading,
    Done,
    Error,
}

/// One `(id, size, payload)` triple; lives for a single dispatch step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldRecord {
    pub id: u8,
    pub size: u32,
    pub payload: Vec<u8>,
}

impl FieldRecord {
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

pub struct FieldReader<'a, R: Read + ?Sized> {
    source: &'a mut R,
    version: FormatVersion,
    max_field_len: u32,
    max_header_len: u64,
    /// Header bytes consumed so far, signature prefix included.
    consumed: u64,
    state: ReaderState,
    fields_read: usize,
}

impl<'a, R: Read + ?Sized> FieldReader<'a, R> {
    /// `source` is positioned right after the signature/version prefix.
    pub fn new(source: &'a mut R, version: FormatVersion, config: &HeaderConfig) -> Self {
        Self {
            source,
            version,
            max_field_len: config.max_field_len,
            max_header_len: config.max_header_len,
            consumed: HEADER_PREFIX_LEN as u64,
            state: ReaderState::Reading,
            fields_read: 0,
        }
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Fields read so far, `EndOfHeader` included.
    pub fn fields_read(&self) -> usize {
        self.fields_read
    }

    fn read_field(&mut self) -> Result<FieldRecord, HeaderError> {
        let id = read_u8(&mut *self.source)?;
        // (payload size, id + length prefix size)
        let (size, prefix_len) = match self.version {
            FormatVersion::Kdbx3 => (u32::from(read_u16_le(&mut *self.source)?), 3u64),
            FormatVersion::Kdbx4 => (read_u32_le(&mut *self.source)?, 5u64),
        };

        if size > self.max_field_len {
            return Err(HeaderError::FieldTooLarge {
                id,
                len: u64::from(size),
                max: u64::from(self.max_field_len),
            });
        }

        let total = self.consumed + prefix_len + u64::from(size);
        if total > self.max_header_len {
            return Err(HeaderError::HeaderTooLarge { len: total, max: self.max_header_len });
        }
        self.consumed = total;

        let payload = if size > 0 {
            read_bytes(&mut *self.source, size as usize)?
        } else {
            Vec::new()
        };

        trace!(id, size, "header field read");
        if id == field_ids::END_OF_HEADER && payload != END_OF_HEADER_PAYLOAD {
            debug!(payload = %fmt_bytes(&payload), "unusual end-of-header payload");
        }
        Ok(FieldRecord { id, size, payload })
    }
}

impl<R: Read + ?Sized> Iterator for FieldReader<'_, R> {
    type Item = Result<FieldRecord, HeaderError>;

    /// Next field to dispatch. `None` after `EndOfHeader` or after an error
    /// has been yielded.
    fn next(&mut self) -> Option<Self::Item> {
        if self.state != ReaderState::Reading {
            return None;
        }

        match self.read_field() {
            Ok(field) => {
                self.fields_read += 1;
                if field.id == field_ids::END_OF_HEADER {
                    self.state = ReaderState::Done;
                    None
                } else {
                    Some(Ok(field))
                }
            }
            Err(e) => {
                self.state = ReaderState::Error;
                Some(Err(e))
            }
        }
    }
}
