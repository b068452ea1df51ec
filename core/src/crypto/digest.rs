//! crypto/digest.rs
//! Header content digest.
//!
//! The reader is wrapped in `HeaderCapture`, which forwards every byte and
//! keeps a copy. The captured buffer is hashed once when parsing finishes, so
//! the digest covers exactly the bytes that were interpreted and nothing the
//! caller reads afterwards.

use std::io::{self, Read};

use sha2::{Digest as _, Sha256};

use crate::crypto::types::HeaderHash;

pub struct HeaderCapture<R> {
    inner: R,
    captured: Vec<u8>,
}

impl<R: Read> HeaderCapture<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, captured: Vec::with_capacity(256) }
    }

    /// Bytes consumed so far.
    pub fn captured(&self) -> &[u8] {
        &self.captured
    }

    /// SHA-256 over everything consumed so far.
    pub fn finalize_digest(&self) -> HeaderHash {
        header_hash(&self.captured)
    }

    pub fn into_parts(self) -> (R, Vec<u8>) {
        (self.inner, self.captured)
    }
}

impl<R: Read> Read for HeaderCapture<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.captured.extend_from_slice(&buf[..n]);
        Ok(n)
    }
}

/// SHA-256 of the raw header bytes.
pub fn header_hash(header: &[u8]) -> HeaderHash {
    Sha256::digest(header).into()
}
