//! Content Digest Value Object
//!
//! Fingerprint of a stylesheet's bytes. Two inputs are considered the same
//! source exactly when their digests are equal; timestamps play no part.

use std::fmt;
use std::io::{self, Read};

use sha2::{Digest, Sha256};

/// Read buffer for streamed hashing
const CHUNK_SIZE: usize = 64 * 1024;

/// `sha256:<64 hex digits>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    pub const PREFIX: &'static str = "sha256:";

    /// Wrap a stored digest; a bare hex string gets the algorithm prefix
    pub fn new(stored: &str) -> Self {
        match stored.strip_prefix(Self::PREFIX) {
            Some(_) => Self(stored.to_owned()),
            None => Self([Self::PREFIX, stored].concat()),
        }
    }

    pub fn from_bytes(content: &[u8]) -> Self {
        Self::finish(Sha256::digest(content))
    }

    /// Digest a stream in fixed-size chunks, so large inputs never sit in memory whole
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut sha = Sha256::new();
        let mut chunk = vec![0u8; CHUNK_SIZE];
        loop {
            match reader.read(&mut chunk) {
                Ok(0) => return Ok(Self::finish(sha.finalize())),
                Ok(n) => sha.update(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    fn finish(digest: impl fmt::LowerHex) -> Self {
        Self(format!("{}{:x}", Self::PREFIX, digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex digits only
    pub fn hex(&self) -> &str {
        &self.0[Self::PREFIX.len()..]
    }

    /// Leading `len` hex digits (cache-busting tokens, log lines)
    pub fn short(&self, len: usize) -> &str {
        let hex = self.hex();
        hex.get(..len).unwrap_or(hex)
    }

    pub fn matches(&self, other: &ContentHash) -> bool {
        self == other
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
