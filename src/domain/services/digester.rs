//! Content digester - fingerprints input files

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::domain::value_objects::ContentHash;
use crate::error::JobError;

/// Computes content fingerprints of files on disk.
///
/// Files are streamed, never loaded whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentDigester;

impl ContentDigester {
    pub fn new() -> Self {
        Self
    }

    /// SHA-256 fingerprint of the file's full byte stream
    pub fn digest(&self, path: &Path) -> Result<ContentHash, JobError> {
        let file = File::open(path).map_err(|e| JobError::io(path, e))?;
        ContentHash::from_reader(file).map_err(|e| JobError::io(path, e))
    }

    /// Last modification time, if the platform reports one.
    ///
    /// Only ever used as an informational signal; staleness is decided by digest.
    pub fn modified_time(&self, path: &Path) -> Option<DateTime<Utc>> {
        let modified = std::fs::metadata(path).ok()?.modified().ok()?;
        Some(DateTime::<Utc>::from(modified))
    }
}
