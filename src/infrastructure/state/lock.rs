//! Cross-process lock on the state directory
//!
//! Two `stylesmith` processes must not run batches against the same state
//! directory at once. Mutating commands take the lock exclusively, read-only
//! ones take it shared. Within one process, records are still written
//! independently by the worker threads.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::domain::ports::{StateError, StateResult};

const LOCK_FILE: &str = "stylesmith.lock";

/// Held advisory lock; released on drop
#[derive(Debug)]
pub struct StateLock {
    file: File,
    path: PathBuf,
}

impl StateLock {
    /// Exclusive lock for `build` and `clean`
    pub fn exclusive(state_dir: &Path) -> StateResult<Self> {
        Self::acquire(state_dir, true)
    }

    /// Shared lock for read-only commands
    pub fn shared(state_dir: &Path) -> StateResult<Self> {
        Self::acquire(state_dir, false)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn acquire(state_dir: &Path, exclusive: bool) -> StateResult<Self> {
        fs::create_dir_all(state_dir).map_err(|source| StateError::Io {
            path: state_dir.to_path_buf(),
            source,
        })?;

        let path = state_dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| StateError::Io {
                path: path.clone(),
                source,
            })?;

        // Fully qualified: newer std has inherent `File` lock methods with other signatures.
        let result = if exclusive {
            FileExt::try_lock_exclusive(&file)
        } else {
            FileExt::try_lock_shared(&file)
        };
        if let Err(e) = result {
            if e.kind() == fs2::lock_contended_error().kind() {
                return Err(StateError::Locked { path });
            }
            return Err(StateError::Io { path, source: e });
        }

        debug!(path = %path.display(), exclusive, "acquired state lock");
        Ok(Self { file, path })
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
