//! StateStore port - abstraction for build record persistence
//!
//! Records are keyed by job name. Implementations must make every `put` and
//! `delete` atomic for that record alone; concurrent calls for different job
//! names must not serialize behind one another.

use std::path::PathBuf;

use crate::domain::entities::BuildRecord;

/// Result type for state store operations
pub type StateResult<T> = Result<T, StateError>;

/// State store operation errors
#[derive(Debug)]
pub enum StateError {
    /// I/O error on a record or the store directory
    Io { path: PathBuf, source: std::io::Error },
    /// A record could not be encoded
    Serialization { name: String, message: String },
    /// The store is held by another process
    Locked { path: PathBuf },
}

impl std::fmt::Display for StateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StateError::Io { path, source } => {
                write!(f, "state I/O error on {}: {}", path.display(), source)
            }
            StateError::Serialization { name, message } => {
                write!(f, "cannot encode build record '{}': {}", name, message)
            }
            StateError::Locked { path } => write!(
                f,
                "build state at {} is locked by another stylesmith process",
                path.display()
            ),
        }
    }
}

impl std::error::Error for StateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StateError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Abstract store of build records
///
/// Implemented by the infrastructure layer (`TomlStateStore`, `MemoryStateStore`).
pub trait StateStore: Send + Sync {
    /// Look up the record for a job. Absence (first build) is not an error;
    /// an unreadable record is treated as absent.
    fn get(&self, name: &str) -> Option<BuildRecord>;

    /// Insert or fully replace the record for `record.name()`
    fn put(&self, record: &BuildRecord) -> StateResult<()>;

    /// Remove a record. Removing a missing record succeeds.
    fn delete(&self, name: &str) -> StateResult<()>;

    /// All stored records, in no particular order
    fn list(&self) -> StateResult<Vec<BuildRecord>>;
}

impl<S: StateStore + ?Sized> StateStore for &S {
    fn get(&self, name: &str) -> Option<BuildRecord> {
        (**self).get(name)
    }

    fn put(&self, record: &BuildRecord) -> StateResult<()> {
        (**self).put(record)
    }

    fn delete(&self, name: &str) -> StateResult<()> {
        (**self).delete(name)
    }

    fn list(&self) -> StateResult<Vec<BuildRecord>> {
        (**self).list()
    }
}
