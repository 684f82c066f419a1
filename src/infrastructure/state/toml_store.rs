//! TOML State Store
//!
//! Implements the StateStore port with one TOML file per job:
//!
//! ```text
//! .stylesmith/
//!   stylesmith.lock
//!   records/
//!     main.toml
//!     admin%2Fdashboard.toml
//! ```
//!
//! Each record is written to a temporary file in the same directory and
//! renamed over the old one, so readers see either the previous record or
//! the new one, never a torn write. Records for different jobs live in
//! different files and never contend.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::domain::entities::BuildRecord;
use crate::domain::ports::{StateError, StateResult, StateStore};
use crate::domain::value_objects::{ContentHash, Style};

/// Current on-disk record format
const RECORD_VERSION: u32 = 1;

/// Subdirectory of the state dir holding the record files
const RECORDS_DIR: &str = "records";

/// Normalize a path for record storage (always use forward slashes).
fn normalize_record_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Parse a normalized record path back into a platform path.
fn parse_record_path(s: &str) -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(s.replace('/', "\\"))
    } else {
        PathBuf::from(s)
    }
}

/// File name for a job's record.
///
/// ASCII letters, digits, `-` and `_` are kept; every other byte becomes
/// `%XX`. The mapping is injective, so distinct names never share a file.
pub fn record_file_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 5);
    for byte in name.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out.push_str(".toml");
    out
}

/// TOML representation of a build record
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlRecord {
    version: u32,
    name: String,
    input_path: String,
    output_path: String,
    content_digest: String,
    style: Style,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_modified_time: Option<DateTime<Utc>>,
}

impl From<&BuildRecord> for TomlRecord {
    fn from(record: &BuildRecord) -> Self {
        Self {
            version: RECORD_VERSION,
            name: record.name().to_string(),
            input_path: normalize_record_path(record.input_path()),
            output_path: normalize_record_path(record.output_path()),
            content_digest: record.content_digest().to_string(),
            style: record.style(),
            source_modified_time: record.source_modified_time(),
        }
    }
}

impl From<TomlRecord> for BuildRecord {
    fn from(record: TomlRecord) -> Self {
        BuildRecord::new(
            record.name,
            parse_record_path(&record.input_path),
            parse_record_path(&record.output_path),
            ContentHash::new(&record.content_digest),
            record.style,
        )
        .with_source_modified_time(record.source_modified_time)
    }
}

/// File-backed state store
#[derive(Debug, Clone)]
pub struct TomlStateStore {
    records_dir: PathBuf,
}

impl TomlStateStore {
    /// Store rooted at `state_dir` (e.g. `.stylesmith`)
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self {
            records_dir: state_dir.as_ref().join(RECORDS_DIR),
        }
    }

    pub fn records_dir(&self) -> &Path {
        &self.records_dir
    }

    fn record_path(&self, name: &str) -> PathBuf {
        self.records_dir.join(record_file_name(name))
    }

    fn read_record(path: &Path) -> Option<BuildRecord> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot read build record, treating as absent");
                return None;
            }
        };

        let record: TomlRecord = match toml::from_str(&content) {
            Ok(record) => record,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupt build record, treating as absent");
                return None;
            }
        };

        if record.version != RECORD_VERSION {
            warn!(
                path = %path.display(),
                found = record.version,
                expected = RECORD_VERSION,
                "build record format mismatch, treating as absent"
            );
            return None;
        }

        Some(record.into())
    }

    fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StateError + '_ {
        move |source| StateError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl StateStore for TomlStateStore {
    fn get(&self, name: &str) -> Option<BuildRecord> {
        Self::read_record(&self.record_path(name)).filter(|record| record.name() == name)
    }

    fn put(&self, record: &BuildRecord) -> StateResult<()> {
        fs::create_dir_all(&self.records_dir).map_err(Self::io_error(&self.records_dir))?;

        let content = toml::to_string_pretty(&TomlRecord::from(record)).map_err(|e| {
            StateError::Serialization {
                name: record.name().to_string(),
                message: e.to_string(),
            }
        })?;

        let path = self.record_path(record.name());
        let mut tmp =
            NamedTempFile::new_in(&self.records_dir).map_err(Self::io_error(&self.records_dir))?;
        tmp.write_all(content.as_bytes())
            .map_err(Self::io_error(tmp.path()))?;
        tmp.as_file().sync_all().map_err(Self::io_error(&path))?;
        tmp.persist(&path).map_err(|e| StateError::Io {
            path: path.clone(),
            source: e.error,
        })?;

        debug!(job = record.name(), path = %path.display(), "stored build record");
        Ok(())
    }

    fn delete(&self, name: &str) -> StateResult<()> {
        let path = self.record_path(name);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(job = name, "deleted build record");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StateError::Io { path, source: e }),
        }
    }

    fn list(&self) -> StateResult<Vec<BuildRecord>> {
        let entries = match fs::read_dir(&self.records_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StateError::Io {
                    path: self.records_dir.clone(),
                    source: e,
                })
            }
        };

        let mut records = Vec::new();
        for entry in entries {
            let entry = entry.map_err(Self::io_error(&self.records_dir))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
                continue;
            }
            if let Some(record) = Self::read_record(&path) {
                records.push(record);
            }
        }
        Ok(records)
    }
}
