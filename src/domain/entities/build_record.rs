//! Build record entity - what was produced the last time a job succeeded
//!
//! It's a pure data structure; persistence is handled by a `StateStore`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::domain::entities::JobDefinition;
use crate::domain::value_objects::{ContentHash, Style};

/// Persistent state for one job name.
///
/// `content_digest` is the digest of the input at the moment the artifact at
/// `output_path` was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRecord {
    name: String,
    input_path: PathBuf,
    output_path: PathBuf,
    content_digest: ContentHash,
    style: Style,
    source_modified_time: Option<DateTime<Utc>>,
}

impl BuildRecord {
    pub fn new(
        name: impl Into<String>,
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        content_digest: ContentHash,
        style: Style,
    ) -> Self {
        Self {
            name: name.into(),
            input_path: input_path.into(),
            output_path: output_path.into(),
            content_digest,
            style,
            source_modified_time: None,
        }
    }

    /// Record for a job that was just compiled successfully
    pub fn for_job(
        job: &JobDefinition,
        content_digest: ContentHash,
        style: Style,
        source_modified_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self::new(
            job.name(),
            job.input_path(),
            job.output_path(),
            content_digest,
            style,
        )
        .with_source_modified_time(source_modified_time)
    }

    pub fn with_source_modified_time(mut self, time: Option<DateTime<Utc>>) -> Self {
        self.source_modified_time = time;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn content_digest(&self) -> &ContentHash {
        &self.content_digest
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn source_modified_time(&self) -> Option<DateTime<Utc>> {
        self.source_modified_time
    }
}
