//! Orchestrator Results
//!
//! Per-job outcomes for build, list and clean, plus asset references.

use std::fmt;
use std::path::PathBuf;

use crate::domain::services::StaleReason;
use crate::domain::value_objects::{ContentHash, Style};
use crate::error::{ConfigError, JobError};

/// Terminal state of one job in a build
#[derive(Debug)]
pub enum JobOutcome {
    /// Up to date; nothing touched
    Skipped,
    /// Compiled and recorded
    Succeeded {
        reason: StaleReason,
        digest: ContentHash,
        compiler_output: String,
    },
    /// Record left untouched
    Failed(JobError),
}

#[derive(Debug)]
pub struct JobReport {
    pub name: String,
    pub outcome: JobOutcome,
}

/// Outcomes of a build batch, in declaration order
#[derive(Debug, Default)]
pub struct BuildReport {
    pub jobs: Vec<JobReport>,
}

impl BuildReport {
    pub fn built(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Succeeded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &JobError)> {
        self.jobs.iter().filter_map(|job| match &job.outcome {
            JobOutcome::Failed(err) => Some((job.name.as_str(), err)),
            _ => None,
        })
    }

    pub fn get(&self, name: &str) -> Option<&JobOutcome> {
        self.jobs
            .iter()
            .find(|job| job.name == name)
            .map(|job| &job.outcome)
    }

    fn count(&self, pred: impl Fn(&JobOutcome) -> bool) -> usize {
        self.jobs.iter().filter(|job| pred(&job.outcome)).count()
    }
}

/// Freshness of one job as seen by `list`
#[derive(Debug)]
pub enum JobStatus {
    UpToDate,
    NeverBuilt,
    OutputMissing,
    StyleChanged {
        previous: Style,
        current: Style,
    },
    SourceChanged {
        previous: ContentHash,
        current: ContentHash,
    },
    /// Input could not be digested
    Unreadable(JobError),
    /// Entry is broken in configuration
    Invalid(ConfigError),
}

impl JobStatus {
    pub fn is_up_to_date(&self) -> bool {
        matches!(self, JobStatus::UpToDate)
    }

    /// Short machine-readable label
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::UpToDate => "up_to_date",
            JobStatus::NeverBuilt => "never_built",
            JobStatus::OutputMissing => "output_missing",
            JobStatus::StyleChanged { .. } => "style_changed",
            JobStatus::SourceChanged { .. } => "source_changed",
            JobStatus::Unreadable(_) => "unreadable",
            JobStatus::Invalid(_) => "invalid",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::UpToDate => write!(f, "up to date"),
            JobStatus::NeverBuilt => write!(f, "never built"),
            JobStatus::OutputMissing => write!(f, "output missing"),
            JobStatus::StyleChanged { previous, current } => {
                write!(f, "style changed ({} -> {})", previous, current)
            }
            JobStatus::SourceChanged { previous, current } => {
                write!(f, "changed ({} -> {})", previous.hex(), current.hex())
            }
            JobStatus::Unreadable(err) => write!(f, "unreadable: {}", err),
            JobStatus::Invalid(err) => write!(f, "invalid: {}", err),
        }
    }
}

/// One row of a `list` report
#[derive(Debug)]
pub struct ListEntry {
    pub name: String,
    /// `None` for broken configuration entries
    pub output_path: Option<PathBuf>,
    pub style: Option<Style>,
    pub status: JobStatus,
    /// Modification time moved although content did not
    pub touched: bool,
}

/// Read-only status of every configured job, in declaration order
#[derive(Debug, Default)]
pub struct ListReport {
    pub entries: Vec<ListEntry>,
}

impl ListReport {
    pub fn get(&self, name: &str) -> Option<&ListEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn stale(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| !entry.status.is_up_to_date())
            .count()
    }
}

/// What `clean` did (or would do) for one record
#[derive(Debug)]
pub enum CleanAction {
    /// Output deleted, record deleted
    Removed,
    /// Output was already gone; record deleted
    AlreadyAbsent,
    /// Dry run: output would be deleted
    WouldRemove,
    /// Dry run: only the record would be deleted
    WouldForget,
    /// Nothing changed for this record
    Failed(JobError),
}

#[derive(Debug)]
pub struct CleanEntry {
    pub name: String,
    pub output_path: PathBuf,
    pub action: CleanAction,
}

/// Per-record clean results, sorted by name
#[derive(Debug, Default)]
pub struct CleanReport {
    pub entries: Vec<CleanEntry>,
    pub dry_run: bool,
}

impl CleanReport {
    pub fn removed(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| {
                matches!(
                    entry.action,
                    CleanAction::Removed | CleanAction::WouldRemove
                )
            })
            .count()
    }

    pub fn failed(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.action, CleanAction::Failed(_)))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What a templating layer needs to reference a generated stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    pub name: String,
    pub public_path: String,
    /// Leading digest digits of the last successful build; `None` if never built
    pub cache_token: Option<String>,
}

impl AssetReference {
    /// `public_path?token`, or just the path when never built
    pub fn url(&self) -> String {
        match &self.cache_token {
            Some(token) => format!("{}?{}", self.public_path, token),
            None => self.public_path.clone(),
        }
    }
}
