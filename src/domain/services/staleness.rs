//! Staleness Evaluator
//!
//! Decides whether a job's output must be regenerated. Checks run cheapest
//! first and stop at the first reason found:
//!
//! 1. force flag
//! 2. no previous record (first build)
//! 3. output artifact missing on disk
//! 4. style differs from the recorded one
//! 5. live input digest differs from the recorded one
//!
//! Output existence is checked before the digest so that an artifact deleted
//! behind our back is rebuilt even when the source is byte-identical.

use std::fmt;

use tracing::debug;

use crate::domain::entities::{BuildRecord, JobDefinition};
use crate::domain::services::ContentDigester;
use crate::domain::value_objects::{ContentHash, Style};
use crate::error::JobError;

/// Why a job must be rebuilt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleReason {
    Forced,
    FirstBuild,
    OutputMissing,
    StyleChanged {
        previous: Style,
        current: Style,
    },
    SourceChanged {
        previous: ContentHash,
        current: ContentHash,
    },
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaleReason::Forced => write!(f, "forced"),
            StaleReason::FirstBuild => write!(f, "first build"),
            StaleReason::OutputMissing => write!(f, "output missing"),
            StaleReason::StyleChanged { previous, current } => {
                write!(f, "style changed ({} -> {})", previous, current)
            }
            StaleReason::SourceChanged { previous, current } => write!(
                f,
                "source changed ({} -> {})",
                previous.short(12),
                current.short(12)
            ),
        }
    }
}

/// Outcome of a staleness evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Output is current; `digest` is the live input digest
    UpToDate { digest: ContentHash },
    Stale(StaleReason),
}

impl Verdict {
    pub fn needs_rebuild(&self) -> bool {
        matches!(self, Verdict::Stale(_))
    }
}

/// Applies the staleness rules to one job
#[derive(Debug, Clone, Copy, Default)]
pub struct StalenessEvaluator {
    digester: ContentDigester,
}

impl StalenessEvaluator {
    pub fn new(digester: ContentDigester) -> Self {
        Self { digester }
    }

    /// Full verdict with the reason for rebuilding.
    ///
    /// Only fails when step 5 has to read an input that cannot be read.
    pub fn evaluate(
        &self,
        job: &JobDefinition,
        record: Option<&BuildRecord>,
        current_style: Style,
        force: bool,
    ) -> Result<Verdict, JobError> {
        let verdict = self.decide(job, record, current_style, force)?;
        debug!(job = job.name(), ?verdict, "evaluated staleness");
        Ok(verdict)
    }

    pub fn needs_rebuild(
        &self,
        job: &JobDefinition,
        record: Option<&BuildRecord>,
        current_style: Style,
        force: bool,
    ) -> Result<bool, JobError> {
        Ok(self
            .evaluate(job, record, current_style, force)?
            .needs_rebuild())
    }

    fn decide(
        &self,
        job: &JobDefinition,
        record: Option<&BuildRecord>,
        current_style: Style,
        force: bool,
    ) -> Result<Verdict, JobError> {
        if force {
            return Ok(Verdict::Stale(StaleReason::Forced));
        }
        let Some(record) = record else {
            return Ok(Verdict::Stale(StaleReason::FirstBuild));
        };
        if !job.output_path().is_file() {
            return Ok(Verdict::Stale(StaleReason::OutputMissing));
        }
        if record.style() != current_style {
            return Ok(Verdict::Stale(StaleReason::StyleChanged {
                previous: record.style(),
                current: current_style,
            }));
        }

        let live = self.digester.digest(job.input_path())?;
        if !live.matches(record.content_digest()) {
            return Ok(Verdict::Stale(StaleReason::SourceChanged {
                previous: record.content_digest().clone(),
                current: live,
            }));
        }
        Ok(Verdict::UpToDate { digest: live })
    }
}
