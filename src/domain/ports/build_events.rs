//! Build Event Port
//!
//! Observers of a build batch: console progress, the `--json` stream, tests.
//!
//! Jobs run on worker threads, so events for different jobs may interleave;
//! events for a single job always arrive in state-machine order.

use std::path::PathBuf;

use crate::domain::value_objects::{ContentHash, Style};

/// Event emitted while a build batch runs
#[derive(Debug, Clone)]
pub enum BuildEvent {
    /// Batch started
    Started { job_count: usize, force: bool },

    /// Staleness evaluation began for a job
    Evaluating { name: String },

    /// Job is up to date; nothing was touched
    Skipped { name: String },

    /// Compiler invocation began
    Compiling {
        name: String,
        reason: String,
        style: Style,
    },

    /// Output produced and record stored
    Succeeded {
        name: String,
        output_path: PathBuf,
        digest: ContentHash,
        compiler_output: String,
    },

    /// Job failed; its record was left untouched
    Failed {
        name: String,
        kind: &'static str,
        error: String,
    },

    /// Batch completed
    Completed {
        built: usize,
        skipped: usize,
        failed: usize,
    },
}

/// Trait for receiving build events
///
/// Implementations:
/// - ConsoleEventSink: human-readable lines
/// - JsonEventSink: one JSON object per line on stdout
/// - NoopEventSink: discards everything
pub trait BuildEventSink: Send + Sync {
    /// Handle a build event
    fn on_event(&self, event: BuildEvent);
}

/// Default sink when nobody is listening
pub struct NoopEventSink;

impl BuildEventSink for NoopEventSink {
    fn on_event(&self, _event: BuildEvent) {}
}
