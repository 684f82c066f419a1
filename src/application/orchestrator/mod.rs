//! Build Orchestrator
//!
//! Resolves the job set, evaluates staleness, invokes the compiler and
//! persists build records. Also answers read-only status queries, cleans
//! generated outputs and hands out asset references.

mod options;
mod result;
mod use_case;


pub use options::{BuildOptions, BuildSettings, CleanOptions};
pub use result::{
    AssetReference, BuildReport, CleanAction, CleanEntry, CleanReport, JobOutcome, JobReport,
    JobStatus, ListEntry, ListReport,
};
pub use use_case::{public_path, BuildOrchestrator};
