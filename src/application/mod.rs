//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `BuildOrchestrator::build` - evaluate, compile and record each job
//! - `BuildOrchestrator::list` - read-only freshness report
//! - `BuildOrchestrator::clean` - remove generated outputs and their records
//! - `BuildOrchestrator::asset_reference` - public path plus cache token

pub mod orchestrator;

pub use orchestrator::{
    AssetReference, BuildOptions, BuildOrchestrator, BuildReport, BuildSettings, CleanAction,
    CleanEntry, CleanOptions, CleanReport, JobOutcome, JobReport, JobStatus, ListEntry,
    ListReport,
};
