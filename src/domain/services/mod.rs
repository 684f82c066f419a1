//! Domain Services
//!
//! Stateless logic shared by the use cases.

mod digester;
mod job_registry;
mod staleness;

pub use digester::ContentDigester;
pub use job_registry::{JobEntry, JobRegistry, JobSet, RejectedEntry, ResolvedEntry};
pub use staleness::{StaleReason, StalenessEvaluator, Verdict};
