//! Domain Entities

mod build_record;
mod job;

pub use build_record::BuildRecord;
pub use job::JobDefinition;
