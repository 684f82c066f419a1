//! Domain Layer
//!
//! The core of Stylesmith: jobs, build records and the staleness rules.
//!
//! ## Structure
//!
//! - `entities/` - Core domain entities (JobDefinition, BuildRecord)
//! - `value_objects/` - Immutable value types (ContentHash, Style)
//! - `services/` - Domain services (ContentDigester, JobRegistry, StalenessEvaluator)
//! - `ports/` - Interface definitions for infrastructure
//!
//! All process spawning and record persistence goes through `ports/`.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
