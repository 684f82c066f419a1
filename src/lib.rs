//! Stylesmith - content-addressed incremental build cache for stylesheets
//!
//! Stylesmith keeps a set of named `input -> output` compile jobs up to date.
//! Each job is rebuilt by an external compiler (sass, sassc, ...) only when
//! it is stale: never built, output missing, style changed, or the input's
//! content digest changed.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::{BuildOptions, BuildOrchestrator, BuildReport, BuildSettings, CleanOptions};
pub use config::Config;
pub use domain::entities::{BuildRecord, JobDefinition};
pub use domain::value_objects::{ContentHash, Style};
pub use error::{ConfigError, JobError, StylesmithError, StylesmithResult};
