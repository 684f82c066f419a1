//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod build_events;
pub mod compiler;
pub mod state_store;

pub use build_events::{BuildEvent, BuildEventSink, NoopEventSink};
pub use compiler::{CompileOutput, Compiler};
pub use state_store::{StateError, StateResult, StateStore};
