//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `state/` - Build record stores (TOML files, in-memory) and the state lock
//! - `compiler/` - External compiler process
//! - `events/` - Event sinks (console, NDJSON)

pub mod compiler;
pub mod events;
pub mod state;

pub use compiler::ProcessCompiler;
pub use events::{ConsoleEventSink, JsonEventSink};
pub use state::{MemoryStateStore, StateLock, TomlStateStore};
