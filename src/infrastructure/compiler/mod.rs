//! External compiler invocation

mod process;

pub use process::{ProcessCompiler, DEFAULT_ARGS};
