//! Compiler port - the external stylesheet compiler
//!
//! The domain only knows that a compiler turns one input file into one output
//! file using a style. How it is invoked lives in the infrastructure layer.

use std::path::Path;

use crate::domain::value_objects::Style;
use crate::error::JobError;

/// Text captured from a successful compiler run (warnings, deprecation notices)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOutput {
    pub output: String,
}

/// Abstract compiler interface
///
/// Implementations:
/// - `ProcessCompiler` - runs an external program
/// - test doubles that copy or record
pub trait Compiler: Send + Sync {
    /// Produce `output` from `input`.
    ///
    /// Fails with `JobError::OutputPath` when the output directory cannot be
    /// created, and `JobError::Compilation` (carrying the compiler's text
    /// verbatim) when the compiler reports failure.
    fn compile(&self, input: &Path, output: &Path, style: Style) -> Result<CompileOutput, JobError>;
}

impl<C: Compiler + ?Sized> Compiler for &C {
    fn compile(&self, input: &Path, output: &Path, style: Style) -> Result<CompileOutput, JobError> {
        (**self).compile(input, output, style)
    }
}
