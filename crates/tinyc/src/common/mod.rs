//! Common infrastructure shared across the frontend and the driver

mod diagnostics;
mod error;
mod span;

pub use diagnostics::{DiagCategory, DiagId, Diagnostic, Diagnostics, Severity};
pub use error::{CompileError, CompileResult, DiagnosticReporter};
pub use span::{Position, Span};
