//! tinyc - front end for a small imperative language
//!
//! tinyc accepts a C-like language with a single `int` type, block scoping,
//! `if`/`else`, `for` loops with `break`/`continue`, and the usual binary
//! operators. Source text is turned into a checked AST plus a list of
//! diagnostics; nothing is executed or code-generated here.
//!
//! ## Architecture
//!
//! The library is organized into:
//! - **Frontend** (`frontend/`): lexer, parser, semantic analysis and the AST
//! - **Common** (`common/`): spans, diagnostics and error reporting
//! - **Types** (`types/`): the built-in `int` type

pub mod common;
pub mod frontend;
pub mod types;

// Re-exports for convenience
pub use common::{CompileError, CompileResult, DiagnosticReporter, Diagnostics, Span};
pub use frontend::{AstFormat, CompileContext, Frontend, FrontendConfig, Program};
