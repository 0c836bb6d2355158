//! Semantic analysis module
//!
//! Name resolution and validated construction of AST nodes.

mod scope;
mod analyzer;

pub use scope::{Scope, Symbol, SymbolKind};
pub use analyzer::Sema;
