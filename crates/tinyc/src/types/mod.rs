//! Source language type system
//!
//! A single built-in integer type shared by tokens, symbols and AST nodes.

mod c_type;

pub use c_type::{CType, CTypeKind};
