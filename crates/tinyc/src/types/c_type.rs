//! Built-in source language types
//!
//! The language has exactly one type, a 32-bit signed integer. The
//! representation still records size and alignment so that consumers
//! lowering the tree do not need their own table.

use std::fmt;

/// A source-level type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CType {
    pub kind: CTypeKind,
    /// Size in bytes
    pub size: u32,
    /// Alignment in bytes
    pub align: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CTypeKind {
    Int,
}

impl CType {
    /// The built-in `int`
    pub const fn int() -> Self {
        Self { kind: CTypeKind::Int, size: 4, align: 4 }
    }

    pub fn is_int(&self) -> bool {
        matches!(self.kind, CTypeKind::Int)
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CTypeKind::Int => write!(f, "int"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_layout() {
        let ty = CType::int();
        assert!(ty.is_int());
        assert_eq!((ty.size, ty.align), (4, 4));
        assert_eq!(ty.to_string(), "int");
    }
}
