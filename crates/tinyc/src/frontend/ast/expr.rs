//! Expression AST nodes

use super::Visitor;
use crate::common::Span;
use crate::frontend::lexer::{Token, TokenKind};
use crate::types::CType;

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Binary operation: a + b, x << y, p && q
    Binary(BinaryExpr),

    /// Integer literal: 42
    Number(NumberExpr),

    /// Read of a declared variable: x
    VariableAccess(VariableAccessExpr),

    /// Assignment: x = y
    Assign(AssignExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    /// The operator token
    pub token: Token,
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub ty: CType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberExpr {
    pub token: Token,
    pub value: i32,
    pub ty: CType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableAccessExpr {
    pub token: Token,
    pub name: String,
    /// Type of the resolved symbol, `None` when the name is undeclared
    pub ty: Option<CType>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    /// The `=` token
    pub token: Token,
    pub target: Box<Expr>,
    pub value: Box<Expr>,
    pub ty: Option<CType>,
}

impl Expr {
    pub fn token(&self) -> &Token {
        match self {
            Expr::Binary(e) => &e.token,
            Expr::Number(e) => &e.token,
            Expr::VariableAccess(e) => &e.token,
            Expr::Assign(e) => &e.token,
        }
    }

    pub fn ty(&self) -> Option<CType> {
        match self {
            Expr::Binary(e) => Some(e.ty),
            Expr::Number(e) => Some(e.ty),
            Expr::VariableAccess(e) => e.ty,
            Expr::Assign(e) => e.ty,
        }
    }

    /// Source range of the whole expression
    pub fn span(&self) -> Span {
        match self {
            Expr::Binary(e) => e.left.span().merge(e.right.span()),
            Expr::Assign(e) => e.target.span().merge(e.value.span()),
            Expr::Number(e) => e.token.span,
            Expr::VariableAccess(e) => e.token.span,
        }
    }

    /// Only variable accesses may appear on the left of `=`
    pub fn is_lvalue(&self) -> bool {
        matches!(self, Expr::VariableAccess(_))
    }

    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Binary(e) => visitor.visit_binary_expr(e),
            Expr::Number(e) => visitor.visit_number_expr(e),
            Expr::VariableAccess(e) => visitor.visit_variable_access_expr(e),
            Expr::Assign(e) => visitor.visit_assign_expr(e),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Bitwise
    Shl,
    Shr,
    BitOr,
    BitXor,
    BitAnd,

    // Comparison
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,

    // Logical
    LogOr,
    LogAnd,
}

impl BinaryOp {
    /// Operator spelled by `kind`, if any
    pub fn from_token(kind: &TokenKind) -> Option<BinaryOp> {
        let op = match kind {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Mod,
            TokenKind::LessLess => BinaryOp::Shl,
            TokenKind::GreaterGreater => BinaryOp::Shr,
            TokenKind::Pipe => BinaryOp::BitOr,
            TokenKind::Caret => BinaryOp::BitXor,
            TokenKind::Amp => BinaryOp::BitAnd,
            TokenKind::EqualEqual => BinaryOp::Eq,
            TokenKind::NotEqual => BinaryOp::Ne,
            TokenKind::Less => BinaryOp::Lt,
            TokenKind::Greater => BinaryOp::Gt,
            TokenKind::LessEqual => BinaryOp::Le,
            TokenKind::GreaterEqual => BinaryOp::Ge,
            TokenKind::PipePipe => BinaryOp::LogOr,
            TokenKind::AmpAmp => BinaryOp::LogAnd,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::BitAnd => "&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::LogOr => "||",
            BinaryOp::LogAnd => "&&",
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge
        )
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::LogAnd | BinaryOp::LogOr)
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
