//! Statement AST nodes

use super::{Expr, LoopId, Visitor};
use crate::frontend::lexer::Token;
use crate::types::CType;

/// Statement node
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// One declared name: the `a` in `int a = 1;`
    VariableDecl(VariableDecl),

    /// Everything one `int ...;` produced, declarations and initializers
    DeclStmts(DeclStmts),

    /// Compound statement: { ... }
    Block(BlockStmts),

    /// If statement: if (cond) then [else else]
    If(IfStmt),

    /// For loop: for (init; cond; step) body
    For(ForStmt),

    Break(BreakStmt),

    Continue(ContinueStmt),

    /// Expression statement: expr;
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    /// The identifier token
    pub token: Token,
    pub name: String,
    pub ty: CType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclStmts {
    /// The `int` token
    pub token: Token,
    /// `VariableDecl` nodes, each followed by its initializing assignment
    pub decls: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmts {
    /// The `{` token
    pub token: Token,
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub token: Token,
    pub cond: Expr,
    pub then_branch: Option<Box<Stmt>>,
    pub else_branch: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub token: Token,
    /// Handle that `break`/`continue` inside the body refer to
    pub id: LoopId,
    pub init: Option<Box<Stmt>>,
    pub cond: Option<Expr>,
    pub step: Option<Expr>,
    pub body: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakStmt {
    pub token: Token,
    /// Innermost enclosing loop; a handle, not an owner
    pub target: LoopId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContinueStmt {
    pub token: Token,
    pub target: LoopId,
}

impl Stmt {
    pub fn token(&self) -> &Token {
        match self {
            Stmt::VariableDecl(s) => &s.token,
            Stmt::DeclStmts(s) => &s.token,
            Stmt::Block(s) => &s.token,
            Stmt::If(s) => &s.token,
            Stmt::For(s) => &s.token,
            Stmt::Break(s) => &s.token,
            Stmt::Continue(s) => &s.token,
            Stmt::Expr(e) => e.token(),
        }
    }

    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Stmt::VariableDecl(s) => visitor.visit_variable_decl(s),
            Stmt::DeclStmts(s) => visitor.visit_decl_stmts(s),
            Stmt::Block(s) => visitor.visit_block_stmts(s),
            Stmt::If(s) => visitor.visit_if_stmt(s),
            Stmt::For(s) => visitor.visit_for_stmt(s),
            Stmt::Break(s) => visitor.visit_break_stmt(s),
            Stmt::Continue(s) => visitor.visit_continue_stmt(s),
            Stmt::Expr(e) => e.accept(visitor),
        }
    }

    /// Find the `for` loop with the given id inside this statement
    pub fn find_loop(&self, id: LoopId) -> Option<&ForStmt> {
        match self {
            Stmt::For(f) if f.id == id => Some(f),
            Stmt::For(f) => f
                .init
                .as_deref()
                .and_then(|s| s.find_loop(id))
                .or_else(|| f.body.as_deref().and_then(|s| s.find_loop(id))),
            Stmt::Block(b) => b.stmts.iter().find_map(|s| s.find_loop(id)),
            Stmt::DeclStmts(d) => d.decls.iter().find_map(|s| s.find_loop(id)),
            Stmt::If(i) => i
                .then_branch
                .as_deref()
                .and_then(|s| s.find_loop(id))
                .or_else(|| i.else_branch.as_deref().and_then(|s| s.find_loop(id))),
            Stmt::VariableDecl(_) | Stmt::Break(_) | Stmt::Continue(_) | Stmt::Expr(_) => None,
        }
    }
}
