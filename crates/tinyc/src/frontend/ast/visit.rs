//! Double-dispatch entry point for AST consumers
//!
//! A consumer (printer, interpreter, code generator) implements one method per
//! node kind and starts the walk with [`Program::accept`]. Recursion into
//! children is the consumer's job; [`Stmt::accept`] and [`Expr::accept`] pick
//! the right method for a child node.

use super::*;

pub trait Visitor {
    type Output;

    fn visit_program(&mut self, program: &Program) -> Self::Output;

    fn visit_decl_stmts(&mut self, node: &DeclStmts) -> Self::Output;
    fn visit_variable_decl(&mut self, node: &VariableDecl) -> Self::Output;
    fn visit_block_stmts(&mut self, node: &BlockStmts) -> Self::Output;
    fn visit_if_stmt(&mut self, node: &IfStmt) -> Self::Output;
    fn visit_for_stmt(&mut self, node: &ForStmt) -> Self::Output;
    fn visit_break_stmt(&mut self, node: &BreakStmt) -> Self::Output;
    fn visit_continue_stmt(&mut self, node: &ContinueStmt) -> Self::Output;

    fn visit_binary_expr(&mut self, node: &BinaryExpr) -> Self::Output;
    fn visit_number_expr(&mut self, node: &NumberExpr) -> Self::Output;
    fn visit_variable_access_expr(&mut self, node: &VariableAccessExpr) -> Self::Output;
    fn visit_assign_expr(&mut self, node: &AssignExpr) -> Self::Output;
}
