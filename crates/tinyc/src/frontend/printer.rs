//! AST pretty printer
//!
//! Renders a [`Program`] back to indented, source-like text. Nested binary
//! and assignment operands are parenthesized so the tree shape is visible.

use crate::frontend::ast::*;
use std::fmt::Write;

const INDENT: &str = "  ";

/// Visitor that renders the AST into a string
#[derive(Debug, Default)]
pub struct AstPrinter {
    out: String,
    depth: usize,
}

impl AstPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a whole program
    pub fn print(program: &Program) -> String {
        let mut printer = Self::new();
        program.accept(&mut printer);
        printer.finish()
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expr(expr) => {
                self.indent();
                expr.accept(self);
                self.out.push_str(";\n");
            }
            other => other.accept(self),
        }
    }

    /// Body of `if`/`else`/`for`; blocks stay on the statement's level
    fn branch(&mut self, body: Option<&Stmt>) {
        if let Some(block @ Stmt::Block(_)) = body {
            self.stmt(block);
            return;
        }

        self.depth += 1;
        match body {
            Some(stmt) => self.stmt(stmt),
            None => {
                self.indent();
                self.out.push_str(";\n");
            }
        }
        self.depth -= 1;
    }

    /// `int a, b = 4` without the terminating `;`
    fn inline_decls(&mut self, decls: &DeclStmts) {
        let mut first = true;
        for decl in &decls.decls {
            match decl {
                Stmt::VariableDecl(var) => {
                    if first {
                        let _ = write!(self.out, "{} ", var.ty);
                        first = false;
                    } else {
                        self.out.push_str(", ");
                    }
                    self.out.push_str(&var.name);
                }
                Stmt::Expr(Expr::Assign(init)) => {
                    self.out.push_str(" = ");
                    init.value.accept(self);
                }
                _ => {}
            }
        }
    }

    fn operand(&mut self, expr: &Expr) {
        if matches!(expr, Expr::Binary(_) | Expr::Assign(_)) {
            self.out.push('(');
            expr.accept(self);
            self.out.push(')');
        } else {
            expr.accept(self);
        }
    }
}

impl Visitor for AstPrinter {
    type Output = ();

    fn visit_program(&mut self, program: &Program) {
        for stmt in &program.stmts {
            self.stmt(stmt);
        }
    }

    fn visit_decl_stmts(&mut self, node: &DeclStmts) {
        self.indent();
        self.inline_decls(node);
        self.out.push_str(";\n");
    }

    fn visit_variable_decl(&mut self, node: &VariableDecl) {
        self.indent();
        let _ = writeln!(self.out, "{} {};", node.ty, node.name);
    }

    fn visit_block_stmts(&mut self, node: &BlockStmts) {
        self.indent();
        self.out.push_str("{\n");
        self.depth += 1;
        for stmt in &node.stmts {
            self.stmt(stmt);
        }
        self.depth -= 1;
        self.indent();
        self.out.push_str("}\n");
    }

    fn visit_if_stmt(&mut self, node: &IfStmt) {
        self.indent();
        self.out.push_str("if (");
        node.cond.accept(self);
        self.out.push_str(")\n");
        self.branch(node.then_branch.as_deref());

        if let Some(else_branch) = node.else_branch.as_deref() {
            self.indent();
            self.out.push_str("else\n");
            self.branch(Some(else_branch));
        }
    }

    fn visit_for_stmt(&mut self, node: &ForStmt) {
        self.indent();
        self.out.push_str("for (");
        match node.init.as_deref() {
            Some(Stmt::DeclStmts(decls)) => self.inline_decls(decls),
            Some(Stmt::Expr(expr)) => expr.accept(self),
            _ => {}
        }
        self.out.push(';');
        if let Some(cond) = &node.cond {
            self.out.push(' ');
            cond.accept(self);
        }
        self.out.push(';');
        if let Some(step) = &node.step {
            self.out.push(' ');
            step.accept(self);
        }
        self.out.push_str(")\n");
        self.branch(node.body.as_deref());
    }

    fn visit_break_stmt(&mut self, _node: &BreakStmt) {
        self.indent();
        self.out.push_str("break;\n");
    }

    fn visit_continue_stmt(&mut self, _node: &ContinueStmt) {
        self.indent();
        self.out.push_str("continue;\n");
    }

    fn visit_binary_expr(&mut self, node: &BinaryExpr) {
        self.operand(&node.left);
        let _ = write!(self.out, " {} ", node.op);
        self.operand(&node.right);
    }

    fn visit_number_expr(&mut self, node: &NumberExpr) {
        let _ = write!(self.out, "{}", node.value);
    }

    fn visit_variable_access_expr(&mut self, node: &VariableAccessExpr) {
        self.out.push_str(&node.name);
    }

    fn visit_assign_expr(&mut self, node: &AssignExpr) {
        node.target.accept(self);
        self.out.push_str(" = ");
        node.value.accept(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parser::Parser;
    use pretty_assertions::assert_eq;

    fn render(source: &str) -> String {
        let program = Parser::new(source).parse_program();
        AstPrinter::print(&program)
    }

    #[test]
    fn test_print_declarations() {
        assert_eq!(render("int a, b = 4; a = 1;"), "int a, b = 4;\na = 1;\n");
    }

    #[test]
    fn test_print_nested_control_flow() {
        let source = "int a; for (int i = 0; i < 10; i = i + 1) { if (a == 1) break; else continue; }";
        let expected = "\
int a;
for (int i = 0; i < 10; i = i + 1)
{
  if (a == 1)
    break;
  else
    continue;
}
";
        assert_eq!(render(source), expected);
    }

    #[test]
    fn test_print_makes_grouping_explicit() {
        assert_eq!(
            render("int a, b, c; a && b || c; a = b = 1 + 2 * 3;"),
            "int a, b, c;\n(a && b) || c;\na = b = 1 + (2 * 3);\n"
        );
    }

    #[test]
    fn test_print_empty_parts() {
        assert_eq!(render("for (;;) ; if (1) ;"), "for (;;)\n  ;\nif (1)\n  ;\n");
    }
}
