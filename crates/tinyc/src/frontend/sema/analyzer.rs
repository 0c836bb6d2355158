//! Semantic analyzer - validated construction of AST nodes
//!
//! The parser never builds a node that needs checking by itself. It hands the
//! pieces to [`Sema`], which resolves names against the [`Scope`], reports
//! problems into the caller's [`Diagnostics`] and always returns a node, so
//! parsing carries on after an error.

use super::scope::{Scope, SymbolKind};
use crate::common::{DiagId, Diagnostics};
use crate::frontend::ast::*;
use crate::frontend::lexer::Token;
use crate::types::CType;

/// Semantic analyzer owning the scope stack
#[derive(Debug, Default)]
pub struct Sema {
    scope: Scope,
}

impl Sema {
    pub fn new() -> Self {
        Self { scope: Scope::new() }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn enter_scope(&mut self) {
        self.scope.enter_scope();
    }

    pub fn exit_scope(&mut self) {
        self.scope.exit_scope();
    }

    /// Declare the identifier in `token` in the innermost frame
    ///
    /// A same-frame redeclaration is reported, together with a note at the
    /// first declaration, and the first declaration stays in effect.
    pub fn variable_decl(&mut self, ty: CType, token: &Token, diags: &mut Diagnostics) -> Stmt {
        let name = token.name().unwrap_or_default();

        if let Some(prev) = self.scope.find_in_current_frame(name) {
            let (prev_span, prev_pos) = (prev.span, prev.pos);
            diags.report(token.span, token.pos, DiagId::Redefined, &[name]);
            diags.report(prev_span, prev_pos, DiagId::PreviousDefinition, &[name]);
        } else {
            self.scope
                .add_symbol(name, SymbolKind::LocalVariable, ty, token.span, token.pos);
        }

        Stmt::VariableDecl(VariableDecl {
            token: token.clone(),
            name: name.to_string(),
            ty,
        })
    }

    /// Resolve a variable read
    pub fn variable_access(&self, token: &Token, diags: &mut Diagnostics) -> Expr {
        let name = token.name().unwrap_or_default();

        let ty = match self.scope.find_symbol(name) {
            Some(symbol) => Some(symbol.ty),
            None => {
                diags.report(token.span, token.pos, DiagId::Undefined, &[name]);
                None
            }
        };

        Expr::VariableAccess(VariableAccessExpr {
            token: token.clone(),
            name: name.to_string(),
            ty,
        })
    }

    /// Build `target = value`; `token` is the `=`
    pub fn assign(&self, target: Expr, value: Expr, token: &Token, diags: &mut Diagnostics) -> Expr {
        if !target.is_lvalue() {
            diags.report(token.span, token.pos, DiagId::LvalueRequired, &[]);
        }

        let ty = target.ty();
        Expr::Assign(AssignExpr {
            token: token.clone(),
            target: Box::new(target),
            value: Box::new(value),
            ty,
        })
    }

    /// Every operator is defined on `int` and yields `int`
    pub fn binary(&self, left: Expr, op: BinaryOp, right: Expr, token: &Token) -> Expr {
        Expr::Binary(BinaryExpr {
            token: token.clone(),
            op,
            left: Box::new(left),
            right: Box::new(right),
            ty: CType::int(),
        })
    }

    pub fn number(&self, ty: CType, token: &Token) -> Expr {
        Expr::Number(NumberExpr {
            token: token.clone(),
            value: token.value().unwrap_or(0),
            ty,
        })
    }

    pub fn decl_stmts(&self, decls: Vec<Stmt>, token: &Token) -> Stmt {
        Stmt::DeclStmts(DeclStmts {
            token: token.clone(),
            decls,
        })
    }

    pub fn block(&self, stmts: Vec<Stmt>, token: &Token) -> Stmt {
        Stmt::Block(BlockStmts {
            token: token.clone(),
            stmts,
        })
    }

    pub fn if_stmt(
        &self,
        cond: Expr,
        then_branch: Option<Stmt>,
        else_branch: Option<Stmt>,
        token: &Token,
    ) -> Stmt {
        Stmt::If(IfStmt {
            token: token.clone(),
            cond,
            then_branch: then_branch.map(Box::new),
            else_branch: else_branch.map(Box::new),
        })
    }

    pub fn for_stmt(
        &self,
        id: LoopId,
        init: Option<Stmt>,
        cond: Option<Expr>,
        step: Option<Expr>,
        body: Option<Stmt>,
        token: &Token,
    ) -> Stmt {
        Stmt::For(ForStmt {
            token: token.clone(),
            id,
            init: init.map(Box::new),
            cond,
            step,
            body: body.map(Box::new),
        })
    }

    pub fn break_stmt(&self, target: LoopId, token: &Token) -> Stmt {
        Stmt::Break(BreakStmt {
            token: token.clone(),
            target,
        })
    }

    pub fn continue_stmt(&self, target: LoopId, token: &Token) -> Stmt {
        Stmt::Continue(ContinueStmt {
            token: token.clone(),
            target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{Position, Span};
    use crate::frontend::lexer::TokenKind;

    fn ident(name: &str, start: usize) -> Token {
        Token::new(
            TokenKind::Identifier(name.to_string()),
            Span::new(start, start + name.len()),
            Position::new(1, start as u32 + 1),
        )
    }

    fn num(value: i32, start: usize) -> Token {
        Token::new(TokenKind::Number(value), Span::new(start, start + 1), Position::new(1, start as u32 + 1))
    }

    fn eq(start: usize) -> Token {
        Token::new(TokenKind::Equal, Span::new(start, start + 1), Position::new(1, start as u32 + 1))
    }

    #[test]
    fn test_declare_then_access() {
        let mut sema = Sema::new();
        let mut diags = Diagnostics::new();

        sema.variable_decl(CType::int(), &ident("a", 4), &mut diags);
        let access = sema.variable_access(&ident("a", 10), &mut diags);

        assert!(diags.is_empty());
        assert_eq!(access.ty(), Some(CType::int()));
    }

    #[test]
    fn test_redefinition_in_same_frame() {
        let mut sema = Sema::new();
        let mut diags = Diagnostics::new();

        sema.variable_decl(CType::int(), &ident("a", 4), &mut diags);
        let second = sema.variable_decl(CType::int(), &ident("a", 11), &mut diags);

        assert!(matches!(second, Stmt::VariableDecl(ref d) if d.name == "a"));
        assert_eq!(diags.count_of(DiagId::Redefined), 1);
        assert_eq!(diags.error_count(), 1);

        let note = diags.iter().find(|d| d.id == DiagId::PreviousDefinition).unwrap();
        assert_eq!(note.span, Span::new(4, 5));
        // the first declaration wins
        assert_eq!(sema.scope().find_symbol("a").map(|s| s.span.start), Some(4));
    }

    #[test]
    fn test_shadowing_in_nested_frame() {
        let mut sema = Sema::new();
        let mut diags = Diagnostics::new();

        sema.variable_decl(CType::int(), &ident("x", 0), &mut diags);
        sema.enter_scope();
        sema.variable_decl(CType::int(), &ident("x", 20), &mut diags);
        assert_eq!(sema.scope().find_symbol("x").map(|s| s.span.start), Some(20));
        sema.exit_scope();

        assert!(diags.is_empty());
        assert_eq!(sema.scope().find_symbol("x").map(|s| s.span.start), Some(0));
    }

    #[test]
    fn test_undefined_access() {
        let sema = Sema::new();
        let mut diags = Diagnostics::new();

        let expr = sema.variable_access(&ident("ghost", 0), &mut diags);

        assert_eq!(expr.ty(), None);
        assert_eq!(diags.count_of(DiagId::Undefined), 1);
        assert_eq!(diags.iter().next().unwrap().message, "use of undeclared identifier 'ghost'");
    }

    #[test]
    fn test_assign_requires_lvalue() {
        let sema = Sema::new();
        let mut diags = Diagnostics::new();

        let target = sema.number(CType::int(), &num(1, 0));
        let value = sema.number(CType::int(), &num(2, 4));
        let expr = sema.assign(target, value, &eq(2), &mut diags);

        assert!(matches!(expr, Expr::Assign(_)));
        assert_eq!(diags.count_of(DiagId::LvalueRequired), 1);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_binary_is_int() {
        let sema = Sema::new();
        let plus = Token::new(TokenKind::Plus, Span::new(2, 3), Position::new(1, 3));
        let expr = sema.binary(
            sema.number(CType::int(), &num(1, 0)),
            BinaryOp::Add,
            sema.number(CType::int(), &num(2, 4)),
            &plus,
        );
        assert_eq!(expr.ty(), Some(CType::int()));
        assert_eq!(expr.span(), Span::new(0, 5));
    }
}
