//! Recursive descent parser for tinyc
//!
//! Syntax errors never abort the parse. Each one is reported into the
//! parser's [`Diagnostics`] and parsing resumes from the current token, so a
//! single run surfaces as many problems as possible.

use crate::common::{DiagId, Diagnostics};
use crate::frontend::ast::*;
use crate::frontend::lexer::{Lexer, Token, TokenKind};
use crate::frontend::sema::Sema;
use crate::types::CType;

/// Recursive descent parser for tinyc
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    sema: Sema,
    diags: Diagnostics,
    /// Enclosing `for` loops, innermost last
    loops: Vec<LoopId>,
    next_loop: u32,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given source
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let mut diags = Diagnostics::new();
        let current = lexer.next_token(&mut diags);
        Self {
            lexer,
            current,
            sema: Sema::new(),
            diags,
            loops: Vec::new(),
            next_loop: 0,
        }
    }

    /// Parse a complete program
    pub fn parse_program(&mut self) -> Program {
        let mut stmts = Vec::new();

        while !self.at_end() {
            if let Some(stmt) = self.parse_stmt() {
                stmts.push(stmt);
            }
        }

        tracing::debug!(
            stmts = stmts.len(),
            diagnostics = self.diags.len(),
            "parsed program"
        );
        Program::new(stmts)
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diags
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diags
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn at_end(&self) -> bool {
        matches!(self.current.kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token(&mut self.diags);
        std::mem::replace(&mut self.current, next)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.current.is(kind)
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind, or report it missing
    ///
    /// On mismatch nothing is consumed.
    fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(&kind) {
            Some(self.advance())
        } else {
            self.report_unexpected(kind.spelling());
            None
        }
    }

    fn report_unexpected(&mut self, expected: &str) {
        let found = self.current_text();
        self.diags.report(
            self.current.span,
            self.current.pos,
            DiagId::UnexpectedToken,
            &[expected, found],
        );
    }

    fn current_text(&self) -> &'a str {
        if self.at_end() {
            return "end of file";
        }
        self.lexer
            .source()
            .get(self.current.span.range())
            .unwrap_or_default()
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Parse one statement; `None` is the null statement
    fn parse_stmt(&mut self) -> Option<Stmt> {
        match &self.current.kind {
            TokenKind::Int => Some(self.parse_decl_stmt()),
            TokenKind::LBrace => Some(self.parse_block_stmt()),
            TokenKind::If => Some(self.parse_if_stmt()),
            TokenKind::For => Some(self.parse_for_stmt()),
            TokenKind::Break => self.parse_break_stmt(),
            TokenKind::Continue => self.parse_continue_stmt(),
            TokenKind::Semi => {
                self.advance();
                None
            }
            _ => Some(self.parse_expr_stmt()),
        }
    }

    fn parse_decl_stmt(&mut self) -> Stmt {
        let int_token = self.advance();
        let ty = CType::int();
        let mut decls = Vec::new();

        loop {
            let Some(name) = self.expect(TokenKind::Identifier(String::new())) else {
                break;
            };
            decls.push(self.sema.variable_decl(ty, &name, &mut self.diags));

            if self.check(&TokenKind::Equal) {
                let eq = self.advance();
                let target = self.sema.variable_access(&name, &mut self.diags);
                let value = self.parse_expr();
                let init = self.sema.assign(target, value, &eq, &mut self.diags);
                decls.push(Stmt::Expr(init));
            }

            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        self.expect(TokenKind::Semi);
        self.sema.decl_stmts(decls, &int_token)
    }

    fn parse_block_stmt(&mut self) -> Stmt {
        let lbrace = self.advance();
        self.sema.enter_scope();

        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            if let Some(stmt) = self.parse_stmt() {
                stmts.push(stmt);
            }
        }

        self.expect(TokenKind::RBrace);
        self.sema.exit_scope();
        self.sema.block(stmts, &lbrace)
    }

    fn parse_if_stmt(&mut self) -> Stmt {
        let if_token = self.advance();
        self.expect(TokenKind::LParen);
        let cond = self.parse_expr();
        self.expect(TokenKind::RParen);

        let then_branch = self.parse_stmt();
        let else_branch = if self.match_token(&TokenKind::Else) {
            self.parse_stmt()
        } else {
            None
        };

        self.sema.if_stmt(cond, then_branch, else_branch, &if_token)
    }

    fn parse_for_stmt(&mut self) -> Stmt {
        let for_token = self.advance();
        self.expect(TokenKind::LParen);
        self.sema.enter_scope();

        // Init
        let init = if self.check(&TokenKind::Int) {
            Some(self.parse_decl_stmt())
        } else if self.match_token(&TokenKind::Semi) {
            None
        } else {
            let expr = self.parse_expr();
            self.expect(TokenKind::Semi);
            Some(Stmt::Expr(expr))
        };

        // Condition
        let cond = if self.check(&TokenKind::Semi) {
            None
        } else {
            Some(self.parse_expr())
        };
        self.expect(TokenKind::Semi);

        // Step
        let step = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr())
        };
        self.expect(TokenKind::RParen);

        let id = LoopId(self.next_loop);
        self.next_loop += 1;
        self.loops.push(id);
        tracing::trace!(loop_id = id.0, depth = self.loops.len(), "enter loop");

        let body = self.parse_stmt();

        self.loops.pop();
        self.sema.exit_scope();
        tracing::trace!(loop_id = id.0, "exit loop");

        self.sema.for_stmt(id, init, cond, step, body, &for_token)
    }

    fn parse_break_stmt(&mut self) -> Option<Stmt> {
        let token = self.advance();
        let target = self.enclosing_loop(&token, "break");
        self.expect(TokenKind::Semi);
        target.map(|id| self.sema.break_stmt(id, &token))
    }

    fn parse_continue_stmt(&mut self) -> Option<Stmt> {
        let token = self.advance();
        let target = self.enclosing_loop(&token, "continue");
        self.expect(TokenKind::Semi);
        target.map(|id| self.sema.continue_stmt(id, &token))
    }

    fn enclosing_loop(&mut self, token: &Token, keyword: &str) -> Option<LoopId> {
        let target = self.loops.last().copied();
        if target.is_none() {
            self.diags
                .report(token.span, token.pos, DiagId::NotInLoop, &[keyword]);
        }
        target
    }

    fn parse_expr_stmt(&mut self) -> Stmt {
        let expr = self.parse_expr();
        self.expect(TokenKind::Semi);
        Stmt::Expr(expr)
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn parse_expr(&mut self) -> Expr {
        if self.check(&TokenKind::Identifier(String::new()))
            && self.lexer.peek_token().is(&TokenKind::Equal)
        {
            return self.parse_assign_expr();
        }

        let left = self.parse_logical_or_expression();

        // `1 = 2`: syntactically an assignment, rejected by sema
        if self.check(&TokenKind::Equal) {
            let eq = self.advance();
            let value = self.parse_expr();
            return self.sema.assign(left, value, &eq, &mut self.diags);
        }

        left
    }

    fn parse_assign_expr(&mut self) -> Expr {
        let name = self.advance();
        let target = self.sema.variable_access(&name, &mut self.diags);
        let eq = self.advance();
        let value = self.parse_expr();
        self.sema.assign(target, value, &eq, &mut self.diags)
    }

    /// One left-associative binary precedence tier
    fn parse_binary_tier(&mut self, ops: &[TokenKind], operand: fn(&mut Self) -> Expr) -> Expr {
        let mut left = operand(self);

        while let Some(op) = ops
            .iter()
            .find(|kind| self.check(kind))
            .and_then(BinaryOp::from_token)
        {
            let op_token = self.advance();
            let right = operand(self);
            left = self.sema.binary(left, op, right, &op_token);
        }

        left
    }

    fn parse_logical_or_expression(&mut self) -> Expr {
        self.parse_binary_tier(&[TokenKind::PipePipe], Self::parse_logical_and_expression)
    }

    fn parse_logical_and_expression(&mut self) -> Expr {
        self.parse_binary_tier(&[TokenKind::AmpAmp], Self::parse_bitwise_or_expression)
    }

    fn parse_bitwise_or_expression(&mut self) -> Expr {
        self.parse_binary_tier(&[TokenKind::Pipe], Self::parse_bitwise_xor_expression)
    }

    fn parse_bitwise_xor_expression(&mut self) -> Expr {
        self.parse_binary_tier(&[TokenKind::Caret], Self::parse_bitwise_and_expression)
    }

    fn parse_bitwise_and_expression(&mut self) -> Expr {
        self.parse_binary_tier(&[TokenKind::Amp], Self::parse_equality_expression)
    }

    fn parse_equality_expression(&mut self) -> Expr {
        self.parse_binary_tier(
            &[TokenKind::EqualEqual, TokenKind::NotEqual],
            Self::parse_relational_expression,
        )
    }

    fn parse_relational_expression(&mut self) -> Expr {
        self.parse_binary_tier(
            &[
                TokenKind::Greater,
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
            ],
            Self::parse_shift_expression,
        )
    }

    fn parse_shift_expression(&mut self) -> Expr {
        self.parse_binary_tier(
            &[TokenKind::LessLess, TokenKind::GreaterGreater],
            Self::parse_additive_expression,
        )
    }

    fn parse_additive_expression(&mut self) -> Expr {
        self.parse_binary_tier(
            &[TokenKind::Plus, TokenKind::Minus],
            Self::parse_multiplicative_expression,
        )
    }

    fn parse_multiplicative_expression(&mut self) -> Expr {
        self.parse_binary_tier(
            &[TokenKind::Star, TokenKind::Slash, TokenKind::Percent],
            Self::parse_primary_expression,
        )
    }

    fn parse_primary_expression(&mut self) -> Expr {
        match &self.current.kind {
            TokenKind::Identifier(_) => {
                let token = self.advance();
                self.sema.variable_access(&token, &mut self.diags)
            }
            TokenKind::Number(_) => {
                let token = self.advance();
                self.sema.number(CType::int(), &token)
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr();
                self.expect(TokenKind::RParen);
                expr
            }
            _ => {
                self.report_unexpected("expression");
                // Placeholder `0`; always make progress except at end of input
                let token = if self.at_end() {
                    self.current.clone()
                } else {
                    self.advance()
                };
                self.sema.number(CType::int(), &token)
            }
        }
    }
}
