//! tinyc frontend
//!
//! The frontend is responsible for:
//! 1. Lexing source code into tokens
//! 2. Parsing tokens into an AST
//! 3. Semantic analysis, interleaved with parsing
//!
//! Problems never abort the pipeline; they are collected as [`Diagnostics`]
//! and the caller decides whether they are fatal.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod sema;

use crate::common::{CompileError, CompileResult, DiagnosticReporter, Diagnostics};

pub use ast::Program;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;
pub use printer::AstPrinter;
pub use sema::Sema;

/// How `--dump-ast` renders the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AstFormat {
    /// Indented source-like text
    #[default]
    Tree,
    /// Rust `Debug` output of the node structs
    Debug,
}

/// Configuration options passed to the frontend
#[derive(Debug, Clone, Default)]
pub struct FrontendConfig {
    pub dump_tokens: bool,
    pub dump_ast: bool,
    pub ast_format: AstFormat,
    pub verbose: bool,
    /// Print at most this many diagnostics; `None` prints all
    pub error_limit: Option<usize>,
}

/// Compilation context providing access to diagnostics and file info
pub struct CompileContext<'a> {
    pub filename: String,
    pub file_id: usize,
    pub reporter: &'a DiagnosticReporter,
}

impl<'a> CompileContext<'a> {
    pub fn new(filename: String, file_id: usize, reporter: &'a DiagnosticReporter) -> Self {
        Self { filename, file_id, reporter }
    }
}

/// The tinyc frontend pipeline
#[derive(Debug, Default)]
pub struct Frontend;

impl Frontend {
    pub fn new() -> Self {
        Self
    }

    /// Lex, parse and analyze `source` without rendering anything
    pub fn analyze(&self, source: &str) -> (Program, Diagnostics) {
        let mut parser = Parser::new(source);
        let program = parser.parse_program();
        (program, parser.into_diagnostics())
    }

    /// Compile source code to a checked AST
    ///
    /// Every diagnostic is rendered through `ctx.reporter`, up to the
    /// configured limit. Any error makes the whole compilation fail.
    pub fn compile(
        &self,
        source: &str,
        ctx: &CompileContext,
        config: &FrontendConfig,
    ) -> CompileResult<Program> {
        // Phase 1: Lexing (optional token dump)
        if config.dump_tokens {
            eprintln!("=== Tokens ===");
            eprint!("{}", self.dump_tokens(source));
            eprintln!("=== End Tokens ===\n");
        }

        // Phase 2: Parsing and semantic analysis
        if config.verbose {
            eprintln!("Parsing {}...", ctx.filename);
        }
        tracing::debug!(file = %ctx.filename, bytes = source.len(), "frontend start");

        let (program, diags) = self.analyze(source);

        if config.dump_ast {
            eprintln!("=== AST ===");
            eprint!("{}", self.dump_ast(&program, config.ast_format));
            eprintln!("=== End AST ===\n");
        }

        let limit = config.error_limit.unwrap_or(usize::MAX);
        for diag in diags.iter().take(limit) {
            ctx.reporter.report(ctx.file_id, diag);
        }
        if diags.len() > limit {
            tracing::warn!(
                shown = limit,
                total = diags.len(),
                "diagnostic limit reached"
            );
        }

        if diags.has_errors() {
            return Err(CompileError::diagnostics(diags.error_count()));
        }

        if config.verbose {
            eprintln!("{}: {} statement(s), no errors", ctx.filename, program.stmts.len());
        }
        Ok(program)
    }

    /// One line per token: kind, source text, row and column
    pub fn dump_tokens(&self, source: &str) -> String {
        // Lexical errors surface again during parsing
        let mut scratch = Diagnostics::new();
        let tokens = Lexer::new(source).tokenize_all(&mut scratch);

        tokens
            .iter()
            .map(|token| {
                let text = source.get(token.span.range()).unwrap_or_default();
                format!(
                    "{:?} [ {}, row = {}, col = {} ]\n",
                    token.kind, text, token.pos.row, token.pos.col
                )
            })
            .collect()
    }

    pub fn dump_ast(&self, program: &Program, format: AstFormat) -> String {
        match format {
            AstFormat::Tree => AstPrinter::print(program),
            AstFormat::Debug => format!("{program:#?}\n"),
        }
    }
}
