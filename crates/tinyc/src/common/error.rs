//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::{Diagnostic as CsDiagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{Buffer, ColorChoice, StandardStream};
use thiserror::Error;

use super::{DiagCategory, Diagnostic, Severity};

/// Pipeline-level failure
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("{count} error(s) generated")]
    Diagnostics { count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompileError {
    pub fn diagnostics(count: usize) -> Self {
        Self::Diagnostics { count }
    }
}

pub type CompileResult<T> = Result<T, CompileError>;

/// Diagnostic reporter for pretty error output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self::with_color(ColorChoice::Auto)
    }

    pub fn with_color(color: ColorChoice) -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(color),
            config: term::Config::default(),
        }
    }

    pub fn add_file(&mut self, name: impl Into<String>, source: impl Into<String>) -> usize {
        self.files.add(name.into(), source.into())
    }

    fn to_codespan(file_id: usize, diag: &Diagnostic) -> CsDiagnostic<usize> {
        let headline = match (diag.severity, diag.category()) {
            (Severity::Note, _) => "note",
            (_, DiagCategory::Lexical) => "Lexer error",
            (_, DiagCategory::Syntactic) => "Syntax error",
            (_, DiagCategory::Semantic) => "Semantic error",
        };

        let base = match diag.severity {
            Severity::Error => CsDiagnostic::error(),
            Severity::Warning => CsDiagnostic::warning(),
            Severity::Note => CsDiagnostic::note(),
        };

        base.with_message(headline).with_labels(vec![
            Label::primary(file_id, diag.span.range()).with_message(&diag.message),
        ])
    }

    /// Print a diagnostic to stderr
    pub fn report(&self, file_id: usize, diag: &Diagnostic) {
        let diagnostic = Self::to_codespan(file_id, diag);
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, &diagnostic);
    }

    /// Render a diagnostic without colour, for logs and tests
    pub fn render(&self, file_id: usize, diag: &Diagnostic) -> String {
        let diagnostic = Self::to_codespan(file_id, diag);
        let mut buffer = Buffer::no_color();
        let _ = term::emit(&mut buffer, &self.config, &self.files, &diagnostic);
        String::from_utf8_lossy(buffer.as_slice()).into_owned()
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
