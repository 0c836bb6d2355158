//! Diagnostic records and the accumulator threaded through the frontend
//!
//! The core never aborts on a bad program. Every lexer, parser and sema
//! routine that finds a problem files a [`Diagnostic`] into a [`Diagnostics`]
//! value owned by its caller and carries on with a best-effort result. Whether
//! errors are fatal is decided by whoever inspects the accumulator afterwards.

use super::{Position, Span};
use thiserror::Error;

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

/// Which phase raised a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagCategory {
    Lexical,
    Syntactic,
    Semantic,
}

/// Identifier of every diagnostic the frontend can produce
///
/// Each id owns a severity and a message template with positional
/// placeholders (`{0}`, `{1}`) filled from the arguments given to
/// [`Diagnostics::report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagId {
    /// `{0}`: the offending character
    UnknownChar,
    /// `{0}`: expected spelling, `{1}`: actual token text
    UnexpectedToken,
    /// `{0}`: variable name
    Redefined,
    /// `{0}`: variable name
    PreviousDefinition,
    /// `{0}`: variable name
    Undefined,
    LvalueRequired,
    /// `{0}`: `break` or `continue`
    NotInLoop,
}

impl DiagId {
    pub fn severity(self) -> Severity {
        match self {
            DiagId::PreviousDefinition => Severity::Note,
            _ => Severity::Error,
        }
    }

    pub fn category(self) -> DiagCategory {
        match self {
            DiagId::UnknownChar => DiagCategory::Lexical,
            DiagId::UnexpectedToken => DiagCategory::Syntactic,
            DiagId::Redefined
            | DiagId::PreviousDefinition
            | DiagId::Undefined
            | DiagId::LvalueRequired
            | DiagId::NotInLoop => DiagCategory::Semantic,
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            DiagId::UnknownChar => "unknown character '{0}'",
            DiagId::UnexpectedToken => "expected {0}, but found '{1}'",
            DiagId::Redefined => "redefinition of '{0}'",
            DiagId::PreviousDefinition => "previous definition of '{0}' is here",
            DiagId::Undefined => "use of undeclared identifier '{0}'",
            DiagId::LvalueRequired => "lvalue required as left operand of assignment",
            DiagId::NotInLoop => "'{0}' statement not in loop",
        }
    }

    /// Fill the template's placeholders with `args`
    pub fn format(self, args: &[String]) -> String {
        let mut message = self.template().to_string();
        for (i, arg) in args.iter().enumerate() {
            message = message.replace(&format!("{{{i}}}"), arg);
        }
        message
    }
}

/// A single reported problem
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{pos}: {message}")]
pub struct Diagnostic {
    pub id: DiagId,
    pub severity: Severity,
    pub span: Span,
    pub pos: Position,
    pub args: Vec<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(id: DiagId, span: Span, pos: Position, args: Vec<String>) -> Self {
        let message = id.format(&args);
        Self {
            id,
            severity: id.severity(),
            span,
            pos,
            args,
            message,
        }
    }

    pub fn category(&self) -> DiagCategory {
        self.id.category()
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Ordered collection of diagnostics for one analysis run
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic
    pub fn report(&mut self, span: Span, pos: Position, id: DiagId, args: &[&str]) {
        let diag = Diagnostic::new(id, span, pos, args.iter().map(|a| (*a).to_string()).collect());
        tracing::debug!(target: "tinyc::diag", "{}", diag);
        self.items.push(diag);
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    /// Number of diagnostics with the given id
    pub fn count_of(&self, id: DiagId) -> usize {
        self.items.iter().filter(|d| d.id == id).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
