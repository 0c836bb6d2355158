//! Token definitions

use crate::common::{Position, Span};
use crate::types::CType;
use logos::Logos;

/// Token with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub pos: Position,
    /// Resolved type, present only on number literals
    pub ty: Option<CType>,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span, pos: Position) -> Self {
        let ty = matches!(kind, TokenKind::Number(_)).then(CType::int);
        Self { kind, span, pos, ty }
    }

    /// Literal value of a number token
    pub fn value(&self) -> Option<i32> {
        match self.kind {
            TokenKind::Number(v) => Some(v),
            _ => None,
        }
    }

    /// Spelling of an identifier token
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Same kind as `kind`, ignoring any payload
    pub fn is(&self, kind: &TokenKind) -> bool {
        self.kind.same_kind(kind)
    }
}

/// Line bookkeeping carried by the lexer
///
/// Updated by the newline callback so every token can be given a row and a
/// column without rescanning the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTracker {
    pub row: u32,
    /// Byte offset of the first character of the current line
    pub line_start: usize,
}

impl Default for LineTracker {
    fn default() -> Self {
        Self { row: 1, line_start: 0 }
    }
}

fn newline(lex: &mut logos::Lexer<TokenKind>) -> logos::Skip {
    lex.extras.row += 1;
    lex.extras.line_start = lex.span().end;
    logos::Skip
}

/// Digits accumulate with 32-bit wrap-around, no overflow check
fn number(lex: &mut logos::Lexer<TokenKind>) -> i32 {
    lex.slice()
        .bytes()
        .fold(0i32, |acc, b| acc.wrapping_mul(10).wrapping_add(i32::from(b - b'0')))
}

/// All token kinds
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(extras = LineTracker)]
#[logos(skip r"[ \r]+")]
pub enum TokenKind {
    /// Consumed by the line tracker, never produced
    #[regex(r"\n", newline)]
    Newline,

    // === Keywords ===
    #[token("int")]
    Int,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,

    // === Identifiers and literals ===
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    #[regex(r"[0-9]+", number)]
    Number(i32),

    // === Operators ===
    // Arithmetic
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    // Comparison
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    NotEqual,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,

    // Shift
    #[token("<<")]
    LessLess,
    #[token(">>")]
    GreaterGreater,

    // Bitwise and logical
    #[token("&")]
    Amp,
    #[token("&&")]
    AmpAmp,
    #[token("|")]
    Pipe,
    #[token("||")]
    PipePipe,
    #[token("^")]
    Caret,

    // Assignment
    #[token("=")]
    Equal,

    // Punctuation
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // Special
    Unknown,
    Eof,
}

impl TokenKind {
    /// Compare kinds, ignoring identifier names and literal values
    pub fn same_kind(&self, other: &TokenKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::Break
                | TokenKind::Continue
        )
    }

    /// Spelling used in diagnostics when this kind is expected
    pub fn spelling(&self) -> &'static str {
        match self {
            TokenKind::Newline => "newline",
            TokenKind::Int => "'int'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::For => "'for'",
            TokenKind::Break => "'break'",
            TokenKind::Continue => "'continue'",
            TokenKind::Identifier(_) => "identifier",
            TokenKind::Number(_) => "number",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::EqualEqual => "'=='",
            TokenKind::NotEqual => "'!='",
            TokenKind::Less => "'<'",
            TokenKind::Greater => "'>'",
            TokenKind::LessEqual => "'<='",
            TokenKind::GreaterEqual => "'>='",
            TokenKind::LessLess => "'<<'",
            TokenKind::GreaterGreater => "'>>'",
            TokenKind::Amp => "'&'",
            TokenKind::AmpAmp => "'&&'",
            TokenKind::Pipe => "'|'",
            TokenKind::PipePipe => "'||'",
            TokenKind::Caret => "'^'",
            TokenKind::Equal => "'='",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Semi => "';'",
            TokenKind::Unknown => "unknown",
            TokenKind::Eof => "end of file",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Identifier(s) => write!(f, "identifier '{}'", s),
            TokenKind::Number(v) => write!(f, "number '{}'", v),
            _ => f.write_str(self.spelling()),
        }
    }
}
