//! Lexer implementation using logos

use super::token::{Token, TokenKind};
use crate::common::{DiagId, Diagnostics, Position, Span};
use logos::Logos;

/// Snapshot of the lexer cursor
///
/// A plain value copy of the underlying logos lexer, line bookkeeping
/// included. Restoring it rewinds the lexer exactly.
#[derive(Clone)]
pub struct LexerState<'a> {
    inner: logos::Lexer<'a, TokenKind>,
}

/// Lexer for tinyc source code
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    saved: Option<LexerState<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            saved: None,
        }
    }

    /// Get the next token
    ///
    /// Unknown characters are reported into `diags` and returned as
    /// [`TokenKind::Unknown`]; lexing resumes after them. Once the input is
    /// exhausted every call yields [`TokenKind::Eof`].
    pub fn next_token(&mut self, diags: &mut Diagnostics) -> Token {
        match self.inner.next() {
            Some(Ok(kind)) => {
                let span = Span::from(self.inner.span());
                Token::new(kind, span, self.position_of(span.start))
            }
            Some(Err(())) => {
                let span = Span::from(self.inner.span());
                let pos = self.position_of(span.start);
                let ch = self
                    .source()
                    .get(span.start..)
                    .and_then(|rest| rest.chars().next())
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                diags.report(span, pos, DiagId::UnknownChar, &[&ch.escape_default().to_string()]);
                Token::new(TokenKind::Unknown, span, pos)
            }
            None => {
                let len = self.source().len();
                Token::new(TokenKind::Eof, Span::new(len, len), self.position_of(len))
            }
        }
    }

    fn position_of(&self, offset: usize) -> Position {
        let line = self.inner.extras;
        Position::new(line.row, (offset - line.line_start + 1) as u32)
    }

    /// Remember the current cursor; a later [`restore_state`](Self::restore_state)
    /// rewinds to it. Only one snapshot is kept.
    pub fn save_state(&mut self) {
        self.saved = Some(LexerState {
            inner: self.inner.clone(),
        });
    }

    /// Rewind to the last saved cursor
    pub fn restore_state(&mut self) {
        match self.saved.take() {
            Some(state) => self.inner = state.inner,
            None => tracing::warn!("restore_state called without a saved state"),
        }
    }

    /// Look at the next token without consuming it
    ///
    /// Diagnostics raised while peeking are dropped; they are reported again
    /// when the token is actually consumed.
    pub fn peek_token(&mut self) -> Token {
        self.save_state();
        let mut scratch = Diagnostics::new();
        let token = self.next_token(&mut scratch);
        self.restore_state();
        token
    }

    /// Tokenize the entire source and return all tokens, `Eof` included
    pub fn tokenize_all(mut self, diags: &mut Diagnostics) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token(diags);
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Get the source being lexed
    pub fn source(&self) -> &'a str {
        self.inner.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut diags = Diagnostics::new();
        Lexer::new(source)
            .tokenize_all(&mut diags)
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("int if else for break continue"),
            vec![
                TokenKind::Int,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::For,
                TokenKind::Break,
                TokenKind::Continue,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(
            kinds("foo _bar integer if2"),
            vec![
                TokenKind::Identifier("foo".into()),
                TokenKind::Identifier("_bar".into()),
                TokenKind::Identifier("integer".into()),
                TokenKind::Identifier("if2".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(
            kinds("0 42 2147483647 2147483648"),
            vec![
                TokenKind::Number(0),
                TokenKind::Number(42),
                TokenKind::Number(i32::MAX),
                TokenKind::Number(i32::MIN),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators_are_greedy() {
        assert_eq!(
            kinds("<= >= == != << >> && || < > = & | ^"),
            vec![
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::EqualEqual,
                TokenKind::NotEqual,
                TokenKind::LessLess,
                TokenKind::GreaterGreater,
                TokenKind::AmpAmp,
                TokenKind::PipePipe,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Equal,
                TokenKind::Amp,
                TokenKind::Pipe,
                TokenKind::Caret,
                TokenKind::Eof,
            ]
        );
        assert_eq!(kinds("1<=2"), vec![
            TokenKind::Number(1),
            TokenKind::LessEqual,
            TokenKind::Number(2),
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            kinds("+-*/%(){},;"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Comma,
                TokenKind::Semi,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_rows_and_columns() {
        let source = "int aa, b = 4;\naa = 1;";
        let mut diags = Diagnostics::new();
        let positions: Vec<(u32, u32)> = Lexer::new(source)
            .tokenize_all(&mut diags)
            .iter()
            .map(|t| (t.pos.row, t.pos.col))
            .collect();

        assert_eq!(
            positions,
            vec![
                (1, 1),
                (1, 5),
                (1, 7),
                (1, 9),
                (1, 11),
                (1, 13),
                (1, 14),
                (2, 1),
                (2, 4),
                (2, 6),
                (2, 7),
                (2, 8),
            ]
        );
        assert!(diags.is_empty());
    }

    #[test]
    fn test_spans_reproduce_text() {
        let source = "int count = 120;\r\nif (count >= 7) { count = count << 2; }";
        let mut diags = Diagnostics::new();
        for token in Lexer::new(source).tokenize_all(&mut diags) {
            let text = &source[token.span.range()];
            match &token.kind {
                TokenKind::Eof => assert!(text.is_empty()),
                TokenKind::Number(v) => assert_eq!(text.parse::<i32>().unwrap(), *v),
                TokenKind::Identifier(name) => assert_eq!(text, name),
                kind => assert_eq!(format!("'{text}'"), kind.spelling()),
            }
        }
    }

    #[test]
    fn test_tokenization_is_deterministic() {
        let source = "for (int i = 0; i < 10; i = i + 1) { if (i % 2 == 0) continue; }";
        let mut first = Diagnostics::new();
        let mut second = Diagnostics::new();
        assert_eq!(
            Lexer::new(source).tokenize_all(&mut first),
            Lexer::new(source).tokenize_all(&mut second)
        );
    }

    #[test]
    fn test_unknown_character_is_reported_and_skipped() {
        let mut diags = Diagnostics::new();
        let tokens = Lexer::new("a ! b").tokenize_all(&mut diags);
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();

        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier("a".into()),
                TokenKind::Unknown,
                TokenKind::Identifier("b".into()),
                TokenKind::Eof,
            ]
        );
        assert_eq!(diags.count_of(DiagId::UnknownChar), 1);
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.pos, Position::new(1, 3));
        assert_eq!(diag.message, "unknown character '!'");
    }

    #[test]
    fn test_tab_is_not_whitespace() {
        let mut diags = Diagnostics::new();
        Lexer::new("a\tb").tokenize_all(&mut diags);
        assert_eq!(diags.count_of(DiagId::UnknownChar), 1);
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut diags = Diagnostics::new();
        let mut lexer = Lexer::new("x\n");
        assert!(matches!(lexer.next_token(&mut diags).kind, TokenKind::Identifier(_)));
        let eof = lexer.next_token(&mut diags);
        assert_eq!(eof.kind, TokenKind::Eof);
        assert_eq!(eof.pos, Position::new(2, 1));
        assert_eq!(lexer.next_token(&mut diags).kind, TokenKind::Eof);
    }

    #[test]
    fn test_save_and_restore_rewinds_one_token() {
        let mut diags = Diagnostics::new();
        let mut lexer = Lexer::new("a = 1");
        assert!(matches!(lexer.next_token(&mut diags).kind, TokenKind::Identifier(_)));

        lexer.save_state();
        assert_eq!(lexer.next_token(&mut diags).kind, TokenKind::Equal);
        assert_eq!(lexer.next_token(&mut diags).kind, TokenKind::Number(1));
        lexer.restore_state();

        let tok = lexer.next_token(&mut diags);
        assert_eq!(tok.kind, TokenKind::Equal);
        assert_eq!(tok.pos, Position::new(1, 3));
    }

    #[test]
    fn test_restore_keeps_row_tracking() {
        let mut diags = Diagnostics::new();
        let mut lexer = Lexer::new("a\n\nb");
        lexer.next_token(&mut diags);
        lexer.save_state();
        assert_eq!(lexer.next_token(&mut diags).pos, Position::new(3, 1));
        lexer.restore_state();
        assert_eq!(lexer.next_token(&mut diags).pos, Position::new(3, 1));
    }

    #[test]
    fn test_peek_does_not_duplicate_diagnostics() {
        let mut diags = Diagnostics::new();
        let mut lexer = Lexer::new("a $");
        lexer.next_token(&mut diags);

        assert_eq!(lexer.peek_token().kind, TokenKind::Unknown);
        assert!(diags.is_empty());

        assert_eq!(lexer.next_token(&mut diags).kind, TokenKind::Unknown);
        assert_eq!(diags.count_of(DiagId::UnknownChar), 1);
    }
}
