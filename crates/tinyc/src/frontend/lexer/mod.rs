//! Lexer module for tokenizing tinyc source code

mod token;
mod scanner;

pub use token::{LineTracker, Token, TokenKind};
pub use scanner::{Lexer, LexerState};
