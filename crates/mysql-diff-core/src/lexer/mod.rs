//! MySQL dump scanner.
//!
//! A hand-written lexer that turns dump text into a lazy stream of tokens.
//! Scanning never fails: characters the lexer cannot classify are skipped.

mod span;
mod token;
mod tokenizer;

pub use span::{Position, Span};
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
