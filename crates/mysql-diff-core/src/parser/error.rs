//! Parser error types.

use thiserror::Error;

use crate::lexer::{Position, Span, Token, TokenKind};

/// A syntax error in one `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found} '{text}' at line {}, column {}", position.line, position.column)]
pub struct ParseError {
    /// Description of what the parser was looking for.
    pub expected: String,
    /// Kind of the token actually found.
    pub found: TokenKind,
    /// Text of the token actually found.
    pub text: String,
    /// Location of the token actually found.
    pub position: Position,
    /// Byte span of the token actually found.
    pub span: Span,
}

impl ParseError {
    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: impl Into<String>, found: &Token) -> Self {
        Self {
            expected: expected.into(),
            found: found.kind,
            text: found.text.clone(),
            position: found.position,
            span: found.span,
        }
    }

    /// Returns the 1-based line of the offending token.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.position.line
    }

    /// Returns the 1-based column of the offending token.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.position.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Keyword;

    #[test]
    fn test_display() {
        let token = Token::new(
            TokenKind::Keyword(Keyword::Index),
            "INDEX",
            Span::new(20, 25),
            Position::new(20, 2, 5),
        );
        let err = ParseError::unexpected("data type", &token);
        assert_eq!(
            err.to_string(),
            "expected data type, found keyword INDEX 'INDEX' at line 2, column 5"
        );
        assert_eq!((err.line(), err.column()), (2, 5));
    }
}
