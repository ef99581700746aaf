//! MySQL dump tokenizer.

use super::{Keyword, Position, Span, Token, TokenKind};

/// A lexer that tokenizes MySQL dump text.
///
/// Scanning never fails: characters that start no token are dropped, and an
/// unterminated quote or comment runs to the end of input. The lexer is an
/// [`Iterator`] that yields exactly one [`TokenKind::Eof`] token last.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Line of the current position (1-based).
    line: usize,
    /// Column of the current position (1-based, in characters).
    column: usize,
    /// Location of the start of the current token.
    start_position: Position,
    /// Set once the EOF token has been handed out.
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            line: 1,
            column: 1,
            start_position: Position::new(0, 1, 1),
            finished: false,
        }
    }

    /// Returns the input being scanned.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.input
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn peek_third(&self) -> Option<char> {
        self.input[self.pos..].chars().nth(2)
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    const fn current_position(&self) -> Position {
        Position::new(self.pos, self.line, self.column)
    }

    /// Skips whitespace and comments, stopping in front of a `/*!` directive.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            // -- ... and # ...
            let dash_comment = self.peek() == Some('-') && self.peek_next() == Some('-');
            if dash_comment || self.peek() == Some('#') {
                while self.peek().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                continue;
            }

            // /* ... */, but not /*! ... */
            if self.peek() == Some('/')
                && self.peek_next() == Some('*')
                && self.peek_third() != Some('!')
            {
                self.advance(); // /
                self.advance(); // *
                self.skip_to_comment_end();
                continue;
            }

            break;
        }
    }

    /// Consumes input up to and including the next `*/`.
    fn skip_to_comment_end(&mut self) {
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    break;
                }
                None => break,
                _ => {}
            }
        }
    }

    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token whose text is the whole span.
    fn make_token(&self, kind: TokenKind) -> Token {
        let text = &self.input[self.start..self.pos];
        Token::new(kind, text, self.make_span(), self.start_position)
    }

    /// Creates a token whose text is `input[from..to]`, with the full span.
    fn make_inner_token(&self, kind: TokenKind, from: usize, to: usize) -> Token {
        Token::new(
            kind,
            &self.input[from..to],
            self.make_span(),
            self.start_position,
        )
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$')
        {
            self.advance();
        }

        let text = &self.input[self.start..self.pos];
        match Keyword::from_str(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier),
        }
    }

    /// Scans a backtick-quoted identifier. The first following backtick
    /// always closes it.
    fn scan_quoted_identifier(&mut self) -> Token {
        self.advance(); // `
        let content_start = self.pos;
        while self.peek().is_some_and(|c| c != '`') {
            self.advance();
        }
        let content_end = self.pos;
        self.advance(); // closing `
        self.make_inner_token(TokenKind::QuotedIdentifier, content_start, content_end)
    }

    /// Scans a string literal, keeping escapes and doubled quotes verbatim.
    fn scan_string(&mut self, quote: char) -> Token {
        self.advance(); // opening quote
        let content_start = self.pos;

        let content_end = loop {
            match self.peek() {
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some(c) if c == quote => {
                    if self.peek_next() == Some(quote) {
                        self.advance();
                        self.advance();
                    } else {
                        let end = self.pos;
                        self.advance();
                        break end;
                    }
                }
                Some(_) => {
                    self.advance();
                }
                None => break self.pos,
            }
        };

        self.make_inner_token(TokenKind::String { quote }, content_start, content_end)
    }

    /// Scans a number: a digit run with an optional fractional part and an
    /// optional leading minus sign.
    fn scan_number(&mut self) -> Token {
        if self.peek() == Some('-') {
            self.advance();
        }
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // .
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }
        self.make_token(TokenKind::Number)
    }

    /// Scans a `/*! ... */` directive; the token text is the body.
    fn scan_directive(&mut self) -> Token {
        self.advance(); // /
        self.advance(); // *
        self.advance(); // !
        let content_start = self.pos;
        let mut content_end = self.pos;
        loop {
            match self.peek() {
                Some('*') if self.peek_next() == Some('/') => {
                    content_end = self.pos;
                    self.advance();
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                    content_end = self.pos;
                }
                None => break,
            }
        }
        self.make_inner_token(TokenKind::Directive, content_start, content_end)
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace_and_comments();
            self.start = self.pos;
            self.start_position = self.current_position();

            let Some(c) = self.peek() else {
                return Token::eof(self.pos, self.start_position);
            };

            let kind = match c {
                '(' => TokenKind::LeftParen,
                ')' => TokenKind::RightParen,
                ',' => TokenKind::Comma,
                ';' => TokenKind::Semicolon,
                '=' => TokenKind::Eq,
                '.' => TokenKind::Dot,
                '`' => return self.scan_quoted_identifier(),
                '\'' | '"' => return self.scan_string(c),
                '/' if self.peek_next() == Some('*') => return self.scan_directive(),
                '-' if self.peek_next().is_some_and(|n| n.is_ascii_digit()) => {
                    return self.scan_number();
                }
                c if c.is_ascii_digit() => return self.scan_number(),
                c if c.is_alphabetic() || c == '_' => return self.scan_identifier(),
                _ => {
                    // Unknown character: drop it and keep scanning.
                    self.advance();
                    continue;
                }
            };

            self.advance();
            return self.make_token(kind);
        }
    }

    /// Tokenizes the entire input and returns all tokens, ending with EOF.
    #[must_use]
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is_eof() {
            self.finished = true;
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input).map(|t| t.kind).collect()
    }

    fn texts(input: &str) -> Vec<String> {
        Lexer::new(input)
            .filter(|t| !t.is_eof())
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_simple_create() {
        assert_eq!(
            kinds("CREATE TABLE users (id INT);"),
            vec![
                TokenKind::Keyword(Keyword::Create),
                TokenKind::Keyword(Keyword::Table),
                TokenKind::Identifier,
                TokenKind::LeftParen,
                TokenKind::Identifier,
                TokenKind::Keyword(Keyword::Int),
                TokenKind::RightParen,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_case_insensitive() {
        assert_eq!(
            kinds("create Table"),
            vec![
                TokenKind::Keyword(Keyword::Create),
                TokenKind::Keyword(Keyword::Table),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_quoted_identifier() {
        let tokens = Lexer::new("`order` `we\"ird`").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::QuotedIdentifier);
        assert_eq!(tokens[0].text, "order");
        assert_eq!(tokens[0].span, Span::new(0, 7));
        assert_eq!(tokens[1].text, "we\"ird");
    }

    #[test]
    fn test_backtick_closes_at_first_backtick() {
        let tokens = Lexer::new("`a``b` `c").tokenize();
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c", ""]);
        assert_eq!(tokens[1].span, Span::new(3, 6));
        // unterminated identifier runs to the end of input
        assert_eq!(tokens[2].kind, TokenKind::QuotedIdentifier);
        assert_eq!(tokens[2].span, Span::new(7, 9));
        assert!(tokens[3].is_eof());
    }

    #[test]
    fn test_string_keeps_doubled_quotes() {
        let tokens = Lexer::new("'It''s a test'").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::String { quote: '\'' });
        assert_eq!(tokens[0].text, "It''s a test");
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_string_backslash_escape() {
        let tokens = Lexer::new(r#"'a\'b' "x\"y""#).tokenize();
        assert_eq!(tokens[0].text, r"a\'b");
        assert_eq!(tokens[1].kind, TokenKind::String { quote: '"' });
        assert_eq!(tokens[1].text, r#"x\"y"#);
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let tokens = Lexer::new("'abc").tokenize();
        assert_eq!(tokens[0].text, "abc");
        assert!(tokens[1].is_eof());
    }

    #[test]
    fn test_numbers() {
        assert_eq!(texts("10 99.99 -1 3."), vec!["10", "99.99", "-1", "3", "."]);
    }

    #[test]
    fn test_comments_skipped() {
        let input = "-- line\n# hash\n/* block */ id";
        assert_eq!(texts(input), vec!["id"]);
    }

    #[test]
    fn test_directive_token() {
        let tokens = Lexer::new("/*!40101 SET NAMES utf8 */;").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Directive);
        assert_eq!(tokens[0].text, "40101 SET NAMES utf8 ");
        assert_eq!(tokens[1].kind, TokenKind::Semicolon);
    }

    #[test]
    fn test_unknown_characters_dropped() {
        assert_eq!(texts("a @ b + c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unicode_identifier() {
        let tokens = Lexer::new("café_1 $x").tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "café_1");
        // `$` cannot start an identifier
        assert_eq!(tokens[1].text, "x");
    }

    #[test]
    fn test_line_and_column() {
        let tokens = Lexer::new("CREATE\n  TABLE t").tokenize();
        assert_eq!(tokens[1].position, Position::new(9, 2, 3));
        assert_eq!(tokens[2].position.column, 9);
    }

    #[test]
    fn test_single_eof_then_none() {
        let mut lexer = Lexer::new("");
        assert!(lexer.next().is_some_and(|t| t.is_eof()));
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_lexer_is_restartable() {
        let lexer = Lexer::new("a b c");
        let first: Vec<_> = lexer.clone().collect();
        let second: Vec<_> = lexer.collect();
        assert_eq!(first, second);
    }
}
