//! Statement segmentation and whole-dump parsing.

use tracing::{trace, warn};

use super::error::ParseError;
use super::parser::Parser;
use crate::ast::TableDefinition;
use crate::lexer::{Keyword, Lexer, Position, Token, TokenKind};

/// What to do with a `CREATE TABLE` statement that fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first failing statement and return its error.
    #[default]
    Abort,
    /// Log the error and continue with the next statement.
    Skip,
}

/// One candidate statement: tokens from a `CREATE` (or the start of input)
/// up to and including `;`, followed by an EOF token.
#[derive(Debug, Clone)]
pub struct Statement<'a> {
    /// The whole dump; token spans index into it.
    pub source: &'a str,
    /// Statement tokens, ending with EOF.
    pub tokens: Vec<Token>,
}

impl Statement<'_> {
    /// Returns true for `CREATE [TEMPORARY] TABLE ...`.
    #[must_use]
    pub fn is_create_table(&self) -> bool {
        let mut keywords = self.tokens.iter().map(Token::as_keyword);
        if keywords.next() != Some(Some(Keyword::Create)) {
            return false;
        }
        match keywords.next() {
            Some(Some(Keyword::Table)) => true,
            Some(Some(Keyword::Temporary)) => keywords.next() == Some(Some(Keyword::Table)),
            _ => false,
        }
    }

    /// Returns the first token of the statement.
    #[must_use]
    pub fn first_token(&self) -> Option<&Token> {
        self.tokens.first()
    }
}

/// Splits a token stream into statements.
///
/// A `CREATE` token closes the statement being accumulated and starts a new
/// one; `;` and end-of-input close it. Directives are dropped.
#[derive(Debug, Clone)]
pub struct StatementSplitter<'a> {
    source: &'a str,
    lexer: Lexer<'a>,
    pending: Vec<Token>,
}

impl<'a> StatementSplitter<'a> {
    /// Creates a splitter over dump text.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lexer: Lexer::new(source),
            pending: Vec::new(),
        }
    }
}

impl<'a> Iterator for StatementSplitter<'a> {
    type Item = Statement<'a>;

    fn next(&mut self) -> Option<Statement<'a>> {
        for token in self.lexer.by_ref() {
            match token.kind {
                TokenKind::Directive => {}
                TokenKind::Keyword(Keyword::Create) if !self.pending.is_empty() => {
                    let eof = Token::eof(token.span.start, token.position);
                    let mut tokens = std::mem::replace(&mut self.pending, vec![token]);
                    tokens.push(eof);
                    return Some(Statement {
                        source: self.source,
                        tokens,
                    });
                }
                TokenKind::Semicolon => {
                    let position = Position::new(
                        token.span.end,
                        token.position.line,
                        token.position.column + 1,
                    );
                    let eof = Token::eof(token.span.end, position);
                    let mut tokens = std::mem::take(&mut self.pending);
                    tokens.push(token);
                    tokens.push(eof);
                    return Some(Statement {
                        source: self.source,
                        tokens,
                    });
                }
                TokenKind::Eof => {
                    if self.pending.is_empty() {
                        return None;
                    }
                    let mut tokens = std::mem::take(&mut self.pending);
                    tokens.push(token);
                    return Some(Statement {
                        source: self.source,
                        tokens,
                    });
                }
                _ => self.pending.push(token),
            }
        }
        None
    }
}

/// Parses every `CREATE TABLE` statement in a dump, lazily and in source
/// order. Other statements are skipped.
#[must_use]
pub fn parse_dump(sql: &str) -> impl Iterator<Item = Result<TableDefinition, ParseError>> + '_ {
    StatementSplitter::new(sql)
        .filter(|statement| {
            let keep = statement.is_create_table();
            if !keep {
                trace!(
                    first = statement.first_token().map_or("", |t| t.text.as_str()),
                    "skipping statement"
                );
            }
            keep
        })
        .map(|statement| Parser::from_statement(statement).parse_create_table())
}

/// Parses every `CREATE TABLE` statement in a dump under the given policy.
///
/// # Errors
///
/// With [`ErrorPolicy::Abort`], returns the error of the first statement that
/// fails to parse. [`ErrorPolicy::Skip`] never fails.
pub fn parse_dump_with(
    sql: &str,
    policy: ErrorPolicy,
) -> Result<Vec<TableDefinition>, ParseError> {
    let mut tables = Vec::new();
    for result in parse_dump(sql) {
        match (result, policy) {
            (Ok(table), _) => tables.push(table),
            (Err(err), ErrorPolicy::Abort) => return Err(err),
            (Err(err), ErrorPolicy::Skip) => {
                warn!(error = %err, "skipping CREATE TABLE statement that failed to parse");
            }
        }
    }
    Ok(tables)
}

/// Parses a single `CREATE TABLE` statement.
///
/// # Errors
///
/// Returns a `ParseError` if the input does not start with a valid
/// `CREATE TABLE` statement.
pub fn parse_create_table(sql: &str) -> Result<TableDefinition, ParseError> {
    Parser::from_sql(sql).parse_create_table()
}
