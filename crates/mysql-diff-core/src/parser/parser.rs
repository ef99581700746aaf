//! `CREATE TABLE` parser implementation.

use tracing::debug;

use super::dump::Statement;
use super::error::ParseError;
use crate::ast::{
    CheckConstraint, ColumnDefinition, DataType, ForeignKeyDefinition, ForeignKeyReference,
    GeneratedColumn, GeneratedStorage, IndexColumn, IndexDefinition, IndexKind, IndexType,
    Nullability, PartitionBound, PartitionDefinition, PartitionKind, PartitionOptions,
    PrimaryKeyDefinition, ReferentialAction, SortDirection, TableDefinition, TableOptions,
};
use crate::lexer::{Keyword, Lexer, Position, Span, Token, TokenKind};

/// What an entry of the element list is, decided from its first token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    PrimaryKey,
    Index(IndexKind),
    ForeignKey,
    Check,
    Column,
}

/// `CREATE TABLE` parser over the tokens of one statement.
pub struct Parser<'a> {
    /// Text the token spans point into.
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    /// Returned once the tokens run out.
    eof: Token,
}

impl<'a> Parser<'a> {
    /// Creates a parser over tokens scanned from `source`.
    ///
    /// A trailing EOF token is optional; one is synthesized when missing.
    #[must_use]
    pub fn new(source: &'a str, mut tokens: Vec<Token>) -> Self {
        let eof = if tokens.last().is_some_and(Token::is_eof) {
            tokens.pop()
        } else {
            None
        };
        let eof = eof.unwrap_or_else(|| {
            let (end, position) = tokens.last().map_or((0, Position::default()), |t| {
                (t.span.end, t.position)
            });
            Token::eof(end, position)
        });
        Self {
            source,
            tokens,
            pos: 0,
            eof,
        }
    }

    /// Creates a parser over a whole SQL string. Directives are dropped.
    #[must_use]
    pub fn from_sql(source: &'a str) -> Self {
        let tokens = Lexer::new(source)
            .filter(|t| t.kind != TokenKind::Directive)
            .collect();
        Self::new(source, tokens)
    }

    /// Creates a parser over one segmented statement.
    #[must_use]
    pub fn from_statement(statement: Statement<'a>) -> Self {
        Self::new(statement.source, statement.tokens)
    }

    /// Parses `CREATE [TEMPORARY] TABLE [IF NOT EXISTS] name (...) [options]
    /// [PARTITION BY ...]`.
    ///
    /// Tokens after the table options and partitioning clause are ignored.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` naming the expected token when the statement
    /// does not follow the grammar.
    pub fn parse_create_table(&mut self) -> Result<TableDefinition, ParseError> {
        self.expect_keyword(Keyword::Create)?;
        let temporary = self.eat_keyword(Keyword::Temporary);
        self.expect_keyword(Keyword::Table)?;

        let if_not_exists = if self.check_keyword(Keyword::If) {
            self.advance();
            self.expect_keyword(Keyword::Not)?;
            self.expect_keyword(Keyword::Exists)?;
            true
        } else {
            false
        };

        let (schema, name) = self.expect_qualified_name()?;
        let mut table = TableDefinition::new(name);
        table.schema = schema;
        table.temporary = temporary;
        table.if_not_exists = if_not_exists;

        self.expect(&TokenKind::LeftParen)?;
        loop {
            self.parse_element(&mut table)?;
            if self.eat(&TokenKind::Comma) {
                continue;
            }
            self.expect(&TokenKind::RightParen)?;
            break;
        }

        table.table_options = self.parse_table_options()?;
        if self.check_keyword(Keyword::Partition) {
            table.partition_options = Some(self.parse_partition_options()?);
        }

        debug!(
            table = %table.qualified_name(),
            columns = table.columns.len(),
            indexes = table.indexes.len(),
            foreign_keys = table.foreign_keys.len(),
            "parsed table"
        );
        Ok(table)
    }

    /// Classifies the element at the current position.
    fn classify_element(&self) -> ElementKind {
        match self.current().as_keyword() {
            Some(Keyword::Primary) => ElementKind::PrimaryKey,
            Some(Keyword::Unique) => ElementKind::Index(IndexKind::Unique),
            Some(Keyword::Index | Keyword::Key) => ElementKind::Index(IndexKind::Index),
            Some(Keyword::Fulltext) => ElementKind::Index(IndexKind::Fulltext),
            Some(Keyword::Spatial) => ElementKind::Index(IndexKind::Spatial),
            Some(Keyword::Foreign) => ElementKind::ForeignKey,
            Some(Keyword::Check) => ElementKind::Check,
            _ => ElementKind::Column,
        }
    }

    /// Parses one entry of the element list into `table`.
    fn parse_element(&mut self, table: &mut TableDefinition) -> Result<(), ParseError> {
        let constraint_name = if self.eat_keyword(Keyword::Constraint) {
            if self.current().is_name() {
                Some(self.expect_name()?)
            } else {
                None
            }
        } else {
            None
        };
        let has_constraint = constraint_name.is_some();

        match self.classify_element() {
            ElementKind::PrimaryKey => {
                if table.primary_key.is_some() {
                    return Err(ParseError::unexpected(
                        "a single PRIMARY KEY",
                        self.current(),
                    ));
                }
                let mut pk = self.parse_primary_key()?;
                pk.name = constraint_name;
                table.primary_key = Some(pk);
            }
            ElementKind::Index(kind) => {
                let mut index = self.parse_index(kind)?;
                if kind == IndexKind::Unique && index.name.is_none() {
                    index.name = constraint_name;
                }
                table.indexes.push(index);
            }
            ElementKind::ForeignKey => {
                let mut fk = self.parse_foreign_key()?;
                if constraint_name.is_some() {
                    fk.name = constraint_name;
                }
                table.foreign_keys.push(fk);
            }
            ElementKind::Check => {
                let check = self.parse_check(constraint_name)?;
                table.check_constraints.push(check);
            }
            ElementKind::Column if has_constraint => {
                return Err(ParseError::unexpected(
                    "PRIMARY KEY, UNIQUE, FOREIGN KEY or CHECK",
                    self.current(),
                ));
            }
            ElementKind::Column => {
                let column = self.parse_column(&mut table.check_constraints)?;
                table.columns.push(column);
            }
        }
        Ok(())
    }

    // ---- Columns ---------------------------------------------------

    fn parse_column(
        &mut self,
        checks: &mut Vec<CheckConstraint>,
    ) -> Result<ColumnDefinition, ParseError> {
        let name = self.expect_name_as("column name")?;
        let data_type = self.parse_data_type()?;
        let mut column = ColumnDefinition::new(name, data_type);

        while !self.at_element_end() {
            self.parse_column_attribute(&mut column, checks)?;
        }
        Ok(column)
    }

    /// Parses a type keyword, its parameter list and `UNSIGNED`/`ZEROFILL`.
    fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let Some(keyword) = self.current().as_keyword().filter(Keyword::is_data_type) else {
            return Err(ParseError::unexpected("data type", self.current()));
        };
        self.advance();
        let keyword = match keyword {
            Keyword::Double => {
                self.eat_keyword(Keyword::Precision);
                Keyword::Double
            }
            // NATIONAL CHAR, NATIONAL VARCHAR, NCHAR [VARCHAR], NVARCHAR
            Keyword::National => {
                if self.eat_keyword(Keyword::Varchar) {
                    Keyword::Varchar
                } else if self.eat_keyword(Keyword::Char)
                    || self.eat_keyword(Keyword::Character)
                {
                    Keyword::Char
                } else {
                    return Err(ParseError::unexpected("CHAR or VARCHAR", self.current()));
                }
            }
            Keyword::Nchar if self.eat_keyword(Keyword::Varchar) => Keyword::Varchar,
            Keyword::Nchar => Keyword::Char,
            Keyword::Nvarchar => Keyword::Varchar,
            other => other,
        };

        let mut data_type = DataType::new(keyword.as_str());
        if self.eat(&TokenKind::LeftParen) {
            while !self.eat(&TokenKind::RightParen) {
                let token = self.current().clone();
                match token.kind {
                    TokenKind::String { .. } => data_type.parameters.push(token.to_sql()),
                    TokenKind::Number | TokenKind::Identifier | TokenKind::Keyword(_) => {
                        data_type.parameters.push(token.text);
                    }
                    _ => return Err(ParseError::unexpected("type parameter", &token)),
                }
                self.advance();
                if !self.eat(&TokenKind::Comma) {
                    self.expect(&TokenKind::RightParen)?;
                    break;
                }
            }
        }

        loop {
            if self.eat_keyword(Keyword::Unsigned) {
                data_type.unsigned = true;
            } else if self.eat_keyword(Keyword::Zerofill) {
                data_type.zerofill = true;
            } else {
                break;
            }
        }
        Ok(data_type)
    }

    /// Consumes one column attribute, or skips one unrecognized token.
    fn parse_column_attribute(
        &mut self,
        column: &mut ColumnDefinition,
        checks: &mut Vec<CheckConstraint>,
    ) -> Result<(), ParseError> {
        let Some(keyword) = self.current().as_keyword() else {
            if self.check(&TokenKind::LeftParen) {
                self.skip_group();
            } else {
                self.advance();
            }
            return Ok(());
        };

        match keyword {
            Keyword::Not if self.peek(1).is_keyword(Keyword::Null) => {
                self.advance();
                self.advance();
                column.nullability = Nullability::NotNull;
            }
            Keyword::Null => {
                self.advance();
                column.nullability = Nullability::Null;
            }
            Keyword::Default => {
                self.advance();
                column.default_value = Some(self.parse_default_value()?);
            }
            Keyword::AutoIncrement => {
                self.advance();
                column.auto_increment = true;
            }
            Keyword::Unique => {
                self.advance();
                self.eat_keyword(Keyword::Key);
                column.unique = true;
            }
            Keyword::Primary | Keyword::Key => {
                self.advance();
                self.eat_keyword(Keyword::Key);
                column.primary_key = true;
            }
            Keyword::Comment => {
                self.advance();
                column.comment = Some(self.expect_string()?);
            }
            Keyword::Collate => {
                self.advance();
                column.collation = Some(self.expect_word()?);
            }
            Keyword::Character | Keyword::Charset => {
                self.advance();
                if keyword == Keyword::Character {
                    self.expect_keyword(Keyword::Set)?;
                }
                column.character_set = Some(self.expect_word()?);
            }
            Keyword::Generated | Keyword::As => {
                column.generated = Some(self.parse_generated_column()?);
            }
            Keyword::Visible | Keyword::Invisible => {
                self.advance();
                column.visible = Some(keyword == Keyword::Visible);
            }
            Keyword::On if self.peek(1).is_keyword(Keyword::Update) => {
                self.advance();
                self.advance();
                column.on_update = Some(self.parse_default_value()?);
            }
            Keyword::ColumnFormat => {
                self.advance();
                column.column_format = Some(self.expect_word()?.to_ascii_uppercase());
            }
            Keyword::Storage => {
                self.advance();
                column.storage = Some(self.expect_word()?.to_ascii_uppercase());
            }
            Keyword::References => column.reference = Some(self.parse_reference()?),
            Keyword::Constraint => {
                self.advance();
                let name = if self.current().is_name() {
                    Some(self.expect_name()?)
                } else {
                    None
                };
                if self.check_keyword(Keyword::Check) {
                    checks.push(self.parse_check(name)?);
                }
            }
            Keyword::Check => checks.push(self.parse_check(None)?),
            _ => {
                self.advance();
            }
        }
        Ok(())
    }

    /// Captures a default (or `ON UPDATE`) value as raw source text.
    fn parse_default_value(&mut self) -> Result<String, ParseError> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::LeftParen => Ok(format!("({})", self.parse_parenthesized_expression()?)),
            TokenKind::String { .. } => {
                self.advance();
                Ok(token.to_sql())
            }
            TokenKind::Number => {
                self.advance();
                // 0x1F, 0b101 and 1e3 scan as a number glued to a word
                let mut end = token.span.end;
                while matches!(self.current().kind, TokenKind::Identifier | TokenKind::Number)
                    && self.current().span.start == end
                {
                    end = self.advance().span.end;
                }
                Ok(self.slice(token.span.start, end).to_string())
            }
            TokenKind::Identifier | TokenKind::Keyword(_) => {
                self.advance();
                let next = self.current();
                let glued = next.span.start == token.span.end;
                if matches!(next.kind, TokenKind::String { .. })
                    && (glued || is_introducer(&token))
                {
                    let literal = self.advance();
                    return Ok(self.slice(token.span.start, literal.span.end).to_string());
                }
                if self.check(&TokenKind::LeftParen) {
                    let args = self.parse_parenthesized_expression()?;
                    return Ok(format!("{}({args})", token.text));
                }
                Ok(token.text)
            }
            _ => Err(ParseError::unexpected("default value", &token)),
        }
    }

    /// Parses `[GENERATED ALWAYS] AS (expr) [VIRTUAL | STORED]`.
    fn parse_generated_column(&mut self) -> Result<GeneratedColumn, ParseError> {
        if self.eat_keyword(Keyword::Generated) {
            self.expect_keyword(Keyword::Always)?;
        }
        self.expect_keyword(Keyword::As)?;
        let expression = self.parse_parenthesized_expression()?;
        let storage = if self.eat_keyword(Keyword::Stored) {
            GeneratedStorage::Stored
        } else {
            self.eat_keyword(Keyword::Virtual);
            GeneratedStorage::Virtual
        };
        Ok(GeneratedColumn {
            expression,
            storage,
        })
    }

    // ---- Keys and constraints --------------------------------------

    fn parse_primary_key(&mut self) -> Result<PrimaryKeyDefinition, ParseError> {
        self.expect_keyword(Keyword::Primary)?;
        self.expect_keyword(Keyword::Key)?;

        let mut index = IndexDefinition::new(None, IndexKind::Unique, Vec::new());
        if self.eat_keyword(Keyword::Using) {
            index.using = Some(self.parse_index_type()?);
        }
        index.columns = self.parse_key_parts()?;
        self.parse_index_options(&mut index)?;

        let mut pk = PrimaryKeyDefinition::new(index.columns);
        pk.using = index.using;
        pk.comment = index.comment;
        Ok(pk)
    }

    /// Parses `UNIQUE|INDEX|KEY|FULLTEXT|SPATIAL [INDEX|KEY] [name] [USING t] (parts) [options]`.
    fn parse_index(&mut self, kind: IndexKind) -> Result<IndexDefinition, ParseError> {
        self.advance();
        if kind != IndexKind::Index && !self.eat_keyword(Keyword::Index) {
            self.eat_keyword(Keyword::Key);
        }

        let name = if self.current().is_name() {
            Some(self.expect_name()?)
        } else {
            None
        };
        let mut index = IndexDefinition::new(name, kind, Vec::new());
        if self.eat_keyword(Keyword::Using) {
            index.using = Some(self.parse_index_type()?);
        }
        index.columns = self.parse_key_parts()?;
        self.parse_index_options(&mut index)?;
        Ok(index)
    }

    /// Parses `(part [, part]...)` where a part is `name [(len)] [ASC|DESC]`
    /// or a functional `(expr)`.
    fn parse_key_parts(&mut self) -> Result<Vec<IndexColumn>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut parts = Vec::new();
        loop {
            let mut part = if self.check(&TokenKind::LeftParen) {
                IndexColumn::new(format!("({})", self.parse_parenthesized_expression()?))
            } else {
                IndexColumn::new(self.expect_name_as("column name")?)
            };
            if self.eat(&TokenKind::LeftParen) {
                part.length = Some(self.expect_u64()?);
                self.expect(&TokenKind::RightParen)?;
            }
            if self.eat_keyword(Keyword::Asc) {
                part.direction = Some(SortDirection::Asc);
            } else if self.eat_keyword(Keyword::Desc) {
                part.direction = Some(SortDirection::Desc);
            }
            parts.push(part);

            if !self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::RightParen)?;
                return Ok(parts);
            }
        }
    }

    fn parse_index_type(&mut self) -> Result<IndexType, ParseError> {
        if self.eat_keyword(Keyword::Btree) {
            Ok(IndexType::Btree)
        } else if self.eat_keyword(Keyword::Hash) {
            Ok(IndexType::Hash)
        } else {
            Err(ParseError::unexpected("BTREE or HASH", self.current()))
        }
    }

    /// Parses index options until the end of the element; unknown tokens are skipped.
    fn parse_index_options(&mut self, index: &mut IndexDefinition) -> Result<(), ParseError> {
        while !self.at_element_end() {
            let Some(keyword) = self.current().as_keyword() else {
                if self.check(&TokenKind::LeftParen) {
                    self.skip_group();
                } else {
                    self.advance();
                }
                continue;
            };
            self.advance();
            match keyword {
                Keyword::KeyBlockSize => {
                    self.eat(&TokenKind::Eq);
                    index.key_block_size = Some(self.expect_u64()?);
                }
                Keyword::Using => index.using = Some(self.parse_index_type()?),
                Keyword::With => {
                    self.expect_keyword(Keyword::Parser)?;
                    index.parser = Some(self.expect_name()?);
                }
                Keyword::Comment => index.comment = Some(self.expect_string()?),
                Keyword::Visible => index.visible = Some(true),
                Keyword::Invisible => index.visible = Some(false),
                Keyword::EngineAttribute => {
                    self.eat(&TokenKind::Eq);
                    index.engine_attribute = Some(self.expect_string()?);
                }
                Keyword::SecondaryEngineAttribute => {
                    self.eat(&TokenKind::Eq);
                    self.expect_string()?;
                }
                Keyword::Algorithm => {
                    self.eat(&TokenKind::Eq);
                    index.algorithm = Some(self.expect_word()?);
                }
                Keyword::Lock => {
                    self.eat(&TokenKind::Eq);
                    index.lock = Some(self.expect_word()?);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Parses `FOREIGN KEY [name] (cols) REFERENCES ...`.
    fn parse_foreign_key(&mut self) -> Result<ForeignKeyDefinition, ParseError> {
        self.expect_keyword(Keyword::Foreign)?;
        self.expect_keyword(Keyword::Key)?;
        let name = if self.current().is_name() {
            Some(self.expect_name()?)
        } else {
            None
        };
        let columns = names_of(self.parse_key_parts()?);
        let reference = self.parse_reference()?;
        Ok(ForeignKeyDefinition {
            name,
            columns,
            reference,
        })
    }

    /// Parses `REFERENCES tbl (cols) [MATCH ...] [ON DELETE a] [ON UPDATE a]`.
    fn parse_reference(&mut self) -> Result<ForeignKeyReference, ParseError> {
        self.expect_keyword(Keyword::References)?;
        let (schema, name) = self.expect_qualified_name()?;
        let table = match schema {
            Some(schema) => format!("{schema}.{name}"),
            None => name,
        };
        let columns = names_of(self.parse_key_parts()?);
        let mut reference = ForeignKeyReference {
            table,
            columns,
            on_delete: None,
            on_update: None,
        };

        loop {
            if self.eat_keyword(Keyword::Match) {
                self.advance();
                continue;
            }
            let is_action = matches!(
                self.peek(2).as_keyword(),
                Some(
                    Keyword::Cascade
                        | Keyword::Restrict
                        | Keyword::Set
                        | Keyword::No
                )
            );
            if !self.check_keyword(Keyword::On) || !is_action {
                break;
            }
            self.advance();
            if self.eat_keyword(Keyword::Delete) {
                reference.on_delete = Some(self.parse_referential_action()?);
            } else {
                self.expect_keyword(Keyword::Update)?;
                reference.on_update = Some(self.parse_referential_action()?);
            }
        }
        Ok(reference)
    }

    fn parse_referential_action(&mut self) -> Result<ReferentialAction, ParseError> {
        let token = self.advance();
        match token.as_keyword() {
            Some(Keyword::Cascade) => Ok(ReferentialAction::Cascade),
            Some(Keyword::Restrict) => Ok(ReferentialAction::Restrict),
            Some(Keyword::Set) if self.eat_keyword(Keyword::Null) => Ok(ReferentialAction::SetNull),
            Some(Keyword::Set) if self.eat_keyword(Keyword::Default) => {
                Ok(ReferentialAction::SetDefault)
            }
            Some(Keyword::No) if self.eat_keyword(Keyword::Action) => {
                Ok(ReferentialAction::NoAction)
            }
            _ => Err(ParseError::unexpected("referential action", &token)),
        }
    }

    /// Parses `CHECK (expr) [[NOT] ENFORCED]`.
    fn parse_check(&mut self, name: Option<String>) -> Result<CheckConstraint, ParseError> {
        self.expect_keyword(Keyword::Check)?;
        let expression = self.parse_parenthesized_expression()?;
        let enforced = if self.check_keyword(Keyword::Not)
            && self.peek(1).is_keyword(Keyword::Enforced)
        {
            self.advance();
            self.advance();
            Some(false)
        } else if self.eat_keyword(Keyword::Enforced) {
            Some(true)
        } else {
            None
        };
        Ok(CheckConstraint {
            name,
            expression,
            enforced,
        })
    }

    // ---- Table options ---------------------------------------------

    /// Parses the flat `KEYWORD [=] VALUE` option list up to `PARTITION`, `;`
    /// or the end of the statement.
    fn parse_table_options(&mut self) -> Result<Option<TableOptions>, ParseError> {
        let mut options = TableOptions::default();
        loop {
            let kind = self.current().kind;
            match kind {
                TokenKind::Eof | TokenKind::Semicolon | TokenKind::Keyword(Keyword::Partition) => {
                    break;
                }
                TokenKind::Keyword(keyword) if keyword != Keyword::Default => {
                    self.parse_table_option(keyword, &mut options)?;
                }
                _ => {
                    self.advance();
                }
            }
        }
        Ok((!options.is_empty()).then_some(options))
    }

    fn parse_table_option(
        &mut self,
        keyword: Keyword,
        options: &mut TableOptions,
    ) -> Result<(), ParseError> {
        self.advance();
        match keyword {
            Keyword::Data | Keyword::Index => {
                if !self.eat_keyword(Keyword::Directory) {
                    return Ok(());
                }
            }
            Keyword::Character => self.expect_keyword(Keyword::Set)?,
            _ => {}
        }
        self.eat(&TokenKind::Eq);

        match keyword {
            Keyword::Engine => options.engine = Some(self.expect_word()?),
            Keyword::AutoIncrement => options.auto_increment = Some(self.expect_u64()?),
            Keyword::Character | Keyword::Charset => {
                options.character_set = Some(self.expect_word()?);
            }
            Keyword::Collate => options.collation = Some(self.expect_word()?),
            Keyword::Comment => options.comment = Some(self.expect_string()?),
            Keyword::RowFormat => options.row_format = Some(self.expect_word()?),
            Keyword::KeyBlockSize => options.key_block_size = Some(self.expect_u64()?),
            Keyword::MaxRows => options.max_rows = Some(self.expect_u64()?),
            Keyword::MinRows => options.min_rows = Some(self.expect_u64()?),
            Keyword::Tablespace => options.tablespace = Some(self.expect_word()?),
            Keyword::Data => options.data_directory = Some(self.expect_string()?),
            Keyword::Index => options.index_directory = Some(self.expect_string()?),
            Keyword::Encryption => options.encryption = Some(self.expect_word()?),
            Keyword::Compression => options.compression = Some(self.expect_word()?),
            Keyword::StatsPersistent => options.stats_persistent = Some(self.expect_word()?),
            Keyword::StatsAutoRecalc => options.stats_auto_recalc = Some(self.expect_word()?),
            Keyword::StatsSamplePages => options.stats_sample_pages = Some(self.expect_word()?),
            Keyword::PackKeys => options.pack_keys = Some(self.expect_word()?),
            Keyword::Checksum => options.checksum = Some(self.expect_word()?),
            Keyword::DelayKeyWrite => options.delay_key_write = Some(self.expect_word()?),
            Keyword::Union => options.union = Some(self.parse_name_list()?),
            Keyword::InsertMethod => options.insert_method = Some(self.expect_word()?),
            _ => {}
        }
        Ok(())
    }

    // ---- Partitioning ----------------------------------------------

    /// Parses `PARTITION BY ...`, then consumes the rest of the statement.
    fn parse_partition_options(&mut self) -> Result<PartitionOptions, ParseError> {
        self.expect_keyword(Keyword::Partition)?;
        self.expect_keyword(Keyword::By)?;
        let linear = self.eat_keyword(Keyword::Linear);

        let kind = match self.current().as_keyword() {
            Some(Keyword::Hash) => PartitionKind::Hash,
            Some(Keyword::Key) => PartitionKind::Key,
            Some(Keyword::Range) => PartitionKind::Range,
            Some(Keyword::List) => PartitionKind::List,
            _ => {
                return Err(ParseError::unexpected(
                    "HASH, KEY, RANGE or LIST",
                    self.current(),
                ))
            }
        };
        self.advance();

        let mut options = PartitionOptions::new(kind);
        options.linear = linear;
        match kind {
            PartitionKind::Hash => {
                options.expression = Some(self.parse_parenthesized_expression()?);
            }
            PartitionKind::Key => {
                if self.eat_keyword(Keyword::Algorithm) {
                    self.eat(&TokenKind::Eq);
                    self.advance();
                }
                options.columns = self.parse_name_list()?;
            }
            PartitionKind::Range | PartitionKind::List => {
                if self.eat_keyword(Keyword::Columns) {
                    options.columns = self.parse_name_list()?;
                } else {
                    options.expression = Some(self.parse_parenthesized_expression()?);
                }
            }
        }

        if self.eat_keyword(Keyword::Partitions) {
            options.partition_count = Some(self.expect_u64()?);
        }
        if self.eat_keyword(Keyword::Subpartition) {
            self.skip_subpartition_clause();
        }
        if self.check(&TokenKind::LeftParen) {
            options.partitions = self.parse_partition_definitions()?;
        }

        while !matches!(self.current().kind, TokenKind::Eof | TokenKind::Semicolon) {
            self.advance();
        }
        Ok(options)
    }

    /// Skips `BY [LINEAR] HASH(expr)|KEY(cols) [SUBPARTITIONS n]`.
    fn skip_subpartition_clause(&mut self) {
        while !matches!(
            self.current().kind,
            TokenKind::Eof | TokenKind::Semicolon | TokenKind::LeftParen
        ) {
            self.advance();
        }
        if self.check(&TokenKind::LeftParen) {
            self.skip_group();
        }
        if self.eat_keyword(Keyword::Subpartitions) {
            self.advance();
        }
    }

    fn parse_partition_definitions(&mut self) -> Result<Vec<PartitionDefinition>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut partitions = Vec::new();
        loop {
            self.expect_keyword(Keyword::Partition)?;
            let mut partition = PartitionDefinition::new(self.expect_name_as("partition name")?);

            if self.eat_keyword(Keyword::Values) {
                partition.bound = Some(self.parse_partition_bound()?);
            }
            self.parse_partition_attributes(&mut partition)?;
            partitions.push(partition);

            if !self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::RightParen)?;
                return Ok(partitions);
            }
        }
    }

    fn parse_partition_bound(&mut self) -> Result<PartitionBound, ParseError> {
        if self.eat_keyword(Keyword::Less) {
            self.expect_keyword(Keyword::Than)?;
            if self.check_keyword(Keyword::Maxvalue) {
                let token = self.advance();
                return Ok(PartitionBound::LessThan(vec![token.text]));
            }
            Ok(PartitionBound::LessThan(self.parse_value_list()?))
        } else if self.eat_keyword(Keyword::In) {
            Ok(PartitionBound::In(self.parse_value_list()?))
        } else {
            Err(ParseError::unexpected("LESS THAN or IN", self.current()))
        }
    }

    fn parse_partition_attributes(
        &mut self,
        partition: &mut PartitionDefinition,
    ) -> Result<(), ParseError> {
        while !self.at_element_end() {
            let Some(keyword) = self.current().as_keyword() else {
                if self.check(&TokenKind::LeftParen) {
                    // subpartition bodies
                    self.skip_group();
                } else {
                    self.advance();
                }
                continue;
            };
            self.advance();
            match keyword {
                Keyword::Storage | Keyword::Engine => {
                    self.eat_keyword(Keyword::Engine);
                    self.eat(&TokenKind::Eq);
                    partition.engine = Some(self.expect_word()?);
                }
                Keyword::Comment => {
                    self.eat(&TokenKind::Eq);
                    partition.comment = Some(self.expect_string()?);
                }
                Keyword::Data | Keyword::Index if self.eat_keyword(Keyword::Directory) => {
                    self.eat(&TokenKind::Eq);
                    let directory = Some(self.expect_string()?);
                    if keyword == Keyword::Data {
                        partition.data_directory = directory;
                    } else {
                        partition.index_directory = directory;
                    }
                }
                Keyword::MaxRows => {
                    self.eat(&TokenKind::Eq);
                    partition.max_rows = Some(self.expect_u64()?);
                }
                Keyword::MinRows => {
                    self.eat(&TokenKind::Eq);
                    partition.min_rows = Some(self.expect_u64()?);
                }
                Keyword::Tablespace => {
                    self.eat(&TokenKind::Eq);
                    partition.tablespace = Some(self.expect_word()?);
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Parses `(v1, v2, ...)` where each value is captured as raw source text.
    fn parse_value_list(&mut self) -> Result<Vec<String>, ParseError> {
        let open = self.expect(&TokenKind::LeftParen)?;
        let mut values = Vec::new();
        let mut value_start = open.span.end;
        let mut depth = 0usize;
        loop {
            let token = self.advance();
            match token.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen if depth > 0 => depth -= 1,
                TokenKind::Comma | TokenKind::RightParen if depth == 0 => {
                    let value = normalize_whitespace(self.slice(value_start, token.span.start));
                    if !value.is_empty() {
                        values.push(value);
                    }
                    if token.kind == TokenKind::RightParen {
                        return Ok(values);
                    }
                    value_start = token.span.end;
                }
                TokenKind::Eof => return Err(ParseError::unexpected("')'", &token)),
                _ => {}
            }
        }
    }

    // ---- Helpers ---------------------------------------------------

    /// Returns the current token.
    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    /// Returns the token `n` positions ahead.
    fn peek(&self, n: usize) -> &Token {
        self.tokens.get(self.pos + n).unwrap_or(&self.eof)
    }

    /// Advances to the next token and returns the consumed one.
    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Checks if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current().kind) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current().is_keyword(keyword)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        let matched = self.check(kind);
        if matched {
            self.advance();
        }
        matched
    }

    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        let matched = self.check_keyword(keyword);
        if matched {
            self.advance();
        }
        matched
    }

    /// Expects the current token to be the given kind.
    fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected(kind.to_string(), self.current()))
        }
    }

    /// Expects the current token to be the given keyword.
    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(ParseError::unexpected(keyword.as_str(), self.current()))
        }
    }

    /// Expects and returns a name: an identifier, a quoted identifier, or a
    /// non-reserved keyword as written.
    fn expect_name(&mut self) -> Result<String, ParseError> {
        self.expect_name_as("identifier")
    }

    fn expect_name_as(&mut self, expected: &str) -> Result<String, ParseError> {
        if self.current().is_name() {
            Ok(self.advance().text)
        } else {
            Err(ParseError::unexpected(expected, self.current()))
        }
    }

    /// Expects `name` or `schema.name`.
    fn expect_qualified_name(&mut self) -> Result<(Option<String>, String), ParseError> {
        let first = self.expect_name_as("table name")?;
        if self.eat(&TokenKind::Dot) {
            let name = self.expect_name_as("table name")?;
            Ok((Some(first), name))
        } else {
            Ok((None, first))
        }
    }

    /// Parses `(name [, name]...)`; the list may be empty.
    fn parse_name_list(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut names = Vec::new();
        if self.eat(&TokenKind::RightParen) {
            return Ok(names);
        }
        loop {
            names.push(self.expect_name_as("column name")?);
            if !self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::RightParen)?;
                return Ok(names);
            }
        }
    }

    /// Expects a string literal and returns its raw inner text.
    fn expect_string(&mut self) -> Result<String, ParseError> {
        if matches!(self.current().kind, TokenKind::String { .. }) {
            Ok(self.advance().text)
        } else {
            Err(ParseError::unexpected("string", self.current()))
        }
    }

    fn expect_u64(&mut self) -> Result<u64, ParseError> {
        let token = self.current();
        if token.kind == TokenKind::Number {
            if let Ok(value) = token.text.parse::<u64>() {
                self.advance();
                return Ok(value);
            }
        }
        Err(ParseError::unexpected("unsigned integer", token))
    }

    /// Expects an option value: any word, string or number.
    fn expect_word(&mut self) -> Result<String, ParseError> {
        let kind = self.current().kind;
        match kind {
            TokenKind::Identifier
            | TokenKind::QuotedIdentifier
            | TokenKind::String { .. }
            | TokenKind::Number
            | TokenKind::Keyword(_) => Ok(self.advance().text),
            _ => Err(ParseError::unexpected("option value", self.current())),
        }
    }

    /// True at a token that ends an element of the list or the statement.
    fn at_element_end(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Comma | TokenKind::RightParen | TokenKind::Semicolon | TokenKind::Eof
        )
    }

    /// Skips a balanced parenthesized group starting at the current `(`.
    fn skip_group(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.advance().kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                TokenKind::Eof => return,
                _ => {}
            }
        }
    }

    /// Parses `( ... )` and returns the whitespace-normalized source text
    /// between the parentheses.
    fn parse_parenthesized_expression(&mut self) -> Result<String, ParseError> {
        let open = self.expect(&TokenKind::LeftParen)?;
        let mut depth = 1usize;
        loop {
            let token = self.advance();
            match token.kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(normalize_whitespace(
                            self.slice(open.span.end, token.span.start),
                        ));
                    }
                }
                TokenKind::Eof => return Err(ParseError::unexpected("')'", &token)),
                _ => {}
            }
        }
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        Span::new(start, end).text(self.source)
    }
}

/// Charset (`_utf8mb4`) or literal-kind (`b`, `x`, `n`) prefix of a string
/// literal.
fn is_introducer(token: &Token) -> bool {
    token.kind == TokenKind::Identifier
        && (token.text.starts_with('_')
            || matches!(token.text.as_str(), "b" | "B" | "x" | "X" | "n" | "N"))
}

fn names_of(parts: Vec<IndexColumn>) -> Vec<String> {
    parts.into_iter().map(|part| part.name).collect()
}

/// Collapses whitespace runs outside quotes into one space and trims the ends.
fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut pending_space = false;

    for c in text.trim().chars() {
        if let Some(q) = quote {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' && q != '`' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        if matches!(c, '\'' | '"' | '`') {
            quote = Some(c);
        }
        out.push(c);
    }
    out
}
