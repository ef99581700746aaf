//! Token types for the MySQL lexer.

use core::fmt;

use serde::Serialize;

use super::{Position, Span};

/// Keywords recognized by the lexer.
///
/// Matching is case-insensitive; a word that is not in this table becomes an
/// [`TokenKind::Identifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum Keyword {
    // Statements
    Create,
    Table,
    Temporary,
    If,
    Not,
    Exists,
    Like,
    As,
    Select,
    Ignore,
    Replace,
    Drop,
    Use,
    Database,

    // Integer types
    Tinyint,
    Smallint,
    Mediumint,
    Int,
    Integer,
    Bigint,
    Serial,

    // Fixed and floating point
    Decimal,
    Dec,
    Numeric,
    Fixed,
    Float,
    Double,
    Precision,
    Real,

    // Bit and boolean
    Bit,
    Bool,
    Boolean,

    // Temporal types
    Date,
    Datetime,
    Timestamp,
    Time,
    Year,

    // Character and binary types
    Char,
    Varchar,
    National,
    Nchar,
    Nvarchar,
    Binary,
    Varbinary,
    Tinytext,
    Text,
    Mediumtext,
    Longtext,
    Tinyblob,
    Blob,
    Mediumblob,
    Longblob,
    Enum,
    Set,
    Json,

    // Spatial types
    Geometry,
    Point,
    Linestring,
    Polygon,
    Multipoint,
    Multilinestring,
    Multipolygon,
    Geometrycollection,

    // Column attributes
    Null,
    Default,
    AutoIncrement,
    Unique,
    Primary,
    Key,
    Comment,
    Collate,
    Character,
    Charset,
    Visible,
    Invisible,
    Generated,
    Always,
    Virtual,
    Stored,
    Unsigned,
    Zerofill,
    ColumnFormat,
    Dynamic,
    Storage,
    Disk,
    Memory,

    // Indexes and constraints
    Index,
    Fulltext,
    Spatial,
    Foreign,
    References,
    Check,
    Constraint,
    Enforced,
    Using,
    Btree,
    Hash,

    // Table options
    Engine,
    RowFormat,
    Tablespace,
    Data,
    Directory,
    Compression,
    Encryption,
    KeyBlockSize,
    MaxRows,
    MinRows,
    StatsPersistent,
    StatsAutoRecalc,
    StatsSamplePages,
    PackKeys,
    Checksum,
    DelayKeyWrite,
    Union,
    InsertMethod,

    // Partitioning
    Partition,
    Partitions,
    Subpartition,
    Subpartitions,
    By,
    Range,
    List,
    Columns,
    Values,
    Less,
    Than,
    In,
    Maxvalue,
    Linear,

    // Referential actions
    On,
    Delete,
    Update,
    Cascade,
    Restrict,
    No,
    Action,
    Match,
    Full,
    Partial,
    Simple,

    // Index options
    Asc,
    Desc,
    With,
    Parser,
    Algorithm,
    Lock,
    EngineAttribute,
    SecondaryEngineAttribute,
    Inplace,
    None,
    First,
    Last,
}

impl Keyword {
    /// Attempts to parse a keyword from a string (case-insensitive).
    #[must_use]
    #[allow(clippy::should_implement_trait, clippy::too_many_lines)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "CREATE" => Some(Self::Create),
            "TABLE" => Some(Self::Table),
            "TEMPORARY" => Some(Self::Temporary),
            "IF" => Some(Self::If),
            "NOT" => Some(Self::Not),
            "EXISTS" => Some(Self::Exists),
            "LIKE" => Some(Self::Like),
            "AS" => Some(Self::As),
            "SELECT" => Some(Self::Select),
            "IGNORE" => Some(Self::Ignore),
            "REPLACE" => Some(Self::Replace),
            "DROP" => Some(Self::Drop),
            "USE" => Some(Self::Use),
            "DATABASE" => Some(Self::Database),
            "TINYINT" => Some(Self::Tinyint),
            "SMALLINT" => Some(Self::Smallint),
            "MEDIUMINT" => Some(Self::Mediumint),
            "INT" => Some(Self::Int),
            "INTEGER" => Some(Self::Integer),
            "BIGINT" => Some(Self::Bigint),
            "SERIAL" => Some(Self::Serial),
            "DECIMAL" => Some(Self::Decimal),
            "DEC" => Some(Self::Dec),
            "NUMERIC" => Some(Self::Numeric),
            "FIXED" => Some(Self::Fixed),
            "FLOAT" => Some(Self::Float),
            "DOUBLE" => Some(Self::Double),
            "PRECISION" => Some(Self::Precision),
            "REAL" => Some(Self::Real),
            "BIT" => Some(Self::Bit),
            "BOOL" => Some(Self::Bool),
            "BOOLEAN" => Some(Self::Boolean),
            "DATE" => Some(Self::Date),
            "DATETIME" => Some(Self::Datetime),
            "TIMESTAMP" => Some(Self::Timestamp),
            "TIME" => Some(Self::Time),
            "YEAR" => Some(Self::Year),
            "CHAR" => Some(Self::Char),
            "VARCHAR" => Some(Self::Varchar),
            "NATIONAL" => Some(Self::National),
            "NCHAR" => Some(Self::Nchar),
            "NVARCHAR" => Some(Self::Nvarchar),
            "BINARY" => Some(Self::Binary),
            "VARBINARY" => Some(Self::Varbinary),
            "TINYTEXT" => Some(Self::Tinytext),
            "TEXT" => Some(Self::Text),
            "MEDIUMTEXT" => Some(Self::Mediumtext),
            "LONGTEXT" => Some(Self::Longtext),
            "TINYBLOB" => Some(Self::Tinyblob),
            "BLOB" => Some(Self::Blob),
            "MEDIUMBLOB" => Some(Self::Mediumblob),
            "LONGBLOB" => Some(Self::Longblob),
            "ENUM" => Some(Self::Enum),
            "SET" => Some(Self::Set),
            "JSON" => Some(Self::Json),
            "GEOMETRY" => Some(Self::Geometry),
            "POINT" => Some(Self::Point),
            "LINESTRING" => Some(Self::Linestring),
            "POLYGON" => Some(Self::Polygon),
            "MULTIPOINT" => Some(Self::Multipoint),
            "MULTILINESTRING" => Some(Self::Multilinestring),
            "MULTIPOLYGON" => Some(Self::Multipolygon),
            "GEOMETRYCOLLECTION" => Some(Self::Geometrycollection),
            "NULL" => Some(Self::Null),
            "DEFAULT" => Some(Self::Default),
            "AUTO_INCREMENT" => Some(Self::AutoIncrement),
            "UNIQUE" => Some(Self::Unique),
            "PRIMARY" => Some(Self::Primary),
            "KEY" => Some(Self::Key),
            "COMMENT" => Some(Self::Comment),
            "COLLATE" => Some(Self::Collate),
            "CHARACTER" => Some(Self::Character),
            "CHARSET" => Some(Self::Charset),
            "VISIBLE" => Some(Self::Visible),
            "INVISIBLE" => Some(Self::Invisible),
            "GENERATED" => Some(Self::Generated),
            "ALWAYS" => Some(Self::Always),
            "VIRTUAL" => Some(Self::Virtual),
            "STORED" => Some(Self::Stored),
            "UNSIGNED" => Some(Self::Unsigned),
            "ZEROFILL" => Some(Self::Zerofill),
            "COLUMN_FORMAT" => Some(Self::ColumnFormat),
            "DYNAMIC" => Some(Self::Dynamic),
            "STORAGE" => Some(Self::Storage),
            "DISK" => Some(Self::Disk),
            "MEMORY" => Some(Self::Memory),
            "INDEX" => Some(Self::Index),
            "FULLTEXT" => Some(Self::Fulltext),
            "SPATIAL" => Some(Self::Spatial),
            "FOREIGN" => Some(Self::Foreign),
            "REFERENCES" => Some(Self::References),
            "CHECK" => Some(Self::Check),
            "CONSTRAINT" => Some(Self::Constraint),
            "ENFORCED" => Some(Self::Enforced),
            "USING" => Some(Self::Using),
            "BTREE" => Some(Self::Btree),
            "HASH" => Some(Self::Hash),
            "ENGINE" => Some(Self::Engine),
            "ROW_FORMAT" => Some(Self::RowFormat),
            "TABLESPACE" => Some(Self::Tablespace),
            "DATA" => Some(Self::Data),
            "DIRECTORY" => Some(Self::Directory),
            "COMPRESSION" => Some(Self::Compression),
            "ENCRYPTION" => Some(Self::Encryption),
            "KEY_BLOCK_SIZE" => Some(Self::KeyBlockSize),
            "MAX_ROWS" => Some(Self::MaxRows),
            "MIN_ROWS" => Some(Self::MinRows),
            "STATS_PERSISTENT" => Some(Self::StatsPersistent),
            "STATS_AUTO_RECALC" => Some(Self::StatsAutoRecalc),
            "STATS_SAMPLE_PAGES" => Some(Self::StatsSamplePages),
            "PACK_KEYS" => Some(Self::PackKeys),
            "CHECKSUM" => Some(Self::Checksum),
            "DELAY_KEY_WRITE" => Some(Self::DelayKeyWrite),
            "UNION" => Some(Self::Union),
            "INSERT_METHOD" => Some(Self::InsertMethod),
            "PARTITION" => Some(Self::Partition),
            "PARTITIONS" => Some(Self::Partitions),
            "SUBPARTITION" => Some(Self::Subpartition),
            "SUBPARTITIONS" => Some(Self::Subpartitions),
            "BY" => Some(Self::By),
            "RANGE" => Some(Self::Range),
            "LIST" => Some(Self::List),
            "COLUMNS" => Some(Self::Columns),
            "VALUES" => Some(Self::Values),
            "LESS" => Some(Self::Less),
            "THAN" => Some(Self::Than),
            "IN" => Some(Self::In),
            "MAXVALUE" => Some(Self::Maxvalue),
            "LINEAR" => Some(Self::Linear),
            "ON" => Some(Self::On),
            "DELETE" => Some(Self::Delete),
            "UPDATE" => Some(Self::Update),
            "CASCADE" => Some(Self::Cascade),
            "RESTRICT" => Some(Self::Restrict),
            "NO" => Some(Self::No),
            "ACTION" => Some(Self::Action),
            "MATCH" => Some(Self::Match),
            "FULL" => Some(Self::Full),
            "PARTIAL" => Some(Self::Partial),
            "SIMPLE" => Some(Self::Simple),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "WITH" => Some(Self::With),
            "PARSER" => Some(Self::Parser),
            "ALGORITHM" => Some(Self::Algorithm),
            "LOCK" => Some(Self::Lock),
            "ENGINE_ATTRIBUTE" => Some(Self::EngineAttribute),
            "SECONDARY_ENGINE_ATTRIBUTE" => Some(Self::SecondaryEngineAttribute),
            "INPLACE" => Some(Self::Inplace),
            "NONE" => Some(Self::None),
            "FIRST" => Some(Self::First),
            "LAST" => Some(Self::Last),
            _ => None,
        }
    }

    /// Returns the keyword as it is written in SQL.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Table => "TABLE",
            Self::Temporary => "TEMPORARY",
            Self::If => "IF",
            Self::Not => "NOT",
            Self::Exists => "EXISTS",
            Self::Like => "LIKE",
            Self::As => "AS",
            Self::Select => "SELECT",
            Self::Ignore => "IGNORE",
            Self::Replace => "REPLACE",
            Self::Drop => "DROP",
            Self::Use => "USE",
            Self::Database => "DATABASE",
            Self::Tinyint => "TINYINT",
            Self::Smallint => "SMALLINT",
            Self::Mediumint => "MEDIUMINT",
            Self::Int => "INT",
            Self::Integer => "INTEGER",
            Self::Bigint => "BIGINT",
            Self::Serial => "SERIAL",
            Self::Decimal => "DECIMAL",
            Self::Dec => "DEC",
            Self::Numeric => "NUMERIC",
            Self::Fixed => "FIXED",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::Precision => "PRECISION",
            Self::Real => "REAL",
            Self::Bit => "BIT",
            Self::Bool => "BOOL",
            Self::Boolean => "BOOLEAN",
            Self::Date => "DATE",
            Self::Datetime => "DATETIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Time => "TIME",
            Self::Year => "YEAR",
            Self::Char => "CHAR",
            Self::Varchar => "VARCHAR",
            Self::National => "NATIONAL",
            Self::Nchar => "NCHAR",
            Self::Nvarchar => "NVARCHAR",
            Self::Binary => "BINARY",
            Self::Varbinary => "VARBINARY",
            Self::Tinytext => "TINYTEXT",
            Self::Text => "TEXT",
            Self::Mediumtext => "MEDIUMTEXT",
            Self::Longtext => "LONGTEXT",
            Self::Tinyblob => "TINYBLOB",
            Self::Blob => "BLOB",
            Self::Mediumblob => "MEDIUMBLOB",
            Self::Longblob => "LONGBLOB",
            Self::Enum => "ENUM",
            Self::Set => "SET",
            Self::Json => "JSON",
            Self::Geometry => "GEOMETRY",
            Self::Point => "POINT",
            Self::Linestring => "LINESTRING",
            Self::Polygon => "POLYGON",
            Self::Multipoint => "MULTIPOINT",
            Self::Multilinestring => "MULTILINESTRING",
            Self::Multipolygon => "MULTIPOLYGON",
            Self::Geometrycollection => "GEOMETRYCOLLECTION",
            Self::Null => "NULL",
            Self::Default => "DEFAULT",
            Self::AutoIncrement => "AUTO_INCREMENT",
            Self::Unique => "UNIQUE",
            Self::Primary => "PRIMARY",
            Self::Key => "KEY",
            Self::Comment => "COMMENT",
            Self::Collate => "COLLATE",
            Self::Character => "CHARACTER",
            Self::Charset => "CHARSET",
            Self::Visible => "VISIBLE",
            Self::Invisible => "INVISIBLE",
            Self::Generated => "GENERATED",
            Self::Always => "ALWAYS",
            Self::Virtual => "VIRTUAL",
            Self::Stored => "STORED",
            Self::Unsigned => "UNSIGNED",
            Self::Zerofill => "ZEROFILL",
            Self::ColumnFormat => "COLUMN_FORMAT",
            Self::Dynamic => "DYNAMIC",
            Self::Storage => "STORAGE",
            Self::Disk => "DISK",
            Self::Memory => "MEMORY",
            Self::Index => "INDEX",
            Self::Fulltext => "FULLTEXT",
            Self::Spatial => "SPATIAL",
            Self::Foreign => "FOREIGN",
            Self::References => "REFERENCES",
            Self::Check => "CHECK",
            Self::Constraint => "CONSTRAINT",
            Self::Enforced => "ENFORCED",
            Self::Using => "USING",
            Self::Btree => "BTREE",
            Self::Hash => "HASH",
            Self::Engine => "ENGINE",
            Self::RowFormat => "ROW_FORMAT",
            Self::Tablespace => "TABLESPACE",
            Self::Data => "DATA",
            Self::Directory => "DIRECTORY",
            Self::Compression => "COMPRESSION",
            Self::Encryption => "ENCRYPTION",
            Self::KeyBlockSize => "KEY_BLOCK_SIZE",
            Self::MaxRows => "MAX_ROWS",
            Self::MinRows => "MIN_ROWS",
            Self::StatsPersistent => "STATS_PERSISTENT",
            Self::StatsAutoRecalc => "STATS_AUTO_RECALC",
            Self::StatsSamplePages => "STATS_SAMPLE_PAGES",
            Self::PackKeys => "PACK_KEYS",
            Self::Checksum => "CHECKSUM",
            Self::DelayKeyWrite => "DELAY_KEY_WRITE",
            Self::Union => "UNION",
            Self::InsertMethod => "INSERT_METHOD",
            Self::Partition => "PARTITION",
            Self::Partitions => "PARTITIONS",
            Self::Subpartition => "SUBPARTITION",
            Self::Subpartitions => "SUBPARTITIONS",
            Self::By => "BY",
            Self::Range => "RANGE",
            Self::List => "LIST",
            Self::Columns => "COLUMNS",
            Self::Values => "VALUES",
            Self::Less => "LESS",
            Self::Than => "THAN",
            Self::In => "IN",
            Self::Maxvalue => "MAXVALUE",
            Self::Linear => "LINEAR",
            Self::On => "ON",
            Self::Delete => "DELETE",
            Self::Update => "UPDATE",
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::No => "NO",
            Self::Action => "ACTION",
            Self::Match => "MATCH",
            Self::Full => "FULL",
            Self::Partial => "PARTIAL",
            Self::Simple => "SIMPLE",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::With => "WITH",
            Self::Parser => "PARSER",
            Self::Algorithm => "ALGORITHM",
            Self::Lock => "LOCK",
            Self::EngineAttribute => "ENGINE_ATTRIBUTE",
            Self::SecondaryEngineAttribute => "SECONDARY_ENGINE_ATTRIBUTE",
            Self::Inplace => "INPLACE",
            Self::None => "NONE",
            Self::First => "FIRST",
            Self::Last => "LAST",
        }
    }

    /// Returns true if the keyword names a column data type.
    #[must_use]
    pub const fn is_data_type(&self) -> bool {
        matches!(
            self,
            Self::Tinyint
                | Self::Smallint
                | Self::Mediumint
                | Self::Int
                | Self::Integer
                | Self::Bigint
                | Self::Serial
                | Self::Decimal
                | Self::Dec
                | Self::Numeric
                | Self::Fixed
                | Self::Float
                | Self::Double
                | Self::Real
                | Self::Bit
                | Self::Bool
                | Self::Boolean
                | Self::Date
                | Self::Datetime
                | Self::Timestamp
                | Self::Time
                | Self::Year
                | Self::Char
                | Self::Varchar
                | Self::National
                | Self::Nchar
                | Self::Nvarchar
                | Self::Binary
                | Self::Varbinary
                | Self::Tinytext
                | Self::Text
                | Self::Mediumtext
                | Self::Longtext
                | Self::Tinyblob
                | Self::Blob
                | Self::Mediumblob
                | Self::Longblob
                | Self::Enum
                | Self::Set
                | Self::Json
                | Self::Geometry
                | Self::Point
                | Self::Linestring
                | Self::Polygon
                | Self::Multipoint
                | Self::Multilinestring
                | Self::Multipolygon
                | Self::Geometrycollection
        )
    }

    /// Returns true if MySQL accepts the keyword as an unquoted table,
    /// column, or index name.
    #[must_use]
    pub const fn is_non_reserved(&self) -> bool {
        matches!(
            self,
            Self::Serial
                | Self::Fixed
                | Self::National
                | Self::Nchar
                | Self::Nvarchar
                | Self::Bit
                | Self::Bool
                | Self::Boolean
                | Self::Date
                | Self::Datetime
                | Self::Timestamp
                | Self::Time
                | Self::Year
                | Self::Text
                | Self::Enum
                | Self::Json
                | Self::Geometry
                | Self::Point
                | Self::Linestring
                | Self::Polygon
                | Self::Multipoint
                | Self::Multilinestring
                | Self::Multipolygon
                | Self::Geometrycollection
                | Self::AutoIncrement
                | Self::Comment
                | Self::Charset
                | Self::Visible
                | Self::Invisible
                | Self::Always
                | Self::ColumnFormat
                | Self::Dynamic
                | Self::Storage
                | Self::Disk
                | Self::Memory
                | Self::Enforced
                | Self::Btree
                | Self::Hash
                | Self::Engine
                | Self::RowFormat
                | Self::Tablespace
                | Self::Data
                | Self::Directory
                | Self::Compression
                | Self::Encryption
                | Self::KeyBlockSize
                | Self::MaxRows
                | Self::MinRows
                | Self::StatsPersistent
                | Self::StatsAutoRecalc
                | Self::StatsSamplePages
                | Self::PackKeys
                | Self::Checksum
                | Self::DelayKeyWrite
                | Self::InsertMethod
                | Self::Partitions
                | Self::Subpartitions
                | Self::List
                | Self::Columns
                | Self::Less
                | Self::Action
                | Self::No
                | Self::Full
                | Self::Partial
                | Self::Simple
                | Self::Parser
                | Self::Algorithm
                | Self::EngineAttribute
                | Self::SecondaryEngineAttribute
                | Self::Inplace
                | Self::None
                | Self::First
                | Self::Last
                | Self::Temporary
        )
    }
}

impl From<Keyword> for &'static str {
    fn from(keyword: Keyword) -> Self {
        keyword.as_str()
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A word found in the keyword table.
    Keyword(Keyword),
    /// A bare identifier (e.g., `users`).
    Identifier,
    /// A backtick-quoted identifier; the token text excludes the backticks.
    QuotedIdentifier,
    /// A single- or double-quoted string; the token text is the raw inner text.
    String {
        /// The quote character that opened the literal.
        quote: char,
    },
    /// A digit run, possibly with a fractional part or a leading minus.
    Number,
    /// A MySQL conditional comment (`/*! ... */`); the token text is its body.
    Directive,
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// =
    Eq,
    /// .
    Dot,
    /// End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyword(kw) => write!(f, "keyword {kw}"),
            Self::Identifier => f.write_str("identifier"),
            Self::QuotedIdentifier => f.write_str("quoted identifier"),
            Self::String { .. } => f.write_str("string"),
            Self::Number => f.write_str("number"),
            Self::Directive => f.write_str("directive"),
            Self::LeftParen => f.write_str("'('"),
            Self::RightParen => f.write_str("')'"),
            Self::Comma => f.write_str("','"),
            Self::Semicolon => f.write_str("';'"),
            Self::Eq => f.write_str("'='"),
            Self::Dot => f.write_str("'.'"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

/// A token with its location in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The token text (see [`TokenKind`] for what each kind stores).
    pub text: String,
    /// Byte range covered by the token, quotes included.
    pub span: Span,
    /// Offset, line and column of the first character.
    pub position: Position,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            position,
        }
    }

    /// Creates an end-of-input token at the given location.
    #[must_use]
    pub const fn eof(offset: usize, position: Position) -> Self {
        Self {
            kind: TokenKind::Eof,
            text: String::new(),
            span: Span::new(offset, offset),
            position,
        }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this token is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// Returns true if the token can stand for a table, column or index name.
    #[must_use]
    pub const fn is_name(&self) -> bool {
        match self.kind {
            TokenKind::Identifier | TokenKind::QuotedIdentifier => true,
            TokenKind::Keyword(kw) => kw.is_non_reserved(),
            _ => false,
        }
    }

    /// Returns the token as it would be written in SQL: strings get their
    /// quotes back, quoted identifiers their backticks.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self.kind {
            TokenKind::String { quote } => format!("{quote}{}{quote}", self.text),
            TokenKind::QuotedIdentifier => format!("`{}`", self.text),
            _ => self.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text, Span::new(0, text.len()), Position::default())
    }

    #[test]
    fn test_keyword_from_str() {
        assert_eq!(Keyword::from_str("CREATE"), Some(Keyword::Create));
        assert_eq!(Keyword::from_str("create"), Some(Keyword::Create));
        assert_eq!(Keyword::from_str("Auto_Increment"), Some(Keyword::AutoIncrement));
        assert_eq!(Keyword::from_str("users"), None);
    }

    #[test]
    fn test_keyword_as_str_round_trips() {
        for kw in [
            Keyword::KeyBlockSize,
            Keyword::StatsSamplePages,
            Keyword::Geometrycollection,
            Keyword::EngineAttribute,
        ] {
            assert_eq!(Keyword::from_str(kw.as_str()), Some(kw));
        }
    }

    #[test]
    fn test_data_type_keywords() {
        assert!(Keyword::Varchar.is_data_type());
        assert!(Keyword::Set.is_data_type());
        assert!(!Keyword::Unsigned.is_data_type());
    }

    #[test]
    fn test_non_reserved_names() {
        assert!(token(TokenKind::Keyword(Keyword::Data), "data").is_name());
        assert!(token(TokenKind::Keyword(Keyword::Date), "date").is_name());
        assert!(!token(TokenKind::Keyword(Keyword::Primary), "PRIMARY").is_name());
        assert!(token(TokenKind::QuotedIdentifier, "order").is_name());
    }

    #[test]
    fn test_to_sql_restores_quotes() {
        let s = token(TokenKind::String { quote: '\'' }, "It''s");
        assert_eq!(s.to_sql(), "'It''s'");
        let q = token(TokenKind::QuotedIdentifier, "order");
        assert_eq!(q.to_sql(), "`order`");
    }

    #[test]
    fn test_token_kind_display() {
        assert_eq!(TokenKind::Keyword(Keyword::Table).to_string(), "keyword TABLE");
        assert_eq!(TokenKind::RightParen.to_string(), "')'");
        assert_eq!(TokenKind::Eof.to_string(), "end of input");
    }
}
