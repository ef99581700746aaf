//! Column definitions and data types.

use core::fmt;

use serde::{Serialize, Serializer};

use super::ForeignKeyReference;

/// A column data type, e.g. `DECIMAL(10,2) UNSIGNED`.
///
/// Parameters are kept as written: numeric precision and scale, or the quoted
/// values of an `ENUM`/`SET`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataType {
    /// Upper-cased type name.
    pub name: String,
    /// Parameters as written, without the parentheses.
    pub parameters: Vec<String>,
    /// `UNSIGNED` modifier.
    pub unsigned: bool,
    /// `ZEROFILL` modifier.
    pub zerofill: bool,
}

impl DataType {
    /// Creates a data type with no parameters or modifiers.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            unsigned: false,
            zerofill: false,
        }
    }
}

impl fmt::Display for DataType {
    /// Canonical form: `NAME(p1,p2) UNSIGNED ZEROFILL`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.parameters.is_empty() {
            write!(f, "({})", self.parameters.join(","))?;
        }
        if self.unsigned {
            f.write_str(" UNSIGNED")?;
        }
        if self.zerofill {
            f.write_str(" ZEROFILL")?;
        }
        Ok(())
    }
}

/// Whether a column was declared `NULL`, `NOT NULL`, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nullability {
    /// No nullability clause.
    #[default]
    Unspecified,
    /// Explicit `NULL`.
    Null,
    /// `NOT NULL`.
    NotNull,
}

impl Nullability {
    /// Returns the explicit flag, `None` when unspecified.
    #[must_use]
    pub const fn as_option(self) -> Option<bool> {
        match self {
            Self::Unspecified => None,
            Self::Null => Some(true),
            Self::NotNull => Some(false),
        }
    }
}

impl Serialize for Nullability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

/// How a generated column's value is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GeneratedStorage {
    /// Computed on read (MySQL's default).
    #[default]
    Virtual,
    /// Computed on write and stored.
    Stored,
}

impl GeneratedStorage {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Virtual => "VIRTUAL",
            Self::Stored => "STORED",
        }
    }
}

/// `[GENERATED ALWAYS] AS (expr) [VIRTUAL | STORED]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedColumn {
    /// Expression text, whitespace-normalized.
    pub expression: String,
    /// Whether the value is stored or computed on read.
    pub storage: GeneratedStorage,
}

/// A column inside `CREATE TABLE (...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDefinition {
    /// Column name as written; matching is case-sensitive.
    pub name: String,
    /// Declared type with its modifiers.
    pub data_type: DataType,
    /// `NULL`, `NOT NULL` or neither.
    pub nullability: Nullability,
    /// Raw source text of the default, string literals with their quotes.
    pub default_value: Option<String>,
    /// `AUTO_INCREMENT` flag.
    pub auto_increment: bool,
    /// Inline `UNIQUE [KEY]`.
    pub unique: bool,
    /// Inline `PRIMARY KEY` or bare `KEY`.
    pub primary_key: bool,
    /// `COMMENT` text without its quotes.
    pub comment: Option<String>,
    /// `COLLATE` name.
    pub collation: Option<String>,
    /// `CHARACTER SET` or `CHARSET` name.
    pub character_set: Option<String>,
    /// `Some(true)` for `VISIBLE`, `Some(false)` for `INVISIBLE`.
    pub visible: Option<bool>,
    /// Expression of a generated column.
    pub generated: Option<GeneratedColumn>,
    /// `FIXED`, `DYNAMIC` or `DEFAULT`.
    pub column_format: Option<String>,
    /// `DISK` or `MEMORY`.
    pub storage: Option<String>,
    /// Raw text of an `ON UPDATE` clause.
    pub on_update: Option<String>,
    /// Inline `REFERENCES` clause.
    pub reference: Option<ForeignKeyReference>,
}

impl ColumnDefinition {
    /// Creates a column with the given name and type and no attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullability: Nullability::Unspecified,
            default_value: None,
            auto_increment: false,
            unique: false,
            primary_key: false,
            comment: None,
            collation: None,
            character_set: None,
            visible: None,
            generated: None,
            column_format: None,
            storage: None,
            on_update: None,
            reference: None,
        }
    }
}
