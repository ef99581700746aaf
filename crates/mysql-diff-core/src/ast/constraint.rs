//! Keys, indexes, foreign keys and check constraints.

use core::fmt;

use serde::Serialize;

/// Sort direction of an index key part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    /// `ASC`.
    Asc,
    /// `DESC`.
    Desc,
}

impl SortDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One key part of an index or primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexColumn {
    /// Column name, or `(expr)` for a functional key part.
    pub name: String,
    /// Prefix length, as in `name(10)`.
    pub length: Option<u64>,
    /// Explicit `ASC` or `DESC`.
    pub direction: Option<SortDirection>,
}

impl IndexColumn {
    /// Creates a key part on a whole column.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            length: None,
            direction: None,
        }
    }

    /// Renders a list of key parts as `(a, b(10) DESC)`.
    #[must_use]
    pub fn list_to_string(columns: &[Self]) -> String {
        let parts: Vec<String> = columns.iter().map(ToString::to_string).collect();
        format!("({})", parts.join(", "))
    }
}

impl fmt::Display for IndexColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(length) = self.length {
            write!(f, "({length})")?;
        }
        if let Some(direction) = self.direction {
            write!(f, " {}", direction.as_str())?;
        }
        Ok(())
    }
}

/// Index kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndexKind {
    /// Plain `INDEX` or `KEY`.
    Index,
    /// `UNIQUE`.
    Unique,
    /// `FULLTEXT`.
    Fulltext,
    /// `SPATIAL`.
    Spatial,
}

impl IndexKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "INDEX",
            Self::Unique => "UNIQUE",
            Self::Fulltext => "FULLTEXT",
            Self::Spatial => "SPATIAL",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index storage structure named by `USING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IndexType {
    /// `USING BTREE`.
    Btree,
    /// `USING HASH`.
    Hash,
}

impl IndexType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Btree => "BTREE",
            Self::Hash => "HASH",
        }
    }
}

/// A secondary index: `INDEX`, `UNIQUE`, `FULLTEXT` or `SPATIAL`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDefinition {
    /// Index name; `None` lets MySQL derive one.
    pub name: Option<String>,
    /// Index kind.
    pub kind: IndexKind,
    /// Key parts in order.
    pub columns: Vec<IndexColumn>,
    /// `KEY_BLOCK_SIZE` option.
    pub key_block_size: Option<u64>,
    /// `USING BTREE` or `USING HASH`.
    pub using: Option<IndexType>,
    /// `COMMENT` text without its quotes.
    pub comment: Option<String>,
    /// `Some(false)` for `INVISIBLE`.
    pub visible: Option<bool>,
    /// Full-text parser named by `WITH PARSER`.
    pub parser: Option<String>,
    /// `ALGORITHM` value as written.
    pub algorithm: Option<String>,
    /// `LOCK` value as written.
    pub lock: Option<String>,
    /// `ENGINE_ATTRIBUTE` string.
    pub engine_attribute: Option<String>,
}

impl IndexDefinition {
    /// Creates an index with no options.
    #[must_use]
    pub const fn new(name: Option<String>, kind: IndexKind, columns: Vec<IndexColumn>) -> Self {
        Self {
            name,
            kind,
            columns,
            key_block_size: None,
            using: None,
            comment: None,
            visible: None,
            parser: None,
            algorithm: None,
            lock: None,
            engine_attribute: None,
        }
    }

    /// Returns the key-part column names in order.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// The table's primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrimaryKeyDefinition {
    /// Name from a `CONSTRAINT name` prefix.
    pub name: Option<String>,
    /// Key parts in order.
    pub columns: Vec<IndexColumn>,
    /// `USING BTREE` or `USING HASH`.
    pub using: Option<IndexType>,
    /// `COMMENT` text without its quotes.
    pub comment: Option<String>,
}

impl PrimaryKeyDefinition {
    /// Creates a primary key over the given key parts.
    #[must_use]
    pub const fn new(columns: Vec<IndexColumn>) -> Self {
        Self {
            name: None,
            columns,
            using: None,
            comment: None,
        }
    }

    /// Returns the key-part column names in order.
    #[must_use]
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Action taken by `ON DELETE` or `ON UPDATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReferentialAction {
    /// Delete or update the referencing rows.
    #[serde(rename = "CASCADE")]
    Cascade,
    /// Reject the change.
    #[serde(rename = "RESTRICT")]
    Restrict,
    /// Set the referencing columns to `NULL`.
    #[serde(rename = "SET NULL")]
    SetNull,
    /// Set the referencing columns to their defaults.
    #[serde(rename = "SET DEFAULT")]
    SetDefault,
    /// Same as `RESTRICT` in InnoDB.
    #[serde(rename = "NO ACTION")]
    NoAction,
}

impl ReferentialAction {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::NoAction => "NO ACTION",
        }
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `REFERENCES` side of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyReference {
    /// Referenced table, `db.tbl` when qualified. Not resolved against the dump.
    pub table: String,
    /// Referenced columns in order.
    pub columns: Vec<String>,
    /// `ON DELETE` action.
    pub on_delete: Option<ReferentialAction>,
    /// `ON UPDATE` action.
    pub on_update: Option<ReferentialAction>,
}

/// A `FOREIGN KEY` constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyDefinition {
    /// Name from `CONSTRAINT name` or `FOREIGN KEY name`.
    pub name: Option<String>,
    /// Local columns in order.
    pub columns: Vec<String>,
    /// Target table and actions.
    pub reference: ForeignKeyReference,
}

/// A `CHECK (expr)` constraint, table-level or inline on a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckConstraint {
    /// Name from a `CONSTRAINT name` prefix.
    pub name: Option<String>,
    /// Expression text, whitespace-normalized.
    pub expression: String,
    /// `Some(false)` for `NOT ENFORCED`.
    pub enforced: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_columns_display() {
        let mut prefix = IndexColumn::new("name");
        prefix.length = Some(10);
        prefix.direction = Some(SortDirection::Desc);
        let cols = vec![IndexColumn::new("id"), prefix];
        assert_eq!(IndexColumn::list_to_string(&cols), "(id, name(10) DESC)");
    }

    #[test]
    fn test_referential_action_as_str() {
        assert_eq!(ReferentialAction::SetNull.as_str(), "SET NULL");
        assert_eq!(ReferentialAction::NoAction.to_string(), "NO ACTION");
    }
}
