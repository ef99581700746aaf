//! The root table definition, table options and partitioning.

use core::fmt;

use serde::Serialize;

use super::{
    CheckConstraint, ColumnDefinition, ForeignKeyDefinition, IndexDefinition,
    PrimaryKeyDefinition,
};

/// One parsed `CREATE TABLE` statement.
///
/// Foreign keys name their target table as a string; a table definition never
/// points at another one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDefinition {
    /// Database qualifier from `db.tbl`.
    pub schema: Option<String>,
    /// Unqualified table name.
    pub name: String,
    /// `CREATE TEMPORARY TABLE`.
    pub temporary: bool,
    /// `IF NOT EXISTS` was given.
    pub if_not_exists: bool,
    /// Columns in declaration order.
    pub columns: Vec<ColumnDefinition>,
    /// Table-level `PRIMARY KEY`, if declared.
    pub primary_key: Option<PrimaryKeyDefinition>,
    /// Secondary indexes in declaration order.
    pub indexes: Vec<IndexDefinition>,
    /// Foreign keys in declaration order.
    pub foreign_keys: Vec<ForeignKeyDefinition>,
    /// Table-level and column-level checks.
    pub check_constraints: Vec<CheckConstraint>,
    /// `None` when no option follows the element list.
    pub table_options: Option<TableOptions>,
    /// `PARTITION BY` clause.
    pub partition_options: Option<PartitionOptions>,
}

impl TableDefinition {
    /// Creates an empty table definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            temporary: false,
            if_not_exists: false,
            columns: Vec::new(),
            primary_key: None,
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
            check_constraints: Vec::new(),
            table_options: None,
            partition_options: None,
        }
    }

    /// Looks up a column by exact name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns `schema.name`, or just the name when unqualified.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{schema}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Table options following the element list.
///
/// A sparse bag: only options written in the source are `Some`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableOptions {
    /// `ENGINE` name as written.
    pub engine: Option<String>,
    /// Next `AUTO_INCREMENT` value.
    pub auto_increment: Option<u64>,
    /// `[DEFAULT] CHARACTER SET` name.
    pub character_set: Option<String>,
    /// `[DEFAULT] COLLATE` name.
    pub collation: Option<String>,
    /// `COMMENT` text without its quotes.
    pub comment: Option<String>,
    /// `ROW_FORMAT` as written.
    pub row_format: Option<String>,
    /// `KEY_BLOCK_SIZE`.
    pub key_block_size: Option<u64>,
    /// `MAX_ROWS`.
    pub max_rows: Option<u64>,
    /// `MIN_ROWS`.
    pub min_rows: Option<u64>,
    /// `TABLESPACE` name.
    pub tablespace: Option<String>,
    /// `DATA DIRECTORY` path.
    pub data_directory: Option<String>,
    /// `INDEX DIRECTORY` path.
    pub index_directory: Option<String>,
    /// `ENCRYPTION`, `'Y'` or `'N'` unquoted.
    pub encryption: Option<String>,
    /// `COMPRESSION` algorithm.
    pub compression: Option<String>,
    /// `STATS_PERSISTENT`: `0`, `1` or `DEFAULT`.
    pub stats_persistent: Option<String>,
    /// `STATS_AUTO_RECALC`.
    pub stats_auto_recalc: Option<String>,
    /// `STATS_SAMPLE_PAGES`.
    pub stats_sample_pages: Option<String>,
    /// `PACK_KEYS`.
    pub pack_keys: Option<String>,
    /// `CHECKSUM`.
    pub checksum: Option<String>,
    /// `DELAY_KEY_WRITE`.
    pub delay_key_write: Option<String>,
    /// Underlying tables of a MERGE table.
    pub union: Option<Vec<String>>,
    /// `INSERT_METHOD` of a MERGE table.
    pub insert_method: Option<String>,
}

impl TableOptions {
    /// Returns true if no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Partitioning method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartitionKind {
    /// `[LINEAR] HASH(expr)`.
    Hash,
    /// `[LINEAR] KEY(cols)`.
    Key,
    /// `RANGE(expr)` or `RANGE COLUMNS(cols)`.
    Range,
    /// `LIST(expr)` or `LIST COLUMNS(cols)`.
    List,
}

impl PartitionKind {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hash => "HASH",
            Self::Key => "KEY",
            Self::Range => "RANGE",
            Self::List => "LIST",
        }
    }
}

impl fmt::Display for PartitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `PARTITION BY ...` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionOptions {
    /// Partitioning method.
    pub kind: PartitionKind,
    /// `LINEAR HASH` or `LINEAR KEY`.
    pub linear: bool,
    /// Expression of `HASH(expr)`, `RANGE(expr)` or `LIST(expr)`.
    pub expression: Option<String>,
    /// Column list of `KEY(cols)` or `RANGE|LIST COLUMNS(cols)`.
    pub columns: Vec<String>,
    /// Value of `PARTITIONS n`.
    pub partition_count: Option<u64>,
    /// Explicit partition definitions.
    pub partitions: Vec<PartitionDefinition>,
}

impl PartitionOptions {
    /// Creates partition options with only the method set.
    #[must_use]
    pub const fn new(kind: PartitionKind) -> Self {
        Self {
            kind,
            linear: false,
            expression: None,
            columns: Vec::new(),
            partition_count: None,
            partitions: Vec::new(),
        }
    }
}

/// Bound of a RANGE or LIST partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionBound {
    /// `VALUES LESS THAN (...)`; `MAXVALUE` is kept as a value.
    LessThan(Vec<String>),
    /// `VALUES IN (...)`.
    In(Vec<String>),
}

/// One `PARTITION name ...` definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionDefinition {
    /// Partition name.
    pub name: String,
    /// `VALUES` clause, absent for HASH and KEY.
    pub bound: Option<PartitionBound>,
    /// `ENGINE` name as written.
    pub engine: Option<String>,
    /// `COMMENT` text without its quotes.
    pub comment: Option<String>,
    /// `DATA DIRECTORY` path.
    pub data_directory: Option<String>,
    /// `INDEX DIRECTORY` path.
    pub index_directory: Option<String>,
    /// `MAX_ROWS`.
    pub max_rows: Option<u64>,
    /// `MIN_ROWS`.
    pub min_rows: Option<u64>,
    /// `TABLESPACE` name.
    pub tablespace: Option<String>,
}

impl PartitionDefinition {
    /// Creates a partition with no bound or options.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bound: None,
            engine: None,
            comment: None,
            data_directory: None,
            index_directory: None,
            max_rows: None,
            min_rows: None,
            tablespace: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::DataType;

    #[test]
    fn test_qualified_name() {
        let mut table = TableDefinition::new("users");
        assert_eq!(table.qualified_name(), "users");
        table.schema = Some("app".into());
        assert_eq!(table.qualified_name(), "app.users");
    }

    #[test]
    fn test_column_lookup_is_case_sensitive() {
        let mut table = TableDefinition::new("t");
        table
            .columns
            .push(ColumnDefinition::new("Id", DataType::new("INT")));
        assert!(table.column("Id").is_some());
        assert!(table.column("id").is_none());
    }

    #[test]
    fn test_table_options_is_empty() {
        let mut options = TableOptions::default();
        assert!(options.is_empty());
        options.engine = Some("InnoDB".into());
        assert!(!options.is_empty());
    }
}
