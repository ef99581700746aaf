//! Structural diff of table definitions.
//!
//! [`TableDiffAnalyzer`] compares two optional tables and returns a
//! [`TableDiff`]; [`diff_schemas`] does the same for every table of two dumps.

mod analyzer;
mod changes;
mod schema;
mod table;

pub use analyzer::{DiffOptions, TableDiffAnalyzer, compare_tables};
pub use changes::{
    Change, ChangeCounts, ChangeKind, CheckChanges, CheckDiff, ColumnChanges, ColumnDiff,
    DiffCounts, FieldChange, ForeignKeyChanges, ForeignKeyDiff, IndexChanges, IndexDiff,
    PartitionChanges, PartitionDiff, PrimaryKeyChanges, PrimaryKeyDiff, TableOptionsChanges,
    TableOptionsDiff, field,
};
pub use schema::{SchemaDiff, diff_schemas};
pub use table::{TableDiff, TableSummary};
