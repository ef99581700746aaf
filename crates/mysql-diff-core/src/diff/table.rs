//! Table-level change-set and its summary.

use core::fmt;

use serde::Serialize;

use super::changes::{
    ChangeCounts, CheckDiff, ColumnDiff, DiffCounts, ForeignKeyDiff, IndexDiff, PartitionDiff,
    PrimaryKeyDiff, TableOptionsDiff,
};

/// Every structural difference between two versions of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDiff {
    /// Name of the new table, or of the old one when the table was removed.
    pub name: String,
    /// Old and new names differ.
    pub table_name_changed: bool,
    /// Any table option differs.
    pub table_options_changed: bool,
    /// Column changes.
    pub columns: Vec<ColumnDiff>,
    /// Primary key change, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<PrimaryKeyDiff>,
    /// Secondary index changes.
    pub indexes: Vec<IndexDiff>,
    /// Foreign key changes.
    pub foreign_keys: Vec<ForeignKeyDiff>,
    /// Check constraint changes.
    pub check_constraints: Vec<CheckDiff>,
    /// Table option changes, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_options: Option<TableOptionsDiff>,
    /// Partitioning change, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partitioning: Option<PartitionDiff>,
    /// Per-category totals.
    pub counts: DiffCounts,
}

impl TableDiff {
    /// Returns true if anything differs. Consumers use this to skip
    /// untouched tables.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.table_name_changed
            || self.table_options_changed
            || !self.columns.is_empty()
            || self.primary_key.is_some()
            || !self.indexes.is_empty()
            || !self.foreign_keys.is_empty()
            || !self.check_constraints.is_empty()
            || self.partitioning.is_some()
    }

    /// Returns the per-category counters and changed flags.
    #[must_use]
    pub const fn summary(&self) -> TableSummary {
        TableSummary {
            table_name_changed: self.table_name_changed,
            columns: self.counts.columns,
            indexes: self.counts.indexes,
            foreign_keys: self.counts.foreign_keys,
            check_constraints: self.counts.check_constraints,
            primary_key_changed: self.primary_key.is_some(),
            table_options_changed: self.table_options_changed,
            partitioning_changed: self.partitioning.is_some(),
        }
    }
}

/// Counters of a [`TableDiff`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct TableSummary {
    /// Old and new names differ.
    pub table_name_changed: bool,
    /// Column counters.
    pub columns: ChangeCounts,
    /// Index counters.
    pub indexes: ChangeCounts,
    /// Foreign key counters.
    pub foreign_keys: ChangeCounts,
    /// Check constraint counters.
    pub check_constraints: ChangeCounts,
    /// The primary key differs.
    pub primary_key_changed: bool,
    /// Any table option differs.
    pub table_options_changed: bool,
    /// The partitioning differs.
    pub partitioning_changed: bool,
}

impl fmt::Display for TableSummary {
    /// Comma-separated list of what changed, e.g.
    /// `1 column added, 2 columns modified, options changed`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.table_name_changed {
            parts.push("name changed".to_string());
        }
        push_counts(&mut parts, self.columns, "column", "columns");
        if self.primary_key_changed {
            parts.push("primary key changed".to_string());
        }
        push_counts(&mut parts, self.indexes, "index", "indexes");
        push_counts(&mut parts, self.foreign_keys, "foreign key", "foreign keys");
        push_counts(&mut parts, self.check_constraints, "check", "checks");
        if self.table_options_changed {
            parts.push("options changed".to_string());
        }
        if self.partitioning_changed {
            parts.push("partitioning changed".to_string());
        }

        if parts.is_empty() {
            f.write_str("no changes")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

fn push_counts(parts: &mut Vec<String>, counts: ChangeCounts, singular: &str, plural: &str) {
    for (n, verb) in [
        (counts.added, "added"),
        (counts.removed, "removed"),
        (counts.modified, "modified"),
    ] {
        if n > 0 {
            let noun = if n == 1 { singular } else { plural };
            parts.push(format!("{n} {noun} {verb}"));
        }
    }
}
