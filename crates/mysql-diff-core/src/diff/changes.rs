//! Change-set types.
//!
//! Every `*Changes` record has one optional field per compared attribute:
//! `Some` means the attribute differs, `None` means it is equal.

use core::fmt;

use serde::Serialize;

use crate::ast::{
    CheckConstraint, ColumnDefinition, ForeignKeyDefinition, ForeignKeyReference,
    GeneratedColumn, IndexDefinition, IndexKind, IndexType, Nullability, PartitionKind,
    PartitionOptions, PrimaryKeyDefinition, ReferentialAction, TableOptions,
};

/// Kind of change for one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Present only on the new side.
    Added,
    /// Present only on the old side.
    Removed,
    /// Present on both sides with differing fields.
    Modified,
}

impl ChangeKind {
    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Modified => "modified",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A change to one entity: `T` is the definition, `C` its field-level record.
///
/// `Added` and `Modified` carry the full new definition so a renderer can
/// rebuild it; `Removed` carries the old one for its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change_type", rename_all = "lowercase")]
pub enum Change<T, C> {
    /// The entity exists only in the new table.
    Added { new: T },
    /// The entity exists only in the old table.
    Removed { old: T },
    /// Both sides exist and `changes` lists what differs.
    Modified { old: T, new: T, changes: C },
}

impl<T, C> Change<T, C> {
    /// Returns the kind of change.
    #[must_use]
    pub const fn kind(&self) -> ChangeKind {
        match self {
            Self::Added { .. } => ChangeKind::Added,
            Self::Removed { .. } => ChangeKind::Removed,
            Self::Modified { .. } => ChangeKind::Modified,
        }
    }

    /// Returns the old definition, absent for additions.
    #[must_use]
    pub const fn before(&self) -> Option<&T> {
        match self {
            Self::Added { .. } => None,
            Self::Removed { old } | Self::Modified { old, .. } => Some(old),
        }
    }

    /// Returns the new definition, absent for removals.
    #[must_use]
    pub const fn after(&self) -> Option<&T> {
        match self {
            Self::Removed { .. } => None,
            Self::Added { new } | Self::Modified { new, .. } => Some(new),
        }
    }

    /// Returns the new definition if present, otherwise the old one.
    #[must_use]
    pub const fn current(&self) -> &T {
        match self {
            Self::Added { new } | Self::Modified { new, .. } => new,
            Self::Removed { old } => old,
        }
    }

    /// Returns the field-level record of a modification.
    #[must_use]
    pub const fn changes(&self) -> Option<&C> {
        match self {
            Self::Modified { changes, .. } => Some(changes),
            _ => None,
        }
    }
}

/// Old and new value of one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange<T> {
    /// Value on the old side.
    pub old: T,
    /// Value on the new side.
    pub new: T,
}

impl<T> FieldChange<T> {
    /// Creates a field change.
    #[must_use]
    pub const fn new(old: T, new: T) -> Self {
        Self { old, new }
    }
}

/// Returns a change record when `old` and `new` differ.
#[must_use]
pub fn field<T: PartialEq + Clone>(old: &T, new: &T) -> Option<FieldChange<T>> {
    (old != new).then(|| FieldChange::new(old.clone(), new.clone()))
}

/// Field-level differences of a matched column pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnChanges {
    /// Canonical `NAME(params) UNSIGNED ZEROFILL` on both sides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<FieldChange<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullability: Option<FieldChange<Nullability>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_increment: Option<FieldChange<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique: Option<FieldChange<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<FieldChange<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_set: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<FieldChange<Option<bool>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated: Option<FieldChange<Option<GeneratedColumn>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_format: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_update: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<FieldChange<Option<ForeignKeyReference>>>,
}

/// Field-level differences of a matched index pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IndexChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldChange<IndexKind>>,
    /// Key parts rendered as `(a, b(10) DESC)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<FieldChange<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_block_size: Option<FieldChange<Option<u64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub using: Option<FieldChange<Option<IndexType>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<FieldChange<Option<bool>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_attribute: Option<FieldChange<Option<String>>>,
}

/// Field-level differences of two primary keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrimaryKeyChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<FieldChange<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub using: Option<FieldChange<Option<IndexType>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<FieldChange<Option<String>>>,
}

/// Field-level differences of a matched foreign key pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ForeignKeyChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<FieldChange<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_table: Option<FieldChange<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_columns: Option<FieldChange<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<FieldChange<Option<ReferentialAction>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_update: Option<FieldChange<Option<ReferentialAction>>>,
}

/// Field-level differences of a matched check constraint pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<FieldChange<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforced: Option<FieldChange<Option<bool>>>,
}

/// Per-option differences of two table option sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableOptionsChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_increment: Option<FieldChange<Option<u64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_set: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collation: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_format: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_block_size: Option<FieldChange<Option<u64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rows: Option<FieldChange<Option<u64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rows: Option<FieldChange<Option<u64>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tablespace: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_directory: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_directory: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_persistent: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_auto_recalc: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_sample_pages: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pack_keys: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_key_write: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub union: Option<FieldChange<Option<Vec<String>>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_method: Option<FieldChange<Option<String>>>,
}

/// Differences of two partitioning clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartitionChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FieldChange<PartitionKind>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linear: Option<FieldChange<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<FieldChange<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<FieldChange<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_count: Option<FieldChange<Option<u64>>>,
    /// Number of `PARTITION name ...` definitions; their content is not compared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_definitions: Option<FieldChange<usize>>,
}

macro_rules! impl_is_empty {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                /// Returns true if no field differs.
                #[must_use]
                pub fn is_empty(&self) -> bool {
                    *self == Self::default()
                }
            }
        )*
    };
}

impl_is_empty!(
    ColumnChanges,
    IndexChanges,
    PrimaryKeyChanges,
    ForeignKeyChanges,
    CheckChanges,
    TableOptionsChanges,
    PartitionChanges,
);

pub type ColumnDiff = Change<ColumnDefinition, ColumnChanges>;
pub type IndexDiff = Change<IndexDefinition, IndexChanges>;
pub type PrimaryKeyDiff = Change<PrimaryKeyDefinition, PrimaryKeyChanges>;
pub type ForeignKeyDiff = Change<ForeignKeyDefinition, ForeignKeyChanges>;
pub type CheckDiff = Change<CheckConstraint, CheckChanges>;
pub type TableOptionsDiff = Change<TableOptions, TableOptionsChanges>;
pub type PartitionDiff = Change<PartitionOptions, PartitionChanges>;

/// Added, removed and modified totals for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeCounts {
    /// Entries only on the new side.
    pub added: usize,
    /// Entries only on the old side.
    pub removed: usize,
    /// Matched entries with differences.
    pub modified: usize,
}

impl ChangeCounts {
    /// Counts the entries of a change list.
    #[must_use]
    pub fn of<T, C>(changes: &[Change<T, C>]) -> Self {
        let mut counts = Self::default();
        for change in changes {
            match change.kind() {
                ChangeKind::Added => counts.added += 1,
                ChangeKind::Removed => counts.removed += 1,
                ChangeKind::Modified => counts.modified += 1,
            }
        }
        counts
    }

    /// Returns the number of entries.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.added + self.removed + self.modified
    }
}

/// Per-category counters of a table diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffCounts {
    /// Column counters.
    pub columns: ChangeCounts,
    /// Index counters.
    pub indexes: ChangeCounts,
    /// Foreign key counters.
    pub foreign_keys: ChangeCounts,
    /// Check constraint counters.
    pub check_constraints: ChangeCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_equal_is_none() {
        assert!(field(&Some(1u64), &Some(1u64)).is_none());
        assert_eq!(
            field(&None, &Some("x".to_string())),
            Some(FieldChange::new(None, Some("x".to_string())))
        );
    }

    #[test]
    fn test_is_empty() {
        let mut changes = ColumnChanges::default();
        assert!(changes.is_empty());
        changes.auto_increment = field(&false, &true);
        assert!(!changes.is_empty());
    }

    #[test]
    fn test_change_accessors() {
        let added: Change<&str, ()> = Change::Added { new: "a" };
        assert_eq!(added.kind(), ChangeKind::Added);
        assert_eq!(added.before(), None);
        assert_eq!(added.after(), Some(&"a"));
        assert_eq!(*added.current(), "a");

        let modified: Change<&str, u8> = Change::Modified {
            old: "a",
            new: "b",
            changes: 1,
        };
        assert_eq!(modified.changes(), Some(&1));
        assert_eq!(*modified.current(), "b");
    }

    #[test]
    fn test_change_counts() {
        let changes: Vec<Change<u8, ()>> = vec![
            Change::Added { new: 1 },
            Change::Added { new: 2 },
            Change::Removed { old: 3 },
        ];
        let counts = ChangeCounts::of(&changes);
        assert_eq!((counts.added, counts.removed, counts.modified), (2, 1, 0));
        assert_eq!(counts.total(), 3);
    }
}
