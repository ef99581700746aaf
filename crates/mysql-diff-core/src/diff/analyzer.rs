//! Table diff analyzer.
//!
//! Compares two optional [`TableDefinition`]s category by category. Each
//! category has an identity key: entries with equal keys are paired and
//! field-compared, unpaired entries become additions or removals.

use std::collections::{BTreeMap, VecDeque};

use tracing::debug;

use crate::ast::{
    CheckConstraint, ColumnDefinition, ForeignKeyDefinition, IndexColumn, IndexDefinition,
    IndexKind, PartitionOptions, PrimaryKeyDefinition, TableDefinition, TableOptions,
};

use super::changes::{
    Change, ChangeCounts, CheckChanges, CheckDiff, ColumnChanges, ColumnDiff, DiffCounts,
    FieldChange, ForeignKeyChanges, ForeignKeyDiff, IndexChanges, IndexDiff, PartitionChanges,
    PrimaryKeyChanges, TableOptionsChanges, field,
};
use super::table::TableDiff;

/// Analyzer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Pair indexes, foreign keys and checks that differ only by name, so a
    /// rename shows up as one modification instead of an add and a remove.
    pub detect_renames: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            detect_renames: true,
        }
    }
}

/// Computes the change-set between two table definitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableDiffAnalyzer {
    options: DiffOptions,
}

impl TableDiffAnalyzer {
    /// Creates an analyzer with the given options.
    #[must_use]
    pub const fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Returns the analyzer's options.
    #[must_use]
    pub const fn options(&self) -> DiffOptions {
        self.options
    }

    /// Compares `old` against `new`. Either side may be absent, for a table
    /// that exists on one side only.
    #[must_use]
    pub fn compare(
        &self,
        old: Option<&TableDefinition>,
        new: Option<&TableDefinition>,
    ) -> TableDiff {
        let name = new.or(old).map(|t| t.name.clone()).unwrap_or_default();
        let table_name_changed = matches!((old, new), (Some(o), Some(n)) if o.name != n.name);

        let columns = self.compare_columns(
            old.map_or(&[][..], |t| t.columns.as_slice()),
            new.map_or(&[][..], |t| t.columns.as_slice()),
        );
        let indexes = self.compare_indexes(
            old.map_or(&[][..], |t| t.indexes.as_slice()),
            new.map_or(&[][..], |t| t.indexes.as_slice()),
        );
        let foreign_keys = self.compare_foreign_keys(
            old.map_or(&[][..], |t| t.foreign_keys.as_slice()),
            new.map_or(&[][..], |t| t.foreign_keys.as_slice()),
        );
        let check_constraints = self.compare_checks(
            old.map_or(&[][..], |t| t.check_constraints.as_slice()),
            new.map_or(&[][..], |t| t.check_constraints.as_slice()),
        );

        let primary_key = compare_optional(
            old.and_then(|t| t.primary_key.as_ref()),
            new.and_then(|t| t.primary_key.as_ref()),
            compare_primary_keys,
            PrimaryKeyChanges::is_empty,
        );
        let table_options = compare_optional(
            old.and_then(|t| t.table_options.as_ref()),
            new.and_then(|t| t.table_options.as_ref()),
            compare_table_options,
            TableOptionsChanges::is_empty,
        );
        let partitioning = compare_optional(
            old.and_then(|t| t.partition_options.as_ref()),
            new.and_then(|t| t.partition_options.as_ref()),
            compare_partitions,
            PartitionChanges::is_empty,
        );

        let counts = DiffCounts {
            columns: ChangeCounts::of(&columns),
            indexes: ChangeCounts::of(&indexes),
            foreign_keys: ChangeCounts::of(&foreign_keys),
            check_constraints: ChangeCounts::of(&check_constraints),
        };

        let diff = TableDiff {
            name,
            table_name_changed,
            table_options_changed: table_options.is_some(),
            columns,
            primary_key,
            indexes,
            foreign_keys,
            check_constraints,
            table_options,
            partitioning,
            counts,
        };
        debug!(
            table = %diff.name,
            has_changes = diff.has_changes(),
            columns = diff.counts.columns.total(),
            indexes = diff.counts.indexes.total(),
            "compared tables"
        );
        diff
    }

    // ---- Columns ---------------------------------------------------

    #[allow(clippy::unused_self)]
    fn compare_columns(
        &self,
        old: &[ColumnDefinition],
        new: &[ColumnDefinition],
    ) -> Vec<ColumnDiff> {
        let mut pairing = Pairing::new(old.len(), new.len());
        pairing.pair_by(old, new, |c| c.name.as_str());
        pairing.into_changes(old, new, compare_column, ColumnChanges::is_empty)
    }

    // ---- Indexes ---------------------------------------------------

    fn compare_indexes(&self, old: &[IndexDefinition], new: &[IndexDefinition]) -> Vec<IndexDiff> {
        let mut pairing = Pairing::new(old.len(), new.len());
        pairing.pair_by(old, new, |i| IndexKey {
            name: i.name.as_deref(),
            columns: index_column_names(&i.columns),
            kind: i.kind,
        });
        if self.options.detect_renames {
            pairing.pair_by(old, new, |i| (index_column_names(&i.columns), i.kind));
        }
        pairing.into_changes(old, new, compare_index, IndexChanges::is_empty)
    }

    // ---- Foreign keys ----------------------------------------------

    fn compare_foreign_keys(
        &self,
        old: &[ForeignKeyDefinition],
        new: &[ForeignKeyDefinition],
    ) -> Vec<ForeignKeyDiff> {
        let mut pairing = Pairing::new(old.len(), new.len());
        pairing.pair_by(old, new, |fk| ForeignKeyKey {
            name: fk.name.as_deref(),
            columns: &fk.columns,
            table: &fk.reference.table,
            reference_columns: &fk.reference.columns,
        });
        if self.options.detect_renames {
            pairing.pair_by(old, new, |fk| ForeignKeyKey {
                name: None,
                columns: &fk.columns,
                table: &fk.reference.table,
                reference_columns: &fk.reference.columns,
            });
        }
        pairing.into_changes(old, new, compare_foreign_key, ForeignKeyChanges::is_empty)
    }

    // ---- Check constraints -----------------------------------------

    fn compare_checks(&self, old: &[CheckConstraint], new: &[CheckConstraint]) -> Vec<CheckDiff> {
        let mut pairing = Pairing::new(old.len(), new.len());
        pairing.pair_by(old, new, |c| match &c.name {
            Some(name) => CheckKey::Named(name),
            None => CheckKey::Unnamed(&c.expression),
        });
        if self.options.detect_renames {
            pairing.pair_by(old, new, |c| c.expression.as_str());
        }
        pairing.into_changes(old, new, compare_check, CheckChanges::is_empty)
    }
}

/// Compares two tables with the default options.
#[must_use]
pub fn compare_tables(old: Option<&TableDefinition>, new: Option<&TableDefinition>) -> TableDiff {
    TableDiffAnalyzer::default().compare(old, new)
}

// ================================================================
// Matching
// ================================================================

/// Identity of an index: name (or none), key-part names, kind.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct IndexKey<'a> {
    name: Option<&'a str>,
    columns: Vec<&'a str>,
    kind: IndexKind,
}

/// Identity of a foreign key.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKeyKey<'a> {
    name: Option<&'a str>,
    columns: &'a [String],
    table: &'a str,
    reference_columns: &'a [String],
}

/// Identity of a check: its name, or its expression when unnamed.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum CheckKey<'a> {
    Named(&'a str),
    Unnamed(&'a str),
}

fn index_column_names(columns: &[IndexColumn]) -> Vec<&str> {
    columns.iter().map(|c| c.name.as_str()).collect()
}

/// Old/new index pairs built up over one or more key passes.
struct Pairing {
    /// For each new entry, the paired old entry.
    new_to_old: Vec<Option<usize>>,
    old_paired: Vec<bool>,
}

impl Pairing {
    fn new(old_len: usize, new_len: usize) -> Self {
        Self {
            new_to_old: vec![None; new_len],
            old_paired: vec![false; old_len],
        }
    }

    /// Pairs still-unpaired entries whose keys are equal. Entries sharing a
    /// key are paired in declaration order.
    fn pair_by<'a, T, K: Ord>(&mut self, old: &'a [T], new: &'a [T], key: impl Fn(&'a T) -> K) {
        let mut pool: BTreeMap<K, VecDeque<usize>> = BTreeMap::new();
        for (i, item) in old.iter().enumerate() {
            if !self.old_paired[i] {
                pool.entry(key(item)).or_default().push_back(i);
            }
        }
        for (j, item) in new.iter().enumerate() {
            if self.new_to_old[j].is_some() {
                continue;
            }
            if let Some(i) = pool.get_mut(&key(item)).and_then(VecDeque::pop_front) {
                self.new_to_old[j] = Some(i);
                self.old_paired[i] = true;
            }
        }
    }

    /// Builds the change list: paired and added entries in new-side order,
    /// then removed entries in old-side order. Pairs without differences are
    /// dropped.
    fn into_changes<T: Clone, C>(
        self,
        old: &[T],
        new: &[T],
        compare: impl Fn(&T, &T) -> C,
        is_empty: impl Fn(&C) -> bool,
    ) -> Vec<Change<T, C>> {
        let mut changes = Vec::new();
        for (new_item, paired) in new.iter().zip(&self.new_to_old) {
            match paired {
                Some(i) => {
                    let old_item = &old[*i];
                    let record = compare(old_item, new_item);
                    if !is_empty(&record) {
                        changes.push(Change::Modified {
                            old: old_item.clone(),
                            new: new_item.clone(),
                            changes: record,
                        });
                    }
                }
                None => changes.push(Change::Added {
                    new: new_item.clone(),
                }),
            }
        }
        for (old_item, paired) in old.iter().zip(&self.old_paired) {
            if !paired {
                changes.push(Change::Removed {
                    old: old_item.clone(),
                });
            }
        }
        changes
    }
}

/// Compares a singleton that may be absent on either side.
fn compare_optional<T: Clone, C>(
    old: Option<&T>,
    new: Option<&T>,
    compare: impl Fn(&T, &T) -> C,
    is_empty: impl Fn(&C) -> bool,
) -> Option<Change<T, C>> {
    match (old, new) {
        (None, None) => None,
        (None, Some(new)) => Some(Change::Added { new: new.clone() }),
        (Some(old), None) => Some(Change::Removed { old: old.clone() }),
        (Some(old), Some(new)) => {
            let changes = compare(old, new);
            (!is_empty(&changes)).then(|| Change::Modified {
                old: old.clone(),
                new: new.clone(),
                changes,
            })
        }
    }
}

// ================================================================
// Field comparison
// ================================================================

fn compare_column(old: &ColumnDefinition, new: &ColumnDefinition) -> ColumnChanges {
    ColumnChanges {
        data_type: (old.data_type != new.data_type)
            .then(|| FieldChange::new(old.data_type.to_string(), new.data_type.to_string())),
        nullability: field(&old.nullability, &new.nullability),
        default_value: field(&old.default_value, &new.default_value),
        auto_increment: field(&old.auto_increment, &new.auto_increment),
        unique: field(&old.unique, &new.unique),
        primary_key: field(&old.primary_key, &new.primary_key),
        comment: field(&old.comment, &new.comment),
        collation: field(&old.collation, &new.collation),
        character_set: field(&old.character_set, &new.character_set),
        visible: field(&old.visible, &new.visible),
        generated: field(&old.generated, &new.generated),
        column_format: field(&old.column_format, &new.column_format),
        storage: field(&old.storage, &new.storage),
        on_update: field(&old.on_update, &new.on_update),
        reference: field(&old.reference, &new.reference),
    }
}

fn compare_index(old: &IndexDefinition, new: &IndexDefinition) -> IndexChanges {
    let old_columns = IndexColumn::list_to_string(&old.columns);
    let new_columns = IndexColumn::list_to_string(&new.columns);
    IndexChanges {
        name: field(&old.name, &new.name),
        kind: field(&old.kind, &new.kind),
        columns: field(&old_columns, &new_columns),
        key_block_size: field(&old.key_block_size, &new.key_block_size),
        using: field(&old.using, &new.using),
        comment: field(&old.comment, &new.comment),
        visible: field(&old.visible, &new.visible),
        parser: field(&old.parser, &new.parser),
        algorithm: field(&old.algorithm, &new.algorithm),
        lock: field(&old.lock, &new.lock),
        engine_attribute: field(&old.engine_attribute, &new.engine_attribute),
    }
}

fn compare_primary_keys(
    old: &PrimaryKeyDefinition,
    new: &PrimaryKeyDefinition,
) -> PrimaryKeyChanges {
    PrimaryKeyChanges {
        columns: field(&old.column_names(), &new.column_names()),
        name: field(&old.name, &new.name),
        using: field(&old.using, &new.using),
        comment: field(&old.comment, &new.comment),
    }
}

fn compare_foreign_key(
    old: &ForeignKeyDefinition,
    new: &ForeignKeyDefinition,
) -> ForeignKeyChanges {
    ForeignKeyChanges {
        name: field(&old.name, &new.name),
        columns: field(&old.columns, &new.columns),
        reference_table: field(&old.reference.table, &new.reference.table),
        reference_columns: field(&old.reference.columns, &new.reference.columns),
        on_delete: field(&old.reference.on_delete, &new.reference.on_delete),
        on_update: field(&old.reference.on_update, &new.reference.on_update),
    }
}

fn compare_check(old: &CheckConstraint, new: &CheckConstraint) -> CheckChanges {
    CheckChanges {
        name: field(&old.name, &new.name),
        expression: field(&old.expression, &new.expression),
        enforced: field(&old.enforced, &new.enforced),
    }
}

fn compare_table_options(old: &TableOptions, new: &TableOptions) -> TableOptionsChanges {
    TableOptionsChanges {
        engine: field(&old.engine, &new.engine),
        auto_increment: field(&old.auto_increment, &new.auto_increment),
        character_set: field(&old.character_set, &new.character_set),
        collation: field(&old.collation, &new.collation),
        comment: field(&old.comment, &new.comment),
        row_format: field(&old.row_format, &new.row_format),
        key_block_size: field(&old.key_block_size, &new.key_block_size),
        max_rows: field(&old.max_rows, &new.max_rows),
        min_rows: field(&old.min_rows, &new.min_rows),
        tablespace: field(&old.tablespace, &new.tablespace),
        data_directory: field(&old.data_directory, &new.data_directory),
        index_directory: field(&old.index_directory, &new.index_directory),
        encryption: field(&old.encryption, &new.encryption),
        compression: field(&old.compression, &new.compression),
        stats_persistent: field(&old.stats_persistent, &new.stats_persistent),
        stats_auto_recalc: field(&old.stats_auto_recalc, &new.stats_auto_recalc),
        stats_sample_pages: field(&old.stats_sample_pages, &new.stats_sample_pages),
        pack_keys: field(&old.pack_keys, &new.pack_keys),
        checksum: field(&old.checksum, &new.checksum),
        delay_key_write: field(&old.delay_key_write, &new.delay_key_write),
        union: field(&old.union, &new.union),
        insert_method: field(&old.insert_method, &new.insert_method),
    }
}

fn compare_partitions(old: &PartitionOptions, new: &PartitionOptions) -> PartitionChanges {
    PartitionChanges {
        kind: field(&old.kind, &new.kind),
        linear: field(&old.linear, &new.linear),
        expression: field(&old.expression, &new.expression),
        columns: field(&old.columns, &new.columns),
        partition_count: field(&old.partition_count, &new.partition_count),
        partition_definitions: field(&old.partitions.len(), &new.partitions.len()),
    }
}
