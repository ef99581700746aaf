//! Pairing the tables of two dumps by name.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::ast::TableDefinition;

use super::analyzer::{DiffOptions, TableDiffAnalyzer};
use super::table::TableDiff;

/// One [`TableDiff`] per table name found in either dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaDiff {
    /// Tables in old-dump order, then new-only tables.
    pub tables: Vec<TableDiff>,
}

impl SchemaDiff {
    /// Iterates over the tables that have changes.
    pub fn changed(&self) -> impl Iterator<Item = &TableDiff> {
        self.tables.iter().filter(|t| t.has_changes())
    }

    /// Returns true if any table has changes.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.changed().next().is_some()
    }
}

/// Compares two sets of tables paired by name: tables of `old` in their
/// order, then tables found only in `new`. When a name repeats, its first
/// definition is used.
#[must_use]
pub fn diff_schemas(
    old: &[TableDefinition],
    new: &[TableDefinition],
    options: DiffOptions,
) -> SchemaDiff {
    let analyzer = TableDiffAnalyzer::new(options);

    let mut new_by_name: BTreeMap<&str, &TableDefinition> = BTreeMap::new();
    for table in new {
        new_by_name.entry(table.name.as_str()).or_insert(table);
    }

    let mut seen = BTreeSet::new();
    let mut tables = Vec::new();
    for table in old {
        if seen.insert(table.name.as_str()) {
            let counterpart = new_by_name.get(table.name.as_str()).copied();
            tables.push(analyzer.compare(Some(table), counterpart));
        }
    }
    for table in new {
        if seen.insert(table.name.as_str()) {
            tables.push(analyzer.compare(None, Some(table)));
        }
    }
    SchemaDiff { tables }
}
