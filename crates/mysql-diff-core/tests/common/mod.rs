#![allow(dead_code)]

use mysql_diff_core::ast::ColumnDefinition;
use mysql_diff_core::{ParseError, TableDefinition, TableDiff, compare_tables, parse_create_table};

pub fn parse_table(sql: &str) -> TableDefinition {
    parse_create_table(sql).unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    parse_create_table(sql).expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn diff_sql(old: &str, new: &str) -> TableDiff {
    let old = parse_table(old);
    let new = parse_table(new);
    compare_tables(Some(&old), Some(&new))
}

pub fn column<'a>(table: &'a TableDefinition, name: &str) -> &'a ColumnDefinition {
    table
        .column(name)
        .unwrap_or_else(|| panic!("No column {name} in table {}", table.name))
}
