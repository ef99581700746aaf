//! Tests for comparing two versions of a table.

mod common;
use common::*;

use mysql_diff_core::ast::{Nullability, ReferentialAction};
use mysql_diff_core::diff::{ChangeKind, FieldChange};
use mysql_diff_core::{DiffOptions, TableDiffAnalyzer, compare_tables};

// ===================================================================
// Columns
// ===================================================================

#[test]
fn test_added_and_modified_columns() {
    let diff = diff_sql(
        "CREATE TABLE t (id INT, name VARCHAR(100))",
        "CREATE TABLE t (id INT AUTO_INCREMENT, name VARCHAR(255), email VARCHAR(255))",
    );
    assert!(diff.has_changes());
    assert_eq!(diff.counts.columns.added, 1);
    assert_eq!(diff.counts.columns.modified, 2);
    assert_eq!(diff.counts.columns.removed, 0);

    let kinds: Vec<_> = diff.columns.iter().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![ChangeKind::Modified, ChangeKind::Modified, ChangeKind::Added]
    );

    let id = diff.columns[0].changes().unwrap();
    assert_eq!(id.auto_increment, Some(FieldChange::new(false, true)));
    assert!(id.data_type.is_none());

    let name = diff.columns[1].changes().unwrap();
    assert_eq!(
        name.data_type,
        Some(FieldChange::new("VARCHAR(100)".into(), "VARCHAR(255)".into()))
    );
    assert_eq!(diff.columns[2].after().unwrap().name, "email");
    assert_eq!(
        diff.summary().to_string(),
        "1 column added, 2 columns modified"
    );
}

#[test]
fn test_removed_column() {
    let diff = diff_sql(
        "CREATE TABLE t (id INT, legacy TEXT)",
        "CREATE TABLE t (id INT)",
    );
    assert_eq!(diff.columns.len(), 1);
    assert_eq!(diff.columns[0].kind(), ChangeKind::Removed);
    assert_eq!(diff.columns[0].before().unwrap().name, "legacy");
    assert!(diff.columns[0].after().is_none());
}

#[test]
fn test_unsigned_and_zerofill_are_type_changes() {
    let diff = diff_sql(
        "CREATE TABLE t (n INT)",
        "CREATE TABLE t (n INT UNSIGNED ZEROFILL)",
    );
    let changes = diff.columns[0].changes().unwrap();
    assert_eq!(
        changes.data_type,
        Some(FieldChange::new("INT".into(), "INT UNSIGNED ZEROFILL".into()))
    );
}

#[test]
fn test_explicit_null_differs_from_unspecified() {
    let diff = diff_sql("CREATE TABLE t (a INT)", "CREATE TABLE t (a INT NULL)");
    let changes = diff.columns[0].changes().unwrap();
    assert_eq!(
        changes.nullability,
        Some(FieldChange::new(Nullability::Unspecified, Nullability::Null))
    );
}

#[test]
fn test_default_value_change() {
    let diff = diff_sql(
        "CREATE TABLE t (s VARCHAR(20) DEFAULT 'a')",
        "CREATE TABLE t (s VARCHAR(20) DEFAULT 'It''s a test')",
    );
    let changes = diff.columns[0].changes().unwrap();
    assert_eq!(
        changes.default_value,
        Some(FieldChange::new(
            Some("'a'".into()),
            Some("'It''s a test'".into())
        ))
    );
}

#[test]
fn test_default_change_in_prefixed_literals() {
    let cases = [
        ("VARBINARY(8)", "_binary 'ab'", "_binary 'cd'"),
        ("INT", "0x1F", "0x2F"),
        ("DOUBLE", "1e3", "1e9"),
    ];
    for (ty, before, after) in cases {
        let diff = diff_sql(
            &format!("CREATE TABLE t (v {ty} DEFAULT {before})"),
            &format!("CREATE TABLE t (v {ty} DEFAULT {after})"),
        );
        assert!(diff.has_changes(), "{before} -> {after}");
        let changes = diff.columns[0].changes().unwrap();
        assert_eq!(
            changes.default_value,
            Some(FieldChange::new(Some(before.into()), Some(after.into())))
        );
    }
}

#[test]
fn test_column_order_is_ignored() {
    let diff = diff_sql(
        "CREATE TABLE t (a INT, b INT, KEY ka (a), KEY kb (b))",
        "CREATE TABLE t (b INT, a INT, KEY kb (b), KEY ka (a))",
    );
    assert!(!diff.has_changes());
}

// ===================================================================
// Keys and constraints
// ===================================================================

#[test]
fn test_primary_key_changes() {
    let diff = diff_sql(
        "CREATE TABLE t (id INT, tenant INT, PRIMARY KEY (id))",
        "CREATE TABLE t (id INT, tenant INT, PRIMARY KEY (id, tenant))",
    );
    let pk = diff.primary_key.as_ref().unwrap();
    assert_eq!(pk.kind(), ChangeKind::Modified);
    assert_eq!(
        pk.changes().unwrap().columns,
        Some(FieldChange::new(
            vec!["id".to_string()],
            vec!["id".to_string(), "tenant".to_string()]
        ))
    );

    let dropped = diff_sql(
        "CREATE TABLE t (id INT, PRIMARY KEY (id))",
        "CREATE TABLE t (id INT)",
    );
    assert_eq!(
        dropped.primary_key.as_ref().map(|pk| pk.kind()),
        Some(ChangeKind::Removed)
    );
    assert!(dropped.summary().primary_key_changed);
}

#[test]
fn test_index_rename_is_one_modification() {
    let diff = diff_sql(
        "CREATE TABLE t (email VARCHAR(255), INDEX idx_email (email))",
        "CREATE TABLE t (email VARCHAR(255), INDEX idx_user_email (email))",
    );
    assert_eq!(diff.indexes.len(), 1);
    let changes = diff.indexes[0].changes().unwrap();
    assert_eq!(
        changes.name,
        Some(FieldChange::new(
            Some("idx_email".into()),
            Some("idx_user_email".into())
        ))
    );
}

#[test]
fn test_index_rename_without_detection() {
    let old = parse_table("CREATE TABLE t (email VARCHAR(255), INDEX idx_email (email))");
    let new = parse_table("CREATE TABLE t (email VARCHAR(255), INDEX idx_user_email (email))");
    let analyzer = TableDiffAnalyzer::new(DiffOptions {
        detect_renames: false,
    });
    let diff = analyzer.compare(Some(&old), Some(&new));
    assert_eq!(diff.counts.indexes.added, 1);
    assert_eq!(diff.counts.indexes.removed, 1);
    assert_eq!(diff.counts.indexes.modified, 0);
}

#[test]
fn test_index_prefix_length_change() {
    let diff = diff_sql(
        "CREATE TABLE t (name VARCHAR(255), KEY k (name(10)))",
        "CREATE TABLE t (name VARCHAR(255), KEY k (name(20) DESC))",
    );
    let changes = diff.indexes[0].changes().unwrap();
    assert_eq!(
        changes.columns,
        Some(FieldChange::new("(name(10))".into(), "(name(20) DESC)".into()))
    );
}

#[test]
fn test_index_on_other_columns_is_add_and_remove() {
    let diff = diff_sql(
        "CREATE TABLE t (a INT, b INT, KEY k (a))",
        "CREATE TABLE t (a INT, b INT, KEY k (a, b))",
    );
    assert_eq!(diff.counts.indexes.added, 1);
    assert_eq!(diff.counts.indexes.removed, 1);
    assert_eq!(diff.indexes[0].kind(), ChangeKind::Added);
    assert_eq!(diff.indexes[1].kind(), ChangeKind::Removed);
}

#[test]
fn test_foreign_key_action_change() {
    let diff = diff_sql(
        "CREATE TABLE t (u INT, CONSTRAINT fk_u FOREIGN KEY (u) REFERENCES users (id) ON DELETE CASCADE)",
        "CREATE TABLE t (u INT, CONSTRAINT fk_u FOREIGN KEY (u) REFERENCES users (id) ON DELETE SET NULL)",
    );
    assert_eq!(diff.foreign_keys.len(), 1);
    let changes = diff.foreign_keys[0].changes().unwrap();
    assert_eq!(
        changes.on_delete,
        Some(FieldChange::new(
            Some(ReferentialAction::Cascade),
            Some(ReferentialAction::SetNull)
        ))
    );
}

#[test]
fn test_foreign_key_new_target_is_add_and_remove() {
    let diff = diff_sql(
        "CREATE TABLE t (u INT, CONSTRAINT fk_u FOREIGN KEY (u) REFERENCES users (id))",
        "CREATE TABLE t (u INT, CONSTRAINT fk_u FOREIGN KEY (u) REFERENCES accounts (id))",
    );
    assert_eq!(diff.counts.foreign_keys.added, 1);
    assert_eq!(diff.counts.foreign_keys.removed, 1);
}

#[test]
fn test_foreign_key_rename() {
    let diff = diff_sql(
        "CREATE TABLE t (u INT, CONSTRAINT fk_old FOREIGN KEY (u) REFERENCES users (id))",
        "CREATE TABLE t (u INT, CONSTRAINT fk_new FOREIGN KEY (u) REFERENCES users (id))",
    );
    assert_eq!(diff.counts.foreign_keys.modified, 1);
    assert!(diff.foreign_keys[0].changes().unwrap().name.is_some());
}

#[test]
fn test_check_expression_change() {
    let diff = diff_sql(
        "CREATE TABLE t (age INT, CONSTRAINT chk_age CHECK (age >= 0))",
        "CREATE TABLE t (age INT, CONSTRAINT chk_age CHECK (age >= 18))",
    );
    assert_eq!(diff.check_constraints.len(), 1);
    assert_eq!(
        diff.check_constraints[0].changes().unwrap().expression,
        Some(FieldChange::new("age >= 0".into(), "age >= 18".into()))
    );
}

#[test]
fn test_unnamed_check_gains_name() {
    let diff = diff_sql(
        "CREATE TABLE t (age INT, CHECK (age >= 0))",
        "CREATE TABLE t (age INT, CONSTRAINT chk_age CHECK (age >= 0))",
    );
    assert_eq!(diff.counts.check_constraints.modified, 1);
}

// ===================================================================
// Options and partitioning
// ===================================================================

#[test]
fn test_table_option_change() {
    let diff = diff_sql(
        "CREATE TABLE t (id INT) ENGINE=MyISAM ROW_FORMAT=DYNAMIC",
        "CREATE TABLE t (id INT) ENGINE=InnoDB ROW_FORMAT=COMPRESSED",
    );
    assert!(diff.table_options_changed);
    let changes = diff.table_options.as_ref().unwrap().changes().unwrap();
    assert_eq!(
        changes.engine,
        Some(FieldChange::new(Some("MyISAM".into()), Some("InnoDB".into())))
    );
    assert!(changes.row_format.is_some());
    assert!(changes.comment.is_none());
}

#[test]
fn test_table_options_added() {
    let diff = diff_sql("CREATE TABLE t (id INT)", "CREATE TABLE t (id INT) ENGINE=InnoDB");
    assert_eq!(
        diff.table_options.as_ref().map(|o| o.kind()),
        Some(ChangeKind::Added)
    );
}

#[test]
fn test_partition_count_change() {
    let diff = diff_sql(
        "CREATE TABLE t (id INT) PARTITION BY HASH (id) PARTITIONS 4",
        "CREATE TABLE t (id INT) PARTITION BY HASH (id) PARTITIONS 8",
    );
    let changes = diff.partitioning.as_ref().unwrap().changes().unwrap();
    assert_eq!(changes.partition_count, Some(FieldChange::new(Some(4), Some(8))));
    assert!(diff.summary().partitioning_changed);
}

// ===================================================================
// Whole tables
// ===================================================================

#[test]
fn test_renamed_table() {
    let diff = diff_sql("CREATE TABLE a (id INT)", "CREATE TABLE b (id INT)");
    assert!(diff.table_name_changed);
    assert!(diff.has_changes());
    assert_eq!(diff.name, "b");
}

#[test]
fn test_both_sides_absent() {
    let diff = compare_tables(None, None);
    assert!(!diff.has_changes());
    assert_eq!(diff.summary().to_string(), "no changes");
}
