//! Properties every diff must satisfy, checked over a set of sample tables.

mod common;
use common::*;

use mysql_diff_core::diff::ChangeKind;
use mysql_diff_core::{
    DiffOptions, ErrorPolicy, compare_tables, diff_schemas, parse_dump_with,
};

const SAMPLES: &[&str] = &[
    "CREATE TABLE t (id INT)",
    "CREATE TABLE users (
        id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,
        email VARCHAR(255) NOT NULL COMMENT 'login',
        nickname VARCHAR(50) DEFAULT 'It''s me',
        score DECIMAL(5,2) DEFAULT 0.00,
        flags BIT(8) DEFAULT b'0',
        created_at DATETIME(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3) ON UPDATE CURRENT_TIMESTAMP(3),
        PRIMARY KEY (id),
        UNIQUE KEY uk_email (email),
        KEY idx_nick (nickname(10)),
        CONSTRAINT chk_score CHECK (score >= 0)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 ROW_FORMAT=DYNAMIC",
    "CREATE TABLE orders (
        id INT NOT NULL,
        user_id BIGINT UNSIGNED,
        total DECIMAL(10,2) AS (1 + 1) STORED,
        KEY (user_id),
        KEY (user_id),
        CONSTRAINT fk_user FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE,
        FOREIGN KEY (id) REFERENCES other (id)
    ) PARTITION BY RANGE (id) (
        PARTITION p0 VALUES LESS THAN (100),
        PARTITION p1 VALUES LESS THAN MAXVALUE
    )",
];

#[test]
fn test_self_diff_is_empty() {
    for sql in SAMPLES {
        let table = parse_table(sql);
        let diff = compare_tables(Some(&table), Some(&table));
        assert!(!diff.has_changes(), "self diff has changes: {sql}");
        assert!(diff.columns.is_empty());
        assert!(diff.indexes.is_empty());
        assert!(diff.foreign_keys.is_empty());
        assert!(diff.check_constraints.is_empty());
    }
}

#[test]
fn test_reparse_diff_is_empty() {
    for sql in SAMPLES {
        let diff = diff_sql(sql, sql);
        assert!(!diff.has_changes(), "reparse diff has changes: {sql}");
    }
}

#[test]
fn test_removed_table_only_removes() {
    for sql in SAMPLES {
        let table = parse_table(sql);
        let diff = compare_tables(Some(&table), None);

        assert_eq!(diff.counts.columns.removed, table.columns.len());
        assert_eq!(diff.counts.indexes.removed, table.indexes.len());
        assert_eq!(diff.counts.foreign_keys.removed, table.foreign_keys.len());
        for counts in [diff.counts.columns, diff.counts.indexes, diff.counts.foreign_keys] {
            assert_eq!(counts.added, 0);
            assert_eq!(counts.modified, 0);
        }
        assert!(diff.columns.iter().all(|c| c.kind() == ChangeKind::Removed));
    }
}

#[test]
fn test_added_table_only_adds() {
    for sql in SAMPLES {
        let table = parse_table(sql);
        let diff = compare_tables(None, Some(&table));

        assert_eq!(diff.counts.columns.added, table.columns.len());
        assert_eq!(diff.counts.indexes.added, table.indexes.len());
        assert_eq!(diff.counts.foreign_keys.added, table.foreign_keys.len());
        for counts in [diff.counts.columns, diff.counts.indexes, diff.counts.foreign_keys] {
            assert_eq!(counts.removed, 0);
            assert_eq!(counts.modified, 0);
        }
        assert!(diff.columns.iter().all(|c| c.kind() == ChangeKind::Added));
        assert!(diff.has_changes());
    }
}

#[test]
fn test_column_order_independence() {
    let diff = diff_sql(
        "CREATE TABLE t (a INT NOT NULL, b VARCHAR(10) DEFAULT 'x', c DATE, PRIMARY KEY (a))",
        "CREATE TABLE t (c DATE, PRIMARY KEY (a), a INT NOT NULL, b VARCHAR(10) DEFAULT 'x')",
    );
    assert!(!diff.has_changes());
}

#[test]
fn test_duplicate_unnamed_indexes_pair_in_order() {
    let sql = SAMPLES[2];
    let old = parse_table(sql);
    let mut new = old.clone();
    new.indexes[1].comment = Some("second".into());

    let diff = compare_tables(Some(&old), Some(&new));
    assert_eq!(diff.indexes.len(), 1);
    assert_eq!(diff.counts.indexes.modified, 1);
    assert_eq!(
        diff.indexes[0].after().and_then(|i| i.comment.as_deref()),
        Some("second")
    );
}

#[test]
fn test_schema_diff_over_dumps() {
    let old = parse_dump_with(
        "SET FOREIGN_KEY_CHECKS=0;\nCREATE TABLE a (id INT);\nCREATE TABLE b (id INT);\nSET FOREIGN_KEY_CHECKS=1;",
        ErrorPolicy::Abort,
    )
    .unwrap();
    let new = parse_dump_with(
        "CREATE TABLE b (id INT, x INT);\nCREATE TABLE c (id INT);",
        ErrorPolicy::Abort,
    )
    .unwrap();

    let diff = diff_schemas(&old, &new, DiffOptions::default());
    let summary: Vec<_> = diff
        .tables
        .iter()
        .map(|t| (t.name.as_str(), t.summary().to_string()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("a", "1 column removed".to_string()),
            ("b", "1 column added".to_string()),
            ("c", "1 column added".to_string()),
        ]
    );
}
