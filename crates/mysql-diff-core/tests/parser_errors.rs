//! Tests for parser error cases.

mod common;
use common::*;

use mysql_diff_core::TokenKind;
use mysql_diff_core::lexer::Keyword;

#[test]
fn error_empty_input() {
    let err = parse_err("");
    assert_eq!(err.found, TokenKind::Eof);
    assert_eq!(err.expected, "CREATE");
}

#[test]
fn error_not_a_table() {
    let err = parse_err("CREATE VIEW v AS SELECT 1");
    assert_eq!(err.expected, "TABLE");
    assert_eq!(err.text, "VIEW");
}

#[test]
fn error_missing_table_name() {
    let err = parse_err("CREATE TABLE (id INT)");
    assert_eq!(err.expected, "table name");
    assert_eq!(err.found, TokenKind::LeftParen);
    assert_eq!(err.column(), 14);
}

#[test]
fn error_missing_data_type() {
    let err = parse_err("CREATE TABLE t (id INDEX)");
    assert_eq!(err.expected, "data type");
    assert_eq!(err.found, TokenKind::Keyword(Keyword::Index));
    assert_eq!((err.line(), err.column()), (1, 20));
}

#[test]
fn error_unclosed_element_list() {
    let err = parse_err("CREATE TABLE t (id INT");
    assert_eq!(err.expected, "')'");
    assert_eq!(err.found, TokenKind::Eof);
}

#[test]
fn error_unclosed_check_expression() {
    let err = parse_err("CREATE TABLE t (a INT, CHECK (a > (1)");
    assert_eq!(err.found, TokenKind::Eof);
}

#[test]
fn error_position_on_later_line() {
    let err = parse_err("CREATE TABLE t (\n  id INT,\n  name FOO\n)");
    assert_eq!(err.line(), 3);
    assert_eq!(err.column(), 8);
    assert_eq!(
        err.to_string(),
        "expected data type, found identifier 'FOO' at line 3, column 8"
    );
}

#[test]
fn error_span_points_at_token() {
    let sql = "CREATE TABLE t (id INT, name FOO)";
    let err = parse_err(sql);
    assert_eq!(err.span.text(sql), "FOO");
}

#[test]
fn error_duplicate_primary_key() {
    let _ = parse_err("CREATE TABLE t (a INT, b INT, PRIMARY KEY (a), PRIMARY KEY (b))");
}

#[test]
fn error_bad_index_type() {
    let err = parse_err("CREATE TABLE t (a INT, KEY k USING RTREE (a))");
    assert_eq!(err.expected, "BTREE or HASH");
}

#[test]
fn error_bad_referential_action() {
    let err = parse_err(
        "CREATE TABLE t (a INT, FOREIGN KEY (a) REFERENCES p (id) ON DELETE SET BOGUS)",
    );
    assert_eq!(err.expected, "referential action");
}

#[test]
fn error_non_numeric_auto_increment() {
    let err = parse_err("CREATE TABLE t (a INT) AUTO_INCREMENT=abc");
    assert_eq!(err.expected, "unsigned integer");
}

#[test]
fn error_unknown_partition_kind() {
    let err = parse_err("CREATE TABLE t (a INT) PARTITION BY ROUND_ROBIN (a)");
    assert_eq!(err.expected, "HASH, KEY, RANGE or LIST");
}
