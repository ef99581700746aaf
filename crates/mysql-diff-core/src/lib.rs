//! # mysql-diff-core
//!
//! Parses `CREATE TABLE` statements out of MySQL dumps and computes a
//! structural diff between two versions of a table.
//!
//! The pipeline has three stages:
//! - [`lexer`]: turns dump text into tokens, skipping anything it cannot classify
//! - [`parser`]: segments the tokens into statements and parses the
//!   `CREATE TABLE` ones into [`TableDefinition`]s
//! - [`diff`]: compares two definitions and produces a [`TableDiff`]
//!
//! ```rust
//! use mysql_diff_core::{compare_tables, parse_create_table};
//!
//! let old = parse_create_table("CREATE TABLE t (id INT, name VARCHAR(100))").unwrap();
//! let new = parse_create_table("CREATE TABLE t (id INT, name VARCHAR(255))").unwrap();
//!
//! let diff = compare_tables(Some(&old), Some(&new));
//! assert!(diff.has_changes());
//! assert_eq!(diff.counts.columns.modified, 1);
//! ```
//!
//! Nothing here performs I/O; callers read files and decide whether a
//! statement that fails to parse aborts the whole dump ([`ErrorPolicy`]).

pub mod ast;
pub mod diff;
pub mod lexer;
pub mod parser;

pub use ast::TableDefinition;
pub use diff::{
    DiffOptions, SchemaDiff, TableDiff, TableDiffAnalyzer, compare_tables, diff_schemas,
};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{
    ErrorPolicy, ParseError, Parser, parse_create_table, parse_dump, parse_dump_with,
};
