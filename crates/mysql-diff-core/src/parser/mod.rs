//! `CREATE TABLE` parser.
//!
//! A hand-written recursive descent parser. The dump entry points segment the
//! input into statements and parse the `CREATE TABLE` ones.

mod dump;
mod error;
#[allow(clippy::module_inception)]
mod parser;

pub use dump::{
    ErrorPolicy, Statement, StatementSplitter, parse_create_table, parse_dump, parse_dump_with,
};
pub use error::ParseError;
pub use parser::Parser;
