//! Table-definition tree produced by the parser.
//!
//! Every optional attribute is an [`Option`]: `None` means the clause was not
//! written, which is never the same as an explicit default value.

mod column;
mod constraint;
mod table;

pub use column::{ColumnDefinition, DataType, GeneratedColumn, GeneratedStorage, Nullability};
pub use constraint::{
    CheckConstraint, ForeignKeyDefinition, ForeignKeyReference, IndexColumn, IndexDefinition,
    IndexKind, IndexType, PrimaryKeyDefinition, ReferentialAction, SortDirection,
};
pub use table::{
    PartitionBound, PartitionDefinition, PartitionKind, PartitionOptions, TableDefinition,
    TableOptions,
};
