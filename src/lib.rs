//! AQL builder - programmatic construction of data-modification queries.
//!
//! Queries are composed from typed nodes instead of string concatenation.
//! Plain values passed to a clause are cast to literal nodes when the clause
//! is built, collection names are validated at the same time, and every node
//! that was built successfully renders to syntactically valid query text.
//!
//! # Main Components
//!
//! - **Nodes**: a closed sum type tagged by [`NodeKind`] (leaf, operation,
//!   statement, partial statement, options wrapper)
//! - **Auto-cast**: [`auto_cast`] turns plain values into leaf nodes
//! - **Clauses**: `REMOVE`, `REPLACE`, `UPDATE`, `INSERT` and the pipeline
//!   clauses `FOR`, `FILTER`, `LET`, `RETURN`
//!
//! # Example
//!
//! ```rust
//! use aql_builder::{ForExpression, Pipeline};
//!
//! let query = ForExpression::new(None, "doc", "users")?
//!     .replace("doc", Some("\"gone\"".into()), "users")?
//!     .return_old("previous")?;
//!
//! assert_eq!(
//!     query.to_aql(),
//!     "FOR doc IN users REPLACE doc WITH \"gone\" IN users LET previous = `OLD` RETURN previous"
//! );
//! # Ok::<(), aql_builder::AqlError>(())
//! ```

pub mod aql;
pub mod error;

// Re-export main types for convenience
pub use aql::{
    auto_cast, validate_collection_name, BinaryOperator, FilterExpression, ForExpression,
    InsertExpression, LetExpression, Node, NodeKind, Operand, Operation, OptionsWrapper,
    PartialStatement, Pipeline, RemoveExpression, ReplaceExpression, ReturnExpression, Statement,
    UnaryOperator, UpdateExpression,
};
pub use aql::literal::{
    BooleanLiteral, CollectionName, Identifier, IntegerLiteral, Keyword, Leaf, ListLiteral,
    NullLiteral, NumberLiteral, ObjectLiteral, RawExpression, SimpleReference, StringLiteral,
};
pub use error::{AqlError, AqlResult};
