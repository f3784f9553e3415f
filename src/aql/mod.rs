pub mod cast;
pub mod keywords;
pub mod literal;
pub mod mutation;
pub mod node;
pub mod operation;
pub mod statement;

pub use cast::{auto_cast, validate_collection_name, Operand};
pub use literal::*;
pub use mutation::{
    InsertExpression, OptionsWrapper, RemoveExpression, ReplaceExpression, UpdateExpression,
};
pub use node::{Node, NodeKind};
pub use operation::{BinaryOperator, Operation, UnaryOperator};
pub use statement::{
    FilterExpression, ForExpression, LetExpression, PartialStatement, Pipeline, ReturnExpression,
    Statement,
};
