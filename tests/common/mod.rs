//! Common test utilities for builder tests
//!
//! Provides shared helpers for:
//! - Installing a log subscriber driven by `RUST_LOG`
//! - Building stand-in nodes of each kind

#![allow(dead_code)]

use aql_builder::{
    BinaryOperator, ForExpression, Node, Operation, Pipeline, ReplaceExpression, ReturnExpression,
};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "aql_builder=warn".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Operation node rendering `a + b`.
pub fn operation() -> Node {
    Operation::binary("a", BinaryOperator::Add, "b").unwrap().into()
}

/// Statement node rendering `FOR u IN users RETURN u`.
pub fn statement() -> Node {
    let ret: ReturnExpression = ForExpression::new(None, "u", "users")
        .unwrap()
        .return_("u")
        .unwrap();
    ret.into()
}

/// Partial statement node rendering `FOR u IN users`.
pub fn partial_statement() -> Node {
    ForExpression::new(None, "u", "users").unwrap().into()
}

/// Partial statement node rendering `REPLACE p WITH q IN r`.
pub fn replace_node() -> Node {
    ReplaceExpression::new(None, "p", Some("q".into()), "r")
        .unwrap()
        .into()
}
