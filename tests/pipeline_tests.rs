//! Chained query tests: predecessors, fluent clauses and nested queries

mod common;

use aql_builder::{
    AqlError, BinaryOperator, ForExpression, InsertExpression, LetExpression, Node, NodeKind,
    ObjectLiteral, Operation, Pipeline, RemoveExpression, ReturnExpression,
};
use serde_json::json;

#[test]
fn test_for_filter_remove() {
    common::init_tracing();
    let query = ForExpression::new(None, "doc", "users")
        .unwrap()
        .filter(Operation::binary("doc.active", BinaryOperator::Equal, false).unwrap())
        .unwrap()
        .remove("doc", "users")
        .unwrap();
    assert_eq!(
        query.to_aql(),
        "FOR doc IN users FILTER (doc.active == false) REMOVE doc IN users"
    );
}

#[test]
fn test_remove_return_old_after_for() {
    let query = ForExpression::new(None, "doc", "users")
        .unwrap()
        .remove("doc._key", "users")
        .unwrap()
        .return_old("removed")
        .unwrap();
    assert_eq!(
        query.to_aql(),
        "FOR doc IN users REMOVE doc._key IN users LET removed = `OLD` RETURN removed"
    );
}

#[test]
fn test_replace_with_options_and_return_new() {
    let query = ForExpression::new(None, "doc", "users")
        .unwrap()
        .replace("doc", Some("\"replacement\"".into()), "users")
        .unwrap()
        .options(json!({"waitForSync": true}))
        .unwrap()
        .return_new("doc_new")
        .unwrap();
    assert_eq!(
        query.to_aql(),
        "FOR doc IN users REPLACE doc WITH \"replacement\" IN users OPTIONS {waitForSync: true} LET doc_new = `NEW` RETURN doc_new"
    );
}

#[test]
fn test_let_then_insert() {
    let doc = ObjectLiteral::new(
        json!({"name": "\"Bob\"", "age": 25, "tags": ["\"a\"", "\"b\""]})
            .as_object()
            .unwrap()
            .clone(),
    )
    .unwrap();
    let query = LetExpression::new(None, "d", doc)
        .unwrap()
        .insert("d", "people")
        .unwrap()
        .return_new("created")
        .unwrap();
    assert_eq!(
        query.to_aql(),
        "LET d = {name: \"Bob\", age: 25, tags: [\"a\", \"b\"]} INSERT d INTO people LET created = `NEW` RETURN created"
    );
}

#[test]
fn test_subquery_in_let() {
    let sub = ForExpression::new(None, "u", "users")
        .unwrap()
        .return_("u._key")
        .unwrap();
    let query = LetExpression::new(None, "keys", sub)
        .unwrap()
        .for_in("k", "keys")
        .unwrap()
        .remove("k", "users")
        .unwrap();
    assert_eq!(
        query.to_aql(),
        "LET keys = (FOR u IN users RETURN u._key) FOR k IN keys REMOVE k IN users"
    );
}

#[test]
fn test_statement_can_be_a_predecessor() {
    let first: Node = RemoveExpression::new(None, "a", "x").unwrap().into();
    let second = RemoveExpression::new(Some(first), "b", "y").unwrap();
    assert_eq!(second.to_aql(), "REMOVE a IN x REMOVE b IN y");
}

#[test]
fn test_options_wrapper_can_be_a_predecessor() {
    let first: Node = RemoveExpression::new(None, "a", "x")
        .unwrap()
        .options(json!({"ignoreErrors": true}))
        .unwrap()
        .into();
    let next = ReturnExpression::new(Some(first), 1).unwrap();
    assert_eq!(next.to_aql(), "REMOVE a IN x OPTIONS {ignoreErrors: true} RETURN 1");
}

#[test]
fn test_options_wrapper_operand_is_not_parenthesized() {
    let wrapper = RemoveExpression::new(None, "a", "x")
        .unwrap()
        .options(json!({}))
        .unwrap();
    let node: Node = wrapper.into();
    assert_eq!(node.kind(), NodeKind::OptionsWrapper);
    let ret = ReturnExpression::new(None, node).unwrap();
    assert_eq!(ret.to_aql(), "RETURN REMOVE a IN x OPTIONS {}");
}

#[test]
fn test_leaf_predecessor_is_rejected() {
    let err = ForExpression::new(Some(Node::from(ObjectLiteral::default())), "x", "y").unwrap_err();
    assert!(matches!(err, AqlError::InvalidPredecessor(_)));
}

#[test]
fn test_failed_construction_leaves_chain_intact() {
    let root = ForExpression::new(None, "doc", "users").unwrap();
    assert!(root.remove("doc", "bad name").is_err());
    assert!(InsertExpression::new(Some(root.clone().into()), json!([1]), "users").is_err());
    assert_eq!(root.to_aql(), "FOR doc IN users");
}

#[test]
fn test_chain_rendering_is_idempotent() {
    let query = ForExpression::new(None, "doc", "users")
        .unwrap()
        .update("doc", Some("patch".into()), "users")
        .unwrap()
        .return_old("before")
        .unwrap();
    let first = query.to_aql();
    let second = query.to_aql();
    assert_eq!(first, second);
}
