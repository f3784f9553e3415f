//! Conversion of caller-supplied values into nodes.
//!
//! Two kinds of slots exist. Expression slots accept anything [`auto_cast`]
//! understands. Collection slots accept only a plain string that passes
//! [`validate_collection_name`]; nodes are never accepted there.

use serde_json::{Number, Value};

use super::literal::{
    is_identifier, is_reference, BooleanLiteral, CollectionName, Identifier, IntegerLiteral,
    Leaf, ListLiteral, NullLiteral, NumberLiteral, ObjectLiteral, SimpleReference, StringLiteral,
};
use super::node::Node;
use crate::error::{AqlError, AqlResult};

/// A value offered to an operand slot, before casting.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Already-built node, passed through unchanged
    Node(Node),
    /// Plain value
    Value(Value),
    /// Float that may not be representable as JSON (NaN, infinities)
    Float(f64),
}

impl From<Node> for Operand {
    fn from(value: Node) -> Self {
        Operand::Node(value)
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Value(Value::String(value.to_string()))
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Value(Value::String(value))
    }
}

impl From<&String> for Operand {
    fn from(value: &String) -> Self {
        Operand::Value(Value::String(value.clone()))
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Operand::Value(Value::Bool(value))
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Float(value)
    }
}

macro_rules! integer_operands {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Operand::Value(Value::from(value))
                }
            }
        )*
    };
}

integer_operands!(i32, i64, u32, u64, usize);

/// Short description of a rejected value for error messages.
fn describe(operand: &Operand) -> String {
    match operand {
        Operand::Node(node) => format!("{} node `{}`", node.kind(), node),
        Operand::Value(Value::Array(_)) => format!("array {}", value_text(operand)),
        Operand::Value(Value::Object(_)) => format!("object {}", value_text(operand)),
        Operand::Value(Value::String(s)) => format!("string {:?}", s),
        Operand::Value(other) => format!("value {}", other),
        Operand::Float(f) => format!("number {}", f),
    }
}

fn value_text(operand: &Operand) -> String {
    match operand {
        Operand::Value(v) => v.to_string(),
        _ => String::new(),
    }
}

fn reject(operand: &Operand) -> AqlError {
    let description = describe(operand);
    tracing::debug!(value = %description, "rejected operand");
    AqlError::Cast(format!("cannot use {} as an expression", description))
}

/// Turn an operand into a node. Rules are tried in order; the first match
/// wins and anything unmatched is rejected.
pub fn auto_cast(value: impl Into<Operand>) -> AqlResult<Node> {
    let operand = value.into();
    match operand {
        Operand::Node(node) => Ok(node),
        Operand::Float(f) => cast_float(f).ok_or_else(|| reject(&Operand::Float(f))),
        Operand::Value(Value::Number(ref n)) => cast_number(n).ok_or_else(|| reject(&operand)),
        Operand::Value(Value::String(ref s)) => cast_str(s).ok_or_else(|| reject(&operand)),
        Operand::Value(Value::Bool(b)) => Ok(BooleanLiteral::new(b).into()),
        Operand::Value(Value::Null) => Ok(NullLiteral.into()),
        Operand::Value(Value::Array(_) | Value::Object(_)) => Err(reject(&operand)),
    }
}

fn cast_number(n: &Number) -> Option<Node> {
    match n.as_i64() {
        Some(i) => Some(IntegerLiteral::new(i).into()),
        None => cast_float(n.as_f64()?),
    }
}

fn cast_float(f: f64) -> Option<Node> {
    if !f.is_finite() {
        return None;
    }
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        return Some(IntegerLiteral::new(f as i64).into());
    }
    NumberLiteral::new(f).ok().map(Node::from)
}

fn cast_str(s: &str) -> Option<Node> {
    if s.starts_with('"') {
        let parsed: String = serde_json::from_str(s).ok()?;
        return Some(StringLiteral::new(parsed).into());
    }
    if is_identifier(s) {
        return Identifier::new(s).ok().map(Node::from);
    }
    if is_reference(s) {
        return SimpleReference::new(s).ok().map(Node::from);
    }
    None
}

/// Like [`auto_cast`], but nested JSON objects and arrays become object and
/// list literals. Used for the values inside compound literals.
pub(crate) fn cast_compound(operand: Operand) -> AqlResult<Node> {
    match operand {
        Operand::Value(Value::Object(map)) => ObjectLiteral::new(map).map(Node::from),
        Operand::Value(Value::Array(items)) => ListLiteral::new(items).map(Node::from),
        other => auto_cast(other),
    }
}

/// Accept the argument of an `options(...)` call. Object literal nodes are
/// taken by value, so a caller's original is never shared with the clause.
pub(crate) fn cast_options(value: impl Into<Operand>) -> AqlResult<ObjectLiteral> {
    match value.into() {
        Operand::Node(Node::Leaf(Leaf::Object(obj))) => Ok(obj),
        Operand::Value(Value::Object(map)) => ObjectLiteral::new(map),
        other => {
            let description = describe(&other);
            tracing::debug!(value = %description, "rejected options");
            Err(AqlError::Cast(format!(
                "options must be an object, got {}",
                description
            )))
        }
    }
}

/// Validate a collection slot. Only raw strings matching the collection-name
/// pattern pass; nodes of any kind and non-string values are rejected.
pub fn validate_collection_name(value: impl Into<Operand>) -> AqlResult<CollectionName> {
    match value.into() {
        Operand::Value(Value::String(name)) => CollectionName::new(name),
        other => {
            let description = describe(&other);
            tracing::debug!(value = %description, "rejected collection slot");
            Err(AqlError::InvalidCollectionName(format!(
                "expected a plain string, got {}",
                description
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aql::literal::RawExpression;
    use serde_json::json;

    fn leaf(value: impl Into<Operand>) -> Leaf {
        match auto_cast(value).unwrap() {
            Node::Leaf(leaf) => leaf,
            other => panic!("Expected leaf, got {:?}", other),
        }
    }

    #[test]
    fn test_cast_integer() {
        assert!(matches!(leaf(42), Leaf::Integer(i) if i.value() == 42));
        assert!(matches!(leaf(json!(-7)), Leaf::Integer(i) if i.value() == -7));
        assert!(matches!(leaf(3.0), Leaf::Integer(i) if i.value() == 3));
    }

    #[test]
    fn test_cast_number() {
        assert!(matches!(leaf(2.5), Leaf::Number(n) if n.value() == 2.5));
        assert!(matches!(leaf(json!(0.25)), Leaf::Number(_)));
    }

    #[test]
    fn test_cast_large_unsigned() {
        assert!(matches!(leaf(u64::MAX), Leaf::Number(_)));
    }

    #[test]
    fn test_cast_rejects_non_finite() {
        assert!(matches!(auto_cast(f64::NAN), Err(AqlError::Cast(_))));
        assert!(matches!(auto_cast(f64::NEG_INFINITY), Err(AqlError::Cast(_))));
    }

    #[test]
    fn test_cast_quoted_string() {
        assert!(matches!(leaf("\"hello\""), Leaf::String(s) if s.value() == "hello"));
        assert!(matches!(leaf("\"a b\""), Leaf::String(s) if s.value() == "a b"));
    }

    #[test]
    fn test_cast_malformed_quoted_string() {
        assert!(matches!(auto_cast("\"unterminated"), Err(AqlError::Cast(_))));
    }

    #[test]
    fn test_cast_identifier_and_reference() {
        assert!(matches!(leaf("id"), Leaf::Identifier(i) if i.name() == "id"));
        assert!(matches!(leaf("some.ref"), Leaf::Reference(r) if r.path() == "some.ref"));
        assert!(matches!(leaf("@param"), Leaf::Reference(_)));
        assert!(matches!(leaf("`OLD`"), Leaf::Reference(_)));
    }

    #[test]
    fn test_cast_boolean_and_null() {
        assert!(matches!(leaf(false), Leaf::Boolean(b) if !b.value()));
        assert!(matches!(leaf(Value::Null), Leaf::Null(_)));
    }

    #[test]
    fn test_cast_rejects_other_strings() {
        for s in ["", "a b", "1 + 2", "42", "-x"] {
            assert!(matches!(auto_cast(s), Err(AqlError::Cast(_))), "{:?}", s);
        }
    }

    #[test]
    fn test_cast_rejects_compound_values() {
        assert!(matches!(auto_cast(json!([1, 2])), Err(AqlError::Cast(_))));
        assert!(matches!(auto_cast(json!({"a": 1})), Err(AqlError::Cast(_))));
    }

    #[test]
    fn test_cast_passes_nodes_through() {
        let node = Node::from(RawExpression::new("1 + 2"));
        assert_eq!(auto_cast(node.clone()).unwrap(), node);
    }

    #[test]
    fn test_cast_options() {
        let obj = cast_options(json!({"a": "b"})).unwrap();
        assert_eq!(obj.to_aql(), "{a: b}");
        assert!(cast_options(json!([1])).is_err());
        assert!(cast_options("x").is_err());
    }

    #[test]
    fn test_validate_collection_name() {
        assert_eq!(validate_collection_name("users").unwrap().name(), "users");
        assert!(matches!(
            validate_collection_name(42),
            Err(AqlError::InvalidCollectionName(_))
        ));
        assert!(matches!(
            validate_collection_name(StringLiteral::new("for")),
            Err(AqlError::InvalidCollectionName(_))
        ));
    }
}
