//! Data-modification clauses: REMOVE, REPLACE, UPDATE and INSERT.

use std::fmt;

use super::cast::{auto_cast, cast_options, validate_collection_name, Operand};
use super::literal::{CollectionName, ObjectLiteral};
use super::node::{chain, write_prev, Node, Prev, Wrapped};
use super::statement::{return_pseudo, ReturnExpression, Statement};
use crate::error::AqlResult;

fn write_options(f: &mut fmt::Formatter<'_>, opts: &Option<ObjectLiteral>) -> fmt::Result {
    match opts {
        Some(opts) => write!(f, " OPTIONS {}", opts),
        None => Ok(()),
    }
}

/// `REMOVE <expr> IN <collection>`
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveExpression {
    prev: Prev,
    expr: Box<Node>,
    collection: CollectionName,
}

impl RemoveExpression {
    pub fn new(
        prev: Option<Node>,
        expr: impl Into<Operand>,
        collection: impl Into<Operand>,
    ) -> AqlResult<Self> {
        Ok(Self {
            prev: chain(prev)?,
            expr: Box::new(auto_cast(expr)?),
            collection: validate_collection_name(collection)?,
        })
    }

    pub fn expr(&self) -> &Node {
        &self.expr
    }

    pub fn collection(&self) -> &CollectionName {
        &self.collection
    }

    pub fn prev(&self) -> Option<&Node> {
        self.prev.as_deref()
    }

    /// Decorate a copy of this clause with an OPTIONS object.
    pub fn options(&self, config: impl Into<Operand>) -> AqlResult<OptionsWrapper> {
        Ok(OptionsWrapper {
            statement: Statement::Remove(self.clone()),
            opts: cast_options(config)?,
        })
    }

    /// `... LET <var> = `OLD` RETURN <var>`
    pub fn return_old(&self, var: &str) -> AqlResult<ReturnExpression> {
        return_pseudo(self.clone().into(), var, "OLD")
    }
}

impl fmt::Display for RemoveExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prev(f, &self.prev)?;
        write!(
            f,
            "REMOVE {} IN {}",
            Wrapped(&self.expr),
            self.collection
        )
    }
}

/// A statement followed by `OPTIONS {...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionsWrapper {
    statement: Statement,
    opts: ObjectLiteral,
}

impl OptionsWrapper {
    pub fn statement(&self) -> &Statement {
        &self.statement
    }

    pub fn opts(&self) -> &ObjectLiteral {
        &self.opts
    }

    /// `... OPTIONS {...} LET <var> = `OLD` RETURN <var>`
    pub fn return_old(&self, var: &str) -> AqlResult<ReturnExpression> {
        return_pseudo(self.clone().into(), var, "OLD")
    }

    pub fn to_aql(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OptionsWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} OPTIONS {}", self.statement, self.opts)
    }
}

impl From<OptionsWrapper> for Node {
    fn from(value: OptionsWrapper) -> Self {
        Node::OptionsWrapper(value)
    }
}

impl From<OptionsWrapper> for Operand {
    fn from(value: OptionsWrapper) -> Self {
        Operand::Node(Node::OptionsWrapper(value))
    }
}

/// Shared shape of REPLACE and UPDATE:
/// `<keyword> <expr> [WITH <with_expr>] IN <collection> [OPTIONS {...}]`
#[derive(Debug, Clone, PartialEq)]
struct Modification {
    prev: Prev,
    expr: Box<Node>,
    with_expr: Option<Box<Node>>,
    collection: CollectionName,
    opts: Option<ObjectLiteral>,
}

impl Modification {
    fn new(
        prev: Option<Node>,
        expr: impl Into<Operand>,
        with_expr: Option<Operand>,
        collection: impl Into<Operand>,
    ) -> AqlResult<Self> {
        Ok(Self {
            prev: chain(prev)?,
            expr: Box::new(auto_cast(expr)?),
            with_expr: with_expr.map(auto_cast).transpose()?.map(Box::new),
            collection: validate_collection_name(collection)?,
            opts: None,
        })
    }

    fn with_options(&self, config: impl Into<Operand>) -> AqlResult<Self> {
        Ok(Self {
            opts: Some(cast_options(config)?),
            ..self.clone()
        })
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, keyword: &str) -> fmt::Result {
        write_prev(f, &self.prev)?;
        write!(f, "{} {}", keyword, Wrapped(&self.expr))?;
        if let Some(with_expr) = &self.with_expr {
            write!(f, " WITH {}", Wrapped(with_expr))?;
        }
        write!(f, " IN {}", self.collection)?;
        write_options(f, &self.opts)
    }
}

macro_rules! modification_clause {
    ($(#[$meta:meta])* $name:ident, $keyword:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(Modification);

        impl $name {
            /// `with_expr` of `None` omits the WITH part entirely.
            pub fn new(
                prev: Option<Node>,
                expr: impl Into<Operand>,
                with_expr: Option<Operand>,
                collection: impl Into<Operand>,
            ) -> AqlResult<Self> {
                Modification::new(prev, expr, with_expr, collection).map(Self)
            }

            pub fn expr(&self) -> &Node {
                &self.0.expr
            }

            pub fn with_expr(&self) -> Option<&Node> {
                self.0.with_expr.as_deref()
            }

            pub fn collection(&self) -> &CollectionName {
                &self.0.collection
            }

            pub fn opts(&self) -> Option<&ObjectLiteral> {
                self.0.opts.as_ref()
            }

            pub fn prev(&self) -> Option<&Node> {
                self.0.prev.as_deref()
            }

            /// Copy of this clause with a trailing OPTIONS object.
            pub fn options(&self, config: impl Into<Operand>) -> AqlResult<Self> {
                self.0.with_options(config).map(Self)
            }

            /// `... LET <var> = `OLD` RETURN <var>`
            pub fn return_old(&self, var: &str) -> AqlResult<ReturnExpression> {
                return_pseudo(self.clone().into(), var, "OLD")
            }

            /// `... LET <var> = `NEW` RETURN <var>`
            pub fn return_new(&self, var: &str) -> AqlResult<ReturnExpression> {
                return_pseudo(self.clone().into(), var, "NEW")
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.write(f, $keyword)
            }
        }
    };
}

modification_clause!(
    /// `REPLACE <expr> [WITH <with_expr>] IN <collection>`
    ReplaceExpression,
    "REPLACE"
);

modification_clause!(
    /// `UPDATE <expr> [WITH <with_expr>] IN <collection>`
    UpdateExpression,
    "UPDATE"
);

/// `INSERT <expr> INTO <collection>`
#[derive(Debug, Clone, PartialEq)]
pub struct InsertExpression {
    prev: Prev,
    expr: Box<Node>,
    collection: CollectionName,
    opts: Option<ObjectLiteral>,
}

impl InsertExpression {
    pub fn new(
        prev: Option<Node>,
        expr: impl Into<Operand>,
        collection: impl Into<Operand>,
    ) -> AqlResult<Self> {
        Ok(Self {
            prev: chain(prev)?,
            expr: Box::new(auto_cast(expr)?),
            collection: validate_collection_name(collection)?,
            opts: None,
        })
    }

    pub fn expr(&self) -> &Node {
        &self.expr
    }

    pub fn collection(&self) -> &CollectionName {
        &self.collection
    }

    pub fn opts(&self) -> Option<&ObjectLiteral> {
        self.opts.as_ref()
    }

    pub fn prev(&self) -> Option<&Node> {
        self.prev.as_deref()
    }

    pub fn options(&self, config: impl Into<Operand>) -> AqlResult<Self> {
        Ok(Self {
            opts: Some(cast_options(config)?),
            ..self.clone()
        })
    }

    /// `... LET <var> = `NEW` RETURN <var>`
    pub fn return_new(&self, var: &str) -> AqlResult<ReturnExpression> {
        return_pseudo(self.clone().into(), var, "NEW")
    }
}

impl fmt::Display for InsertExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prev(f, &self.prev)?;
        write!(f, "INSERT {} INTO {}", Wrapped(&self.expr), self.collection)?;
        write_options(f, &self.opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aql::literal::Leaf;
    use crate::aql::statement::{ForExpression, Pipeline};
    use crate::error::AqlError;
    use serde_json::json;

    #[test]
    fn test_remove_with_options() {
        let stmt = RemoveExpression::new(None, "x", "y")
            .unwrap()
            .options(json!({"waitForSync": true}))
            .unwrap();
        assert_eq!(stmt.to_aql(), "REMOVE x IN y OPTIONS {waitForSync: true}");
        assert!(matches!(stmt.statement(), Statement::Remove(_)));
    }

    #[test]
    fn test_remove_options_rejects_non_objects() {
        let stmt = RemoveExpression::new(None, "x", "y").unwrap();
        assert!(matches!(stmt.options(json!([1, 2])), Err(AqlError::Cast(_))));
        assert!(matches!(stmt.options(5), Err(AqlError::Cast(_))));
    }

    #[test]
    fn test_remove_return_old() {
        let stmt = RemoveExpression::new(None, "x", "y")
            .unwrap()
            .return_old("gone")
            .unwrap();
        assert_eq!(stmt.to_aql(), "REMOVE x IN y LET gone = `OLD` RETURN gone");
    }

    #[test]
    fn test_options_wrapper_return_old() {
        let stmt = RemoveExpression::new(None, "x", "y")
            .unwrap()
            .options(json!({"ignoreErrors": true}))
            .unwrap()
            .return_old("a")
            .unwrap();
        assert_eq!(
            stmt.to_aql(),
            "REMOVE x IN y OPTIONS {ignoreErrors: true} LET a = `OLD` RETURN a"
        );
    }

    #[test]
    fn test_update() {
        let stmt = UpdateExpression::new(None, "doc", Some("changes".into()), "users").unwrap();
        assert_eq!(stmt.to_aql(), "UPDATE doc WITH changes IN users");

        let stmt = UpdateExpression::new(None, "doc", None, "users").unwrap();
        assert_eq!(stmt.to_aql(), "UPDATE doc IN users");
    }

    #[test]
    fn test_update_options_and_return_new() {
        let stmt = UpdateExpression::new(None, "doc", Some("patch".into()), "users")
            .unwrap()
            .options(json!({"keepNull": false}))
            .unwrap()
            .return_new("updated")
            .unwrap();
        assert_eq!(
            stmt.to_aql(),
            "UPDATE doc WITH patch IN users OPTIONS {keepNull: false} LET updated = `NEW` RETURN updated"
        );
    }

    #[test]
    fn test_insert() {
        let doc = ObjectLiteral::new(json!({"name": "\"Alice\""}).as_object().unwrap().clone())
            .unwrap();
        let stmt = InsertExpression::new(None, doc, "users").unwrap();
        assert_eq!(stmt.to_aql(), "INSERT {name: \"Alice\"} INTO users");
        assert!(matches!(stmt.expr(), Node::Leaf(Leaf::Object(_))));
    }

    #[test]
    fn test_insert_options_and_return_new() {
        let stmt = InsertExpression::new(None, "doc", "users")
            .unwrap()
            .options(json!({"overwrite": true}))
            .unwrap();
        assert_eq!(stmt.to_aql(), "INSERT doc INTO users OPTIONS {overwrite: true}");
        assert_eq!(
            stmt.return_new("n").unwrap().to_aql(),
            "INSERT doc INTO users OPTIONS {overwrite: true} LET n = `NEW` RETURN n"
        );
    }

    #[test]
    fn test_insert_rejects_bad_collection() {
        assert!(matches!(
            InsertExpression::new(None, "doc", "no good"),
            Err(AqlError::InvalidCollectionName(_))
        ));
    }

    #[test]
    fn test_mutation_after_for() {
        let stmt = ForExpression::new(None, "doc", "users")
            .unwrap()
            .update("doc", Some(json!(null).into()), "users")
            .unwrap();
        assert_eq!(stmt.to_aql(), "FOR doc IN users UPDATE doc WITH null IN users");
    }
}
