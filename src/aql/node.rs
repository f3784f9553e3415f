use std::fmt;

use serde::Serialize;

use super::literal::Leaf;
use super::mutation::OptionsWrapper;
use super::operation::Operation;
use super::statement::{PartialStatement, Statement};
use crate::error::{AqlError, AqlResult};

/// Kind tag of a node.
///
/// Parenthesization and chaining dispatch on this tag alone, never on what a
/// node renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Literal, identifier or reference without operands
    Leaf,
    /// Compound expression usable as an operand
    Operation,
    /// Root-capable clause
    Statement,
    /// Chainable clause not terminated by a RETURN
    PartialStatement,
    /// Statement decorated with a trailing OPTIONS clause
    OptionsWrapper,
}

impl NodeKind {
    /// Whether an operand of this kind is wrapped in parentheses.
    pub fn needs_parens(self) -> bool {
        matches!(
            self,
            NodeKind::Operation | NodeKind::Statement | NodeKind::PartialStatement
        )
    }

    /// Whether a node of this kind may precede another clause.
    pub fn is_chainable(self) -> bool {
        matches!(
            self,
            NodeKind::Statement | NodeKind::PartialStatement | NodeKind::OptionsWrapper
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Leaf => "leaf",
            NodeKind::Operation => "operation",
            NodeKind::Statement => "statement",
            NodeKind::PartialStatement => "partial statement",
            NodeKind::OptionsWrapper => "options wrapper",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any element of the query tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(Leaf),
    Operation(Operation),
    Statement(Statement),
    PartialStatement(PartialStatement),
    OptionsWrapper(OptionsWrapper),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Leaf(_) => NodeKind::Leaf,
            Node::Operation(_) => NodeKind::Operation,
            Node::Statement(_) => NodeKind::Statement,
            Node::PartialStatement(_) => NodeKind::PartialStatement,
            Node::OptionsWrapper(_) => NodeKind::OptionsWrapper,
        }
    }

    /// Render this node, including its predecessors, as query text.
    pub fn to_aql(&self) -> String {
        self.to_string()
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Node::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Leaf(leaf) => write!(f, "{}", leaf),
            Node::Operation(op) => write!(f, "{}", op),
            Node::Statement(stmt) => write!(f, "{}", stmt),
            Node::PartialStatement(stmt) => write!(f, "{}", stmt),
            Node::OptionsWrapper(wrapper) => write!(f, "{}", wrapper),
        }
    }
}

/// Operand rendering: parenthesized iff the operand's kind requires it.
pub(crate) struct Wrapped<'a>(pub(crate) &'a Node);

impl fmt::Display for Wrapped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.kind().needs_parens() {
            write!(f, "({})", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Link to the clause rendered immediately before the owning clause.
pub(crate) type Prev = Option<Box<Node>>;

/// Accept `prev` as a predecessor, rejecting nodes that cannot start a chain.
pub(crate) fn chain(prev: Option<Node>) -> AqlResult<Prev> {
    match prev {
        Some(node) if !node.kind().is_chainable() => {
            tracing::debug!(kind = %node.kind(), "rejected predecessor");
            Err(AqlError::InvalidPredecessor(format!(
                "a {} node cannot precede a clause",
                node.kind()
            )))
        }
        prev => Ok(prev.map(Box::new)),
    }
}

/// Write the predecessor's text followed by a single space, if there is one.
pub(crate) fn write_prev(f: &mut fmt::Formatter<'_>, prev: &Prev) -> fmt::Result {
    match prev {
        Some(node) => write!(f, "{} ", node),
        None => Ok(()),
    }
}
