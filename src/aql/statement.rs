//! Pipeline clauses and the statement sum types.
//!
//! Every clause may hold a predecessor, which is rendered first and
//! separated by a single space.

use std::fmt;

use super::cast::{auto_cast, Operand};
use super::literal::{Identifier, SimpleReference};
use super::mutation::{InsertExpression, RemoveExpression, ReplaceExpression, UpdateExpression};
use super::node::{chain, write_prev, Node, Prev, Wrapped};
use crate::error::AqlResult;

/// Root-capable clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Remove(RemoveExpression),
    Return(ReturnExpression),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Remove(stmt) => write!(f, "{}", stmt),
            Statement::Return(stmt) => write!(f, "{}", stmt),
        }
    }
}

/// Chainable clause that is not terminated by a RETURN.
#[derive(Debug, Clone, PartialEq)]
pub enum PartialStatement {
    For(ForExpression),
    Filter(FilterExpression),
    Let(LetExpression),
    Insert(InsertExpression),
    Update(UpdateExpression),
    Replace(ReplaceExpression),
}

impl fmt::Display for PartialStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartialStatement::For(stmt) => write!(f, "{}", stmt),
            PartialStatement::Filter(stmt) => write!(f, "{}", stmt),
            PartialStatement::Let(stmt) => write!(f, "{}", stmt),
            PartialStatement::Insert(stmt) => write!(f, "{}", stmt),
            PartialStatement::Update(stmt) => write!(f, "{}", stmt),
            PartialStatement::Replace(stmt) => write!(f, "{}", stmt),
        }
    }
}

macro_rules! statement_conversions {
    ($wrapper:ident: $($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for $wrapper {
                fn from(value: $ty) -> Self {
                    $wrapper::$variant(value)
                }
            }

            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::$wrapper($wrapper::$variant(value))
                }
            }

            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Operand::Node(Node::$wrapper($wrapper::$variant(value)))
                }
            }

            impl $ty {
                pub fn to_aql(&self) -> String {
                    self.to_string()
                }
            }
        )*

        impl From<$wrapper> for Node {
            fn from(value: $wrapper) -> Self {
                Node::$wrapper(value)
            }
        }

        impl From<$wrapper> for Operand {
            fn from(value: $wrapper) -> Self {
                Operand::Node(Node::$wrapper(value))
            }
        }

        impl $wrapper {
            pub fn to_aql(&self) -> String {
                self.to_string()
            }
        }
    };
}

statement_conversions! {
    Statement:
    RemoveExpression => Remove,
    ReturnExpression => Return,
}

statement_conversions! {
    PartialStatement:
    ForExpression => For,
    FilterExpression => Filter,
    LetExpression => Let,
    InsertExpression => Insert,
    UpdateExpression => Update,
    ReplaceExpression => Replace,
}

/// `FOR <var> IN <expr>`
#[derive(Debug, Clone, PartialEq)]
pub struct ForExpression {
    prev: Prev,
    var: Identifier,
    expr: Box<Node>,
}

impl ForExpression {
    pub fn new(prev: Option<Node>, var: &str, expr: impl Into<Operand>) -> AqlResult<Self> {
        Ok(Self {
            prev: chain(prev)?,
            var: Identifier::new(var)?,
            expr: Box::new(auto_cast(expr)?),
        })
    }

    pub fn var(&self) -> &Identifier {
        &self.var
    }

    pub fn expr(&self) -> &Node {
        &self.expr
    }

    pub fn prev(&self) -> Option<&Node> {
        self.prev.as_deref()
    }
}

impl fmt::Display for ForExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prev(f, &self.prev)?;
        write!(f, "FOR {} IN {}", self.var, Wrapped(&self.expr))
    }
}

/// `FILTER <expr>`
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpression {
    prev: Prev,
    expr: Box<Node>,
}

impl FilterExpression {
    pub fn new(prev: Option<Node>, expr: impl Into<Operand>) -> AqlResult<Self> {
        Ok(Self {
            prev: chain(prev)?,
            expr: Box::new(auto_cast(expr)?),
        })
    }

    pub fn expr(&self) -> &Node {
        &self.expr
    }

    pub fn prev(&self) -> Option<&Node> {
        self.prev.as_deref()
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prev(f, &self.prev)?;
        write!(f, "FILTER {}", Wrapped(&self.expr))
    }
}

/// `LET <var> = <expr>`
#[derive(Debug, Clone, PartialEq)]
pub struct LetExpression {
    prev: Prev,
    var: Identifier,
    expr: Box<Node>,
}

impl LetExpression {
    pub fn new(prev: Option<Node>, var: &str, expr: impl Into<Operand>) -> AqlResult<Self> {
        Ok(Self {
            prev: chain(prev)?,
            var: Identifier::new(var)?,
            expr: Box::new(auto_cast(expr)?),
        })
    }

    pub fn var(&self) -> &Identifier {
        &self.var
    }

    pub fn expr(&self) -> &Node {
        &self.expr
    }

    pub fn prev(&self) -> Option<&Node> {
        self.prev.as_deref()
    }
}

impl fmt::Display for LetExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prev(f, &self.prev)?;
        write!(f, "LET {} = {}", self.var, Wrapped(&self.expr))
    }
}

/// `RETURN [DISTINCT] <expr>`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnExpression {
    prev: Prev,
    value: Box<Node>,
    distinct: bool,
}

impl ReturnExpression {
    pub fn new(prev: Option<Node>, value: impl Into<Operand>) -> AqlResult<Self> {
        Ok(Self {
            prev: chain(prev)?,
            value: Box::new(auto_cast(value)?),
            distinct: false,
        })
    }

    pub fn distinct(prev: Option<Node>, value: impl Into<Operand>) -> AqlResult<Self> {
        Ok(Self {
            distinct: true,
            ..Self::new(prev, value)?
        })
    }

    pub fn value(&self) -> &Node {
        &self.value
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn prev(&self) -> Option<&Node> {
        self.prev.as_deref()
    }
}

impl fmt::Display for ReturnExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_prev(f, &self.prev)?;
        f.write_str("RETURN ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        write!(f, "{}", Wrapped(&self.value))
    }
}

/// Capture a pseudo-variable (`OLD` or `NEW`) of the preceding modification
/// into `var` and return it: `<prev> LET var = `OLD` RETURN var`.
pub(crate) fn return_pseudo(prev: Node, var: &str, pseudo: &str) -> AqlResult<ReturnExpression> {
    let name = Identifier::new(var)?;
    let binding = LetExpression::new(
        Some(prev),
        var,
        SimpleReference::new(format!("`{}`", pseudo))?,
    )?;
    tracing::trace!(var, pseudo, "binding pseudo-variable for RETURN");
    ReturnExpression::new(Some(binding.into()), name)
}

/// Follow-on clauses for anything that can continue a query.
///
/// Each method returns a new node whose predecessor is a copy of `self`.
pub trait Pipeline: Clone + Into<Node> {
    fn for_in(&self, var: &str, expr: impl Into<Operand>) -> AqlResult<ForExpression> {
        ForExpression::new(Some(self.clone().into()), var, expr)
    }

    fn filter(&self, expr: impl Into<Operand>) -> AqlResult<FilterExpression> {
        FilterExpression::new(Some(self.clone().into()), expr)
    }

    fn let_(&self, var: &str, expr: impl Into<Operand>) -> AqlResult<LetExpression> {
        LetExpression::new(Some(self.clone().into()), var, expr)
    }

    fn return_(&self, value: impl Into<Operand>) -> AqlResult<ReturnExpression> {
        ReturnExpression::new(Some(self.clone().into()), value)
    }

    fn return_distinct(&self, value: impl Into<Operand>) -> AqlResult<ReturnExpression> {
        ReturnExpression::distinct(Some(self.clone().into()), value)
    }

    fn remove(
        &self,
        expr: impl Into<Operand>,
        collection: impl Into<Operand>,
    ) -> AqlResult<RemoveExpression> {
        RemoveExpression::new(Some(self.clone().into()), expr, collection)
    }

    fn replace(
        &self,
        expr: impl Into<Operand>,
        with_expr: Option<Operand>,
        collection: impl Into<Operand>,
    ) -> AqlResult<ReplaceExpression> {
        ReplaceExpression::new(Some(self.clone().into()), expr, with_expr, collection)
    }

    fn update(
        &self,
        expr: impl Into<Operand>,
        with_expr: Option<Operand>,
        collection: impl Into<Operand>,
    ) -> AqlResult<UpdateExpression> {
        UpdateExpression::new(Some(self.clone().into()), expr, with_expr, collection)
    }

    fn insert(
        &self,
        expr: impl Into<Operand>,
        collection: impl Into<Operand>,
    ) -> AqlResult<InsertExpression> {
        InsertExpression::new(Some(self.clone().into()), expr, collection)
    }
}

impl Pipeline for PartialStatement {}
impl Pipeline for ForExpression {}
impl Pipeline for FilterExpression {}
impl Pipeline for LetExpression {}
impl Pipeline for InsertExpression {}
impl Pipeline for UpdateExpression {}
impl Pipeline for ReplaceExpression {}
