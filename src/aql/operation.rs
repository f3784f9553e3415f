use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::cast::{auto_cast, Operand};
use super::node::{Node, Wrapped};
use crate::error::{AqlError, AqlResult};

static FUNCTION_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(::[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("valid function name pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Comparison
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    In,
    NotIn,

    // Logical
    And,
    Or,

    // Arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulus,

    // String matching
    Like,
    RegEx,
    NotRegEx,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::GreaterThanOrEqual => ">=",
            BinaryOperator::In => "IN",
            BinaryOperator::NotIn => "NOT IN",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulus => "%",
            BinaryOperator::Like => "LIKE",
            BinaryOperator::RegEx => "=~",
            BinaryOperator::NotRegEx => "!~",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,
    Negate,
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnaryOperator::Not => "!",
            UnaryOperator::Negate => "-",
        })
    }
}

/// Compound expression usable as an operand. Always parenthesized when it
/// appears inside another node.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Unary {
        op: UnaryOperator,
        operand: Box<Node>,
    },
    Binary {
        left: Box<Node>,
        op: BinaryOperator,
        right: Box<Node>,
    },
    Ternary {
        condition: Box<Node>,
        then: Box<Node>,
        otherwise: Box<Node>,
    },
    FunctionCall {
        name: String,
        args: Vec<Node>,
    },
}

impl Operation {
    pub fn unary(op: UnaryOperator, operand: impl Into<Operand>) -> AqlResult<Self> {
        Ok(Operation::Unary {
            op,
            operand: Box::new(auto_cast(operand)?),
        })
    }

    pub fn binary(
        left: impl Into<Operand>,
        op: BinaryOperator,
        right: impl Into<Operand>,
    ) -> AqlResult<Self> {
        Ok(Operation::Binary {
            left: Box::new(auto_cast(left)?),
            op,
            right: Box::new(auto_cast(right)?),
        })
    }

    pub fn ternary(
        condition: impl Into<Operand>,
        then: impl Into<Operand>,
        otherwise: impl Into<Operand>,
    ) -> AqlResult<Self> {
        Ok(Operation::Ternary {
            condition: Box::new(auto_cast(condition)?),
            then: Box::new(auto_cast(then)?),
            otherwise: Box::new(auto_cast(otherwise)?),
        })
    }

    /// Function call such as `LENGTH(docs)` or `MY::FUNC(x)`.
    pub fn call<I, V>(name: impl Into<String>, args: I) -> AqlResult<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        let name = name.into();
        if !FUNCTION_NAME.is_match(&name) {
            return Err(AqlError::InvalidIdentifier(format!(
                "{:?} is not a function name",
                name
            )));
        }
        let args = args
            .into_iter()
            .map(auto_cast)
            .collect::<AqlResult<Vec<_>>>()?;
        Ok(Operation::FunctionCall { name, args })
    }

    pub fn to_aql(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Unary { op, operand } => write!(f, "{}{}", op, Wrapped(operand)),
            Operation::Binary { left, op, right } => {
                write!(f, "{} {} {}", Wrapped(left), op, Wrapped(right))
            }
            Operation::Ternary {
                condition,
                then,
                otherwise,
            } => write!(
                f,
                "{} ? {} : {}",
                Wrapped(condition),
                Wrapped(then),
                Wrapped(otherwise)
            ),
            Operation::FunctionCall { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", Wrapped(arg))?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<Operation> for Node {
    fn from(value: Operation) -> Self {
        Node::Operation(value)
    }
}

impl From<Operation> for Operand {
    fn from(value: Operation) -> Self {
        Operand::Node(Node::Operation(value))
    }
}
