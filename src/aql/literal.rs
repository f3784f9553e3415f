//! Leaf nodes: literals, identifiers, references and collection names.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::cast::{cast_compound, Operand};
use super::keywords::is_keyword;
use super::node::{Node, Wrapped};
use crate::error::{AqlError, AqlResult};

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier pattern"));

static REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(@{0,2}[A-Za-z_][A-Za-z0-9_]*|`[^`]+`)(\.([A-Za-z_][A-Za-z0-9_]*|`[^`]+`)|\[([0-9]+|\*)\])*$",
    )
    .expect("valid reference pattern")
});

static COLLECTION_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^_?[A-Za-z_][A-Za-z0-9_]*$").expect("valid collection pattern"));

static KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_]+$").expect("valid keyword pattern"));

/// A bare word: letter or underscore followed by word characters.
pub(crate) fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

/// A field or variable path that is not a bare word (`doc.name`, `@param`,
/// `` `OLD` ``, `list[0]`, `list[*].name`).
pub(crate) fn is_reference(s: &str) -> bool {
    !is_identifier(s) && REFERENCE.is_match(s)
}

/// Leaf node variants
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    Integer(IntegerLiteral),
    Number(NumberLiteral),
    String(StringLiteral),
    Boolean(BooleanLiteral),
    Null(NullLiteral),
    Identifier(Identifier),
    Reference(SimpleReference),
    Raw(RawExpression),
    Keyword(Keyword),
    Object(ObjectLiteral),
    List(ListLiteral),
    Collection(CollectionName),
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leaf::Integer(v) => write!(f, "{}", v),
            Leaf::Number(v) => write!(f, "{}", v),
            Leaf::String(v) => write!(f, "{}", v),
            Leaf::Boolean(v) => write!(f, "{}", v),
            Leaf::Null(v) => write!(f, "{}", v),
            Leaf::Identifier(v) => write!(f, "{}", v),
            Leaf::Reference(v) => write!(f, "{}", v),
            Leaf::Raw(v) => write!(f, "{}", v),
            Leaf::Keyword(v) => write!(f, "{}", v),
            Leaf::Object(v) => write!(f, "{}", v),
            Leaf::List(v) => write!(f, "{}", v),
            Leaf::Collection(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! leaf_conversions {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Leaf {
                fn from(value: $ty) -> Self {
                    Leaf::$variant(value)
                }
            }

            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::Leaf(Leaf::$variant(value))
                }
            }

            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Operand::Node(Node::Leaf(Leaf::$variant(value)))
                }
            }

            impl $ty {
                pub fn to_aql(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

leaf_conversions! {
    IntegerLiteral => Integer,
    NumberLiteral => Number,
    StringLiteral => String,
    BooleanLiteral => Boolean,
    NullLiteral => Null,
    Identifier => Identifier,
    SimpleReference => Reference,
    RawExpression => Raw,
    Keyword => Keyword,
    ObjectLiteral => Object,
    ListLiteral => List,
    CollectionName => Collection,
}

impl From<Leaf> for Node {
    fn from(value: Leaf) -> Self {
        Node::Leaf(value)
    }
}

impl From<Leaf> for Operand {
    fn from(value: Leaf) -> Self {
        Operand::Node(Node::Leaf(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerLiteral(i64);

impl IntegerLiteral {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for IntegerLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Finite non-integer number
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberLiteral(f64);

impl NumberLiteral {
    pub fn new(value: f64) -> AqlResult<Self> {
        if !value.is_finite() {
            return Err(AqlError::Cast(format!("{} is not a finite number", value)));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for NumberLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// String literal, rendered double-quoted with JSON escapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral(String);

impl StringLiteral {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StringLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::String(self.0.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanLiteral(bool);

impl BooleanLiteral {
    pub fn new(value: bool) -> Self {
        Self(value)
    }

    pub fn value(&self) -> bool {
        self.0
    }
}

impl fmt::Display for BooleanLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0 { "true" } else { "false" })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullLiteral;

impl NullLiteral {
    pub fn new() -> Self {
        Self
    }
}

impl fmt::Display for NullLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null")
    }
}

/// Variable name; quoted with backticks when it is a reserved word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> AqlResult<Self> {
        let name = name.into();
        if !is_identifier(&name) {
            tracing::debug!(name = %name, "rejected identifier");
            return Err(AqlError::InvalidIdentifier(format!("{:?}", name)));
        }
        Ok(Self(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_keyword(&self.0) {
            write!(f, "`{}`", self.0)
        } else {
            f.write_str(&self.0)
        }
    }
}

/// Field or variable path such as `doc.address.city` or `@value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleReference(String);

impl SimpleReference {
    pub fn new(path: impl Into<String>) -> AqlResult<Self> {
        let path = path.into();
        if !REFERENCE.is_match(&path) {
            tracing::debug!(path = %path, "rejected reference");
            return Err(AqlError::InvalidIdentifier(format!(
                "{:?} is not a reference",
                path
            )));
        }
        Ok(Self(path))
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SimpleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Query text inserted verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawExpression(String);

impl RawExpression {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn text(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RawExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword(String);

impl Keyword {
    pub fn new(word: impl Into<String>) -> AqlResult<Self> {
        let word = word.into();
        if !KEYWORD.is_match(&word) {
            return Err(AqlError::InvalidIdentifier(format!(
                "{:?} is not a keyword",
                word
            )));
        }
        Ok(Self(word.to_ascii_uppercase()))
    }

    pub fn word(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Object literal with keys kept in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectLiteral {
    entries: Vec<(String, Node)>,
}

impl ObjectLiteral {
    /// Build from a JSON object. Nested objects and arrays become object and
    /// list literals; every other value is auto-cast.
    pub fn new(map: Map<String, Value>) -> AqlResult<Self> {
        Self::from_entries(map)
    }

    pub fn from_entries<I, K, V>(entries: I) -> AqlResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Operand>,
    {
        let mut obj = Self::default();
        for (key, value) in entries {
            obj.insert(key, value)?;
        }
        Ok(obj)
    }

    /// Set `key`, replacing an existing entry in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Operand>) -> AqlResult<()> {
        let key = key.into();
        let value = cast_compound(value.into())?;
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ObjectLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if is_identifier(key) && !is_keyword(key) {
                f.write_str(key)?;
            } else {
                write!(f, "{}", Value::String(key.clone()))?;
            }
            write!(f, ": {}", Wrapped(value))?;
        }
        f.write_str("}")
    }
}

impl<'a> From<&'a ObjectLiteral> for Operand {
    fn from(value: &'a ObjectLiteral) -> Self {
        Operand::Node(Node::Leaf(Leaf::Object(value.clone())))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListLiteral(Vec<Node>);

impl ListLiteral {
    pub fn new(items: Vec<Value>) -> AqlResult<Self> {
        Self::from_items(items)
    }

    pub fn from_items<I, V>(items: I) -> AqlResult<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Operand>,
    {
        items
            .into_iter()
            .map(|item| cast_compound(item.into()))
            .collect::<AqlResult<Vec<_>>>()
            .map(Self)
    }

    pub fn items(&self) -> &[Node] {
        &self.0
    }
}

impl fmt::Display for ListLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", Wrapped(item))?;
        }
        f.write_str("]")
    }
}

/// Validated collection name, rendered bare
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionName(String);

impl CollectionName {
    pub fn new(name: impl Into<String>) -> AqlResult<Self> {
        let name = name.into();
        if !COLLECTION_NAME.is_match(&name) {
            tracing::debug!(name = %name, "rejected collection name");
            return Err(AqlError::InvalidCollectionName(format!("{:?}", name)));
        }
        Ok(Self(name))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
