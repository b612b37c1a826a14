//! Selector AST types.

use std::fmt;

use crate::sql_value::SqlValue;

/// The primary-key sentinel accepted wherever a field name is.
pub const ID_KEY: &str = "$id";

/// A reference to the field a comparison applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// The table's primary key, spelled `$id`.
    Id,
    /// A named column.
    Column(String),
}

impl Key {
    /// Creates a column key.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column(name.into())
    }
}

/// Comparison and membership operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `$eq`
    Eq,
    /// `$ne`
    Ne,
    /// `$gt`
    Gt,
    /// `$gte`
    Gte,
    /// `$lt`
    Lt,
    /// `$lte`
    Lte,
    /// `$like`
    Like,
    /// `$nlike`
    NLike,
    /// `$in`
    In,
    /// `$nin`
    Nin,
}

impl Operator {
    /// All operators, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Eq,
        Self::Ne,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Like,
        Self::NLike,
        Self::In,
        Self::Nin,
    ];

    /// Resolves an operator key such as `$gt`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Returns the operator key as written in a selector.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eq => "$eq",
            Self::Ne => "$ne",
            Self::Gt => "$gt",
            Self::Gte => "$gte",
            Self::Lt => "$lt",
            Self::Lte => "$lte",
            Self::Like => "$like",
            Self::NLike => "$nlike",
            Self::In => "$in",
            Self::Nin => "$nin",
        }
    }

    /// Returns the AST tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Ne => "NE",
            Self::Gt => "GT",
            Self::Gte => "GTE",
            Self::Lt => "LT",
            Self::Lte => "LTE",
            Self::Like => "LIKE",
            Self::NLike => "NLIKE",
            Self::In => "IN",
            Self::Nin => "NIN",
        }
    }

    /// Returns the SQL operator.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Like => "LIKE",
            Self::NLike => "NOT LIKE",
            Self::In => "IN",
            Self::Nin => "NOT IN",
        }
    }

    /// Returns true for `$in` and `$nin`.
    #[must_use]
    pub const fn is_membership(self) -> bool {
        matches!(self, Self::In | Self::Nin)
    }
}

/// One member of an `$in`/`$nin` set.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A literal compared for equality.
    Literal(SqlValue),
    /// A nested comparison such as `{$gt: 10}` on the same key.
    Predicate {
        /// A non-membership operator.
        op: Operator,
        /// Its operand.
        value: SqlValue,
    },
}

/// The right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A single bound value.
    Value(SqlValue),
    /// A non-empty set for `$in`/`$nin`.
    Values(Vec<Element>),
}

/// A comparison of one key against an operand.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// The operator.
    pub op: Operator,
    /// The compared field.
    pub key: Key,
    /// The operand.
    pub operand: Operand,
}

/// A selector node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A single comparison.
    Comparison(Comparison),
    /// Conjunction of one or more nodes.
    And(Vec<Node>),
    /// Disjunction of one or more nodes.
    Or(Vec<Node>),
}

/// A parsed selector; `None` matches every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection(pub Option<Node>);

impl Selection {
    /// A selection matching every row.
    #[must_use]
    pub const fn all() -> Self {
        Self(None)
    }

    /// Returns the root node.
    #[must_use]
    pub const fn node(&self) -> Option<&Node> {
        self.0.as_ref()
    }

    /// Returns true when the selection matches every row.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        self.0.is_none()
    }
}

pub(crate) fn write_sql_value(f: &mut fmt::Formatter<'_>, value: &SqlValue) -> fmt::Result {
    match value {
        SqlValue::Null => f.write_str("null"),
        SqlValue::Bool(b) => write!(f, "{b}"),
        SqlValue::Int(n) => write!(f, "{n}"),
        SqlValue::Float(x) => write!(f, "{x}"),
        SqlValue::Text(s) => write!(f, "{s:?}"),
        SqlValue::Timestamp(d) => write!(f, "\"{}\"", d.to_rfc3339()),
        SqlValue::Blob(b) => {
            f.write_str("\"0x")?;
            for byte in b {
                write!(f, "{byte:02x}")?;
            }
            f.write_str("\"")
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id => f.write_str("[\"ID\"]"),
            Self::Column(name) => write!(f, "[\"KEY\", {name:?}]"),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write_sql_value(f, value),
            Self::Predicate { op, value } => {
                write!(f, "[\"{}\", ", op.tag())?;
                write_sql_value(f, value)?;
                f.write_str("]")
            }
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => {
                f.write_str("[\"VALUE\", ")?;
                write_sql_value(f, value)?;
                f.write_str("]")
            }
            Self::Values(elements) => {
                f.write_str("[\"VALUES\"")?;
                for element in elements {
                    write!(f, ", {element}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[\"{}\", {}, {}]", self.op.tag(), self.key, self.operand)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (tag, children) = match self {
            Self::Comparison(c) => return fmt::Display::fmt(c, f),
            Self::And(children) => ("AND", children),
            Self::Or(children) => ("OR", children),
        };
        write!(f, "[\"{tag}\"")?;
        for child in children {
            write!(f, ", {child}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(node) => write!(f, "[\"SELECTION\", {node}]"),
            None => f.write_str("[\"SELECTION\", null]"),
        }
    }
}
