//! Error types for parsing and compiling queries.

use crate::value::ValueKind;

/// A malformed query expression.
///
/// Raised while parsing; compilation assumes a well-formed AST.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The input has the wrong shape for the clause being parsed.
    #[error("invalid argument: expected {expected}, received {received}")]
    InvalidArgument {
        /// What the parser accepts.
        expected: &'static str,
        /// The kind that was received.
        received: ValueKind,
    },

    /// An operator received an operand of the wrong kind.
    #[error("invalid {operator} operand: expected {expected}, received {received}")]
    InvalidOperand {
        /// The operator, e.g. `$gt`.
        operator: &'static str,
        /// What the operator accepts.
        expected: &'static str,
        /// The kind that was received.
        received: ValueKind,
    },

    /// An operator that requires a non-empty array received an empty one.
    #[error("invalid {operator} operand: array cannot be empty")]
    EmptyArray {
        /// The operator, e.g. `$in`.
        operator: &'static str,
    },

    /// A `$`-prefixed key that is not a known operator.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// A comparison operator with no enclosing field to compare.
    #[error("operator {operator} must be nested under a field")]
    MissingField {
        /// The operator, e.g. `$gt`.
        operator: &'static str,
    },

    /// A projection value other than 1, 0 or -1.
    #[error("invalid projection for '{key}': expected 1, 0 or -1, received {received}")]
    InvalidProjection {
        /// The offending column.
        key: String,
        /// Description of the received value.
        received: String,
    },

    /// A malformed order-by element.
    #[error("invalid order by element at index {index}: {reason}")]
    InvalidOrderBy {
        /// Position of the element.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// A limit that is not a strictly positive integer.
    #[error("invalid limit: expected a positive integer, received {0}")]
    InvalidLimit(String),

    /// An offset that is not a non-negative integer.
    #[error("invalid offset: expected a non-negative integer, received {0}")]
    InvalidOffset(String),

    /// An assigned value that cannot be bound as a parameter.
    #[error("invalid value for column '{column}': expected number, string, boolean, date, buffer or null, received {received}")]
    InvalidValue {
        /// The offending column.
        column: String,
        /// The kind that was received.
        received: ValueKind,
    },

    /// A column name that cannot be assigned or listed.
    #[error("invalid column name '{0}'")]
    InvalidColumn(String),
}

/// A well-formed AST that cannot be compiled into the requested statement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// An insert-or-update statement without any values.
    #[error("upsert on '{table}' requires at least one value")]
    MissingValues {
        /// The target table.
        table: String,
    },

    /// The dialect needs an explicit selector to find the row to update.
    #[error("{dialect} upsert on '{table}' requires an update selector")]
    MissingUpdateSelector {
        /// The dialect name.
        dialect: &'static str,
        /// The target table.
        table: String,
    },

    /// A statement that must target specific rows was given a match-all selection.
    #[error("{statement} on '{table}' requires a non-empty selection")]
    MissingWhereTarget {
        /// The statement kind.
        statement: &'static str,
        /// The target table.
        table: String,
    },

    /// An explicit update-column list with no columns.
    #[error("upsert on '{table}' requires at least one update column")]
    MissingUpdateColumns {
        /// The target table.
        table: String,
    },

    /// An update column that is not among the inserted values.
    #[error("update column '{column}' is not among the values inserted into '{table}'")]
    UnknownUpdateColumn {
        /// The offending column.
        column: String,
        /// The target table.
        table: String,
    },

    /// `$id` compared against a table with a multi-column primary key.
    #[error("table '{table}' has a composite primary key; $id cannot be compared to a single value")]
    CompositePrimaryKey {
        /// The target table.
        table: String,
    },

    /// `$id` used against a table declared without a primary key.
    #[error("table '{table}' has no primary key")]
    MissingPrimaryKey {
        /// The target table.
        table: String,
    },

    /// An exclusion projection on a table whose columns are unknown.
    #[error("excluding columns from '{table}' requires its column list")]
    UnknownColumns {
        /// The target table.
        table: String,
    },

    /// A projection that leaves no column to select.
    #[error("projection on '{table}' excludes every column")]
    EmptyProjection {
        /// The target table.
        table: String,
    },
}

/// Result alias for parsing.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Result alias for compiling.
pub type CompileResult<T> = std::result::Result<T, CompileError>;
