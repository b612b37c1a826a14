//! Abstract syntax tree for parsed queries.
//!
//! Nodes are built once by the parsers and never mutated. `Display` renders
//! the tagged-array notation, e.g. `["SELECTION", ["GT", ["KEY", "a"], ["VALUE", 1]]]`.

mod clause;
mod expression;
mod statement;

pub use clause::{Direction, Limit, Offset, OrderBy, Ordering, Projection, ProjectionKind};
pub use expression::{Comparison, Element, Key, Node, Operand, Operator, Selection, ID_KEY};
pub use statement::{
    Assignments, CountStatement, DeleteStatement, InsertStatement, SelectStatement,
    UpsertStatement,
};
