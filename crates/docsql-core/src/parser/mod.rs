//! Query document parsers.
//!
//! Each parser turns one part of a query document into its AST node.
//! Parsers are pure functions of their input.
//!
//! # Example
//!
//! ```rust
//! use docsql_core::parser::parse_selection;
//! use docsql_core::Value;
//! use serde_json::json;
//!
//! let selection = parse_selection(&Value::from(json!({"a": {"$gt": 1}}))).unwrap();
//! assert_eq!(
//!     selection.to_string(),
//!     r#"["SELECTION", ["GT", ["KEY", "a"], ["VALUE", 1]]]"#
//! );
//! ```

mod clause;
mod key;
mod operator;
mod selection;
mod values;

pub use clause::{parse_limit, parse_offset, parse_order_by, parse_projection};
pub use key::parse_key;
pub use operator::{
    parse_eq, parse_gt, parse_gte, parse_in, parse_like, parse_lt, parse_lte, parse_ne,
    parse_nin, parse_nlike, parse_operator,
};
pub use selection::{parse_and, parse_or, parse_selection};
pub use values::{parse_columns, parse_values};

use crate::value::Value;

/// Describes a rejected value for error messages: numbers by value, the rest by kind.
fn describe(value: &Value) -> String {
    match value {
        Value::Int(n) => n.to_string(),
        Value::Float(f) => f.to_string(),
        other => String::from(other.kind().as_str()),
    }
}
