//! # docsql-core
//!
//! Compiles document-style query objects into parameterized SQL.
//!
//! This crate provides:
//! - A [`Value`] model for query documents, convertible from JSON
//! - Parsers turning selectors, projections, orderings and paging into an AST
//! - A shared compiler emitting SQL text with `?` placeholders, driven by a
//!   [`Dialect`] implementation for quoting, paging, DELETE and UPSERT
//!
//! ## Selectors
//!
//! A selector maps field names to literals or operator objects:
//!
//! ```rust
//! use docsql_core::parse_selection;
//! use docsql_core::Value;
//! use serde_json::json;
//!
//! let selection = parse_selection(&Value::from(json!({
//!     "price": {"$gt": 1, "$lt": 9},
//!     "$or": [{"tag": "new"}, {"tag": {"$in": ["sale", "clearance"]}}]
//! })))
//! .unwrap();
//! assert!(!selection.is_all());
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Every value from a query document is bound as a parameter. Only field
//! names reach the SQL text, and those are always quoted.

pub mod ast;
pub mod compiler;
pub mod dialect;
pub mod error;
pub mod parser;
pub mod schema;
pub mod sql_value;
pub mod value;

pub use ast::{
    Assignments, CountStatement, DeleteStatement, InsertStatement, Key, Node, SelectStatement,
    Selection, UpsertStatement,
};
pub use compiler::{
    compile_count, compile_delete, compile_insert, compile_select, compile_upsert, CompiledQuery,
    SqlWriter,
};
pub use dialect::Dialect;
pub use error::{CompileError, CompileResult, ParseError, ParseResult};
pub use parser::parse_selection;
pub use schema::Table;
pub use sql_value::SqlValue;
pub use value::{Document, Value, ValueKind};
