#![allow(dead_code)]

use docsql_core::compiler::{push_insert, SqlWriter};
use docsql_core::parser::{parse_order_by, parse_projection, parse_selection};
use docsql_core::{
    CompileResult, CompiledQuery, Dialect, ParseError, Selection, Table, UpsertStatement, Value,
};

/// A double-quoting dialect whose upsert is a plain insert.
pub struct Ansi;

impl Dialect for Ansi {
    fn name(&self) -> &'static str {
        "ansi"
    }

    fn identifier_quote(&self) -> char {
        '"'
    }

    fn insert_default_values(&self, table: &str) -> String {
        format!("INSERT INTO {table} DEFAULT VALUES")
    }

    fn upsert(&self, table: &Table, stmt: &UpsertStatement) -> CompileResult<CompiledQuery> {
        let mut w = SqlWriter::new(self, table);
        push_insert(&mut w, &stmt.values);
        Ok(w.finish())
    }
}

pub fn value(json: serde_json::Value) -> Value {
    Value::from(json)
}

pub fn select(json: serde_json::Value) -> Selection {
    parse_selection(&value(json.clone()))
        .unwrap_or_else(|e| panic!("Failed to parse: {json}\nError: {e:?}"))
}

pub fn select_err(json: serde_json::Value) -> ParseError {
    parse_selection(&value(json.clone()))
        .expect_err(&format!("Expected parse error for: {json}"))
}

/// Parses a selector and renders it in tagged notation.
pub fn tagged(json: serde_json::Value) -> String {
    select(json).to_string()
}

pub fn projection_err(json: serde_json::Value) -> ParseError {
    parse_projection(&value(json.clone()))
        .expect_err(&format!("Expected projection error for: {json}"))
}

pub fn order_by_err(json: serde_json::Value) -> ParseError {
    parse_order_by(&value(json.clone()))
        .expect_err(&format!("Expected order error for: {json}"))
}

/// Asserts that every placeholder in the SQL text has a parameter.
pub fn assert_balanced(query: &CompiledQuery) {
    assert_eq!(
        query.sql.matches('?').count(),
        query.params.len(),
        "Placeholder count mismatch in: {}",
        query.sql
    );
}
