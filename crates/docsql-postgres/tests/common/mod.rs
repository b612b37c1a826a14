#![allow(dead_code)]

use docsql_core::parser::{parse_selection, parse_values};
use docsql_core::{Assignments, Selection, Value};

pub fn select(json: serde_json::Value) -> Selection {
    parse_selection(&Value::from(json.clone()))
        .unwrap_or_else(|e| panic!("Failed to parse: {json}\nError: {e:?}"))
}

pub fn values(json: serde_json::Value) -> Assignments {
    parse_values(&Value::from(json.clone()))
        .unwrap_or_else(|e| panic!("Failed to parse values: {json}\nError: {e:?}"))
}
