//! Tests for projection, ordering and paging parsers.

mod common;
use common::*;

use docsql_core::ast::{
    Direction, Key, Limit, Offset, OrderBy, Ordering, Projection, ProjectionKind,
};
use docsql_core::parser::{
    parse_columns, parse_limit, parse_offset, parse_order_by, parse_projection, parse_values,
};
use docsql_core::{ParseError, SqlValue};
use serde_json::json;

#[test]
fn projection_include() {
    let projection = parse_projection(&value(json!({"$id": 1, "name": 1}))).unwrap();
    assert_eq!(
        projection,
        Projection(Some(ProjectionKind::Include(vec![Key::Id, Key::column("name")])))
    );
}

#[test]
fn projection_mixed_prefers_include() {
    let projection = parse_projection(&value(json!({"a": 1, "b": 0}))).unwrap();
    assert_eq!(
        projection,
        Projection(Some(ProjectionKind::Include(vec![Key::column("a")])))
    );
}

#[test]
fn projection_rejects_other_flags() {
    assert!(matches!(
        projection_err(json!({"a": 2})),
        ParseError::InvalidProjection { key, .. } if key == "a"
    ));
}

#[test]
fn order_by_forms() {
    let expected = OrderBy(Some(vec![
        Ordering {
            key: Key::column("a"),
            direction: Direction::Asc,
        },
        Ordering {
            key: Key::column("b"),
            direction: Direction::Desc,
        },
    ]));
    assert_eq!(parse_order_by(&value(json!(["a", {"b": -1}]))).unwrap(), expected);
    assert_eq!(parse_order_by(&value(json!([]))).unwrap(), OrderBy(None));
}

#[test]
fn order_by_error_names_position() {
    assert!(matches!(
        order_by_err(json!(["a", {"b": 2}])),
        ParseError::InvalidOrderBy { index: 1, .. }
    ));
}

#[test]
fn order_by_bad_column_names_position() {
    assert!(matches!(
        order_by_err(json!(["a", "$gt"])),
        ParseError::InvalidOrderBy { index: 1, reason } if reason.contains("$gt")
    ));
    assert!(matches!(
        order_by_err(json!([{"": 1}])),
        ParseError::InvalidOrderBy { index: 0, .. }
    ));
}

#[test]
fn paging() {
    assert_eq!(parse_limit(&value(json!(10))).unwrap(), Limit(Some(10)));
    assert_eq!(parse_limit(&value(json!(null))).unwrap(), Limit(None));
    assert!(parse_limit(&value(json!(0))).is_err());
    assert!(parse_limit(&value(json!(1.5))).is_err());
    assert_eq!(parse_offset(&value(json!(0))).unwrap(), Offset(Some(0)));
    assert!(parse_offset(&value(json!(-1))).is_err());
}

#[test]
fn values_keep_document_order() {
    let values = parse_values(&value(json!({"b": 1, "a": "x", "c": null}))).unwrap();
    assert_eq!(
        values,
        vec![
            (String::from("b"), SqlValue::Int(1)),
            (String::from("a"), SqlValue::from("x")),
            (String::from("c"), SqlValue::Null),
        ]
    );
}

#[test]
fn update_columns() {
    assert_eq!(parse_columns(&value(json!(null))).unwrap(), None);
    assert_eq!(
        parse_columns(&value(json!(["name"]))).unwrap(),
        Some(vec![String::from("name")])
    );
}
