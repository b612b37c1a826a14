//! Selector parsing.
//!
//! A selector is normalized into a document and then dispatched on its key
//! set. Each recursive step either strips one wrapping key or bottoms out
//! in an operator, a combinator or the empty document, so parsing always
//! terminates.

use std::borrow::Cow;

use tracing::trace;

use crate::ast::{Key, Node, Operator, Selection, ID_KEY};
use crate::error::{ParseError, ParseResult};
use crate::value::{Document, Value};

use super::key::key_from_name;
use super::operator::parse_operator;

const AND: &str = "$and";
const OR: &str = "$or";

/// Parses a selector expression.
///
/// - null matches every row;
/// - a scalar matches the primary key: `{$id: {$eq: scalar}}`;
/// - an array is a primary-key set: `{$id: {$in: array}}`;
/// - an object with several keys is the conjunction of its entries, in key order.
///
/// # Errors
///
/// Returns a [`ParseError`] for malformed expressions.
pub fn parse_selection(expression: &Value) -> ParseResult<Selection> {
    let selection = Selection(parse_expression(expression, None)?);
    trace!(%selection, "parsed selection");
    Ok(selection)
}

/// Parses `$and` operands: a non-empty array of selectors.
///
/// Returns `None` when every operand matches all rows.
///
/// # Errors
///
/// Returns a [`ParseError`] when the input is not a non-empty array or an
/// operand is malformed.
pub fn parse_and(expressions: &Value) -> ParseResult<Option<Node>> {
    parse_logical(AND, expressions, None)
}

/// Parses `$or` operands: a non-empty array of selectors.
///
/// Returns `None` when every operand matches all rows.
///
/// # Errors
///
/// Returns a [`ParseError`] when the input is not a non-empty array or an
/// operand is malformed.
pub fn parse_or(expressions: &Value) -> ParseResult<Option<Node>> {
    parse_logical(OR, expressions, None)
}

fn normalize(expression: &Value) -> ParseResult<Cow<'_, Document>> {
    let wrap = |op: Operator| {
        let inner = Document::new().with(op.name(), expression.clone());
        Cow::Owned(Document::new().with(ID_KEY, inner))
    };
    match expression {
        Value::Null => Ok(Cow::Owned(Document::new())),
        Value::Object(doc) => Ok(Cow::Borrowed(doc)),
        Value::Array(_) => Ok(wrap(Operator::In)),
        scalar if scalar.is_scalar() => Ok(wrap(Operator::Eq)),
        other => Err(ParseError::InvalidArgument {
            expected: "object, array, number, string, boolean, date, buffer or null",
            received: other.kind(),
        }),
    }
}

fn parse_expression(expression: &Value, field: Option<&Key>) -> ParseResult<Option<Node>> {
    let doc = normalize(expression)?;
    if let Some((name, value)) = doc.single() {
        return parse_entry(name, value, field);
    }
    let children = doc
        .iter()
        .map(|(name, value)| parse_entry(name, value, field))
        .collect::<ParseResult<Vec<_>>>()?;
    Ok(combine(AND, children))
}

fn parse_entry(name: &str, value: &Value, field: Option<&Key>) -> ParseResult<Option<Node>> {
    if let Some(op) = Operator::from_name(name) {
        let key = field.cloned().ok_or(ParseError::MissingField {
            operator: op.name(),
        })?;
        return parse_operator(op, key, value).map(|cmp| Some(Node::Comparison(cmp)));
    }
    match name {
        AND => parse_logical(AND, value, field),
        OR => parse_logical(OR, value, field),
        _ if name.starts_with('$') && name != ID_KEY => {
            Err(ParseError::UnknownOperator(String::from(name)))
        }
        _ => {
            let key = key_from_name(name);
            match value {
                Value::Object(_) => parse_expression(value, Some(&key)),
                _ => {
                    parse_operator(Operator::Eq, key, value).map(|cmp| Some(Node::Comparison(cmp)))
                }
            }
        }
    }
}

fn parse_logical(
    combinator: &'static str,
    expressions: &Value,
    field: Option<&Key>,
) -> ParseResult<Option<Node>> {
    let Value::Array(items) = expressions else {
        return Err(ParseError::InvalidOperand {
            operator: combinator,
            expected: "non-empty array",
            received: expressions.kind(),
        });
    };
    if items.is_empty() {
        return Err(ParseError::EmptyArray {
            operator: combinator,
        });
    }
    let children = items
        .iter()
        .map(|item| parse_expression(item, field))
        .collect::<ParseResult<Vec<_>>>()?;
    Ok(combine(combinator, children))
}

/// Builds a logical node from parsed children.
///
/// A match-all child is neutral in a conjunction and absorbing in a
/// disjunction.
fn combine(combinator: &str, children: Vec<Option<Node>>) -> Option<Node> {
    if combinator == OR {
        let children = children.into_iter().collect::<Option<Vec<Node>>>()?;
        return Some(Node::Or(children));
    }
    let children: Vec<Node> = children.into_iter().flatten().collect();
    if children.is_empty() {
        return None;
    }
    Some(Node::And(children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(input: serde_json::Value) -> String {
        parse_selection(&Value::from(input)).unwrap().to_string()
    }

    #[test]
    fn test_null_and_empty_match_all() {
        assert_eq!(parse(json!(null)), r#"["SELECTION", null]"#);
        assert_eq!(parse(json!({})), r#"["SELECTION", null]"#);
    }

    #[test]
    fn test_scalar_matches_primary_key() {
        assert_eq!(parse(json!(7)), r#"["SELECTION", ["EQ", ["ID"], ["VALUE", 7]]]"#);
    }

    #[test]
    fn test_array_is_primary_key_set() {
        assert_eq!(
            parse(json!([1, 2])),
            r#"["SELECTION", ["IN", ["ID"], ["VALUES", 1, 2]]]"#
        );
    }

    #[test]
    fn test_implicit_conjunction() {
        assert_eq!(
            parse(json!({"a": 1, "b": 2})),
            r#"["SELECTION", ["AND", ["EQ", ["KEY", "a"], ["VALUE", 1]], ["EQ", ["KEY", "b"], ["VALUE", 2]]]]"#
        );
    }

    #[test]
    fn test_field_narrowing() {
        assert_eq!(
            parse(json!({"a": {"$gt": 1}})),
            r#"["SELECTION", ["GT", ["KEY", "a"], ["VALUE", 1]]]"#
        );
    }

    #[test]
    fn test_range_on_one_field() {
        assert_eq!(
            parse(json!({"price": {"$gte": 10, "$lt": 20}})),
            r#"["SELECTION", ["AND", ["GTE", ["KEY", "price"], ["VALUE", 10]], ["LT", ["KEY", "price"], ["VALUE", 20]]]]"#
        );
    }

    #[test]
    fn test_combinator_under_field() {
        assert_eq!(
            parse(json!({"age": {"$or": [{"$lt": 18}, {"$gt": 65}]}})),
            r#"["SELECTION", ["OR", ["LT", ["KEY", "age"], ["VALUE", 18]], ["GT", ["KEY", "age"], ["VALUE", 65]]]]"#
        );
    }

    #[test]
    fn test_nested_logical() {
        assert_eq!(
            parse(json!({"$or": [{"a": 1}, {"$and": [{"b": null}, {"c": {"$ne": 3}}]}]})),
            r#"["SELECTION", ["OR", ["EQ", ["KEY", "a"], ["VALUE", 1]], ["AND", ["EQ", ["KEY", "b"], ["VALUE", null]], ["NE", ["KEY", "c"], ["VALUE", 3]]]]]"#
        );
    }

    #[test]
    fn test_match_all_children_are_dropped_from_and() {
        assert_eq!(
            parse(json!({"$and": [{}, {"a": 1}]})),
            r#"["SELECTION", ["AND", ["EQ", ["KEY", "a"], ["VALUE", 1]]]]"#
        );
        assert_eq!(parse(json!({"$and": [{}, null]})), r#"["SELECTION", null]"#);
    }

    #[test]
    fn test_match_all_child_absorbs_or() {
        assert_eq!(parse(json!({"$or": [{}, {"a": 1}]})), r#"["SELECTION", null]"#);
        assert_eq!(parse(json!({"$or": [{"a": 1}, null]})), r#"["SELECTION", null]"#);
        assert_eq!(
            parse(json!({"b": 2, "$or": [{"a": 1}, {}]})),
            r#"["SELECTION", ["AND", ["EQ", ["KEY", "b"], ["VALUE", 2]]]]"#
        );
    }

    #[test]
    fn test_id_key() {
        assert_eq!(
            parse(json!({"$id": {"$in": [3, 4]}})),
            r#"["SELECTION", ["IN", ["ID"], ["VALUES", 3, 4]]]"#
        );
    }

    #[test]
    fn test_operator_without_field() {
        let err = parse_selection(&Value::from(json!({"$gt": 1}))).unwrap_err();
        assert_eq!(err, ParseError::MissingField { operator: "$gt" });
    }

    #[test]
    fn test_unknown_operator() {
        let err = parse_selection(&Value::from(json!({"a": {"$regex": "x"}}))).unwrap_err();
        assert_eq!(err, ParseError::UnknownOperator(String::from("$regex")));
    }

    #[test]
    fn test_logical_operands_must_be_non_empty_arrays() {
        assert_eq!(
            parse_and(&Value::from(json!([]))).unwrap_err(),
            ParseError::EmptyArray { operator: "$and" }
        );
        assert!(parse_or(&Value::from(json!({"a": 1}))).is_err());
        assert!(parse_selection(&Value::from(json!({"$or": 1}))).is_err());
    }

    #[test]
    fn test_parse_or_keeps_child_order() {
        let node = parse_or(&Value::from(json!([{"b": 1}, {"a": 2}]))).unwrap().unwrap();
        assert_eq!(
            node.to_string(),
            r#"["OR", ["EQ", ["KEY", "b"], ["VALUE", 1]], ["EQ", ["KEY", "a"], ["VALUE", 2]]]"#
        );
    }

    #[test]
    fn test_array_leaf_is_rejected() {
        let err = parse_selection(&Value::from(json!({"a": [1, 2]}))).unwrap_err();
        assert!(matches!(err, ParseError::InvalidOperand { operator: "$eq", .. }));
    }
}
