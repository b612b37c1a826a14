//! Comparison and membership operator parsers.

use crate::ast::{Comparison, Element, Key, Operand, Operator};
use crate::error::{ParseError, ParseResult};
use crate::sql_value::SqlValue;
use crate::value::Value;

const LITERAL_OR_NULL: &str = "number, string, boolean, date, buffer or null";
const LITERAL: &str = "number, string, boolean, date or buffer";
const STRING: &str = "string";
const NON_EMPTY_ARRAY: &str = "non-empty array";
const SET_ELEMENT: &str = "number, string, boolean, date, buffer or operator object";

/// Parses `operand` for `op` applied to `key`.
///
/// # Errors
///
/// Returns a [`ParseError`] naming the operator when the operand has a kind
/// the operator does not accept, or when a set is empty.
pub fn parse_operator(op: Operator, key: Key, operand: &Value) -> ParseResult<Comparison> {
    let operand = match op {
        Operator::In | Operator::Nin => Operand::Values(parse_set(op, operand)?),
        _ => Operand::Value(parse_scalar(op, operand)?),
    };
    Ok(Comparison { op, key, operand })
}

/// Parses an `$eq` comparison. Null compiles to `IS NULL`.
///
/// # Errors
///
/// See [`parse_operator`].
pub fn parse_eq(key: Key, operand: &Value) -> ParseResult<Comparison> {
    parse_operator(Operator::Eq, key, operand)
}

/// Parses a `$ne` comparison. Null compiles to `IS NOT NULL`.
///
/// # Errors
///
/// See [`parse_operator`].
pub fn parse_ne(key: Key, operand: &Value) -> ParseResult<Comparison> {
    parse_operator(Operator::Ne, key, operand)
}

/// Parses a `$gt` comparison.
///
/// # Errors
///
/// See [`parse_operator`].
pub fn parse_gt(key: Key, operand: &Value) -> ParseResult<Comparison> {
    parse_operator(Operator::Gt, key, operand)
}

/// Parses a `$gte` comparison.
///
/// # Errors
///
/// See [`parse_operator`].
pub fn parse_gte(key: Key, operand: &Value) -> ParseResult<Comparison> {
    parse_operator(Operator::Gte, key, operand)
}

/// Parses a `$lt` comparison.
///
/// # Errors
///
/// See [`parse_operator`].
pub fn parse_lt(key: Key, operand: &Value) -> ParseResult<Comparison> {
    parse_operator(Operator::Lt, key, operand)
}

/// Parses a `$lte` comparison.
///
/// # Errors
///
/// See [`parse_operator`].
pub fn parse_lte(key: Key, operand: &Value) -> ParseResult<Comparison> {
    parse_operator(Operator::Lte, key, operand)
}

/// Parses a `$like` pattern match.
///
/// # Errors
///
/// See [`parse_operator`].
pub fn parse_like(key: Key, operand: &Value) -> ParseResult<Comparison> {
    parse_operator(Operator::Like, key, operand)
}

/// Parses a `$nlike` pattern match.
///
/// # Errors
///
/// See [`parse_operator`].
pub fn parse_nlike(key: Key, operand: &Value) -> ParseResult<Comparison> {
    parse_operator(Operator::NLike, key, operand)
}

/// Parses an `$in` set membership test.
///
/// # Errors
///
/// See [`parse_operator`].
pub fn parse_in(key: Key, operand: &Value) -> ParseResult<Comparison> {
    parse_operator(Operator::In, key, operand)
}

/// Parses a `$nin` set exclusion test.
///
/// # Errors
///
/// See [`parse_operator`].
pub fn parse_nin(key: Key, operand: &Value) -> ParseResult<Comparison> {
    parse_operator(Operator::Nin, key, operand)
}

fn parse_scalar(op: Operator, operand: &Value) -> ParseResult<SqlValue> {
    let (accepted, expected) = match op {
        Operator::Eq | Operator::Ne => (operand.is_null() || operand.is_scalar(), LITERAL_OR_NULL),
        Operator::Like | Operator::NLike => (matches!(operand, Value::Text(_)), STRING),
        _ => (operand.is_scalar(), LITERAL),
    };
    let invalid = || ParseError::InvalidOperand {
        operator: op.name(),
        expected,
        received: operand.kind(),
    };
    if !accepted {
        return Err(invalid());
    }
    SqlValue::from_value(operand).ok_or_else(invalid)
}

fn parse_set(op: Operator, operand: &Value) -> ParseResult<Vec<Element>> {
    let Value::Array(items) = operand else {
        return Err(ParseError::InvalidOperand {
            operator: op.name(),
            expected: NON_EMPTY_ARRAY,
            received: operand.kind(),
        });
    };
    if items.is_empty() {
        return Err(ParseError::EmptyArray {
            operator: op.name(),
        });
    }
    items.iter().map(|item| parse_element(op, item)).collect()
}

fn parse_element(op: Operator, item: &Value) -> ParseResult<Element> {
    let invalid = || ParseError::InvalidOperand {
        operator: op.name(),
        expected: SET_ELEMENT,
        received: item.kind(),
    };
    if item.is_scalar() {
        return SqlValue::from_value(item)
            .map(Element::Literal)
            .ok_or_else(invalid);
    }
    let (name, operand) = item
        .as_object()
        .and_then(|doc| doc.single())
        .ok_or_else(invalid)?;
    match Operator::from_name(name) {
        Some(inner) if !inner.is_membership() => Ok(Element::Predicate {
            op: inner,
            value: parse_scalar(inner, operand)?,
        }),
        Some(_) => Err(invalid()),
        None => Err(ParseError::UnknownOperator(String::from(name))),
    }
}
