//! Projection, ORDER BY, LIMIT and OFFSET parsers.
//!
//! These clauses are flat: none of them recurses.

use crate::ast::{Direction, Limit, Offset, OrderBy, Ordering, Projection, ProjectionKind};
use crate::error::{ParseError, ParseResult};
use crate::value::Value;

use super::describe;
use super::key::column_key;

/// Parses a projection object of `column: 1 | 0 | -1`.
///
/// When an object mixes included and excluded columns, the included
/// columns win and the exclusions are ignored.
///
/// # Errors
///
/// Returns a [`ParseError`] for non-object input or a value other than
/// 1, 0 or -1, naming the offending column.
pub fn parse_projection(value: &Value) -> ParseResult<Projection> {
    let doc = match value {
        Value::Null => return Ok(Projection(None)),
        Value::Object(doc) => doc,
        other => {
            return Err(ParseError::InvalidArgument {
                expected: "object or null",
                received: other.kind(),
            })
        }
    };
    let mut include = Vec::new();
    let mut exclude = Vec::new();
    for (name, flag) in doc.iter() {
        let key = column_key(name)?;
        match flag.as_integer() {
            Some(1) => include.push(key),
            Some(0 | -1) => exclude.push(key),
            _ => {
                return Err(ParseError::InvalidProjection {
                    key: String::from(name),
                    received: describe(flag),
                })
            }
        }
    }
    let kind = if !include.is_empty() {
        Some(ProjectionKind::Include(include))
    } else if !exclude.is_empty() {
        Some(ProjectionKind::Exclude(exclude))
    } else {
        None
    };
    Ok(Projection(kind))
}

/// Parses an ORDER BY clause.
///
/// Accepts a column name, a single `{column: 1 | -1}` object, or an array
/// of either. A bare column name sorts ascending.
///
/// # Errors
///
/// Returns a [`ParseError`] naming the position of a malformed element.
pub fn parse_order_by(value: &Value) -> ParseResult<OrderBy> {
    let elements = match value {
        Value::Null => return Ok(OrderBy(None)),
        Value::Array(items) => items.as_slice(),
        Value::Text(_) | Value::Object(_) => std::slice::from_ref(value),
        other => {
            return Err(ParseError::InvalidArgument {
                expected: "string, object, array or null",
                received: other.kind(),
            })
        }
    };
    if elements.is_empty() {
        return Ok(OrderBy(None));
    }
    let terms = elements
        .iter()
        .enumerate()
        .map(|(index, element)| parse_ordering(index, element))
        .collect::<ParseResult<Vec<_>>>()?;
    Ok(OrderBy(Some(terms)))
}

fn parse_ordering(index: usize, element: &Value) -> ParseResult<Ordering> {
    let invalid = |reason: String| ParseError::InvalidOrderBy { index, reason };
    let key = |name: &str| {
        column_key(name).map_err(|_| invalid(format!("invalid column name '{name}'")))
    };
    match element {
        Value::Text(name) => Ok(Ordering {
            key: key(name)?,
            direction: Direction::Asc,
        }),
        Value::Object(doc) => {
            let (name, flag) = doc
                .single()
                .ok_or_else(|| invalid(format!("expected exactly one key, found {}", doc.len())))?;
            let direction = match flag.as_integer() {
                Some(1) => Direction::Asc,
                Some(-1) => Direction::Desc,
                _ => {
                    return Err(invalid(format!(
                        "direction must be 1 or -1, received {}",
                        describe(flag)
                    )))
                }
            };
            Ok(Ordering {
                key: key(name)?,
                direction,
            })
        }
        other => Err(invalid(format!(
            "expected string or object, received {}",
            other.kind()
        ))),
    }
}

/// Parses a row limit: a strictly positive integer.
///
/// # Errors
///
/// Returns [`ParseError::InvalidLimit`] for anything else except null.
pub fn parse_limit(value: &Value) -> ParseResult<Limit> {
    if value.is_null() {
        return Ok(Limit(None));
    }
    value
        .as_integer()
        .and_then(|n| u64::try_from(n).ok())
        .filter(|n| *n >= 1)
        .map(|n| Limit(Some(n)))
        .ok_or_else(|| ParseError::InvalidLimit(describe(value)))
}

/// Parses a row offset: a non-negative integer.
///
/// # Errors
///
/// Returns [`ParseError::InvalidOffset`] for anything else except null.
pub fn parse_offset(value: &Value) -> ParseResult<Offset> {
    if value.is_null() {
        return Ok(Offset(None));
    }
    value
        .as_integer()
        .and_then(|n| u64::try_from(n).ok())
        .map(|n| Offset(Some(n)))
        .ok_or_else(|| ParseError::InvalidOffset(describe(value)))
}
