//! Parsers for INSERT and UPSERT inputs.

use crate::ast::Assignments;
use crate::error::{ParseError, ParseResult};
use crate::sql_value::SqlValue;
use crate::value::Value;

fn check_column(name: &str) -> ParseResult<()> {
    if name.is_empty() || name.starts_with('$') {
        return Err(ParseError::InvalidColumn(String::from(name)));
    }
    Ok(())
}

/// Parses an object of `column: value` assignments, keeping key order.
///
/// # Errors
///
/// Returns a [`ParseError`] for non-object input, `$`-prefixed or empty
/// column names, and values that are arrays or objects.
pub fn parse_values(value: &Value) -> ParseResult<Assignments> {
    let Value::Object(doc) = value else {
        return Err(ParseError::InvalidArgument {
            expected: "object",
            received: value.kind(),
        });
    };
    doc.iter()
        .map(|(column, v)| {
            check_column(column)?;
            let param = SqlValue::from_value(v).ok_or_else(|| ParseError::InvalidValue {
                column: String::from(column),
                received: v.kind(),
            })?;
            Ok((String::from(column), param))
        })
        .collect()
}

/// Parses a column list: null, one column name, or an array of names.
///
/// # Errors
///
/// Returns a [`ParseError`] for any other shape or an invalid name.
pub fn parse_columns(value: &Value) -> ParseResult<Option<Vec<String>>> {
    let names = match value {
        Value::Null => return Ok(None),
        Value::Text(name) => vec![name.as_str()],
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().ok_or(ParseError::InvalidArgument {
                    expected: "array of strings",
                    received: item.kind(),
                })
            })
            .collect::<ParseResult<Vec<_>>>()?,
        other => {
            return Err(ParseError::InvalidArgument {
                expected: "string, array of strings or null",
                received: other.kind(),
            })
        }
    };
    names
        .into_iter()
        .map(|name| check_column(name).map(|()| String::from(name)))
        .collect::<ParseResult<Vec<_>>>()
        .map(Some)
}
