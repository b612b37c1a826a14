//! Field-name resolution.

use crate::ast::{Key, ID_KEY};
use crate::error::{ParseError, ParseResult};
use crate::value::Value;

/// Parses a field-name token.
///
/// `$id` names the table's primary key; any other string names a column.
///
/// # Errors
///
/// Returns [`ParseError::InvalidArgument`] when the token is not a string.
pub fn parse_key(token: &Value) -> ParseResult<Key> {
    match token {
        Value::Text(name) => Ok(key_from_name(name)),
        other => Err(ParseError::InvalidArgument {
            expected: "string",
            received: other.kind(),
        }),
    }
}

pub(crate) fn key_from_name(name: &str) -> Key {
    if name == ID_KEY {
        Key::Id
    } else {
        Key::column(name)
    }
}

/// Resolves a column name used outside a selector (projection, ordering).
///
/// Only `$id` may carry the `$` prefix there.
pub(crate) fn column_key(name: &str) -> ParseResult<Key> {
    if name.is_empty() || (name.starts_with('$') && name != ID_KEY) {
        return Err(ParseError::InvalidColumn(String::from(name)));
    }
    Ok(key_from_name(name))
}
