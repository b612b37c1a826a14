//! Raw statement options.
//!
//! Each options struct holds the unparsed query document parts for one
//! statement kind. Fields left at [`Value::Null`] are omitted from the
//! statement, except `values`, which must be an object.
//!
//! Options deserialize from a single document whose keys are the
//! camel-cased field names; unknown keys are rejected:
//!
//! ```rust
//! use docsql::SelectOptions;
//! use docsql_core::Value;
//! use serde_json::json;
//!
//! let options: SelectOptions = serde_json::from_value(json!({
//!     "selector": {"age": {"$gte": 18}},
//!     "order": {"name": 1},
//!     "limit": 20
//! }))
//! .unwrap();
//! assert_eq!(options.limit, Value::Int(20));
//! ```

use docsql_core::ast::{
    CountStatement, DeleteStatement, InsertStatement, SelectStatement, UpsertStatement,
};
use docsql_core::parser::{
    parse_columns, parse_limit, parse_offset, parse_order_by, parse_projection, parse_selection,
    parse_values,
};
use docsql_core::{ParseResult, Value};
use serde::Deserialize;

/// Options of a SELECT.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct SelectOptions {
    /// Projection object.
    pub columns: Value,
    /// Selector.
    pub selector: Value,
    /// Ordering.
    pub order: Value,
    /// Maximum row count.
    pub limit: Value,
    /// Rows to skip.
    pub offset: Value,
}

/// Options of a row count.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct CountOptions {
    /// Selector.
    pub selector: Value,
    /// Maximum row count.
    pub limit: Value,
    /// Rows to skip.
    pub offset: Value,
}

/// Options of a DELETE.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct DeleteOptions {
    /// Selector.
    pub selector: Value,
    /// Ordering, only meaningful with a limit.
    pub order: Value,
    /// Maximum row count.
    pub limit: Value,
}

/// Options of an INSERT.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct InsertOptions {
    /// Object of column values.
    pub values: Value,
}

/// Options of an insert-or-update.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct UpsertOptions {
    /// Object of column values.
    pub values: Value,
    /// Columns to update on an existing row; all value columns when null.
    pub update_columns: Value,
    /// Selector of the row to update.
    pub update_selector: Value,
}

impl SelectOptions {
    pub(crate) fn parse(&self) -> ParseResult<SelectStatement> {
        Ok(SelectStatement {
            projection: parse_projection(&self.columns)?,
            selection: parse_selection(&self.selector)?,
            order_by: parse_order_by(&self.order)?,
            limit: parse_limit(&self.limit)?,
            offset: parse_offset(&self.offset)?,
        })
    }
}

impl CountOptions {
    pub(crate) fn parse(&self) -> ParseResult<CountStatement> {
        Ok(CountStatement {
            selection: parse_selection(&self.selector)?,
            limit: parse_limit(&self.limit)?,
            offset: parse_offset(&self.offset)?,
        })
    }
}

impl DeleteOptions {
    pub(crate) fn parse(&self) -> ParseResult<DeleteStatement> {
        Ok(DeleteStatement {
            selection: parse_selection(&self.selector)?,
            order_by: parse_order_by(&self.order)?,
            limit: parse_limit(&self.limit)?,
        })
    }
}

impl InsertOptions {
    pub(crate) fn parse(&self) -> ParseResult<InsertStatement> {
        Ok(InsertStatement {
            values: parse_values(&self.values)?,
        })
    }
}

impl UpsertOptions {
    pub(crate) fn parse(&self) -> ParseResult<UpsertStatement> {
        let update_selection = if self.update_selector.is_null() {
            None
        } else {
            Some(parse_selection(&self.update_selector)?)
        };
        Ok(UpsertStatement {
            values: parse_values(&self.values)?,
            update_columns: parse_columns(&self.update_columns)?,
            update_selection,
        })
    }
}
