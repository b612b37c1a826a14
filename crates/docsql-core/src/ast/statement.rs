//! Statement AST types.
//!
//! Each statement bundles the parsed clauses one compiled SQL statement
//! needs. Absent clauses hold their `None` form.

use crate::sql_value::SqlValue;

use super::clause::{Limit, Offset, OrderBy, Projection};
use super::expression::Selection;

/// Column assignments in key order.
pub type Assignments = Vec<(String, SqlValue)>;

/// A SELECT statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectStatement {
    /// Selected columns.
    pub projection: Projection,
    /// WHERE clause.
    pub selection: Selection,
    /// ORDER BY clause.
    pub order_by: OrderBy,
    /// LIMIT clause.
    pub limit: Limit,
    /// OFFSET clause.
    pub offset: Offset,
}

/// A row-counting SELECT statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountStatement {
    /// WHERE clause.
    pub selection: Selection,
    /// LIMIT clause.
    pub limit: Limit,
    /// OFFSET clause.
    pub offset: Offset,
}

/// A DELETE statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteStatement {
    /// WHERE clause.
    pub selection: Selection,
    /// ORDER BY clause.
    pub order_by: OrderBy,
    /// LIMIT clause.
    pub limit: Limit,
}

/// An INSERT statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertStatement {
    /// Inserted values.
    pub values: Assignments,
}

/// An insert-or-update statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpsertStatement {
    /// Inserted values.
    pub values: Assignments,
    /// Columns overwritten when the row exists; all inserted columns when `None`.
    pub update_columns: Option<Vec<String>>,
    /// Locates the existing row, for dialects without a native upsert.
    pub update_selection: Option<Selection>,
}

impl UpsertStatement {
    /// Returns the assignments applied when the row already exists.
    ///
    /// Each requested update column is looked up among the inserted values.
    ///
    /// # Errors
    ///
    /// Returns the first requested column that is not among the values.
    pub fn update_assignments(&self) -> Result<Vec<&(String, SqlValue)>, String> {
        match &self.update_columns {
            None => Ok(self.values.iter().collect()),
            Some(columns) => columns
                .iter()
                .map(|column| {
                    self.values
                        .iter()
                        .find(|(name, _)| name == column)
                        .ok_or_else(|| column.clone())
                })
                .collect(),
        }
    }
}
