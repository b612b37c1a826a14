//! SQL dialect support.
//!
//! Dialects differ in identifier quoting, paging syntax and, most of all,
//! in how an insert-or-update is expressed. Each dialect crate implements
//! [`Dialect`]; the shared compiler in [`crate::compiler`] calls back into it
//! wherever the generated SQL diverges.

use crate::ast::{DeleteStatement, Limit, Offset, UpsertStatement};
use crate::compiler::{CompiledQuery, SqlWriter};
use crate::error::CompileResult;
use crate::schema::Table;

/// Dialect-specific SQL generation.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character.
    fn identifier_quote(&self) -> char;

    /// Wraps an identifier in the dialect's quote character.
    ///
    /// The identifier's content is not escaped; identifiers come from
    /// schema and field names, never from bound values.
    fn quote_identifier(&self, name: &str) -> String {
        let quote = self.identifier_quote();
        format!("{quote}{name}{quote}")
    }

    /// Returns the paging clause for a limit and offset, if any.
    fn limit_offset(&self, limit: Limit, offset: Offset) -> Option<String> {
        match (limit.0, offset.0) {
            (None, None) => None,
            (Some(limit), None) => Some(format!("LIMIT {limit}")),
            (None, Some(offset)) => Some(format!("OFFSET {offset}")),
            (Some(limit), Some(offset)) => Some(format!("LIMIT {limit} OFFSET {offset}")),
        }
    }

    /// Returns an INSERT of a row made only of column defaults, without the
    /// trailing semicolon. `table` is already quoted.
    fn insert_default_values(&self, table: &str) -> String;

    /// Compiles a DELETE statement.
    ///
    /// The default emits `DELETE FROM t WHERE ... ORDER BY ... LIMIT n`.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::CompileError`] when a key cannot be resolved.
    fn delete(&self, table: &Table, stmt: &DeleteStatement) -> CompileResult<CompiledQuery> {
        let mut w = SqlWriter::new(self, table);
        w.push("DELETE FROM ");
        w.push_table();
        w.push_where(&stmt.selection)?;
        w.push_order_by(&stmt.order_by)?;
        w.push_limit_offset(stmt.limit, Offset(None));
        Ok(w.finish())
    }

    /// Compiles an insert-or-update statement.
    ///
    /// Called with at least one value.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::CompileError`] when the statement lacks what the
    /// dialect needs to express it.
    fn upsert(&self, table: &Table, stmt: &UpsertStatement) -> CompileResult<CompiledQuery>;
}
