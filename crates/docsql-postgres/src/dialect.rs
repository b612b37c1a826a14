//! PostgreSQL dialect implementation.

use docsql_core::ast::{DeleteStatement, UpsertStatement};
use docsql_core::compiler::{push_subselect, update_assignments};
use docsql_core::{CompileError, CompileResult, CompiledQuery, Dialect, SqlWriter, Table};

const UPDATED: &str = "updated";
const INSERTED: &str = "inserted";

/// PostgreSQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn identifier_quote(&self) -> char {
        '"'
    }

    fn insert_default_values(&self, table: &str) -> String {
        format!("INSERT INTO {table} DEFAULT VALUES")
    }

    fn delete(&self, table: &Table, stmt: &DeleteStatement) -> CompileResult<CompiledQuery> {
        let mut w = SqlWriter::new(self, table);
        w.push("DELETE FROM ");
        w.push_table();
        if stmt.limit.0.is_none() {
            // ORDER BY alone cannot change which rows are deleted.
            w.push_where(&stmt.selection)?;
            return Ok(w.finish());
        }
        w.push(" WHERE ctid IN (");
        push_subselect(&mut w, "ctid", stmt)?;
        w.push(")");
        Ok(w.finish())
    }

    fn upsert(&self, table: &Table, stmt: &UpsertStatement) -> CompileResult<CompiledQuery> {
        let selection = stmt
            .update_selection
            .as_ref()
            .ok_or_else(|| CompileError::MissingUpdateSelector {
                dialect: self.name(),
                table: String::from(table.name()),
            })?;
        if selection.is_all() {
            return Err(CompileError::MissingWhereTarget {
                statement: "upsert",
                table: String::from(table.name()),
            });
        }
        let updates = update_assignments(table, stmt)?;

        let mut w = SqlWriter::new(self, table);
        w.push("WITH ");
        w.push_identifier(UPDATED);
        w.push(" AS (UPDATE ");
        w.push_table();
        w.push(" SET ");
        for (i, (column, value)) in updates.into_iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            w.push_identifier(column);
            w.push(" = ");
            w.push_param(value.clone());
        }
        w.push_where(selection)?;
        w.push(" RETURNING *), ");

        let columns: Vec<&str> = stmt.values.iter().map(|(c, _)| c.as_str()).collect();
        w.push_identifier(INSERTED);
        w.push(" AS (INSERT INTO ");
        w.push_table();
        w.push(" (");
        w.push_identifiers(columns.as_slice());
        w.push(") SELECT ");
        w.push_params(stmt.values.iter().map(|(_, v)| v.clone()));
        w.push(" WHERE NOT EXISTS (SELECT * FROM ");
        w.push_identifier(UPDATED);
        w.push(") RETURNING *) SELECT * FROM ");
        w.push_identifier(UPDATED);
        w.push(" UNION ALL SELECT * FROM ");
        w.push_identifier(INSERTED);
        Ok(w.finish())
    }
}
