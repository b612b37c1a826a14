//! MySQL dialect implementation.

use docsql_core::ast::{Limit, Offset, UpsertStatement};
use docsql_core::compiler::{push_insert, update_assignments};
use docsql_core::{CompileResult, CompiledQuery, Dialect, SqlWriter, Table};

/// Row count used as LIMIT when only an offset is given.
const MAX_ROWS: u64 = u64::MAX;

/// MySQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlDialect;

impl MysqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quote(&self) -> char {
        '`'
    }

    fn limit_offset(&self, limit: Limit, offset: Offset) -> Option<String> {
        match (limit.0, offset.0) {
            (None, None) => None,
            (Some(limit), None) => Some(format!("LIMIT {limit}")),
            (limit, Some(offset)) => Some(format!(
                "LIMIT {} OFFSET {offset}",
                limit.unwrap_or(MAX_ROWS)
            )),
        }
    }

    fn insert_default_values(&self, table: &str) -> String {
        format!("INSERT INTO {table} () VALUES ()")
    }

    fn upsert(&self, table: &Table, stmt: &UpsertStatement) -> CompileResult<CompiledQuery> {
        let updates = update_assignments(table, stmt)?;
        let mut w = SqlWriter::new(self, table);
        push_insert(&mut w, &stmt.values);
        w.push(" ON DUPLICATE KEY UPDATE ");
        for (i, (column, _)) in updates.into_iter().enumerate() {
            if i > 0 {
                w.push(", ");
            }
            w.push_identifier(column);
            w.push(" = VALUES(");
            w.push_identifier(column);
            w.push(")");
        }
        Ok(w.finish())
    }
}
