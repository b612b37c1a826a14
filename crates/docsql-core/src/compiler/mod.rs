//! Statement compilation.
//!
//! Compiles parsed statements into SQL text plus positional parameters.
//! The statement shapes shared by every dialect live here; the dialect is
//! consulted for quoting, paging, DELETE and UPSERT.
//!
//! # Example
//!
//! ```rust
//! use docsql_core::ast::{Limit, SelectStatement};
//! use docsql_core::compiler::compile_select;
//! use docsql_core::parser::parse_selection;
//! use docsql_core::{CompiledQuery, CompileResult, Dialect, Table, UpsertStatement, Value};
//! use serde_json::json;
//!
//! struct Ansi;
//!
//! impl Dialect for Ansi {
//!     fn name(&self) -> &'static str { "ansi" }
//!     fn identifier_quote(&self) -> char { '"' }
//!     fn insert_default_values(&self, table: &str) -> String {
//!         format!("INSERT INTO {table} DEFAULT VALUES")
//!     }
//!     fn upsert(&self, _: &Table, _: &UpsertStatement) -> CompileResult<CompiledQuery> {
//!         unimplemented!()
//!     }
//! }
//!
//! let stmt = SelectStatement {
//!     selection: parse_selection(&Value::from(json!({"a": {"$gt": 1}}))).unwrap(),
//!     limit: Limit(Some(10)),
//!     ..Default::default()
//! };
//! let query = compile_select(&Ansi, &Table::new("t"), &stmt).unwrap();
//! assert_eq!(query.sql, r#"SELECT * FROM "t" WHERE "a" > ? LIMIT 10;"#);
//! ```

mod writer;

pub use writer::SqlWriter;

use crate::ast::{
    CountStatement, DeleteStatement, InsertStatement, Offset, Projection, ProjectionKind,
    SelectStatement, UpsertStatement,
};
use crate::dialect::Dialect;
use crate::error::{CompileError, CompileResult};
use crate::schema::Table;
use crate::sql_value::SqlValue;

/// A compiled statement: SQL text and its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    /// SQL text with `?` placeholders, terminated by `;`.
    pub sql: String,
    /// Values for the placeholders, in order.
    pub params: Vec<SqlValue>,
}

impl CompiledQuery {
    /// Consumes the query and returns the SQL and parameters.
    #[must_use]
    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.params)
    }
}

/// Compiles a SELECT statement.
///
/// # Errors
///
/// Returns a [`CompileError`] when `$id` cannot be resolved or an exclusion
/// projection cannot be expanded.
pub fn compile_select<D: Dialect + ?Sized>(
    dialect: &D,
    table: &Table,
    stmt: &SelectStatement,
) -> CompileResult<CompiledQuery> {
    let mut w = SqlWriter::new(dialect, table);
    w.push("SELECT ");
    match projected_columns(&w, &stmt.projection)? {
        Some(columns) => w.push_identifiers(columns.as_slice()),
        None => w.push("*"),
    }
    w.push(" FROM ");
    w.push_table();
    w.push_where(&stmt.selection)?;
    w.push_order_by(&stmt.order_by)?;
    w.push_limit_offset(stmt.limit, stmt.offset);
    Ok(w.finish())
}

/// Compiles a row count.
///
/// With a limit or offset, the counted rows are bounded in a derived table
/// so that paging applies to the rows rather than to the single count row.
///
/// # Errors
///
/// Returns a [`CompileError`] when `$id` cannot be resolved.
pub fn compile_count<D: Dialect + ?Sized>(
    dialect: &D,
    table: &Table,
    stmt: &CountStatement,
) -> CompileResult<CompiledQuery> {
    let mut w = SqlWriter::new(dialect, table);
    w.push("SELECT COUNT(*) AS ");
    w.push_identifier("count");
    w.push(" FROM ");
    if stmt.limit.0.is_none() && stmt.offset.0.is_none() {
        w.push_table();
        w.push_where(&stmt.selection)?;
    } else {
        w.push("(SELECT 1 FROM ");
        w.push_table();
        w.push_where(&stmt.selection)?;
        w.push_limit_offset(stmt.limit, stmt.offset);
        w.push(") AS ");
        w.push_identifier("bounded");
    }
    Ok(w.finish())
}

/// Compiles a DELETE statement through the dialect.
///
/// # Errors
///
/// Returns a [`CompileError`] when `$id` cannot be resolved.
pub fn compile_delete<D: Dialect + ?Sized>(
    dialect: &D,
    table: &Table,
    stmt: &DeleteStatement,
) -> CompileResult<CompiledQuery> {
    dialect.delete(table, stmt)
}

/// Compiles an INSERT statement.
///
/// Columns follow the order of the values; an empty value list inserts a
/// row of defaults.
///
/// # Errors
///
/// This never fails today; the signature matches the other statements.
pub fn compile_insert<D: Dialect + ?Sized>(
    dialect: &D,
    table: &Table,
    stmt: &InsertStatement,
) -> CompileResult<CompiledQuery> {
    let mut w = SqlWriter::new(dialect, table);
    if stmt.values.is_empty() {
        let quoted = dialect.quote_identifier(table.name());
        w.push(&dialect.insert_default_values(&quoted));
        return Ok(w.finish());
    }
    push_insert(&mut w, &stmt.values);
    Ok(w.finish())
}

/// Appends `INSERT INTO t (cols) VALUES (?, ...)` for non-empty values.
pub fn push_insert<D: Dialect + ?Sized>(w: &mut SqlWriter<'_, D>, values: &[(String, SqlValue)]) {
    w.push("INSERT INTO ");
    w.push_table();
    w.push(" (");
    let columns: Vec<&str> = values.iter().map(|(c, _)| c.as_str()).collect();
    w.push_identifiers(columns.as_slice());
    w.push(") VALUES (");
    w.push_params(values.iter().map(|(_, v)| v.clone()));
    w.push(")");
}

/// Compiles an insert-or-update statement through the dialect.
///
/// # Errors
///
/// Returns [`CompileError::MissingValues`] without values,
/// [`CompileError::MissingUpdateColumns`] for an empty update-column list,
/// [`CompileError::UnknownUpdateColumn`] when an update column is not
/// inserted, and whatever the dialect requires beyond that.
pub fn compile_upsert<D: Dialect + ?Sized>(
    dialect: &D,
    table: &Table,
    stmt: &UpsertStatement,
) -> CompileResult<CompiledQuery> {
    if stmt.values.is_empty() {
        return Err(CompileError::MissingValues {
            table: String::from(table.name()),
        });
    }
    update_assignments(table, stmt)?;
    dialect.upsert(table, stmt)
}

/// Returns the assignments an upsert applies to an existing row.
///
/// # Errors
///
/// Returns [`CompileError::MissingUpdateColumns`] for an empty update-column
/// list and [`CompileError::UnknownUpdateColumn`] for an update column that
/// is not among the inserted values.
pub fn update_assignments<'s>(
    table: &Table,
    stmt: &'s UpsertStatement,
) -> CompileResult<Vec<&'s (String, SqlValue)>> {
    if stmt.update_columns.as_ref().is_some_and(Vec::is_empty) {
        return Err(CompileError::MissingUpdateColumns {
            table: String::from(table.name()),
        });
    }
    stmt.update_assignments()
        .map_err(|column| CompileError::UnknownUpdateColumn {
            column,
            table: String::from(table.name()),
        })
}

fn projected_columns<D: Dialect + ?Sized>(
    w: &SqlWriter<'_, D>,
    projection: &Projection,
) -> CompileResult<Option<Vec<String>>> {
    let table = w.table();
    match &projection.0 {
        None => Ok(None),
        Some(ProjectionKind::Include(keys)) => {
            let mut columns: Vec<String> = Vec::new();
            for key in keys {
                for column in w.key_columns(key)? {
                    if !columns.contains(&column) {
                        columns.push(column);
                    }
                }
            }
            Ok(Some(columns))
        }
        Some(ProjectionKind::Exclude(keys)) => {
            let known = table
                .column_names()
                .ok_or_else(|| CompileError::UnknownColumns {
                    table: String::from(table.name()),
                })?;
            let mut excluded: Vec<String> = Vec::new();
            for key in keys {
                excluded.extend(w.key_columns(key)?);
            }
            let columns: Vec<String> = known
                .iter()
                .filter(|c| !excluded.contains(c))
                .cloned()
                .collect();
            if columns.is_empty() {
                return Err(CompileError::EmptyProjection {
                    table: String::from(table.name()),
                });
            }
            Ok(Some(columns))
        }
    }
}

/// Appends a SELECT of `columns` from the table matching `selection`, for
/// dialects that nest a row lookup inside another statement.
///
/// # Errors
///
/// Returns a [`CompileError`] when `$id` cannot be resolved.
pub fn push_subselect<D: Dialect + ?Sized>(
    w: &mut SqlWriter<'_, D>,
    columns: &str,
    stmt: &DeleteStatement,
) -> CompileResult<()> {
    w.push("SELECT ");
    w.push(columns);
    w.push(" FROM ");
    w.push_table();
    w.push_where(&stmt.selection)?;
    w.push_order_by(&stmt.order_by)?;
    w.push_limit_offset(stmt.limit, Offset(None));
    Ok(())
}
