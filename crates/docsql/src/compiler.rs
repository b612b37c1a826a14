//! The configured compiler.

use std::collections::HashMap;

use docsql_core::{
    compile_count, compile_delete, compile_insert, compile_select, compile_upsert, CompileResult,
    CompiledQuery, Dialect, Table,
};
use docsql_mysql::MysqlDialect;
use docsql_postgres::PostgresDialect;
use tracing::{debug, trace};

use crate::config::{CompilerConfig, DialectKind};
use crate::error::Result;
use crate::options::{CountOptions, DeleteOptions, InsertOptions, SelectOptions, UpsertOptions};

/// Compiles raw statement options for one dialect.
///
/// # Example
///
/// ```rust
/// use docsql::{Compiler, DialectKind, SelectOptions};
/// use docsql_core::{SqlValue, Value};
/// use serde_json::json;
///
/// let compiler = Compiler::for_dialect(DialectKind::Mysql);
/// let query = compiler
///     .select(
///         "t",
///         &SelectOptions {
///             selector: Value::from(json!({"a": {"$gt": 1}})),
///             ..Default::default()
///         },
///     )
///     .unwrap();
/// assert_eq!(query.sql, "SELECT * FROM `t` WHERE `a` > ?;");
/// assert_eq!(query.params, vec![SqlValue::Int(1)]);
/// ```
#[derive(Debug, Clone)]
pub struct Compiler {
    dialect: DialectKind,
    tables: HashMap<String, Table>,
}

impl Compiler {
    /// Creates a compiler from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] when the configuration is invalid.
    pub fn new(config: &CompilerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            dialect: config.dialect,
            tables: config.table_map(),
        })
    }

    /// Creates a compiler without table metadata.
    #[must_use]
    pub fn for_dialect(dialect: DialectKind) -> Self {
        Self {
            dialect,
            tables: HashMap::new(),
        }
    }

    /// Returns the target dialect.
    #[must_use]
    pub const fn dialect(&self) -> DialectKind {
        self.dialect
    }

    /// Returns the metadata for `name`, or the defaults for an unknown table.
    #[must_use]
    pub fn table(&self, name: &str) -> Table {
        self.tables
            .get(name)
            .cloned()
            .unwrap_or_else(|| Table::new(name))
    }

    /// Compiles a SELECT.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Parse`] for malformed options and
    /// [`crate::Error::Compile`] when the statement cannot be compiled.
    pub fn select(&self, table: &str, options: &SelectOptions) -> Result<CompiledQuery> {
        let stmt = options.parse()?;
        self.run("select", table, |d, t| compile_select(d, t, &stmt))
    }

    /// Compiles a row count.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Parse`] for malformed options and
    /// [`crate::Error::Compile`] when the statement cannot be compiled.
    pub fn count(&self, table: &str, options: &CountOptions) -> Result<CompiledQuery> {
        let stmt = options.parse()?;
        self.run("count", table, |d, t| compile_count(d, t, &stmt))
    }

    /// Compiles a DELETE.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Parse`] for malformed options and
    /// [`crate::Error::Compile`] when the statement cannot be compiled.
    pub fn delete(&self, table: &str, options: &DeleteOptions) -> Result<CompiledQuery> {
        let stmt = options.parse()?;
        self.run("delete", table, |d, t| compile_delete(d, t, &stmt))
    }

    /// Compiles an INSERT.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Parse`] for malformed options.
    pub fn insert(&self, table: &str, options: &InsertOptions) -> Result<CompiledQuery> {
        let stmt = options.parse()?;
        self.run("insert", table, |d, t| compile_insert(d, t, &stmt))
    }

    /// Compiles an insert-or-update.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Parse`] for malformed options and
    /// [`crate::Error::Compile`] when the values are empty, an update
    /// column is not inserted, or the dialect lacks a required selector.
    pub fn upsert(&self, table: &str, options: &UpsertOptions) -> Result<CompiledQuery> {
        let stmt = options.parse()?;
        self.run("upsert", table, |d, t| compile_upsert(d, t, &stmt))
    }

    fn run<F>(&self, statement: &'static str, table: &str, compile: F) -> Result<CompiledQuery>
    where
        F: FnOnce(&dyn Dialect, &Table) -> CompileResult<CompiledQuery>,
    {
        let table = self.table(table);
        let query = match self.dialect {
            DialectKind::Mysql => compile(&MysqlDialect::new(), &table),
            DialectKind::Postgres => compile(&PostgresDialect::new(), &table),
        }?;
        debug!(
            dialect = %self.dialect,
            statement,
            table = table.name(),
            params = query.params.len(),
            "Compiled statement"
        );
        trace!(sql = %query.sql, "Compiled SQL");
        Ok(query)
    }
}
