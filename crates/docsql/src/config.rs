//! Compiler configuration.
//!
//! A configuration names the target dialect and, optionally, the metadata
//! of the tables queries will run against:
//!
//! ```json
//! {
//!   "dialect": "postgres",
//!   "tables": [
//!     { "name": "users", "primary_key": ["id"], "columns": ["id", "name"] }
//!   ]
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use docsql_core::Table;
use serde::Deserialize;

use crate::error::{Error, Result};

/// The SQL dialect to compile for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// MySQL and MariaDB.
    Mysql,
    /// PostgreSQL.
    #[serde(alias = "postgresql")]
    Postgres,
}

impl DialectKind {
    /// Returns the dialect name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mysql => "mysql",
            Self::Postgres => "postgres",
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for one table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableConfig {
    /// Table name.
    pub name: String,
    /// Primary-key columns.
    #[serde(default = "default_primary_key")]
    pub primary_key: Vec<String>,
    /// All columns, when known.
    #[serde(default)]
    pub columns: Option<Vec<String>>,
}

fn default_primary_key() -> Vec<String> {
    vec![String::from("id")]
}

impl TableConfig {
    fn to_table(&self) -> Table {
        let table = Table::new(self.name.as_str()).primary_key(self.primary_key.as_slice());
        match &self.columns {
            Some(columns) => table.columns(columns.as_slice()),
            None => table,
        }
    }
}

/// Compiler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompilerConfig {
    /// The target dialect.
    pub dialect: DialectKind,
    /// Known tables.
    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

impl CompilerConfig {
    /// Creates a configuration for `dialect` with no table metadata.
    #[must_use]
    pub const fn new(dialect: DialectKind) -> Self {
        Self {
            dialect,
            tables: Vec::new(),
        }
    }

    /// Adds table metadata.
    #[must_use]
    pub fn with_table(mut self, table: TableConfig) -> Self {
        self.tables.push(table);
        self
    }

    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed JSON and [`Error::Config`] when
    /// the configuration is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read, otherwise as
    /// [`CompilerConfig::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Checks table metadata for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an empty or duplicated table name, or a
    /// primary-key column missing from a declared column list.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for table in &self.tables {
            if table.name.is_empty() {
                return Err(Error::Config(String::from("table name cannot be empty")));
            }
            if !seen.insert(table.name.as_str()) {
                return Err(Error::Config(format!("duplicate table '{}'", table.name)));
            }
            if let Some(columns) = &table.columns {
                if let Some(key) = table.primary_key.iter().find(|k| !columns.contains(k)) {
                    return Err(Error::Config(format!(
                        "primary key column '{key}' is not a column of '{}'",
                        table.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Builds the table metadata map.
    pub(crate) fn table_map(&self) -> HashMap<String, Table> {
        self.tables
            .iter()
            .map(|t| (t.name.clone(), t.to_table()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config() {
        let config = CompilerConfig::from_json(r#"{"dialect": "mysql"}"#).unwrap();
        assert_eq!(config, CompilerConfig::new(DialectKind::Mysql));
    }

    #[test]
    fn test_table_defaults() {
        let config = CompilerConfig::from_json(
            r#"{"dialect": "postgresql", "tables": [{"name": "users"}]}"#,
        )
        .unwrap();
        assert_eq!(config.dialect, DialectKind::Postgres);
        assert_eq!(config.tables[0].primary_key, vec![String::from("id")]);
        assert_eq!(config.tables[0].columns, None);
    }

    #[test]
    fn test_duplicate_table() {
        let err = CompilerConfig::from_json(
            r#"{"dialect": "mysql", "tables": [{"name": "a"}, {"name": "a"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_primary_key_outside_columns() {
        let err = CompilerConfig::from_json(
            r#"{"dialect": "mysql", "tables": [{"name": "a", "columns": ["name"]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_unknown_dialect() {
        let err = CompilerConfig::from_json(r#"{"dialect": "oracle"}"#).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
