//! # docsql
//!
//! Compiles MongoDB-style query documents into parameterized SQL for MySQL
//! and PostgreSQL.
//!
//! This crate ties the pieces together:
//! - [`CompilerConfig`] names the dialect and the tables' metadata, and can
//!   be loaded from JSON
//! - [`Compiler`] parses raw statement options and compiles them
//! - [`docsql_core`] holds the parser, the AST and the shared compiler
//!
//! Executing the compiled SQL is left to the caller: hand
//! [`CompiledQuery::sql`] and [`CompiledQuery::params`] to any driver that
//! accepts `?` placeholders.
//!
//! ## Example
//!
//! ```rust
//! use docsql::{Compiler, CompilerConfig, UpsertOptions};
//! use docsql_core::Value;
//! use serde_json::json;
//!
//! let config = CompilerConfig::from_json(r#"{"dialect": "mysql"}"#).unwrap();
//! let compiler = Compiler::new(&config).unwrap();
//! let query = compiler
//!     .upsert(
//!         "t",
//!         &UpsertOptions {
//!             values: Value::from(json!({"id": 1, "name": "x"})),
//!             ..Default::default()
//!         },
//!     )
//!     .unwrap();
//! assert!(query
//!     .sql
//!     .ends_with("ON DUPLICATE KEY UPDATE `id` = VALUES(`id`), `name` = VALUES(`name`);"));
//! ```

pub mod compiler;
pub mod config;
pub mod error;
pub mod options;

pub use compiler::Compiler;
pub use config::{CompilerConfig, DialectKind, TableConfig};
pub use docsql_core::{CompiledQuery, SqlValue, Value};
pub use error::{Error, Result};
pub use options::{CountOptions, DeleteOptions, InsertOptions, SelectOptions, UpsertOptions};
