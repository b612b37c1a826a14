//! # docsql-mysql
//!
//! MySQL dialect for `docsql-core`.
//!
//! # How MySQL differs from other dialects
//!
//! - **Identifier quoting**: MySQL quotes identifiers with backticks
//!   (`` ` ``). See [MySQL identifiers].
//! - **[UPSERT]**: a single `INSERT ... ON DUPLICATE KEY UPDATE` statement.
//!   The conflict target is whatever unique key the row collides with, so
//!   an update selector is never needed.
//! - **Paging**: `OFFSET` is only valid after `LIMIT`; a bare offset is
//!   emitted as `LIMIT 18446744073709551615 OFFSET n`, the largest row
//!   count MySQL accepts. See [SELECT].
//! - **Bounded DELETE**: `DELETE ... ORDER BY ... LIMIT n` is native.
//!
//! [MySQL identifiers]: https://dev.mysql.com/doc/refman/8.0/en/identifiers.html
//! [UPSERT]: https://dev.mysql.com/doc/refman/8.0/en/insert-on-duplicate.html
//! [SELECT]: https://dev.mysql.com/doc/refman/8.0/en/select.html
//!
//! ## Example
//!
//! ```rust
//! use docsql_core::parser::parse_values;
//! use docsql_core::{compile_upsert, Table, UpsertStatement, Value};
//! use docsql_mysql::MysqlDialect;
//! use serde_json::json;
//!
//! let stmt = UpsertStatement {
//!     values: parse_values(&Value::from(json!({"id": 1, "name": "x"}))).unwrap(),
//!     ..Default::default()
//! };
//! let query = compile_upsert(&MysqlDialect::new(), &Table::new("t"), &stmt).unwrap();
//! assert!(query.sql.ends_with(
//!     "ON DUPLICATE KEY UPDATE `id` = VALUES(`id`), `name` = VALUES(`name`);"
//! ));
//! ```

mod dialect;

pub use dialect::MysqlDialect;
