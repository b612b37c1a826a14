//! # docsql-postgres
//!
//! PostgreSQL dialect for `docsql-core`.
//!
//! # How PostgreSQL differs from other dialects
//!
//! - **Identifier quoting**: PostgreSQL uses double quotes (`"`).
//! - **UPSERT**: compiled as a data-modifying [CTE]: an `UPDATE ... RETURNING *`
//!   keyed by an explicit update selector, then an `INSERT ... SELECT` that
//!   only runs when the update touched nothing, unioned. Unlike MySQL there
//!   is no implicit conflict target, so the update selector is required.
//! - **Bounded DELETE**: `DELETE` accepts neither `ORDER BY` nor `LIMIT`;
//!   a bounded delete selects the physical row ids ([`ctid`]) to remove in
//!   a subquery.
//! - **Default rows**: `INSERT INTO t DEFAULT VALUES`.
//!
//! [CTE]: https://www.postgresql.org/docs/current/queries-with.html#QUERIES-WITH-MODIFYING
//! [`ctid`]: https://www.postgresql.org/docs/current/ddl-system-columns.html
//!
//! ## Example
//!
//! ```rust
//! use docsql_core::parser::{parse_selection, parse_values};
//! use docsql_core::{compile_upsert, Table, UpsertStatement, Value};
//! use docsql_postgres::PostgresDialect;
//! use serde_json::json;
//!
//! let stmt = UpsertStatement {
//!     values: parse_values(&Value::from(json!({"id": 1, "name": "x"}))).unwrap(),
//!     update_columns: Some(vec![String::from("name")]),
//!     update_selection: Some(parse_selection(&Value::from(json!(1))).unwrap()),
//! };
//! let query = compile_upsert(&PostgresDialect::new(), &Table::new("t"), &stmt).unwrap();
//! assert!(query.sql.starts_with(r#"WITH "updated" AS (UPDATE "t" SET "name" = ? WHERE "id" = ?"#));
//! assert_eq!(query.params.len(), 4);
//! ```

mod dialect;

pub use dialect::PostgresDialect;
