//! End-to-end tests from raw options to SQL.

mod common;
use common::*;

use std::io::Write;

use docsql::{
    CompilerConfig, CountOptions, DeleteOptions, DialectKind, Error, InsertOptions, SelectOptions,
    SqlValue, UpsertOptions,
};
use serde_json::json;

const CONFIG: &str = r#"{
    "dialect": "postgres",
    "tables": [
        {"name": "users", "columns": ["id", "name", "email", "password"]},
        {"name": "memberships", "primary_key": ["user_id", "group_id"]}
    ]
}"#;

#[test]
fn select_hides_excluded_columns() {
    let compiler = compiler(CONFIG);
    let options: SelectOptions = serde_json::from_value(json!({
        "columns": {"password": 0},
        "selector": {"name": {"$like": "a%"}},
        "order": ["name", {"$id": -1}],
        "limit": 10,
        "offset": 20
    }))
    .unwrap();
    let q = compiler.select("users", &options).unwrap();
    assert_eq!(
        q.sql,
        r#"SELECT "id", "name", "email" FROM "users" WHERE "name" LIKE ? ORDER BY "name" ASC, "id" DESC LIMIT 10 OFFSET 20;"#
    );
    assert_eq!(q.params, vec![SqlValue::from("a%")]);
}

#[test]
fn composite_key_ordering_expands() {
    let compiler = compiler(CONFIG);
    let options = SelectOptions {
        order: value(json!("$id")),
        ..Default::default()
    };
    let q = compiler.select("memberships", &options).unwrap();
    assert_eq!(
        q.sql,
        r#"SELECT * FROM "memberships" ORDER BY "user_id" ASC, "group_id" ASC;"#
    );
}

#[test]
fn composite_key_selector_fails() {
    let compiler = compiler(CONFIG);
    let options = DeleteOptions {
        selector: value(json!(1)),
        ..Default::default()
    };
    let err = compiler.delete("memberships", &options).unwrap_err();
    assert!(matches!(err, Error::Compile(_)));
}

#[test]
fn count_and_insert() {
    let compiler = compiler(r#"{"dialect": "mysql"}"#);
    assert_eq!(compiler.dialect(), DialectKind::Mysql);

    let q = compiler
        .count(
            "t",
            &CountOptions {
                selector: value(json!({"a": {"$nin": [1, 2]}})),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(q.sql, "SELECT COUNT(*) AS `count` FROM `t` WHERE `a` NOT IN (?, ?);");

    let q = compiler
        .insert(
            "t",
            &InsertOptions {
                values: value(json!({})),
            },
        )
        .unwrap();
    assert_eq!(q.sql, "INSERT INTO `t` () VALUES ();");
    assert!(q.params.is_empty());
}

#[test]
fn postgres_upsert_needs_selector() {
    let compiler = compiler(CONFIG);
    let options = UpsertOptions {
        values: value(json!({"id": 1, "name": "x"})),
        ..Default::default()
    };
    let err = compiler.upsert("users", &options).unwrap_err();
    assert_eq!(
        err.to_string(),
        "compile error: postgresql upsert on 'users' requires an update selector"
    );
}

#[test]
fn upsert_options_from_json() {
    let compiler = compiler(r#"{"dialect": "mysql"}"#);
    let options: UpsertOptions = serde_json::from_value(json!({
        "values": {"id": 1, "name": "x"},
        "updateColumns": []
    }))
    .unwrap();
    let err = compiler.upsert("t", &options).unwrap_err();
    assert!(matches!(err, Error::Compile(_)));

    let err = serde_json::from_value::<UpsertOptions>(json!({"update_columns": ["name"]}))
        .unwrap_err();
    assert!(err.to_string().contains("unknown field"));
}

#[test]
fn config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();
    let config = CompilerConfig::from_path(file.path()).unwrap();
    assert_eq!(config.dialect, DialectKind::Postgres);
    assert_eq!(config.tables.len(), 2);
}

#[test]
fn missing_config_file() {
    let err = CompilerConfig::from_path("/nonexistent/docsql.json").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
