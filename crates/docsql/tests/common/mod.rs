#![allow(dead_code)]

use std::sync::Once;

use docsql::{Compiler, CompilerConfig, Value};

static TRACING: Once = Once::new();

/// Installs a test subscriber so compiler logs show up with `--nocapture`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

pub fn compiler(config: &str) -> Compiler {
    init_tracing();
    let config = CompilerConfig::from_json(config)
        .unwrap_or_else(|e| panic!("Invalid config: {config}\nError: {e}"));
    Compiler::new(&config).unwrap_or_else(|e| panic!("Invalid compiler: {e}"))
}

pub fn value(json: serde_json::Value) -> Value {
    Value::from(json)
}
