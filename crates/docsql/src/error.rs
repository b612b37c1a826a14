//! Error types for the compiler facade.

use docsql_core::{CompileError, ParseError};
use thiserror::Error;

/// Errors returned by [`crate::Compiler`].
#[derive(Debug, Error)]
pub enum Error {
    /// The query document is malformed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The parsed statement cannot be expressed in the target dialect.
    #[error("compile error: {0}")]
    Compile(#[from] CompileError),

    /// Invalid compiler configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration or an options document is not valid JSON for the
    /// expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for facade operations.
pub type Result<T> = std::result::Result<T, Error>;
