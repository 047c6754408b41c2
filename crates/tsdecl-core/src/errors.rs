//! Cross-cutting error types for tsdecl.
//!
//! Walking never fails; errors only arise at the edges where kind tables and
//! raw ASTs are decoded. Domain-specific errors (`ConfigError`, `ParserError`)
//! live in their respective crates and converge into `anyhow` in `tsdecl-cli`.

use thiserror::Error;

/// Errors that can be raised while loading core inputs.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The kind table document did not have a usable shape.
    #[error("Invalid kind table: {0}")]
    InvalidKindTable(String),

    /// JSON decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading an input file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
