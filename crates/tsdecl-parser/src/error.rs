//! Parser error types for tsdecl-parser.

use tsdecl_core::CoreError;

/// Errors that can occur while loading an AST for walking.
///
/// The walk itself never fails; these only arise at the input edge.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("Language not supported: {0}")]
    UnsupportedLanguage(String),

    #[error("Invalid raw AST: {0}")]
    InvalidAst(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
