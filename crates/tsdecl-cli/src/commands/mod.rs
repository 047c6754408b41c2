pub mod debug;
pub mod dispatch;
pub mod members;
pub mod tree;

use std::path::Path;

use anyhow::Context;
use serde_json::Value;

/// Read `path` as a raw AST: a `.json` dump or a source file for the front-end.
pub fn load_ast(path: &Path) -> anyhow::Result<Value> {
    tsdecl_parser::frontend::load_ast(path)
        .with_context(|| format!("failed to load AST from {}", path.display()))
}
