//! # tsdecl-parser
//!
//! Declaration tree extraction from TypeScript-compiler-shaped ASTs.
//!
//! The walker visits statements of a raw AST (JSON, numeric or symbolic
//! kinds) and builds a tree of modules, namespaces, and declarations keyed
//! by best-effort names. The `frontend` module produces such ASTs directly
//! from TypeScript and JavaScript source through ast-grep.

pub mod collector;
pub mod error;
pub mod factory;
pub mod frontend;
pub mod members;
pub mod namespace;
pub mod normalizer;
pub mod printer;
pub mod resolver;
mod stack;
pub mod walker;

pub use collector::StatementKind;
pub use error::ParserError;
pub use factory::DeclFactory;
pub use members::{find_members, members};
pub use namespace::NamespaceContext;
pub use normalizer::{KindNames, Normalizer, OMITTED_FIELDS};
pub use printer::{SourcePrinter, TypePrinter};
pub use resolver::{NameResolver, ResolvedName, UNRESOLVED_NAME};
pub use walker::{TreeWalker, WalkOptions};

use serde_json::Value;
use tsdecl_core::{ContextNode, KindTable, NormalizedNode, RawNode};

/// Walk `ast` with symbolic kinds and default options.
#[must_use]
pub fn walk_tree(ast: &Value) -> ContextNode<'_> {
    walk_tree_with(ast, &KindTable::new(), WalkOptions::default())
}

/// Walk `ast`, resolving numeric kinds through `kinds`.
#[must_use]
pub fn walk_tree_with<'a>(ast: &'a Value, kinds: &KindTable, options: WalkOptions) -> ContextNode<'a> {
    TreeWalker::new(kinds, &SourcePrinter, options).walk(ast)
}

/// Normalized debug form of `node`.
#[must_use]
pub fn normalize(node: &Value, kinds: &KindTable) -> NormalizedNode {
    Normalizer::new(kinds).normalize(RawNode::new(node))
}

/// Best-effort display name of `node`.
#[must_use]
pub fn resolve_name(node: &Value, kinds: &KindTable) -> ResolvedName {
    NameResolver::new(Normalizer::new(kinds), &SourcePrinter).resolve(RawNode::new(node))
}
