//! # tsdecl-core
//!
//! Core types shared across all tsdecl crates:
//! - A borrowed view over raw, JSON-shaped AST nodes
//! - The closed `SyntaxKind` enumeration and the runtime `KindTable`
//! - The normalized (debug) node value
//! - The output declaration tree (`ContextNode`, `LeafNode`)
//! - Namespace scope policy and walk defaults
//! - Cross-cutting error types

pub mod decl;
pub mod defaults;
pub mod errors;
pub mod kind;
pub mod normalized;
pub mod raw;
pub mod scope;

pub use decl::{ContextNode, DeclKind, DeclNode, LeafNode};
pub use defaults::{DEFAULT_MAX_DEPTH, DEFAULT_NAMESPACE_FLAGS};
pub use errors::CoreError;
pub use kind::{KindTable, SyntaxKind};
pub use normalized::{NormalizedNode, Scalar};
pub use raw::RawNode;
pub use scope::ScopeMode;
