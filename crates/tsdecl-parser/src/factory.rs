//! Construction of declaration tree nodes.

use tsdecl_core::{ContextNode, DeclKind, KindTable, LeafNode, RawNode};

/// Syntax name recorded for raw nodes that carry no usable `kind`.
const UNKNOWN_SYNTAX: &str = "Unknown";

/// Builds context and leaf nodes for the collector. Every constructor is
/// infallible.
#[derive(Debug, Clone, Copy)]
pub struct DeclFactory<'k> {
    kinds: &'k KindTable,
}

impl<'k> DeclFactory<'k> {
    #[must_use]
    pub const fn new(kinds: &'k KindTable) -> Self {
        Self { kinds }
    }

    #[must_use]
    pub fn create_namespace_node<'a>(&self, name: &str) -> ContextNode<'a> {
        ContextNode::namespace(name)
    }

    #[must_use]
    pub fn create_module_node<'a>(&self, name: &str) -> ContextNode<'a> {
        ContextNode::module(name)
    }

    /// A property leaf. Without an explicit `name` the node's own `name` text
    /// is used, if it has one.
    #[must_use]
    pub fn create_property_node<'a>(&self, node: RawNode<'a>, name: Option<&str>) -> LeafNode<'a> {
        let name = name
            .or_else(|| node.field("name").and_then(RawNode::text))
            .map(str::to_string);
        self.leaf(DeclKind::Property, name, node)
    }

    #[must_use]
    pub fn create_variable_node<'a>(&self, node: RawNode<'a>) -> LeafNode<'a> {
        self.leaf(DeclKind::Variable, None, node)
    }

    #[must_use]
    pub fn create_export_node<'a>(&self, node: RawNode<'a>) -> LeafNode<'a> {
        self.leaf(DeclKind::Export, None, node)
    }

    #[must_use]
    pub fn create_import_node<'a>(&self, node: RawNode<'a>) -> LeafNode<'a> {
        self.leaf(DeclKind::Import, None, node)
    }

    fn leaf<'a>(&self, kind: DeclKind, name: Option<String>, node: RawNode<'a>) -> LeafNode<'a> {
        let syntax = node
            .kind()
            .and_then(|raw| self.kinds.kind_name(raw))
            .unwrap_or_else(|| UNKNOWN_SYNTAX.to_string());
        LeafNode::new(kind, name, syntax, node)
    }
}
