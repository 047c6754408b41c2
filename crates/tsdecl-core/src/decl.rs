//! Output declaration tree.
//!
//! A walk produces a root [`ContextNode`] whose children are either nested
//! contexts (modules and namespaces) or [`LeafNode`]s. Children are keyed by
//! name and kept in insertion order; re-adding an existing name replaces the
//! child in place.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::raw::RawNode;

/// The kind of an output declaration node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Module,
    Namespace,
    Property,
    Variable,
    Export,
    Import,
}

impl DeclKind {
    #[must_use]
    pub const fn is_context(self) -> bool {
        matches!(self, Self::Module | Self::Namespace)
    }
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Module => "module",
            Self::Namespace => "namespace",
            Self::Property => "property",
            Self::Variable => "variable",
            Self::Export => "export",
            Self::Import => "import",
        };
        write!(f, "{s}")
    }
}

/// A node of the declaration tree.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclNode<'a> {
    Context(ContextNode<'a>),
    Leaf(LeafNode<'a>),
}

impl<'a> DeclNode<'a> {
    #[must_use]
    pub const fn kind(&self) -> DeclKind {
        match self {
            Self::Context(context) => context.kind,
            Self::Leaf(leaf) => leaf.kind,
        }
    }

    #[must_use]
    pub const fn as_context(&self) -> Option<&ContextNode<'a>> {
        match self {
            Self::Context(context) => Some(context),
            Self::Leaf(_) => None,
        }
    }

    #[must_use]
    pub const fn as_leaf(&self) -> Option<&LeafNode<'a>> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Context(_) => None,
        }
    }
}

impl<'a> From<ContextNode<'a>> for DeclNode<'a> {
    fn from(context: ContextNode<'a>) -> Self {
        Self::Context(context)
    }
}

impl<'a> From<LeafNode<'a>> for DeclNode<'a> {
    fn from(leaf: LeafNode<'a>) -> Self {
        Self::Leaf(leaf)
    }
}

/// A named container of declarations: the root, a module, or a namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextNode<'a> {
    kind: DeclKind,
    name: String,
    children: Vec<(String, DeclNode<'a>)>,
}

impl<'a> ContextNode<'a> {
    #[must_use]
    pub fn module(name: impl Into<String>) -> Self {
        Self {
            kind: DeclKind::Module,
            name: name.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn namespace(name: impl Into<String>) -> Self {
        Self {
            kind: DeclKind::Namespace,
            name: name.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> DeclKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a child under `name`. An existing child with the same name is
    /// replaced and keeps its original position.
    pub fn add_child(&mut self, name: impl Into<String>, node: impl Into<DeclNode<'a>>) {
        let name = name.into();
        let node = node.into();
        if let Some(slot) = self.children.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = node;
        } else {
            self.children.push((name, node));
        }
    }

    #[must_use]
    pub fn child(&self, name: &str) -> Option<&DeclNode<'a>> {
        self.children
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, node)| node)
    }

    /// Children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &DeclNode<'a>)> {
        self.children.iter().map(|(key, node)| (key.as_str(), node))
    }

    /// Child keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|(key, _)| key.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes below this context.
    #[must_use]
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|(_, node)| match node {
                DeclNode::Context(context) => 1 + context.descendant_count(),
                DeclNode::Leaf(_) => 1,
            })
            .sum()
    }
}

/// A declaration that does not contain further declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafNode<'a> {
    kind: DeclKind,
    name: Option<String>,
    syntax: String,
    source: RawNode<'a>,
}

impl<'a> LeafNode<'a> {
    /// `syntax` is the canonical kind name of `source`.
    #[must_use]
    pub fn new(
        kind: DeclKind,
        name: Option<String>,
        syntax: impl Into<String>,
        source: RawNode<'a>,
    ) -> Self {
        Self {
            kind,
            name,
            syntax: syntax.into(),
            source,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> DeclKind {
        self.kind
    }

    /// The name the node was tagged with at construction, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn syntax(&self) -> &str {
        &self.syntax
    }

    /// The raw AST node this declaration was built from.
    #[must_use]
    pub const fn source(&self) -> RawNode<'a> {
        self.source
    }
}

struct Children<'n, 'a>(&'n [(String, DeclNode<'a>)]);

impl Serialize for Children<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, node) in self.0 {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

impl Serialize for ContextNode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("kind", &self.kind)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("children", &Children(&self.children))?;
        map.end()
    }
}

impl Serialize for LeafNode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.name.is_some() { 3 } else { 2 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("kind", &self.kind)?;
        if let Some(name) = &self.name {
            map.serialize_entry("name", name)?;
        }
        map.serialize_entry("syntax", &self.syntax)?;
        map.end()
    }
}

impl Serialize for DeclNode<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Context(context) => context.serialize(serializer),
            Self::Leaf(leaf) => leaf.serialize(serializer),
        }
    }
}
