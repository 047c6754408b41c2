//! Statement-level dispatch: turns one raw statement into at most one child
//! of the current context.

use tracing::{debug, trace};
use tsdecl_core::{ContextNode, KindTable, RawNode, SyntaxKind};

use crate::walker::TreeWalker;

/// What the collector does with a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    Namespace,
    Module,
    Function,
    Interface,
    TypeAlias,
    Class,
    Variable,
    ExportAssignment,
    Import,
    ImportEquals,
    Enum,
    /// Anything without a declaration counterpart.
    Other(SyntaxKind),
}

impl StatementKind {
    /// Classify `node`. Module declarations are namespaces when their `flags`
    /// equal one of `namespace_flags` exactly.
    #[must_use]
    pub fn classify(node: RawNode<'_>, kinds: &KindTable, namespace_flags: &[i64]) -> Self {
        match kinds.classify(node.kind()) {
            SyntaxKind::ModuleDeclaration => {
                if node.flags().is_some_and(|flags| namespace_flags.contains(&flags)) {
                    Self::Namespace
                } else {
                    Self::Module
                }
            }
            SyntaxKind::FunctionDeclaration => Self::Function,
            SyntaxKind::InterfaceDeclaration => Self::Interface,
            SyntaxKind::TypeAliasDeclaration => Self::TypeAlias,
            SyntaxKind::ClassDeclaration => Self::Class,
            SyntaxKind::VariableStatement => Self::Variable,
            SyntaxKind::ExportAssignment => Self::ExportAssignment,
            SyntaxKind::ImportDeclaration => Self::Import,
            SyntaxKind::ImportEqualsDeclaration => Self::ImportEquals,
            SyntaxKind::EnumDeclaration => Self::Enum,
            other @ (SyntaxKind::SourceFile | SyntaxKind::ModuleBlock | SyntaxKind::Other(_)) => {
                Self::Other(other)
            }
        }
    }
}

impl TreeWalker<'_> {
    /// Add at most one child to `context` for `node`.
    pub fn collect<'a>(&mut self, node: RawNode<'a>, context: &mut ContextNode<'a>, depth: usize) {
        match StatementKind::classify(node, self.kinds, &self.options.namespace_flags) {
            StatementKind::Namespace => self.collect_namespace(node, context, depth),
            StatementKind::Module => self.collect_module(node, context, depth),
            StatementKind::Function | StatementKind::Interface | StatementKind::TypeAlias => {
                let name = self.resolver.resolve(node);
                let leaf = self.factory.create_property_node(node, name.as_str());
                context.add_child(name.into_key(), leaf);
            }
            StatementKind::Class => {
                let name = self.resolver.resolve(node);
                let leaf = self.factory.create_property_node(node, None);
                context.add_child(name.into_key(), leaf);
            }
            StatementKind::Variable => {
                let name = self.resolver.resolve(node);
                context.add_child(name.into_key(), self.factory.create_variable_node(node));
            }
            StatementKind::ExportAssignment => {
                let name = self.resolver.resolve(node);
                context.add_child(name.into_key(), self.factory.create_export_node(node));
            }
            StatementKind::Import => {
                let name = self.resolver.resolve(node);
                context.add_child(name.into_key(), self.factory.create_import_node(node));
            }
            StatementKind::ImportEquals | StatementKind::Enum => {
                trace!(context = context.name(), "import-equals or enum ignored");
            }
            StatementKind::Other(kind) => {
                trace!(%kind, context = context.name(), "statement dropped");
            }
        }
    }

    fn collect_namespace<'a>(&mut self, node: RawNode<'a>, context: &mut ContextNode<'a>, depth: usize) {
        let name = self.resolver.resolve(node);
        debug!(namespace = %name, depth, "entering namespace");

        let mut namespace = self.factory.create_namespace_node(name.key());
        if let Some(entered) = name.as_str() {
            self.namespace.enter(entered);
        } else {
            trace!("namespace without a resolvable name leaves the namespace context as is");
        }
        if let Some(body) = node.field("body") {
            self.traverse(body, &mut namespace, depth + 1);
        }
        if name.is_resolved() {
            self.namespace.exit();
        }

        context.add_child(format!("namespace{}", name.key()), namespace);
    }

    fn collect_module<'a>(&mut self, node: RawNode<'a>, context: &mut ContextNode<'a>, depth: usize) {
        let name = self.resolver.resolve(node);
        debug!(module = %name, depth, "entering module");

        let mut module = self.factory.create_module_node(name.key());
        if let Some(body) = node.field("body") {
            self.traverse(body, &mut module, depth + 1);
        }

        context.add_child(name.into_key(), module);
    }
}
