//! Depth-first walk from a raw AST root into a declaration tree.

use serde_json::Value;
use tracing::{debug, warn};
use tsdecl_core::{ContextNode, KindTable, RawNode, ScopeMode};
pub use tsdecl_core::{DEFAULT_MAX_DEPTH, DEFAULT_NAMESPACE_FLAGS};

use crate::factory::DeclFactory;
use crate::namespace::NamespaceContext;
use crate::normalizer::Normalizer;
use crate::printer::TypePrinter;
use crate::resolver::NameResolver;
use crate::stack::guarded;

/// Knobs for a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    /// A module declaration whose `flags` equal one of these is a namespace.
    pub namespace_flags: Vec<i64>,
    pub scope_mode: ScopeMode,
    pub max_depth: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            namespace_flags: DEFAULT_NAMESPACE_FLAGS.to_vec(),
            scope_mode: ScopeMode::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Walks raw ASTs into declaration trees.
///
/// One walker may run many walks; each [`TreeWalker::walk`] starts from a
/// fresh root and a cleared namespace context.
#[derive(Debug)]
pub struct TreeWalker<'k> {
    pub(crate) kinds: &'k KindTable,
    pub(crate) resolver: NameResolver<'k>,
    pub(crate) factory: DeclFactory<'k>,
    pub(crate) options: WalkOptions,
    pub(crate) namespace: NamespaceContext,
}

impl<'k> TreeWalker<'k> {
    #[must_use]
    pub fn new(kinds: &'k KindTable, printer: &'k dyn TypePrinter, options: WalkOptions) -> Self {
        let namespace = NamespaceContext::new(options.scope_mode);
        Self {
            kinds,
            resolver: NameResolver::new(Normalizer::new(kinds), printer),
            factory: DeclFactory::new(kinds),
            options,
            namespace,
        }
    }

    /// Walk `ast` into a new root module context named `root`.
    pub fn walk<'a>(&mut self, ast: &'a Value) -> ContextNode<'a> {
        self.namespace.reset();
        let mut root = self.factory.create_module_node("root");
        self.traverse(RawNode::new(ast), &mut root, 0);
        debug!(
            children = root.len(),
            declarations = root.descendant_count(),
            "walk complete"
        );
        root
    }

    /// Collect every statement of a container node into `context`, or the node
    /// itself when it has no `statements`.
    pub fn traverse<'a>(&mut self, node: RawNode<'a>, context: &mut ContextNode<'a>, depth: usize) {
        if depth > self.options.max_depth {
            warn!(
                depth,
                max_depth = self.options.max_depth,
                context = context.name(),
                "nesting limit reached, body skipped"
            );
            return;
        }
        guarded(|| match node.statements() {
            Some(statements) => {
                for statement in statements {
                    self.collect(RawNode::new(statement), context, depth);
                }
            }
            None => self.collect(node, context, depth),
        });
    }

    /// Namespace state left by the most recent walk.
    #[must_use]
    pub const fn namespace(&self) -> &NamespaceContext {
        &self.namespace
    }

    #[must_use]
    pub const fn options(&self) -> &WalkOptions {
        &self.options
    }
}
