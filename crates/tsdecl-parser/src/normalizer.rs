//! Debug normalization of raw AST subtrees.
//!
//! The normalized form drops positional and back-reference metadata and
//! replaces numeric `kind` discriminants with canonical names, so a subtree can
//! be printed or diffed without parser noise.

use serde_json::Value;
use tsdecl_core::{KindTable, NormalizedNode, RawNode, Scalar};

use crate::stack::guarded;

/// Fields removed from every mapping before its children are visited.
///
/// `parent` is dropped before recursion, which is what keeps normalization
/// from walking back up a tree that carries back-references.
pub const OMITTED_FIELDS: [&str; 4] = ["pos", "end", "parent", "flags"];

/// Kind-name lookup applied to an already-normalized mapping.
pub trait KindNames {
    /// Canonical name for the node's `kind`, or `None` to leave it as is.
    fn node_name(&self, node: &NormalizedNode) -> Option<String>;
}

impl KindNames for KindTable {
    fn node_name(&self, node: &NormalizedNode) -> Option<String> {
        match node.get("kind")? {
            NormalizedNode::Scalar(Scalar::String(name)) => Some(name.clone()),
            NormalizedNode::Scalar(Scalar::Number(number)) => {
                self.kind_name(&Value::Number(number.clone()))
            }
            _ => None,
        }
    }
}

/// Produces [`NormalizedNode`]s from raw JSON.
#[derive(Clone, Copy)]
pub struct Normalizer<'k> {
    kinds: &'k dyn KindNames,
}

impl<'k> Normalizer<'k> {
    #[must_use]
    pub const fn new(kinds: &'k dyn KindNames) -> Self {
        Self { kinds }
    }

    #[must_use]
    pub fn normalize(&self, node: RawNode<'_>) -> NormalizedNode {
        self.normalize_value(node.as_value())
    }

    /// Normalize any JSON value. Scalars pass through unchanged.
    #[must_use]
    pub fn normalize_value(&self, value: &Value) -> NormalizedNode {
        guarded(|| self.normalize_entry(value))
    }

    fn normalize_entry(&self, value: &Value) -> NormalizedNode {
        match value {
            Value::Object(map) => {
                let fields = map
                    .iter()
                    .filter(|(key, _)| !OMITTED_FIELDS.contains(&key.as_str()))
                    .map(|(key, child)| (key.clone(), self.normalize_value(child)))
                    .collect();
                let mut copy = NormalizedNode::Mapping(fields);
                if copy.get("kind").is_some()
                    && let Some(name) = self.kinds.node_name(&copy)
                {
                    copy.set("kind", NormalizedNode::string(name));
                }
                copy
            }
            Value::Array(items) => {
                NormalizedNode::Sequence(items.iter().map(|item| self.normalize_value(item)).collect())
            }
            scalar => NormalizedNode::from_value(scalar),
        }
    }
}

impl std::fmt::Debug for Normalizer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer").finish_non_exhaustive()
    }
}
