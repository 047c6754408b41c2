//! Best-effort display names for raw AST nodes.

use tsdecl_core::RawNode;

use crate::normalizer::Normalizer;
use crate::printer::TypePrinter;

/// Key used in the output tree for nodes whose name cannot be resolved.
pub const UNRESOLVED_NAME: &str = "INVALID NAME REF";

/// Outcome of name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedName {
    Resolved(String),
    Unresolved,
}

impl ResolvedName {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Resolved(name) => Some(name),
            Self::Unresolved => None,
        }
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// The text key for this name: the name itself or [`UNRESOLVED_NAME`].
    #[must_use]
    pub fn key(&self) -> &str {
        self.as_str().unwrap_or(UNRESOLVED_NAME)
    }

    #[must_use]
    pub fn into_key(self) -> String {
        match self {
            Self::Resolved(name) => name,
            Self::Unresolved => UNRESOLVED_NAME.to_string(),
        }
    }

    fn non_empty(text: String) -> Self {
        if text.is_empty() {
            Self::Unresolved
        } else {
            Self::Resolved(text)
        }
    }
}

impl std::fmt::Display for ResolvedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Applies the naming heuristics in priority order; the first match wins.
#[derive(Clone, Copy)]
pub struct NameResolver<'k> {
    normalizer: Normalizer<'k>,
    printer: &'k dyn TypePrinter,
}

impl<'k> NameResolver<'k> {
    #[must_use]
    pub const fn new(normalizer: Normalizer<'k>, printer: &'k dyn TypePrinter) -> Self {
        Self {
            normalizer,
            printer,
        }
    }

    /// Resolve a display name for `node`.
    ///
    /// 1. `name` text
    /// 2. `type.typeName` text
    /// 3. `moduleSpecifier` text
    /// 4. the printed, normalized `expression`
    /// 5. the printed, normalized declarators of `declarationList`, joined by a space
    ///
    /// Any missing or malformed field falls through to the next rule.
    #[must_use]
    pub fn resolve(&self, node: RawNode<'_>) -> ResolvedName {
        if let Some(text) = node.field("name").and_then(RawNode::text) {
            return ResolvedName::Resolved(text.to_string());
        }
        if let Some(text) = node
            .field("type")
            .and_then(|ty| ty.field("typeName"))
            .and_then(RawNode::text)
        {
            return ResolvedName::Resolved(text.to_string());
        }
        if let Some(text) = node.field("moduleSpecifier").and_then(RawNode::text) {
            return ResolvedName::Resolved(text.to_string());
        }
        if let Some(expression) = node.field("expression") {
            let printed = self.printer.print_type(&self.normalizer.normalize(expression));
            return ResolvedName::non_empty(printed);
        }
        if let Some(list) = node.field("declarationList") {
            let printed = list
                .sequence("declarations")
                .unwrap_or_default()
                .iter()
                .map(|decl| self.printer.print_type(&self.normalizer.normalize_value(decl)))
                .collect::<Vec<_>>()
                .join(" ");
            return ResolvedName::non_empty(printed);
        }
        ResolvedName::Unresolved
    }
}

impl std::fmt::Debug for NameResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameResolver").finish_non_exhaustive()
    }
}
