//! Member lookup on classes, interfaces, and type literals.

use serde_json::Value;
use tsdecl_core::{KindTable, RawNode, SyntaxKind};

/// The `members` sequence of `node`, if it has one.
#[must_use]
pub fn members(node: RawNode<'_>) -> Option<&[Value]> {
    node.members()
}

/// Members of the top-level class or interface named `name`.
///
/// Only the root's own `statements` are searched. When several declarations
/// share the name (interface merging), the first one with members wins.
#[must_use]
pub fn find_members<'a>(root: RawNode<'a>, name: &str, kinds: &KindTable) -> Option<&'a [Value]> {
    root.statements()?
        .iter()
        .map(RawNode::new)
        .filter(|node| {
            matches!(
                kinds.classify(node.kind()),
                SyntaxKind::ClassDeclaration | SyntaxKind::InterfaceDeclaration
            )
        })
        .filter(|node| node.field("name").and_then(RawNode::text) == Some(name))
        .find_map(members)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn members_of_nodes_with_and_without_members() {
        let class = json!({ "kind": "ClassDeclaration", "members": [{ "kind": "Constructor" }] });
        assert_eq!(members(RawNode::new(&class)).map(<[Value]>::len), Some(1));
        let func = json!({ "kind": "FunctionDeclaration" });
        assert!(members(RawNode::new(&func)).is_none());
    }

    #[test]
    fn find_members_by_name() {
        let ast = json!({
            "kind": "SourceFile",
            "statements": [
                { "kind": "FunctionDeclaration", "name": { "text": "Shape" } },
                {
                    "kind": "InterfaceDeclaration",
                    "name": { "text": "Shape" },
                    "members": [{ "kind": "PropertySignature", "name": { "text": "area" } }]
                },
                { "kind": "ClassDeclaration", "name": { "text": "Circle" }, "members": [] }
            ]
        });
        let kinds = KindTable::new();
        let root = RawNode::new(&ast);

        let shape = find_members(root, "Shape", &kinds).expect("Shape has members");
        assert_eq!(shape[0]["name"]["text"], json!("area"));
        assert_eq!(find_members(root, "Circle", &kinds).map(<[Value]>::len), Some(0));
        assert!(find_members(root, "Missing", &kinds).is_none());
    }

    #[test]
    fn find_members_without_statements() {
        let kinds = KindTable::new();
        let ast = json!({ "kind": "ClassDeclaration" });
        assert!(find_members(RawNode::new(&ast), "X", &kinds).is_none());
    }
}
