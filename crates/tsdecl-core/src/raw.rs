//! Borrowed, read-only view over a raw AST node.
//!
//! Raw nodes are JSON-shaped mappings produced by an external parser. Every
//! accessor here is total: a missing, null, or wrongly-typed field reads as
//! `None` instead of failing, so callers can chain lookups freely.

use serde_json::Value;

/// A raw AST node borrowed from a parsed JSON document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawNode<'a> {
    value: &'a Value,
}

impl<'a> RawNode<'a> {
    #[must_use]
    pub const fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// The underlying JSON value.
    #[must_use]
    pub const fn as_value(self) -> &'a Value {
        self.value
    }

    /// Whether the node is a JSON object (the only shape that carries fields).
    #[must_use]
    pub fn is_object(self) -> bool {
        self.value.is_object()
    }

    /// The raw `kind` discriminant, numeric or symbolic.
    #[must_use]
    pub fn kind(self) -> Option<&'a Value> {
        self.value.get("kind").filter(|v| !v.is_null())
    }

    /// A non-null field of this node.
    #[must_use]
    pub fn field(self, key: &str) -> Option<Self> {
        self.value
            .get(key)
            .filter(|v| !v.is_null())
            .map(Self::new)
    }

    /// Whether the field exists and is not null.
    #[must_use]
    pub fn has(self, key: &str) -> bool {
        self.field(key).is_some()
    }

    /// The node's identifier text.
    ///
    /// Reads `text` first and falls back to `escapedText`, which is what a
    /// serialized identifier carries when `text` is a computed property.
    /// Empty text reads as `None`.
    #[must_use]
    pub fn text(self) -> Option<&'a str> {
        if let Some(text) = self.value.get("text").and_then(Value::as_str) {
            return Some(text).filter(|t| !t.is_empty());
        }
        self.value
            .get("escapedText")
            .and_then(Value::as_str)
            .map(unescape_leading_underscores)
            .filter(|t| !t.is_empty())
    }

    /// Node flags, when present and integral.
    #[must_use]
    pub fn flags(self) -> Option<i64> {
        self.value.get("flags").and_then(Value::as_i64)
    }

    /// A sequence-valued field.
    #[must_use]
    pub fn sequence(self, key: &str) -> Option<&'a [Value]> {
        self.value
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// The `statements` collection of a container node (source file, module block).
    #[must_use]
    pub fn statements(self) -> Option<&'a [Value]> {
        self.sequence("statements")
    }

    /// The `members` collection of a class, interface, or type literal.
    #[must_use]
    pub fn members(self) -> Option<&'a [Value]> {
        self.sequence("members")
    }
}

impl<'a> From<&'a Value> for RawNode<'a> {
    fn from(value: &'a Value) -> Self {
        Self::new(value)
    }
}

/// Escaped identifiers that begin with `__` carry one extra leading underscore.
pub(crate) fn unescape_leading_underscores(text: &str) -> &str {
    if text.starts_with("___") {
        &text[1..]
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_prefers_text_over_escaped_text() {
        let value = json!({ "text": "foo", "escapedText": "bar" });
        assert_eq!(RawNode::new(&value).text(), Some("foo"));
    }

    #[test]
    fn text_falls_back_to_escaped_text() {
        let value = json!({ "escapedText": "bar" });
        assert_eq!(RawNode::new(&value).text(), Some("bar"));
    }

    #[test]
    fn escaped_dunder_identifiers_are_unescaped() {
        let value = json!({ "escapedText": "___proto" });
        assert_eq!(RawNode::new(&value).text(), Some("__proto"));
        let value = json!({ "escapedText": "__x" });
        assert_eq!(RawNode::new(&value).text(), Some("__x"));
    }

    #[test]
    fn empty_text_reads_as_none() {
        let value = json!({ "text": "" });
        assert_eq!(RawNode::new(&value).text(), None);
    }

    #[test]
    fn null_fields_are_absent() {
        let value = json!({ "name": null, "kind": null });
        let node = RawNode::new(&value);
        assert!(node.field("name").is_none());
        assert!(node.kind().is_none());
        assert!(!node.has("name"));
    }

    #[test]
    fn accessors_on_scalars_are_total() {
        let value = json!(42);
        let node = RawNode::new(&value);
        assert!(!node.is_object());
        assert!(node.field("name").is_none());
        assert!(node.text().is_none());
        assert!(node.statements().is_none());
        assert!(node.flags().is_none());
    }

    #[test]
    fn statements_require_an_array() {
        let value = json!({ "statements": { "kind": "Block" } });
        assert!(RawNode::new(&value).statements().is_none());
        let value = json!({ "statements": [] });
        assert_eq!(RawNode::new(&value).statements().map(<[Value]>::len), Some(0));
    }

    #[test]
    fn members_present_and_absent() {
        let value = json!({ "members": [{ "kind": "PropertySignature" }] });
        assert_eq!(RawNode::new(&value).members().map(<[Value]>::len), Some(1));
        let value = json!({ "kind": "FunctionDeclaration" });
        assert!(RawNode::new(&value).members().is_none());
    }
}
