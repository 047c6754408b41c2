use ast_grep_core::Node;
use serde_json::{Map, Value, json};

/// Incrementally builds one raw AST node. `kind`, `pos`, and `end` always come
/// first; other fields keep insertion order.
pub(super) struct RawBuilder {
    fields: Map<String, Value>,
}

impl RawBuilder {
    pub(super) fn new<D: ast_grep_core::Doc>(kind: &str, node: &Node<D>) -> Self {
        let range = node.range();
        let mut fields = Map::new();
        fields.insert("kind".to_string(), Value::from(kind));
        fields.insert("pos".to_string(), Value::from(range.start));
        fields.insert("end".to_string(), Value::from(range.end));
        Self { fields }
    }

    pub(super) fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub(super) fn maybe(self, key: &str, value: Option<Value>) -> Self {
        match value {
            Some(value) => self.field(key, value),
            None => self,
        }
    }

    /// A sequence field, omitted when empty.
    pub(super) fn non_empty(self, key: &str, items: Vec<Value>) -> Self {
        if items.is_empty() {
            self
        } else {
            self.field(key, items)
        }
    }

    /// Keyword modifiers (`export`, `declare`, `abstract`, ...), omitted when
    /// there are none.
    pub(super) fn modifiers(self, modifiers: &[&str]) -> Self {
        let items = modifiers.iter().map(|kind| token(kind)).collect();
        self.non_empty("modifiers", items)
    }

    /// A marker token such as `questionToken`, present only when `on`.
    pub(super) fn flag(self, key: &str, kind: &str, on: bool) -> Self {
        if on { self.field(key, token(kind)) } else { self }
    }

    pub(super) fn build(self) -> Value {
        Value::Object(self.fields)
    }
}

/// A position-less keyword or punctuation node.
pub(super) fn token(kind: &str) -> Value {
    json!({ "kind": kind })
}

/// Named children, skipping comments.
pub(super) fn named_children<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>) -> Vec<Node<'r, D>> {
    node.children()
        .filter(|child| child.is_named() && child.kind().as_ref() != "comment")
        .collect()
}

pub(super) fn first_named<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>) -> Option<Node<'r, D>> {
    named_children(node).into_iter().next()
}

pub(super) fn child_of_kind<'r, D: ast_grep_core::Doc>(
    node: &Node<'r, D>,
    kinds: &[&str],
) -> Option<Node<'r, D>> {
    node.children()
        .find(|child| kinds.contains(&child.kind().as_ref()))
}

/// Whether an anonymous keyword or punctuation child is present.
pub(super) fn has_token<D: ast_grep_core::Doc>(node: &Node<D>, token: &str) -> bool {
    node.children()
        .any(|child| !child.is_named() && child.kind().as_ref() == token)
}

pub(super) fn identifier<D: ast_grep_core::Doc>(node: &Node<D>) -> Value {
    synthetic_identifier(node, &node.text())
}

/// An identifier with explicit text, positioned at `node`.
pub(super) fn synthetic_identifier<D: ast_grep_core::Doc>(node: &Node<D>, text: &str) -> Value {
    RawBuilder::new("Identifier", node).field("text", text).build()
}

pub(super) fn string_literal<D: ast_grep_core::Doc>(node: &Node<D>) -> Value {
    RawBuilder::new("StringLiteral", node)
        .field("text", unquote(&node.text()))
        .build()
}

/// A node the lowering does not model structurally; it keeps its source text.
pub(super) fn opaque<D: ast_grep_core::Doc>(node: &Node<D>) -> Value {
    let kind = node.kind();
    RawBuilder::new(&syntax_name(kind.as_ref()), node)
        .field("text", node.text().as_ref())
        .build()
}

/// Dotted names (`a.b.c`) as an `Identifier` or left-nested `QualifiedName`.
pub(super) fn entity_name<D: ast_grep_core::Doc>(node: &Node<D>) -> Value {
    let text = node.text();
    let mut parts = text.split('.').map(str::trim);
    let first = parts.next().unwrap_or_default();
    parts.fold(synthetic_identifier(node, first), |left, right| {
        RawBuilder::new("QualifiedName", node)
            .field("left", left)
            .field("right", synthetic_identifier(node, right))
            .build()
    })
}

pub(super) fn unquote(text: &str) -> &str {
    for quote in ['"', '\'', '`'] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

/// Compiler-style kind name for a tree-sitter node kind.
pub(super) fn syntax_name(kind: &str) -> String {
    let mapped = match kind {
        "ERROR" => "Unknown",
        "statement_block" => "Block",
        "ternary_expression" => "ConditionalExpression",
        "unary_expression" => "PrefixUnaryExpression",
        "update_expression" => "PostfixUnaryExpression",
        "assignment_expression" | "augmented_assignment_expression" => "BinaryExpression",
        "function_expression" | "function" => "FunctionExpression",
        "class" => "ClassExpression",
        "object" => "ObjectLiteralExpression",
        "array" => "ArrayLiteralExpression",
        "template_string" => "TemplateExpression",
        "object_pattern" => "ObjectBindingPattern",
        "array_pattern" => "ArrayBindingPattern",
        "export_clause" => "NamedExports",
        "type_assertion" => "TypeAssertionExpression",
        "instantiation_expression" => "ExpressionWithTypeArguments",
        "existential_type" => "JSDocAllType",
        other => return pascal_case(other),
    };
    mapped.to_string()
}

fn pascal_case(kind: &str) -> String {
    kind.split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect()
}
