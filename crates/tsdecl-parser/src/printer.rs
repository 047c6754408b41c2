//! Rendering normalized nodes back to TypeScript-like source text.
//!
//! The name resolver prints `expression` fields and variable declarators
//! through a [`TypePrinter`]. [`SourcePrinter`] covers the node shapes the
//! front-end emits; anything it does not know prints its `text`, or failing
//! that, its kind name.

use tsdecl_core::{NormalizedNode, Scalar};

use crate::stack::guarded;

/// Renders a normalized node as source text.
pub trait TypePrinter {
    fn print_type(&self, node: &NormalizedNode) -> String;
}

/// Default printer for TypeScript type and expression nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourcePrinter;

impl TypePrinter for SourcePrinter {
    fn print_type(&self, node: &NormalizedNode) -> String {
        guarded(|| match node {
            NormalizedNode::Scalar(scalar) => print_scalar(scalar),
            NormalizedNode::Sequence(items) => self.join(items, ", "),
            NormalizedNode::Mapping(_) => self.print_mapping(node),
        })
    }
}

impl SourcePrinter {
    fn print_mapping(&self, node: &NormalizedNode) -> String {
        let kind = node.kind_name().unwrap_or_default();
        if let Some(keyword) = keyword_text(kind) {
            return keyword.to_string();
        }

        match kind {
            "Identifier" | "PrivateIdentifier" | "NumericLiteral" | "BigIntLiteral"
            | "RegularExpressionLiteral" => node.text().unwrap_or_default().to_string(),
            "StringLiteral" | "NoSubstitutionTemplateLiteral" => {
                quote(node.text().unwrap_or_default())
            }
            "TypeReference" | "ExpressionWithTypeArguments" => {
                let Some(target) = node.get("typeName").or_else(|| node.get("expression")) else {
                    return fallback(node, kind);
                };
                format!("{}{}", self.print_type(target), self.type_arguments(node))
            }
            "QualifiedName" => format!(
                "{}.{}",
                self.field(node, "left"),
                self.field(node, "right")
            ),
            "PropertyAccessExpression" => format!(
                "{}.{}",
                self.field(node, "expression"),
                self.field(node, "name")
            ),
            "ElementAccessExpression" => format!(
                "{}[{}]",
                self.field(node, "expression"),
                self.field(node, "argumentExpression")
            ),
            "ArrayType" => match node.get("elementType") {
                Some(element) if needs_parens(element) => {
                    format!("({})[]", self.print_type(element))
                }
                Some(element) => format!("{}[]", self.print_type(element)),
                None => fallback(node, kind),
            },
            "UnionType" => self.join_field(node, "types", " | "),
            "IntersectionType" => self.join_field(node, "types", " & "),
            "ParenthesizedType" => format!("({})", self.field(node, "type")),
            "ParenthesizedExpression" => format!("({})", self.field(node, "expression")),
            "LiteralType" => self.field(node, "literal"),
            "TupleType" => format!("[{}]", self.join_field(node, "elements", ", ")),
            "OptionalType" => format!("{}?", self.field(node, "type")),
            "RestType" => format!("...{}", self.field(node, "type")),
            "TypeLiteral" => self.type_literal(node),
            "TypeOperator" => {
                let operator = node
                    .get("operator")
                    .and_then(NormalizedNode::as_str)
                    .and_then(keyword_text)
                    .unwrap_or_default();
                format!("{operator} {}", self.field(node, "type"))
            }
            "IndexedAccessType" => format!(
                "{}[{}]",
                self.field(node, "objectType"),
                self.field(node, "indexType")
            ),
            "TypeQuery" => format!("typeof {}", self.field(node, "exprName")),
            "FunctionType" => format!(
                "{}({}) => {}",
                self.type_parameters(node),
                self.join_field(node, "parameters", ", "),
                self.field(node, "type")
            ),
            "ConstructorType" => format!(
                "new {}({}) => {}",
                self.type_parameters(node),
                self.join_field(node, "parameters", ", "),
                self.field(node, "type")
            ),
            "Parameter" => {
                let rest = if node.get("dotDotDotToken").is_some() { "..." } else { "" };
                format!(
                    "{rest}{}{}{}",
                    self.field(node, "name"),
                    optional_marker(node),
                    self.annotation(node)
                )
            }
            "TypeParameter" => {
                let mut out = self.field(node, "name");
                if let Some(constraint) = node.get("constraint") {
                    out.push_str(" extends ");
                    out.push_str(&self.print_type(constraint));
                }
                if let Some(default) = node.get("default") {
                    out.push_str(" = ");
                    out.push_str(&self.print_type(default));
                }
                out
            }
            "VariableDeclaration" | "PropertySignature" | "PropertyDeclaration" => format!(
                "{}{}{}",
                self.field(node, "name"),
                optional_marker(node),
                self.annotation(node)
            ),
            "MethodSignature" | "MethodDeclaration" => format!(
                "{}{}({}){}",
                self.field(node, "name"),
                optional_marker(node),
                self.join_field(node, "parameters", ", "),
                self.annotation(node)
            ),
            "CallSignature" => format!(
                "({}){}",
                self.join_field(node, "parameters", ", "),
                self.annotation(node)
            ),
            "ConstructSignature" => format!(
                "new ({}){}",
                self.join_field(node, "parameters", ", "),
                self.annotation(node)
            ),
            "CallExpression" => format!(
                "{}{}({})",
                self.field(node, "expression"),
                self.type_arguments(node),
                self.join_field(node, "arguments", ", ")
            ),
            "NewExpression" => format!(
                "new {}{}({})",
                self.field(node, "expression"),
                self.type_arguments(node),
                self.join_field(node, "arguments", ", ")
            ),
            "ComputedPropertyName" => format!("[{}]", self.field(node, "expression")),
            _ => fallback(node, kind),
        }
    }

    /// A child field, printed; absent fields print as empty text.
    fn field(&self, node: &NormalizedNode, key: &str) -> String {
        node.get(key)
            .map(|child| self.print_type(child))
            .unwrap_or_default()
    }

    fn join(&self, items: &[NormalizedNode], separator: &str) -> String {
        items
            .iter()
            .map(|item| self.print_type(item))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn join_field(&self, node: &NormalizedNode, key: &str, separator: &str) -> String {
        node.get(key)
            .and_then(NormalizedNode::as_sequence)
            .map(|items| self.join(items, separator))
            .unwrap_or_default()
    }

    /// `: <type>` when the node has a `type` field.
    fn annotation(&self, node: &NormalizedNode) -> String {
        node.get("type")
            .map(|ty| format!(": {}", self.print_type(ty)))
            .unwrap_or_default()
    }

    fn type_arguments(&self, node: &NormalizedNode) -> String {
        match node.get("typeArguments").and_then(NormalizedNode::as_sequence) {
            Some(args) if !args.is_empty() => format!("<{}>", self.join(args, ", ")),
            _ => String::new(),
        }
    }

    fn type_parameters(&self, node: &NormalizedNode) -> String {
        match node.get("typeParameters").and_then(NormalizedNode::as_sequence) {
            Some(params) if !params.is_empty() => format!("<{}>", self.join(params, ", ")),
            _ => String::new(),
        }
    }

    fn type_literal(&self, node: &NormalizedNode) -> String {
        match node.get("members").and_then(NormalizedNode::as_sequence) {
            Some(members) if !members.is_empty() => format!("{{ {} }}", self.join(members, "; ")),
            _ => "{}".to_string(),
        }
    }
}

fn print_scalar(scalar: &Scalar) -> String {
    match scalar {
        Scalar::Null => "null".to_string(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Number(n) => n.to_string(),
        Scalar::String(s) => s.clone(),
    }
}

fn fallback(node: &NormalizedNode, kind: &str) -> String {
    node.text().unwrap_or(kind).to_string()
}

fn optional_marker(node: &NormalizedNode) -> &'static str {
    if node.get("questionToken").is_some() { "?" } else { "" }
}

fn needs_parens(element: &NormalizedNode) -> bool {
    matches!(
        element.kind_name(),
        Some("UnionType" | "IntersectionType" | "FunctionType" | "ConstructorType")
    )
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Source text of keyword-like kinds (keyword types, literal keywords, and
/// type operators).
fn keyword_text(kind: &str) -> Option<&'static str> {
    let text = match kind {
        "AnyKeyword" => "any",
        "UnknownKeyword" => "unknown",
        "NumberKeyword" => "number",
        "BigIntKeyword" => "bigint",
        "ObjectKeyword" => "object",
        "BooleanKeyword" => "boolean",
        "StringKeyword" => "string",
        "SymbolKeyword" => "symbol",
        "VoidKeyword" => "void",
        "UndefinedKeyword" => "undefined",
        "NeverKeyword" => "never",
        "IntrinsicKeyword" => "intrinsic",
        "TrueKeyword" => "true",
        "FalseKeyword" => "false",
        "NullKeyword" => "null",
        "ThisKeyword" | "ThisType" => "this",
        "SuperKeyword" => "super",
        "KeyOfKeyword" => "keyof",
        "UniqueKeyword" => "unique",
        "ReadonlyKeyword" => "readonly",
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;

    fn print(value: &Value) -> String {
        SourcePrinter.print_type(&NormalizedNode::from_value(value))
    }

    fn ident(text: &str) -> Value {
        json!({ "kind": "Identifier", "text": text })
    }

    fn reference(name: &str) -> Value {
        json!({ "kind": "TypeReference", "typeName": ident(name) })
    }

    #[test]
    fn identifiers_and_literals() {
        assert_eq!(print(&ident("foo")), "foo");
        assert_eq!(print(&json!({ "kind": "StringLiteral", "text": "a\"b" })), "\"a\\\"b\"");
        assert_eq!(print(&json!({ "kind": "NumericLiteral", "text": "42" })), "42");
        assert_eq!(print(&json!({ "kind": "TrueKeyword" })), "true");
    }

    #[test]
    fn keyword_types() {
        assert_eq!(print(&json!({ "kind": "StringKeyword" })), "string");
        assert_eq!(print(&json!({ "kind": "NeverKeyword" })), "never");
    }

    #[test]
    fn references_with_type_arguments() {
        let node = json!({
            "kind": "TypeReference",
            "typeName": {
                "kind": "QualifiedName",
                "left": ident("ns"),
                "right": ident("Map")
            },
            "typeArguments": [{ "kind": "StringKeyword" }, reference("Foo")]
        });
        assert_eq!(print(&node), "ns.Map<string, Foo>");
    }

    #[test]
    fn arrays_of_unions_are_parenthesized() {
        let node = json!({
            "kind": "ArrayType",
            "elementType": {
                "kind": "UnionType",
                "types": [{ "kind": "StringKeyword" }, { "kind": "NumberKeyword" }]
            }
        });
        assert_eq!(print(&node), "(string | number)[]");
        let node = json!({ "kind": "ArrayType", "elementType": reference("T") });
        assert_eq!(print(&node), "T[]");
    }

    #[test]
    fn intersections_tuples_and_literals() {
        let node = json!({ "kind": "IntersectionType", "types": [reference("A"), reference("B")] });
        assert_eq!(print(&node), "A & B");
        let node = json!({
            "kind": "TupleType",
            "elements": [{ "kind": "StringKeyword" }, { "kind": "OptionalType", "type": reference("T") }]
        });
        assert_eq!(print(&node), "[string, T?]");
        let node = json!({
            "kind": "LiteralType",
            "literal": { "kind": "StringLiteral", "text": "on" }
        });
        assert_eq!(print(&node), "\"on\"");
    }

    #[test]
    fn type_literals() {
        assert_eq!(print(&json!({ "kind": "TypeLiteral", "members": [] })), "{}");
        let node = json!({
            "kind": "TypeLiteral",
            "members": [
                { "kind": "PropertySignature", "name": ident("a"), "type": { "kind": "NumberKeyword" } },
                { "kind": "PropertySignature", "name": ident("b"), "questionToken": { "kind": "QuestionToken" } }
            ]
        });
        assert_eq!(print(&node), "{ a: number; b? }");
    }

    #[test]
    fn function_types_and_parameters() {
        let node = json!({
            "kind": "FunctionType",
            "parameters": [
                { "kind": "Parameter", "name": ident("a"), "type": { "kind": "StringKeyword" } },
                {
                    "kind": "Parameter",
                    "dotDotDotToken": { "kind": "DotDotDotToken" },
                    "name": ident("rest"),
                    "type": { "kind": "ArrayType", "elementType": { "kind": "AnyKeyword" } }
                }
            ],
            "type": { "kind": "VoidKeyword" }
        });
        assert_eq!(print(&node), "(a: string, ...rest: any[]) => void");
    }

    #[test]
    fn variable_declarations() {
        let node = json!({ "kind": "VariableDeclaration", "name": ident("x") });
        assert_eq!(print(&node), "x");
        let node = json!({
            "kind": "VariableDeclaration",
            "name": ident("y"),
            "type": reference("Foo")
        });
        assert_eq!(print(&node), "y: Foo");
    }

    #[test]
    fn property_access_and_calls() {
        let node = json!({
            "kind": "CallExpression",
            "expression": {
                "kind": "PropertyAccessExpression",
                "expression": ident("module"),
                "name": ident("create")
            },
            "arguments": [{ "kind": "NumericLiteral", "text": "1" }, ident("b")]
        });
        assert_eq!(print(&node), "module.create(1, b)");
    }

    #[test]
    fn unknown_shapes_fall_back_to_text_then_kind() {
        assert_eq!(
            print(&json!({ "kind": "ConditionalType", "text": "T extends U ? X : Y" })),
            "T extends U ? X : Y"
        );
        assert_eq!(print(&json!({ "kind": "MappedType" })), "MappedType");
        assert_eq!(print(&json!({ "no": "kind" })), "");
    }

    #[test]
    fn type_operators() {
        let node = json!({ "kind": "TypeOperator", "operator": "KeyOfKeyword", "type": reference("T") });
        assert_eq!(print(&node), "keyof T");
    }
}
