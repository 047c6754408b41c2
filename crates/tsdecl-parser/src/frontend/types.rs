//! Lowering of type annotations, expressions, parameters, and type members.

use ast_grep_core::Node;
use serde_json::Value;

use crate::stack::guarded;

use super::helpers::{
    RawBuilder, child_of_kind, entity_name, first_named, has_token, identifier, named_children,
    opaque, string_literal, unquote,
};

pub(super) fn lower_type<D: ast_grep_core::Doc>(node: &Node<D>) -> Value {
    guarded(|| lower_type_node(node))
}

fn lower_type_node<D: ast_grep_core::Doc>(node: &Node<D>) -> Value {
    let kind = node.kind();
    match kind.as_ref() {
        "predefined_type" => keyword_type(node),
        "type_identifier" | "identifier" => RawBuilder::new("TypeReference", node)
            .field("typeName", identifier(node))
            .build(),
        "nested_type_identifier" => RawBuilder::new("TypeReference", node)
            .field("typeName", entity_name(node))
            .build(),
        "generic_type" => RawBuilder::new("TypeReference", node)
            .maybe("typeName", node.field("name").map(|name| entity_name(&name)))
            .non_empty("typeArguments", type_arguments(node))
            .build(),
        "array_type" => RawBuilder::new("ArrayType", node)
            .maybe("elementType", first_named(node).map(|inner| lower_type(&inner)))
            .build(),
        "union_type" => RawBuilder::new("UnionType", node)
            .field("types", flatten(node, "union_type"))
            .build(),
        "intersection_type" => RawBuilder::new("IntersectionType", node)
            .field("types", flatten(node, "intersection_type"))
            .build(),
        "parenthesized_type" => wrap("ParenthesizedType", node),
        "optional_type" => wrap("OptionalType", node),
        "rest_type" => wrap("RestType", node),
        "literal_type" => literal_type(node),
        "tuple_type" => RawBuilder::new("TupleType", node)
            .field("elements", lower_types(node))
            .build(),
        "object_type" => RawBuilder::new("TypeLiteral", node)
            .field("members", lower_type_members(node))
            .build(),
        "function_type" => RawBuilder::new("FunctionType", node)
            .non_empty("typeParameters", lower_type_parameters(node))
            .field("parameters", lower_parameters(node))
            .maybe("type", node.field("return_type").map(|ret| lower_type(&ret)))
            .build(),
        "constructor_type" => RawBuilder::new("ConstructorType", node)
            .non_empty("typeParameters", lower_type_parameters(node))
            .field("parameters", lower_parameters(node))
            .maybe("type", node.field("type").map(|ret| lower_type(&ret)))
            .build(),
        "type_query" => RawBuilder::new("TypeQuery", node)
            .maybe("exprName", first_named(node).map(|name| lower_expression(&name)))
            .build(),
        "index_type_query" => type_operator("KeyOfKeyword", node),
        "readonly_type" => type_operator("ReadonlyKeyword", node),
        "lookup_type" => {
            let parts = named_children(node);
            RawBuilder::new("IndexedAccessType", node)
                .maybe("objectType", parts.first().map(|object| lower_type(object)))
                .maybe("indexType", parts.get(1).map(|index| lower_type(index)))
                .build()
        }
        "this_type" | "this" => RawBuilder::new("ThisType", node).build(),
        _ => opaque(node),
    }
}

/// The type inside an annotation node (`: T`, `asserts x`, `x is T`).
pub(super) fn lower_type_annotation<D: ast_grep_core::Doc>(annotation: &Node<D>) -> Option<Value> {
    first_named(annotation).map(|inner| lower_type(&inner))
}

pub(super) fn lower_expression<D: ast_grep_core::Doc>(node: &Node<D>) -> Value {
    guarded(|| lower_expression_node(node))
}

fn lower_expression_node<D: ast_grep_core::Doc>(node: &Node<D>) -> Value {
    let kind = node.kind();
    match kind.as_ref() {
        "identifier"
        | "property_identifier"
        | "shorthand_property_identifier"
        | "type_identifier"
        | "undefined" => identifier(node),
        "private_property_identifier" => RawBuilder::new("PrivateIdentifier", node)
            .field("text", node.text().as_ref())
            .build(),
        "string" => string_literal(node),
        "template_string" if child_of_kind(node, &["template_substitution"]).is_none() => {
            RawBuilder::new("NoSubstitutionTemplateLiteral", node)
                .field("text", unquote(&node.text()))
                .build()
        }
        "number" => RawBuilder::new("NumericLiteral", node)
            .field("text", node.text().as_ref())
            .build(),
        "regex" => RawBuilder::new("RegularExpressionLiteral", node)
            .field("text", node.text().as_ref())
            .build(),
        "true" => RawBuilder::new("TrueKeyword", node).build(),
        "false" => RawBuilder::new("FalseKeyword", node).build(),
        "null" => RawBuilder::new("NullKeyword", node).build(),
        "this" => RawBuilder::new("ThisKeyword", node).build(),
        "super" => RawBuilder::new("SuperKeyword", node).build(),
        "nested_identifier" => entity_name(node),
        "member_expression" => RawBuilder::new("PropertyAccessExpression", node)
            .maybe("expression", node.field("object").map(|object| lower_expression(&object)))
            .maybe("name", node.field("property").map(|property| lower_expression(&property)))
            .build(),
        "subscript_expression" => RawBuilder::new("ElementAccessExpression", node)
            .maybe("expression", node.field("object").map(|object| lower_expression(&object)))
            .maybe(
                "argumentExpression",
                node.field("index").map(|index| lower_expression(&index)),
            )
            .build(),
        "call_expression" => match node.field("arguments") {
            Some(arguments) if arguments.kind().as_ref() == "arguments" => {
                RawBuilder::new("CallExpression", node)
                    .maybe("expression", node.field("function").map(|callee| lower_expression(&callee)))
                    .non_empty("typeArguments", type_arguments(node))
                    .field("arguments", lower_arguments(&arguments))
                    .build()
            }
            _ => RawBuilder::new("TaggedTemplateExpression", node)
                .field("text", node.text().as_ref())
                .build(),
        },
        "new_expression" => RawBuilder::new("NewExpression", node)
            .maybe(
                "expression",
                node.field("constructor").map(|callee| lower_expression(&callee)),
            )
            .non_empty("typeArguments", type_arguments(node))
            .field(
                "arguments",
                node.field("arguments")
                    .map(|arguments| lower_arguments(&arguments))
                    .unwrap_or_default(),
            )
            .build(),
        "parenthesized_expression" => RawBuilder::new("ParenthesizedExpression", node)
            .maybe("expression", first_named(node).map(|inner| lower_expression(&inner)))
            .build(),
        _ => opaque(node),
    }
}

/// Parameters of a function-like node: its `parameters` field or its
/// `formal_parameters` child.
pub(super) fn lower_parameters<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<Value> {
    let Some(list) = node
        .field("parameters")
        .or_else(|| child_of_kind(node, &["formal_parameters"]))
    else {
        return Vec::new();
    };
    named_children(&list)
        .iter()
        .filter(|param| {
            matches!(
                param.kind().as_ref(),
                "required_parameter" | "optional_parameter" | "identifier"
            )
        })
        .map(lower_parameter)
        .collect()
}

fn lower_parameter<D: ast_grep_core::Doc>(param: &Node<D>) -> Value {
    // Plain JavaScript parameters are bare identifiers.
    if param.kind().as_ref() == "identifier" {
        return RawBuilder::new("Parameter", param)
            .field("name", identifier(param))
            .build();
    }

    let pattern = param.field("pattern");
    let rest = pattern
        .as_ref()
        .filter(|pattern| pattern.kind().as_ref() == "rest_pattern");
    let name = match rest {
        Some(rest) => first_named(rest).map(|inner| binding_name(&inner)),
        None => pattern.as_ref().map(binding_name),
    };

    RawBuilder::new("Parameter", param)
        .modifiers(&member_modifiers(param))
        .flag("dotDotDotToken", "DotDotDotToken", rest.is_some())
        .maybe("name", name)
        .flag(
            "questionToken",
            "QuestionToken",
            param.kind().as_ref() == "optional_parameter",
        )
        .maybe("type", param.field("type").and_then(|ty| lower_type_annotation(&ty)))
        .maybe("initializer", param.field("value").map(|value| lower_expression(&value)))
        .build()
}

/// Variable and parameter names: identifiers or destructuring patterns.
pub(super) fn binding_name<D: ast_grep_core::Doc>(node: &Node<D>) -> Value {
    match node.kind().as_ref() {
        "identifier" | "this" => identifier(node),
        _ => opaque(node),
    }
}

pub(super) fn lower_type_parameters<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<Value> {
    let Some(list) = node
        .field("type_parameters")
        .or_else(|| child_of_kind(node, &["type_parameters"]))
    else {
        return Vec::new();
    };
    named_children(&list)
        .iter()
        .filter(|param| param.kind().as_ref() == "type_parameter")
        .map(|param| {
            RawBuilder::new("TypeParameter", param)
                .maybe("name", param.field("name").map(|name| identifier(&name)))
                .maybe(
                    "constraint",
                    param
                        .field("constraint")
                        .and_then(|constraint| lower_type_annotation(&constraint)),
                )
                .maybe(
                    "default",
                    param
                        .field("value")
                        .and_then(|default| lower_type_annotation(&default)),
                )
                .build()
        })
        .collect()
}

/// Members of an interface body or object type.
pub(super) fn lower_type_members<D: ast_grep_core::Doc>(body: &Node<D>) -> Vec<Value> {
    named_children(body)
        .iter()
        .map(|member| match member.kind().as_ref() {
            "property_signature" => RawBuilder::new("PropertySignature", member)
                .modifiers(&member_modifiers(member))
                .maybe("name", member.field("name").map(|name| property_name(&name)))
                .flag("questionToken", "QuestionToken", has_token(member, "?"))
                .maybe(
                    "type",
                    member.field("type").and_then(|ty| lower_type_annotation(&ty)),
                )
                .build(),
            "method_signature" => RawBuilder::new("MethodSignature", member)
                .maybe("name", member.field("name").map(|name| property_name(&name)))
                .flag("questionToken", "QuestionToken", has_token(member, "?"))
                .non_empty("typeParameters", lower_type_parameters(member))
                .field("parameters", lower_parameters(member))
                .maybe("type", return_type(member))
                .build(),
            "call_signature" => RawBuilder::new("CallSignature", member)
                .non_empty("typeParameters", lower_type_parameters(member))
                .field("parameters", lower_parameters(member))
                .maybe("type", return_type(member))
                .build(),
            "construct_signature" => RawBuilder::new("ConstructSignature", member)
                .non_empty("typeParameters", lower_type_parameters(member))
                .field("parameters", lower_parameters(member))
                .maybe("type", return_type(member))
                .build(),
            _ => opaque(member),
        })
        .collect()
}

/// The declared return type (`return_type` or, for construct signatures, `type`).
pub(super) fn return_type<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<Value> {
    node.field("return_type")
        .or_else(|| node.field("type"))
        .and_then(|annotation| lower_type_annotation(&annotation))
}

pub(super) fn property_name<D: ast_grep_core::Doc>(node: &Node<D>) -> Value {
    match node.kind().as_ref() {
        "computed_property_name" => RawBuilder::new("ComputedPropertyName", node)
            .maybe("expression", first_named(node).map(|inner| lower_expression(&inner)))
            .build(),
        _ => lower_expression(node),
    }
}

/// Keyword modifiers on class members and constructor parameters.
pub(super) fn member_modifiers<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<&'static str> {
    node.children()
        .filter_map(|child| {
            let kind = child.kind();
            let modifier = match kind.as_ref() {
                "accessibility_modifier" => match child.text().as_ref() {
                    "private" => "PrivateKeyword",
                    "protected" => "ProtectedKeyword",
                    _ => "PublicKeyword",
                },
                "override_modifier" => "OverrideKeyword",
                "static" => "StaticKeyword",
                "readonly" => "ReadonlyKeyword",
                "abstract" => "AbstractKeyword",
                "async" => "AsyncKeyword",
                "declare" => "DeclareKeyword",
                _ => return None,
            };
            Some(modifier)
        })
        .collect()
}

fn keyword_type<D: ast_grep_core::Doc>(node: &Node<D>) -> Value {
    let text = node.text();
    let kind = match text.as_ref() {
        "any" => "AnyKeyword",
        "unknown" => "UnknownKeyword",
        "number" => "NumberKeyword",
        "bigint" => "BigIntKeyword",
        "object" => "ObjectKeyword",
        "boolean" => "BooleanKeyword",
        "string" => "StringKeyword",
        "symbol" => "SymbolKeyword",
        "void" => "VoidKeyword",
        "undefined" => "UndefinedKeyword",
        "never" => "NeverKeyword",
        _ => return opaque(node),
    };
    RawBuilder::new(kind, node).build()
}

fn literal_type<D: ast_grep_core::Doc>(node: &Node<D>) -> Value {
    match first_named(node) {
        Some(literal) if literal.kind().as_ref() == "undefined" => {
            RawBuilder::new("UndefinedKeyword", node).build()
        }
        Some(literal) => RawBuilder::new("LiteralType", node)
            .field("literal", lower_expression(&literal))
            .build(),
        None => opaque(node),
    }
}

fn type_operator<D: ast_grep_core::Doc>(operator: &str, node: &Node<D>) -> Value {
    RawBuilder::new("TypeOperator", node)
        .field("operator", operator)
        .maybe("type", first_named(node).map(|inner| lower_type(&inner)))
        .build()
}

fn wrap<D: ast_grep_core::Doc>(kind: &str, node: &Node<D>) -> Value {
    RawBuilder::new(kind, node)
        .maybe("type", first_named(node).map(|inner| lower_type(&inner)))
        .build()
}

fn lower_types<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<Value> {
    named_children(node).iter().map(|child| lower_type(child)).collect()
}

/// Operands of a left-nested binary type (`A | B | C`) as one flat list.
fn flatten<D: ast_grep_core::Doc>(node: &Node<D>, kind: &str) -> Vec<Value> {
    named_children(node)
        .iter()
        .flat_map(|child| {
            if child.kind().as_ref() == kind {
                flatten(child, kind)
            } else {
                vec![lower_type(child)]
            }
        })
        .collect()
}

fn type_arguments<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<Value> {
    node.field("type_arguments")
        .or_else(|| child_of_kind(node, &["type_arguments"]))
        .map(|arguments| lower_types(&arguments))
        .unwrap_or_default()
}

fn lower_arguments<D: ast_grep_core::Doc>(arguments: &Node<D>) -> Vec<Value> {
    named_children(arguments)
        .iter()
        .map(|argument| lower_expression(argument))
        .collect()
}
