//! Lowering of source files, statements, and declarations.

use ast_grep_core::Node;
use serde_json::Value;
use tracing::warn;

use crate::stack::guarded;

use super::helpers::{
    RawBuilder, child_of_kind, entity_name, first_named, has_token, identifier, named_children,
    opaque, string_literal, synthetic_identifier,
};
use super::types::{
    binding_name, lower_expression, lower_parameters, lower_type, lower_type_annotation,
    lower_type_members, lower_type_parameters, member_modifiers, property_name, return_type,
};

/// Flags given to every `namespace` declaration.
pub const NAMESPACE_FLAGS: i64 = 16;

const LET_FLAGS: i64 = 1;
const CONST_FLAGS: i64 = 2;

pub(super) fn lower_program<D: ast_grep_core::Doc>(root: &Node<D>, file_name: Option<&str>) -> Value {
    RawBuilder::new("SourceFile", root)
        .maybe("fileName", file_name.map(Value::from))
        .field("statements", lower_statements(root))
        .build()
}

fn lower_statements<D: ast_grep_core::Doc>(container: &Node<D>) -> Vec<Value> {
    named_children(container)
        .iter()
        .filter_map(|statement| lower_statement(statement, &[]))
        .collect()
}

fn lower_statement<D: ast_grep_core::Doc>(node: &Node<D>, modifiers: &[&str]) -> Option<Value> {
    guarded(|| lower_statement_node(node, modifiers))
}

fn lower_statement_node<D: ast_grep_core::Doc>(node: &Node<D>, modifiers: &[&str]) -> Option<Value> {
    let kind = node.kind();
    let lowered = match kind.as_ref() {
        "hash_bang_line" => return None,
        "export_statement" => lower_export(node),
        "ambient_declaration" => lower_ambient(node, modifiers),
        "expression_statement" => match first_named(node) {
            Some(inner) if inner.kind().as_ref() == "internal_module" => {
                lower_module_declaration(&inner, modifiers, NAMESPACE_FLAGS)
            }
            inner => RawBuilder::new("ExpressionStatement", node)
                .maybe("expression", inner.map(|expression| lower_expression(&expression)))
                .build(),
        },
        "internal_module" => lower_module_declaration(node, modifiers, NAMESPACE_FLAGS),
        "module" => lower_module_declaration(node, modifiers, 0),
        "function_declaration"
        | "generator_function_declaration"
        | "function_signature"
        | "function_expression"
        | "function" => lower_function(node, modifiers),
        "class_declaration" | "abstract_class_declaration" | "class" => lower_class(node, modifiers),
        "interface_declaration" => lower_interface(node, modifiers),
        "type_alias_declaration" => RawBuilder::new("TypeAliasDeclaration", node)
            .modifiers(modifiers)
            .maybe("name", node.field("name").map(|name| identifier(&name)))
            .non_empty("typeParameters", lower_type_parameters(node))
            .maybe("type", node.field("value").map(|value| lower_type(&value)))
            .build(),
        "enum_declaration" => lower_enum(node, modifiers),
        "lexical_declaration" | "variable_declaration" => lower_variable_statement(node, modifiers),
        "import_statement" => lower_import(node),
        "import_alias" => RawBuilder::new("ImportEqualsDeclaration", node)
            .modifiers(modifiers)
            .maybe("name", first_named(node).map(|name| identifier(&name)))
            .maybe(
                "moduleReference",
                named_children(node).get(1).map(|target| entity_name(target)),
            )
            .build(),
        "statement_block" => RawBuilder::new("Block", node)
            .field("statements", lower_statements(node))
            .build(),
        "ERROR" => {
            warn!(
                start = node.range().start,
                end = node.range().end,
                "source contains a syntax error"
            );
            opaque(node)
        }
        _ => opaque(node),
    };
    Some(lowered)
}

fn lower_export<D: ast_grep_core::Doc>(node: &Node<D>) -> Value {
    let is_default = has_token(node, "default");
    let modifiers: &[&str] = if is_default {
        &["ExportKeyword", "DefaultKeyword"]
    } else {
        &["ExportKeyword"]
    };

    if let Some(declaration) = node.field("declaration")
        && let Some(lowered) = lower_statement(&declaration, modifiers)
    {
        return lowered;
    }

    if is_default && let Some(value) = node.field("value") {
        return match value.kind().as_ref() {
            "class" | "function_expression" | "function" => lower_statement(&value, modifiers)
                .unwrap_or_else(|| opaque(&value)),
            _ => export_assignment(node, &value, false),
        };
    }

    if has_token(node, "=")
        && let Some(expression) = first_named(node)
    {
        return export_assignment(node, &expression, true);
    }

    if has_token(node, "namespace") {
        return RawBuilder::new("NamespaceExportDeclaration", node)
            .maybe("name", first_named(node).map(|name| identifier(&name)))
            .build();
    }

    RawBuilder::new("ExportDeclaration", node)
        .maybe(
            "exportClause",
            child_of_kind(node, &["export_clause"]).map(|clause| opaque(&clause)),
        )
        .maybe("moduleSpecifier", node.field("source").map(|source| string_literal(&source)))
        .build()
}

fn export_assignment<D: ast_grep_core::Doc>(
    node: &Node<D>,
    expression: &Node<D>,
    is_export_equals: bool,
) -> Value {
    RawBuilder::new("ExportAssignment", node)
        .field("isExportEquals", is_export_equals)
        .field("expression", lower_expression(expression))
        .build()
}

fn lower_ambient<D: ast_grep_core::Doc>(node: &Node<D>, modifiers: &[&str]) -> Value {
    let mut modifiers = modifiers.to_vec();
    modifiers.push("DeclareKeyword");

    if has_token(node, "global") {
        let body = child_of_kind(node, &["statement_block"]).map(|block| module_block(&block));
        return RawBuilder::new("ModuleDeclaration", node)
            .field("flags", 0)
            .modifiers(&modifiers)
            .field("name", synthetic_identifier(node, "global"))
            .maybe("body", body)
            .build();
    }

    first_named(node)
        .and_then(|declaration| lower_statement(&declaration, &modifiers))
        .unwrap_or_else(|| opaque(node))
}

/// `namespace`/`module` declarations. A dotted name (`A.B.C`) becomes one
/// declaration per segment, each the single-node `body` of the previous one.
fn lower_module_declaration<D: ast_grep_core::Doc>(
    node: &Node<D>,
    modifiers: &[&str],
    flags: i64,
) -> Value {
    let body = node.field("body").map(|block| module_block(&block));
    let Some(name) = node.field("name") else {
        return RawBuilder::new("ModuleDeclaration", node)
            .field("flags", flags)
            .modifiers(modifiers)
            .maybe("body", body)
            .build();
    };

    if name.kind().as_ref() == "string" {
        return RawBuilder::new("ModuleDeclaration", node)
            .field("flags", flags)
            .modifiers(modifiers)
            .field("name", string_literal(&name))
            .maybe("body", body)
            .build();
    }

    let text = name.text();
    let segments: Vec<&str> = text.split('.').map(str::trim).collect();
    let mut lowered = body;
    for (index, segment) in segments.iter().enumerate().rev() {
        let outer: &[&str] = if index == 0 { modifiers } else { &[] };
        lowered = Some(
            RawBuilder::new("ModuleDeclaration", node)
                .field("flags", flags)
                .modifiers(outer)
                .field("name", synthetic_identifier(&name, segment))
                .maybe("body", lowered)
                .build(),
        );
    }
    lowered.unwrap_or_else(|| opaque(node))
}

fn module_block<D: ast_grep_core::Doc>(block: &Node<D>) -> Value {
    RawBuilder::new("ModuleBlock", block)
        .field("statements", lower_statements(block))
        .build()
}

fn lower_function<D: ast_grep_core::Doc>(node: &Node<D>, modifiers: &[&str]) -> Value {
    let mut modifiers = modifiers.to_vec();
    if has_token(node, "async") {
        modifiers.push("AsyncKeyword");
    }
    RawBuilder::new("FunctionDeclaration", node)
        .modifiers(&modifiers)
        .flag("asteriskToken", "AsteriskToken", has_token(node, "*"))
        .maybe("name", node.field("name").map(|name| identifier(&name)))
        .non_empty("typeParameters", lower_type_parameters(node))
        .field("parameters", lower_parameters(node))
        .maybe("type", return_type(node))
        .build()
}

fn lower_class<D: ast_grep_core::Doc>(node: &Node<D>, modifiers: &[&str]) -> Value {
    let mut modifiers = modifiers.to_vec();
    if node.kind().as_ref() == "abstract_class_declaration" {
        modifiers.push("AbstractKeyword");
    }
    let members: Vec<Value> = node
        .field("body")
        .map(|body| {
            named_children(&body)
                .iter()
                .filter_map(|member| lower_class_member(member))
                .collect()
        })
        .unwrap_or_default();

    RawBuilder::new("ClassDeclaration", node)
        .modifiers(&modifiers)
        .maybe("name", node.field("name").map(|name| identifier(&name)))
        .non_empty("typeParameters", lower_type_parameters(node))
        .non_empty("heritageClauses", class_heritage(node))
        .field("members", members)
        .build()
}

fn class_heritage<D: ast_grep_core::Doc>(node: &Node<D>) -> Vec<Value> {
    let Some(heritage) = child_of_kind(node, &["class_heritage"]) else {
        return Vec::new();
    };
    named_children(&heritage)
        .iter()
        .filter_map(|clause| match clause.kind().as_ref() {
            "extends_clause" => {
                let mut types: Vec<Value> = Vec::new();
                for part in named_children(clause) {
                    if part.kind().as_ref() == "type_arguments" {
                        if let Some(Value::Object(last)) = types.last_mut() {
                            let arguments = named_children(&part).iter().map(|ty| lower_type(ty)).collect();
                            last.insert("typeArguments".to_string(), Value::Array(arguments));
                        }
                    } else {
                        types.push(
                            RawBuilder::new("ExpressionWithTypeArguments", &part)
                                .field("expression", lower_expression(&part))
                                .build(),
                        );
                    }
                }
                Some(heritage_clause(clause, "ExtendsKeyword", types))
            }
            "implements_clause" => {
                let types = named_children(clause).iter().map(|ty| lower_type(ty)).collect();
                Some(heritage_clause(clause, "ImplementsKeyword", types))
            }
            _ => None,
        })
        .collect()
}

fn heritage_clause<D: ast_grep_core::Doc>(clause: &Node<D>, token: &str, types: Vec<Value>) -> Value {
    RawBuilder::new("HeritageClause", clause)
        .field("token", token)
        .field("types", types)
        .build()
}

fn lower_class_member<D: ast_grep_core::Doc>(member: &Node<D>) -> Option<Value> {
    let lowered = match member.kind().as_ref() {
        "method_definition" | "method_signature" | "abstract_method_signature" => {
            let name = member.field("name");
            let is_constructor = name
                .as_ref()
                .is_some_and(|name| name.text().as_ref() == "constructor");
            let kind = if is_constructor {
                "Constructor"
            } else if has_token(member, "get") {
                "GetAccessor"
            } else if has_token(member, "set") {
                "SetAccessor"
            } else {
                "MethodDeclaration"
            };
            RawBuilder::new(kind, member)
                .modifiers(&member_modifiers(member))
                .maybe(
                    "name",
                    name.filter(|_| !is_constructor).map(|name| property_name(&name)),
                )
                .flag("questionToken", "QuestionToken", has_token(member, "?"))
                .non_empty("typeParameters", lower_type_parameters(member))
                .field("parameters", lower_parameters(member))
                .maybe("type", return_type(member))
                .build()
        }
        "public_field_definition" => RawBuilder::new("PropertyDeclaration", member)
            .modifiers(&member_modifiers(member))
            .maybe("name", member.field("name").map(|name| property_name(&name)))
            .flag("questionToken", "QuestionToken", has_token(member, "?"))
            .maybe(
                "type",
                member.field("type").and_then(|ty| lower_type_annotation(&ty)),
            )
            .maybe(
                "initializer",
                member.field("value").map(|value| lower_expression(&value)),
            )
            .build(),
        "decorator" => return None,
        _ => opaque(member),
    };
    Some(lowered)
}

fn lower_interface<D: ast_grep_core::Doc>(node: &Node<D>, modifiers: &[&str]) -> Value {
    let heritage = child_of_kind(node, &["extends_type_clause"])
        .map(|clause| {
            let types = named_children(&clause).iter().map(|ty| lower_type(ty)).collect();
            vec![heritage_clause(&clause, "ExtendsKeyword", types)]
        })
        .unwrap_or_default();

    RawBuilder::new("InterfaceDeclaration", node)
        .modifiers(modifiers)
        .maybe("name", node.field("name").map(|name| identifier(&name)))
        .non_empty("typeParameters", lower_type_parameters(node))
        .non_empty("heritageClauses", heritage)
        .field(
            "members",
            node.field("body")
                .map(|body| lower_type_members(&body))
                .unwrap_or_default(),
        )
        .build()
}

fn lower_enum<D: ast_grep_core::Doc>(node: &Node<D>, modifiers: &[&str]) -> Value {
    let mut modifiers = modifiers.to_vec();
    if has_token(node, "const") {
        modifiers.push("ConstKeyword");
    }
    let members: Vec<Value> = node
        .field("body")
        .map(|body| {
            named_children(&body)
                .iter()
                .map(|member| match member.kind().as_ref() {
                    "enum_assignment" => RawBuilder::new("EnumMember", member)
                        .maybe("name", member.field("name").map(|name| property_name(&name)))
                        .maybe(
                            "initializer",
                            member.field("value").map(|value| lower_expression(&value)),
                        )
                        .build(),
                    _ => RawBuilder::new("EnumMember", member)
                        .field("name", property_name(member))
                        .build(),
                })
                .collect()
        })
        .unwrap_or_default();

    RawBuilder::new("EnumDeclaration", node)
        .modifiers(&modifiers)
        .maybe("name", node.field("name").map(|name| identifier(&name)))
        .field("members", members)
        .build()
}

fn lower_variable_statement<D: ast_grep_core::Doc>(node: &Node<D>, modifiers: &[&str]) -> Value {
    let flags = if has_token(node, "const") {
        CONST_FLAGS
    } else if has_token(node, "let") {
        LET_FLAGS
    } else {
        0
    };
    let declarations: Vec<Value> = named_children(node)
        .iter()
        .filter(|child| child.kind().as_ref() == "variable_declarator")
        .map(|declarator| {
            RawBuilder::new("VariableDeclaration", declarator)
                .maybe("name", declarator.field("name").map(|name| binding_name(&name)))
                .maybe(
                    "type",
                    declarator
                        .field("type")
                        .and_then(|ty| lower_type_annotation(&ty)),
                )
                .maybe(
                    "initializer",
                    declarator.field("value").map(|value| lower_expression(&value)),
                )
                .build()
        })
        .collect();

    let list = RawBuilder::new("VariableDeclarationList", node)
        .field("flags", flags)
        .field("declarations", declarations)
        .build();
    RawBuilder::new("VariableStatement", node)
        .modifiers(modifiers)
        .field("declarationList", list)
        .build()
}

fn lower_import<D: ast_grep_core::Doc>(node: &Node<D>) -> Value {
    if let Some(clause) = child_of_kind(node, &["import_require_clause"]) {
        let reference = clause.field("source").map(|source| {
            RawBuilder::new("ExternalModuleReference", &source)
                .field("expression", string_literal(&source))
                .build()
        });
        return RawBuilder::new("ImportEqualsDeclaration", node)
            .maybe(
                "name",
                child_of_kind(&clause, &["identifier"]).map(|name| identifier(&name)),
            )
            .maybe("moduleReference", reference)
            .build();
    }

    RawBuilder::new("ImportDeclaration", node)
        .maybe(
            "importClause",
            child_of_kind(node, &["import_clause"]).map(|clause| import_clause(&clause)),
        )
        .maybe(
            "moduleSpecifier",
            node.field("source").map(|source| string_literal(&source)),
        )
        .build()
}

fn import_clause<D: ast_grep_core::Doc>(clause: &Node<D>) -> Value {
    let mut builder = RawBuilder::new("ImportClause", clause);
    for part in named_children(clause) {
        builder = match part.kind().as_ref() {
            "identifier" => builder.field("name", identifier(&part)),
            "namespace_import" => builder.field(
                "namedBindings",
                RawBuilder::new("NamespaceImport", &part)
                    .maybe(
                        "name",
                        child_of_kind(&part, &["identifier"]).map(|name| identifier(&name)),
                    )
                    .build(),
            ),
            "named_imports" => {
                let elements: Vec<Value> = named_children(&part)
                    .iter()
                    .filter(|specifier| specifier.kind().as_ref() == "import_specifier")
                    .map(import_specifier)
                    .collect();
                builder.field(
                    "namedBindings",
                    RawBuilder::new("NamedImports", &part)
                        .field("elements", elements)
                        .build(),
                )
            }
            _ => builder,
        };
    }
    builder.build()
}

fn import_specifier<D: ast_grep_core::Doc>(specifier: &Node<D>) -> Value {
    let name = specifier.field("name").map(|name| lower_expression(&name));
    match specifier.field("alias") {
        Some(alias) => RawBuilder::new("ImportSpecifier", specifier)
            .maybe("propertyName", name)
            .field("name", identifier(&alias))
            .build(),
        None => RawBuilder::new("ImportSpecifier", specifier)
            .maybe("name", name)
            .build(),
    }
}
