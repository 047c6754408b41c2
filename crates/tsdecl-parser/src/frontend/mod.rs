//! TypeScript and JavaScript front-end.
//!
//! Parses source with ast-grep's tree-sitter grammars and lowers the concrete
//! syntax tree into the raw AST shape the walker consumes: compiler-style
//! symbolic kinds, `pos`/`end` byte offsets, and the field names the name
//! resolver reads (`name`, `type`, `moduleSpecifier`, `expression`,
//! `declarationList`, `statements`, `members`, `body`, `flags`).

mod helpers;
mod statements;
mod types;

use std::path::Path;

use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::SupportLang;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ParserError;

pub use statements::NAMESPACE_FLAGS;

/// The concrete AST tree type returned by `parse_source`.
pub type AstTree = ast_grep_core::AstGrep<StrDoc<SupportLang>>;

/// Detect the language from a file path extension.
///
/// Returns `None` for anything outside the TypeScript/JavaScript family.
#[must_use]
pub fn detect_language(file_path: &str) -> Option<SupportLang> {
    let ext = file_path.rsplit('.').next()?;
    match ext {
        "ts" | "mts" | "cts" => Some(SupportLang::TypeScript),
        "tsx" => Some(SupportLang::Tsx),
        "js" | "mjs" | "cjs" | "jsx" => Some(SupportLang::JavaScript),
        _ => None,
    }
}

/// Parse source code into an ast-grep tree for the given language.
#[must_use]
pub fn parse_source(source: &str, lang: SupportLang) -> AstTree {
    use ast_grep_language::LanguageExt;
    lang.ast_grep(source)
}

/// Parse `source` and lower it into a raw `SourceFile` node.
#[must_use]
pub fn lower_source(source: &str, lang: SupportLang, file_name: Option<&str>) -> Value {
    let tree = parse_source(source, lang);
    let lowered = statements::lower_program(&tree.root(), file_name);
    debug!(
        ?lang,
        statements = lowered["statements"].as_array().map_or(0, Vec::len),
        "lowered source"
    );
    lowered
}

/// Parse a serialized raw AST.
///
/// Compiler ASTs nest one level per operand of a binary chain, so there is no
/// recursion limit; the stack grows on the heap instead.
///
/// # Errors
/// Returns `ParserError::Json` for malformed JSON or trailing input.
pub fn parse_json_ast(text: &str) -> Result<Value, ParserError> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let ast = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(ast)
}

/// Load a raw AST from `path`.
///
/// `.json` files are read as an already-serialized raw AST; recognised source
/// extensions go through [`lower_source`].
///
/// # Errors
/// Returns `ParserError::Io` if the file cannot be read, `ParserError::Json`
/// or `ParserError::InvalidAst` for a malformed JSON AST, and
/// `ParserError::UnsupportedLanguage` for any other extension.
pub fn load_ast(path: &Path) -> Result<Value, ParserError> {
    let display = path.display().to_string();
    if path.extension().is_some_and(|ext| ext == "json") {
        let text = std::fs::read_to_string(path)?;
        let ast = parse_json_ast(&text)?;
        if !ast.is_object() {
            return Err(ParserError::InvalidAst(format!(
                "{display}: expected an object at the root"
            )));
        }
        return Ok(ast);
    }

    let lang = detect_language(&display).ok_or_else(|| ParserError::UnsupportedLanguage(display.clone()))?;
    let source = std::fs::read_to_string(path)?;
    let file_name = path.file_name().and_then(|name| name.to_str());
    Ok(lower_source(&source, lang, file_name))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn lower(source: &str) -> Value {
        lower_source(source, SupportLang::TypeScript, None)
    }

    fn statements(source: &str) -> Vec<Value> {
        lower(source)["statements"].as_array().cloned().unwrap_or_default()
    }

    fn kinds(source: &str) -> Vec<String> {
        statements(source)
            .iter()
            .map(|s| s["kind"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn detect_typescript_family() {
        assert_eq!(detect_language("index.ts"), Some(SupportLang::TypeScript));
        assert_eq!(detect_language("lib.d.ts"), Some(SupportLang::TypeScript));
        assert_eq!(detect_language("mod.mts"), Some(SupportLang::TypeScript));
        assert_eq!(detect_language("app.tsx"), Some(SupportLang::Tsx));
        assert_eq!(detect_language("util.js"), Some(SupportLang::JavaScript));
        assert_eq!(detect_language("util.cjs"), Some(SupportLang::JavaScript));
    }

    #[test]
    fn detect_other_languages() {
        assert_eq!(detect_language("main.rs"), None);
        assert_eq!(detect_language("README"), None);
    }

    #[test]
    fn source_file_carries_positions_and_file_name() {
        let ast = lower_source("let a = 1;", SupportLang::TypeScript, Some("a.ts"));
        assert_eq!(ast["kind"], json!("SourceFile"));
        assert_eq!(ast["pos"], json!(0));
        assert_eq!(ast["end"], json!(10));
        assert_eq!(ast["fileName"], json!("a.ts"));
    }

    #[test]
    fn declaration_kinds() {
        let source = r#"
            import { a } from "./a";
            import fs = require("fs");
            function f(): void {}
            class C {}
            interface I {}
            type T = string;
            enum E { A }
            const x = 1;
        "#;
        assert_eq!(
            kinds(source),
            vec![
                "ImportDeclaration",
                "ImportEqualsDeclaration",
                "FunctionDeclaration",
                "ClassDeclaration",
                "InterfaceDeclaration",
                "TypeAliasDeclaration",
                "EnumDeclaration",
                "VariableStatement",
            ]
        );
    }

    #[test]
    fn exports_unwrap_to_their_declaration() {
        let statements = statements("export function f() {}\nexport default class Widget {}");
        assert_eq!(statements[0]["kind"], json!("FunctionDeclaration"));
        assert_eq!(statements[0]["modifiers"], json!([{ "kind": "ExportKeyword" }]));
        assert_eq!(statements[1]["kind"], json!("ClassDeclaration"));
        assert_eq!(statements[1]["name"]["text"], json!("Widget"));
    }

    #[test]
    fn export_assignments() {
        let statements = statements("export = lib.api;\nexport default main;");
        assert_eq!(statements[0]["kind"], json!("ExportAssignment"));
        assert_eq!(statements[0]["isExportEquals"], json!(true));
        assert_eq!(statements[0]["expression"]["kind"], json!("PropertyAccessExpression"));
        assert_eq!(statements[1]["kind"], json!("ExportAssignment"));
        assert_eq!(statements[1]["isExportEquals"], json!(false));
        assert_eq!(statements[1]["expression"]["text"], json!("main"));
    }

    #[test]
    fn namespaces_are_flagged() {
        let statements = statements("namespace NS { function bar() {} }");
        let ns = &statements[0];
        assert_eq!(ns["kind"], json!("ModuleDeclaration"));
        assert_eq!(ns["flags"], json!(NAMESPACE_FLAGS));
        assert_eq!(ns["name"]["text"], json!("NS"));
        assert_eq!(ns["body"]["kind"], json!("ModuleBlock"));
        assert_eq!(ns["body"]["statements"][0]["kind"], json!("FunctionDeclaration"));
    }

    #[test]
    fn dotted_namespaces_nest() {
        let statements = statements("declare namespace A.B { }");
        let outer = &statements[0];
        assert_eq!(outer["name"]["text"], json!("A"));
        assert_eq!(outer["body"]["kind"], json!("ModuleDeclaration"));
        assert_eq!(outer["body"]["name"]["text"], json!("B"));
        assert_eq!(outer["body"]["body"]["kind"], json!("ModuleBlock"));
        assert_eq!(outer["modifiers"], json!([{ "kind": "DeclareKeyword" }]));
    }

    #[test]
    fn ambient_modules_are_not_namespaces() {
        let statements = statements("declare module \"lib\" { export const v: number; }");
        let module = &statements[0];
        assert_eq!(module["kind"], json!("ModuleDeclaration"));
        assert_eq!(module["flags"], json!(0));
        assert_eq!(module["name"]["kind"], json!("StringLiteral"));
        assert_eq!(module["name"]["text"], json!("lib"));
    }

    #[test]
    fn variable_statements_keep_every_declarator() {
        let statements = statements("let x: Foo, y = 2;");
        let list = &statements[0]["declarationList"];
        assert_eq!(list["flags"], json!(1));
        let declarations = list["declarations"].as_array().expect("declarations");
        assert_eq!(declarations.len(), 2);
        assert_eq!(declarations[0]["name"]["text"], json!("x"));
        assert_eq!(declarations[0]["type"]["typeName"]["text"], json!("Foo"));
        assert_eq!(declarations[1]["initializer"]["kind"], json!("NumericLiteral"));
    }

    #[test]
    fn imports_carry_their_specifier() {
        let statements = statements("import * as path from 'node:path';\nimport def, { a as b } from \"m\";");
        assert_eq!(statements[0]["moduleSpecifier"]["text"], json!("node:path"));
        assert_eq!(
            statements[0]["importClause"]["namedBindings"]["kind"],
            json!("NamespaceImport")
        );
        let clause = &statements[1]["importClause"];
        assert_eq!(clause["name"]["text"], json!("def"));
        let element = &clause["namedBindings"]["elements"][0];
        assert_eq!(element["propertyName"]["text"], json!("a"));
        assert_eq!(element["name"]["text"], json!("b"));
    }

    #[test]
    fn class_members() {
        let statements = statements(
            "abstract class Shape<T> extends Base<T> implements Named {\n  constructor(private id: string) { super(); }\n  name?: string;\n  abstract area(): number;\n  get size() { return 1; }\n}",
        );
        let class = &statements[0];
        assert_eq!(class["modifiers"], json!([{ "kind": "AbstractKeyword" }]));
        let members: Vec<&str> = class["members"]
            .as_array()
            .expect("members")
            .iter()
            .map(|m| m["kind"].as_str().unwrap_or_default())
            .collect();
        assert_eq!(
            members,
            vec!["Constructor", "PropertyDeclaration", "MethodDeclaration", "GetAccessor"]
        );
        assert_eq!(class["heritageClauses"][0]["token"], json!("ExtendsKeyword"));
        assert_eq!(class["heritageClauses"][1]["token"], json!("ImplementsKeyword"));
    }

    #[test]
    fn interface_members() {
        let statements = statements("interface I { a: string; b?(x: number): void; [k: string]: any }");
        let members = statements[0]["members"].as_array().cloned().unwrap_or_default();
        assert_eq!(members[0]["kind"], json!("PropertySignature"));
        assert_eq!(members[1]["kind"], json!("MethodSignature"));
        assert_eq!(members[1]["questionToken"], json!({ "kind": "QuestionToken" }));
        assert_eq!(members[2]["kind"], json!("IndexSignature"));
    }

    #[test]
    fn load_ast_reads_json_and_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let json_path = dir.path().join("ast.json");
        std::fs::write(&json_path, r#"{ "kind": "SourceFile", "statements": [] }"#).expect("write");
        assert_eq!(
            load_ast(&json_path).expect("json ast")["kind"],
            json!("SourceFile")
        );

        let ts_path = dir.path().join("index.ts");
        std::fs::write(&ts_path, "function f() {}").expect("write");
        let ast = load_ast(&ts_path).expect("ts ast");
        assert_eq!(ast["fileName"], json!("index.ts"));
        assert_eq!(ast["statements"][0]["kind"], json!("FunctionDeclaration"));
    }

    fn binary_chain(terms: usize) -> Value {
        let mut expression = json!({ "kind": "Identifier", "text": "a0" });
        for i in 1..terms {
            expression = json!({
                "kind": "BinaryExpression",
                "left": expression,
                "operatorToken": { "kind": "PlusToken" },
                "right": { "kind": "Identifier", "text": format!("a{i}") }
            });
        }
        expression
    }

    #[test]
    fn load_ast_reads_json_nested_past_serde_default() {
        let ast = json!({
            "kind": "SourceFile",
            "statements": [
                { "kind": "FunctionDeclaration", "name": { "kind": "Identifier", "text": "foo" } },
                { "kind": "ExpressionStatement", "expression": binary_chain(300) }
            ]
        });
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("deep.json");
        std::fs::write(&path, serde_json::to_string(&ast).expect("serialize")).expect("write");

        let loaded = load_ast(&path).expect("deep json ast");
        assert_eq!(loaded, ast);

        let root = crate::walk_tree(&loaded);
        assert_eq!(root.keys().collect::<Vec<_>>(), vec!["foo"]);
        let normalized = crate::normalize(&loaded, &tsdecl_core::KindTable::new());
        assert!(!normalized.contains_key_deep("pos"));
    }

    #[test]
    fn parse_json_ast_rejects_trailing_input() {
        assert!(matches!(
            parse_json_ast(r#"{ "kind": "SourceFile" } {"#),
            Err(ParserError::Json(_))
        ));
    }

    fn nested_namespaces(levels: usize) -> String {
        let mut source = String::new();
        for i in 0..levels {
            source.push_str(&format!("namespace N{i} {{ "));
        }
        source.push_str("function f() {}");
        source.push_str(&" }".repeat(levels));
        source
    }

    fn namespace_depth(root: &tsdecl_core::ContextNode<'_>) -> usize {
        let mut depth = 0;
        let mut current = root;
        while let Some(next) = current
            .children()
            .find_map(|(_, child)| child.as_context())
        {
            depth += 1;
            current = next;
        }
        depth
    }

    #[test]
    fn lowers_namespaces_nested_past_the_walk_limit() {
        let ast = lower(&nested_namespaces(300));

        let mut body = &ast["statements"][0];
        for _ in 1..300 {
            body = &body["body"]["statements"][0];
        }
        assert_eq!(body["name"]["text"], json!("N299"));
        assert_eq!(body["body"]["statements"][0]["kind"], json!("FunctionDeclaration"));

        let root = crate::walk_tree(&ast);
        assert_eq!(namespace_depth(&root), crate::walker::DEFAULT_MAX_DEPTH + 1);
    }

    #[test]
    fn lowers_thousands_of_nested_namespaces_on_a_main_thread_stack() {
        let handle = std::thread::Builder::new()
            .stack_size(8 * 1024 * 1024)
            .spawn(|| {
                let ast = lower(&nested_namespaces(2000));
                let root = crate::walk_tree(&ast);
                namespace_depth(&root)
            })
            .expect("spawn");
        assert_eq!(handle.join().expect("no overflow"), crate::walker::DEFAULT_MAX_DEPTH + 1);
    }

    #[test]
    fn load_ast_errors() {
        let dir = tempfile::tempdir().expect("tempdir");
        let py = dir.path().join("main.py");
        std::fs::write(&py, "x = 1").expect("write");
        assert!(matches!(load_ast(&py), Err(ParserError::UnsupportedLanguage(_))));

        let array = dir.path().join("array.json");
        std::fs::write(&array, "[1, 2]").expect("write");
        assert!(matches!(load_ast(&array), Err(ParserError::InvalidAst(_))));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{").expect("write");
        assert!(matches!(load_ast(&broken), Err(ParserError::Json(_))));

        let missing = dir.path().join("missing.ts");
        assert!(matches!(load_ast(&missing), Err(ParserError::Io(_))));
    }
}
