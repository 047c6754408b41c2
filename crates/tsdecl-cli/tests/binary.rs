use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn tsdecl(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tsdecl"))
        .args(args)
        .current_dir(dir)
        .env_remove("TSDECL_LOG")
        .env_remove("TSDECL_WALK__NAMESPACE_SCOPE")
        .env_remove("TSDECL_KINDS__TABLE_PATH")
        .output()
        .expect("tsdecl should run")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn tree_of_a_declaration_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("api.d.ts"),
        "export function foo(): void;\ndeclare namespace NS { const bar: string; }\n",
    )
    .expect("write");

    let output = tsdecl(dir.path(), &["--format", "raw", "tree", "api.d.ts"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let tree = stdout_json(&output);
    assert_eq!(
        tree["children"]["foo"],
        json!({ "kind": "property", "name": "foo", "syntax": "FunctionDeclaration" })
    );
    assert_eq!(tree["children"]["namespaceNS"]["kind"], json!("namespace"));
}

#[test]
fn numeric_json_ast_with_kind_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("kinds.json"),
        r#"{ "80": "Identifier", "262": "FunctionDeclaration", "307": "SourceFile" }"#,
    )
    .expect("write");
    std::fs::write(
        dir.path().join("ast.json"),
        r#"{ "kind": 307, "statements": [{ "kind": 262, "name": { "kind": 80, "escapedText": "run" } }] }"#,
    )
    .expect("write");

    let output = tsdecl(dir.path(), &["tree", "ast.json", "--kind-table", "kinds.json"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        stdout_json(&output)["children"]["run"]["syntax"],
        json!("FunctionDeclaration")
    );
}

#[test]
fn debug_prints_normalized_ast() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("a.ts"), "let x = 1;").expect("write");

    let output = tsdecl(dir.path(), &["debug", "a.ts"]);

    assert!(output.status.success());
    let ast = stdout_json(&output);
    assert_eq!(ast["kind"], json!("SourceFile"));
    assert!(ast.get("pos").is_none());
}

#[test]
fn members_of_a_missing_declaration_fail() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("a.ts"), "interface Shown { a: string }").expect("write");

    let output = tsdecl(dir.path(), &["members", "a.ts", "Hidden"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("tsdecl error:"), "stderr: {stderr}");
    assert!(stderr.contains("Hidden"));
}

#[test]
fn unreadable_input_fails_with_context() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = tsdecl(dir.path(), &["tree", "missing.ts"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load AST from missing.ts"), "stderr: {stderr}");
}
