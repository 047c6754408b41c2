use serde_json::Value;
use tsdecl_parser::{SourcePrinter, TreeWalker};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TreeArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tsdecl tree`.
pub fn handle(args: &TreeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let ast = super::load_ast(&args.path)?;
    output(&build(&ast, ctx)?, flags.format)
}

fn build(ast: &Value, ctx: &AppContext) -> anyhow::Result<Value> {
    let mut walker = TreeWalker::new(&ctx.kinds, &SourcePrinter, ctx.options.clone());
    let root = walker.walk(ast);
    tracing::debug!(
        declarations = root.descendant_count(),
        namespace = walker.namespace().current().unwrap_or("-"),
        "built declaration tree"
    );
    Ok(serde_json::to_value(&root)?)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tsdecl_config::TsdeclConfig;

    use super::*;

    fn ctx() -> AppContext {
        AppContext::from_config(&TsdeclConfig::default(), &GlobalFlags::default()).expect("context")
    }

    #[test]
    fn builds_tree_from_source_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("lib.d.ts");
        std::fs::write(&path, "declare namespace NS { function bar(): void; }\nexport const x: number;")
            .expect("write");

        let ast = crate::commands::load_ast(&path).expect("ast");
        let tree = build(&ast, &ctx()).expect("tree");

        assert_eq!(tree["name"], json!("root"));
        assert_eq!(
            tree["children"]["namespaceNS"]["children"]["bar"]["syntax"],
            json!("FunctionDeclaration")
        );
        assert_eq!(tree["children"]["x: number"]["kind"], json!("variable"));
    }

    #[test]
    fn builds_tree_from_json_ast() {
        let ast = json!({
            "kind": "SourceFile",
            "statements": [{ "kind": "FunctionDeclaration", "name": { "text": "foo" } }]
        });
        let tree = build(&ast, &ctx()).expect("tree");
        assert_eq!(
            tree["children"],
            json!({ "foo": { "kind": "property", "name": "foo", "syntax": "FunctionDeclaration" } })
        );
    }

    #[test]
    fn unsupported_files_report_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").expect("write");

        let err = crate::commands::load_ast(&path).unwrap_err();
        assert!(format!("{err:#}").contains("notes.txt"));
    }
}
