use tsdecl_parser::normalize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DebugArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tsdecl debug`.
pub fn handle(args: &DebugArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let ast = super::load_ast(&args.path)?;
    output(&normalize(&ast, &ctx.kinds), flags.format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tsdecl_core::KindTable;

    use super::*;

    #[test]
    fn normalized_json_ast_drops_metadata() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ast.json");
        std::fs::write(
            &path,
            r#"{ "kind": 80, "pos": 0, "end": 3, "flags": 0, "escapedText": "foo" }"#,
        )
        .expect("write");

        let mut kinds = KindTable::new();
        kinds.insert(80, "Identifier");
        let ast = crate::commands::load_ast(&path).expect("ast");

        assert_eq!(
            normalize(&ast, &kinds).to_value(),
            json!({ "kind": "Identifier", "escapedText": "foo" })
        );
    }
}
