use anyhow::bail;
use serde_json::Value;
use tsdecl_core::RawNode;
use tsdecl_parser::{Normalizer, find_members};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MembersArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `tsdecl members`.
pub fn handle(args: &MembersArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let ast = super::load_ast(&args.path)?;
    let Some(members) = normalized_members(&ast, &args.name, ctx) else {
        bail!(
            "no top-level class or interface named '{}' with members in {}",
            args.name,
            args.path.display()
        );
    };
    output(&members, flags.format)
}

fn normalized_members(ast: &Value, name: &str, ctx: &AppContext) -> Option<Vec<Value>> {
    let members = find_members(RawNode::new(ast), name, &ctx.kinds)?;
    let normalizer = Normalizer::new(&ctx.kinds);
    Some(
        members
            .iter()
            .map(|member| normalizer.normalize_value(member).to_value())
            .collect(),
    )
}
