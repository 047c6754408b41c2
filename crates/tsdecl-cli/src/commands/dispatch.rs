use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: &Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Tree(args) => commands::tree::handle(args, ctx, flags),
        Commands::Debug(args) => commands::debug::handle(args, ctx, flags),
        Commands::Members(args) => commands::members::handle(args, ctx, flags),
    }
}
