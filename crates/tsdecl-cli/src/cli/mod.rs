use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat, ScopeArg};
pub use root_commands::Commands;

/// Top-level CLI parser for the `tsdecl` binary.
#[derive(Debug, Parser)]
#[command(
    name = "tsdecl",
    version,
    about = "tsdecl - declaration trees from TypeScript ASTs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, tree, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON kind table for numeric kinds (overrides kinds.table_path)
    #[arg(short, long, global = true)]
    pub kind_table: Option<String>,

    /// Namespace scope policy (overrides walk.namespace_scope)
    #[arg(long, global = true)]
    pub namespace_scope: Option<ScopeArg>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            kind_table: self.kind_table.clone(),
            namespace_scope: self.namespace_scope,
        }
    }
}
