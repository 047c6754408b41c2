use clap::ValueEnum;
use tsdecl_core::ScopeMode;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Tree,
    Raw,
}

/// Namespace scope policy as spelled on the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ScopeArg {
    Flat,
    Stack,
}

impl From<ScopeArg> for ScopeMode {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Flat => Self::Flat,
            ScopeArg::Stack => Self::Stack,
        }
    }
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug, Default)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub kind_table: Option<String>,
    pub namespace_scope: Option<ScopeArg>,
}
