use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Build and print the declaration tree of a file.
    Tree(TreeArgs),
    /// Print the normalized AST of a file.
    Debug(DebugArgs),
    /// Print the normalized members of a top-level class or interface.
    Members(MembersArgs),
}

#[derive(Clone, Debug, Args)]
pub struct TreeArgs {
    /// Source file, or a `.json` raw AST
    pub path: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct DebugArgs {
    /// Source file, or a `.json` raw AST
    pub path: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct MembersArgs {
    /// Source file, or a `.json` raw AST
    pub path: PathBuf,

    /// Name of the class or interface
    pub name: String,
}
