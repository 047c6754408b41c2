use std::path::PathBuf;

use anyhow::Context;
use tsdecl_config::TsdeclConfig;
use tsdecl_core::KindTable;
use tsdecl_parser::WalkOptions;

use crate::cli::GlobalFlags;

/// Resources shared by every command, resolved from config and flags.
#[derive(Debug)]
pub struct AppContext {
    pub kinds: KindTable,
    pub options: WalkOptions,
}

impl AppContext {
    /// Load layered configuration and apply command-line overrides.
    pub fn load(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let config = TsdeclConfig::load_with_dotenv().context("failed to load tsdecl configuration")?;
        super::warn_unconfigured(&config);
        Self::from_config(&config, flags)
    }

    pub fn from_config(config: &TsdeclConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let kinds = match kind_table_path(config, flags) {
            Some(path) => {
                let kinds = KindTable::load(&path)
                    .with_context(|| format!("failed to load kind table {}", path.display()))?;
                tracing::debug!(path = %path.display(), entries = kinds.len(), "loaded kind table");
                kinds
            }
            None => KindTable::new(),
        };

        let options = WalkOptions {
            namespace_flags: config.walk.namespace_flags.clone(),
            scope_mode: flags
                .namespace_scope
                .map_or(config.walk.namespace_scope, Into::into),
            max_depth: config.walk.max_depth,
        };

        Ok(Self { kinds, options })
    }
}

fn kind_table_path(config: &TsdeclConfig, flags: &GlobalFlags) -> Option<PathBuf> {
    flags
        .kind_table
        .as_deref()
        .map(PathBuf::from)
        .or_else(|| config.kinds.table_path())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tsdecl_config::KindsConfig;
    use tsdecl_core::ScopeMode;

    use super::*;
    use crate::cli::ScopeArg;

    #[test]
    fn defaults_map_to_walk_options() {
        let ctx = AppContext::from_config(&TsdeclConfig::default(), &GlobalFlags::default())
            .expect("context");
        assert_eq!(ctx.options, WalkOptions::default());
        assert!(ctx.kinds.is_empty());
    }

    #[test]
    fn scope_flag_overrides_config() {
        let mut config = TsdeclConfig::default();
        config.walk.namespace_scope = ScopeMode::Flat;
        config.walk.max_depth = 8;
        let flags = GlobalFlags {
            namespace_scope: Some(ScopeArg::Stack),
            ..GlobalFlags::default()
        };

        let ctx = AppContext::from_config(&config, &flags).expect("context");
        assert_eq!(ctx.options.scope_mode, ScopeMode::Stack);
        assert_eq!(ctx.options.max_depth, 8);
    }

    #[test]
    fn kind_table_flag_wins_over_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let flag_path = dir.path().join("flag.json");
        std::fs::write(&flag_path, r#"{ "FunctionDeclaration": 262 }"#).expect("write");

        let config = TsdeclConfig {
            kinds: KindsConfig {
                table_path: dir.path().join("missing.json").display().to_string(),
            },
            ..TsdeclConfig::default()
        };
        let flags = GlobalFlags {
            kind_table: Some(flag_path.display().to_string()),
            ..GlobalFlags::default()
        };

        let ctx = AppContext::from_config(&config, &flags).expect("context");
        assert_eq!(ctx.kinds.name_of(262), Some("FunctionDeclaration"));
    }

    #[test]
    fn missing_kind_table_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let flags = GlobalFlags {
            kind_table: Some(dir.path().join("nope.json").display().to_string()),
            ..GlobalFlags::default()
        };
        let err = AppContext::from_config(&TsdeclConfig::default(), &flags).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load kind table"));
    }
}
