//! Environment variables override TOML and defaults.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use tsdecl_config::TsdeclConfig;
use tsdecl_core::ScopeMode;

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.set_env("TSDECL_WALK__MAX_DEPTH", "8");

        jail.create_file(
            "config.toml",
            r#"
[walk]
max_depth = 64
namespace_scope = "stack"
"#,
        )?;

        let config: TsdeclConfig = Figment::from(Serialized::defaults(TsdeclConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("TSDECL_").split("__"))
            .extract()?;

        // Env should win over TOML
        assert_eq!(config.walk.max_depth, 8);
        // TOML value not overridden by env should remain
        assert_eq!(config.walk.namespace_scope, ScopeMode::Stack);
        Ok(())
    });
}

#[test]
fn env_var_overrides_default() {
    Jail::expect_with(|jail| {
        jail.set_env("TSDECL_KINDS__TABLE_PATH", "/tmp/kinds.json");
        jail.set_env("TSDECL_WALK__NAMESPACE_SCOPE", "stack");

        let config = TsdeclConfig::from_figment(&TsdeclConfig::figment())
            .expect("env config should load");

        assert_eq!(config.kinds.table_path, "/tmp/kinds.json");
        assert_eq!(config.walk.namespace_scope, ScopeMode::Stack);
        Ok(())
    });
}
