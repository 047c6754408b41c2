//! # tsdecl-config
//!
//! Layered configuration loading for tsdecl using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TSDECL_*` prefix, `__` as separator)
//! 2. Project-level `.tsdecl/config.toml`
//! 3. User-level `~/.config/tsdecl/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TSDECL_WALK__MAX_DEPTH` -> `walk.max_depth`,
//! `TSDECL_KINDS__TABLE_PATH` -> `kinds.table_path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tsdecl_config::TsdeclConfig;
//!
//! let config = TsdeclConfig::load_with_dotenv().expect("config");
//! println!("namespace scope: {}", config.walk.namespace_scope);
//! ```

mod error;
mod kinds;
mod walk;

pub use error::ConfigError;
pub use kinds::KindsConfig;
pub use walk::WalkConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TsdeclConfig {
    #[serde(default)]
    pub walk: WalkConfig,
    #[serde(default)]
    pub kinds: KindsConfig,
}

impl TsdeclConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a configuration from an arbitrary figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.walk.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".tsdecl/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("TSDECL_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tsdecl").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use tsdecl_core::ScopeMode;

    use super::*;

    #[test]
    fn default_config_loads() {
        let config = TsdeclConfig::default();
        assert!(!config.kinds.is_configured());
        assert_eq!(config.walk.namespace_scope, ScopeMode::Flat);
    }

    #[test]
    fn defaults_extract_from_serialized_provider() {
        let figment = Figment::from(Serialized::defaults(TsdeclConfig::default()));
        let config = TsdeclConfig::from_figment(&figment).expect("should extract defaults");
        assert_eq!(config.walk.max_depth, 256);
        assert_eq!(config.walk.namespace_flags, vec![16, 4098]);
    }
}
