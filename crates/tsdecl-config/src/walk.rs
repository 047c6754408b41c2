//! Tree walk configuration.

use serde::{Deserialize, Serialize};
use tsdecl_core::{DEFAULT_MAX_DEPTH, DEFAULT_NAMESPACE_FLAGS, ScopeMode};

use crate::ConfigError;

fn default_namespace_flags() -> Vec<i64> {
    DEFAULT_NAMESPACE_FLAGS.to_vec()
}

const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WalkConfig {
    /// Exact `flags` values that turn a module declaration into a namespace.
    #[serde(default = "default_namespace_flags")]
    pub namespace_flags: Vec<i64>,

    /// Whether leaving a namespace restores the enclosing one.
    #[serde(default)]
    pub namespace_scope: ScopeMode,

    /// Module/namespace bodies nested deeper than this are not descended into.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl WalkConfig {
    /// Check field values that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace_flags.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "walk.namespace_flags".to_string(),
                reason: "at least one flag value is required".to_string(),
            });
        }
        if self.max_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "walk.max_depth".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            namespace_flags: default_namespace_flags(),
            namespace_scope: ScopeMode::default(),
            max_depth: default_max_depth(),
        }
    }
}
