//! Kind table configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct KindsConfig {
    /// Path to a JSON kind table. Empty means symbolic kinds only.
    #[serde(default)]
    pub table_path: String,
}

impl KindsConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.table_path.is_empty()
    }

    #[must_use]
    pub fn table_path(&self) -> Option<PathBuf> {
        self.is_configured().then(|| PathBuf::from(&self.table_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_by_default() {
        let config = KindsConfig::default();
        assert!(!config.is_configured());
        assert!(config.table_path().is_none());
    }

    #[test]
    fn configured_path_is_exposed() {
        let config = KindsConfig {
            table_path: "kinds.json".to_string(),
        };
        assert_eq!(config.table_path(), Some(PathBuf::from("kinds.json")));
    }
}
