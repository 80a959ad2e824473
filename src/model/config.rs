use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from .checklist/config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecklistConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Record key; items live in `.checklist/<key>.json`
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig { key: default_key() }
    }
}

/// Default: see the template in cli/handlers/init.rs
fn default_key() -> String {
    "todos".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub show_key_hints: bool,
    /// Hex overrides for theme colors, keyed by theme slot name
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
