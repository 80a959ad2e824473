use std::path::PathBuf;

use super::config::ChecklistConfig;

/// A discovered checklist workspace
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Directory containing `.checklist/`
    pub root: PathBuf,
    /// Path to the `.checklist/` directory
    pub store_dir: PathBuf,
    /// Parsed config.toml (defaults if absent)
    pub config: ChecklistConfig,
}

impl Workspace {
    /// Path of the durable record for the configured key
    pub fn record_path(&self) -> PathBuf {
        self.store_dir.join(format!("{}.json", self.config.storage.key))
    }
}
