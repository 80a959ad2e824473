use std::fs;
use std::path::Path;

use crate::io::workspace_io::WorkspaceError;
use crate::model::config::ChecklistConfig;

/// Read `config.toml` from the store directory. A missing file yields defaults.
pub fn read_config(store_dir: &Path) -> Result<ChecklistConfig, WorkspaceError> {
    let config_path = store_dir.join("config.toml");
    let config_text = match fs::read_to_string(&config_path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(WorkspaceError::ReadError {
                path: config_path,
                source: e,
            });
        }
    };
    let config: ChecklistConfig = toml::from_str(&config_text)?;
    validate_key(&config.storage.key)?;
    Ok(config)
}

/// Storage keys become file names, so keep them to a safe character set.
pub fn validate_key(key: &str) -> Result<(), WorkspaceError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(WorkspaceError::InvalidKey(key.to_string()))
    }
}
