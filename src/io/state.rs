use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Persisted TUI state (written to .state.json)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Id of the item under the cursor when the TUI last exited
    #[serde(default)]
    pub cursor_id: Option<String>,
    /// Scroll offset
    #[serde(default)]
    pub scroll_offset: usize,
}

/// Read .state.json from the store directory
pub fn read_ui_state(store_dir: &Path) -> Option<UiState> {
    let path = store_dir.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json to the store directory
pub fn write_ui_state(store_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = store_dir.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}
