use std::fs;

use crate::cli::commands::InitArgs;
use crate::io::config_io::validate_key;
use crate::io::workspace_io::{self, STORE_DIR_NAME};

const CONFIG_TOML_TEMPLATE: &str = r##"[storage]
# Items are stored in .checklist/<key>.json
key = "{key}"

# --- UI Customization ---
# Uncomment and edit to override defaults.

[ui]
# show_key_hints = false
#
# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#7D78BF"
# done = "#44FF88"
"##;

fn render_config_toml(key: &str) -> String {
    CONFIG_TOML_TEMPLATE.replace("{key}", key)
}

pub fn cmd_init(args: InitArgs, project_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let root = match project_dir {
        Some(dir) => std::path::PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let store_dir = root.join(STORE_DIR_NAME);
    let config_path = store_dir.join("config.toml");

    if config_path.exists() && !args.force {
        return Err("checklist workspace already exists in ./.checklist/ (use --force to overwrite config)".into());
    }

    if let Some(parent) = root.parent()
        && let Ok(parent_root) = workspace_io::discover_workspace(parent)
    {
        eprintln!(
            "Note: parent workspace found at {}/",
            parent_root.join(STORE_DIR_NAME).display()
        );
        eprintln!("Creating new workspace in ./{}/", STORE_DIR_NAME);
    }

    let key = args.key.unwrap_or_else(|| "todos".to_string());
    validate_key(&key)?;

    fs::create_dir_all(&store_dir)?;
    fs::write(&config_path, render_config_toml(&key))?;

    println!("Initialized checklist in {}/", store_dir.display());
    println!("  storage: {}.json", key);
    Ok(())
}
