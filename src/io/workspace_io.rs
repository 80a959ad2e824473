use std::path::{Path, PathBuf};

use crate::io::config_io;
use crate::model::workspace::Workspace;

/// Name of the directory that marks a checklist workspace
pub const STORE_DIR_NAME: &str = ".checklist";

/// Error type for workspace discovery and config loading
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("not a checklist workspace: no .checklist/ directory found (run `ck init`)")]
    NotAWorkspace,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("invalid storage key \"{0}\": use letters, digits, '-' or '_'")]
    InvalidKey(String),
    #[error("cannot resolve -C path '{dir}': {source}")]
    BadProjectDir {
        dir: String,
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Resolve the starting directory: `-C` if given, else the current directory.
///
/// The `-C` path is canonicalized so relative paths like `.` can still walk up.
pub fn resolve_start_dir(project_dir: Option<&str>) -> Result<PathBuf, WorkspaceError> {
    match project_dir {
        Some(dir) => std::fs::canonicalize(dir).map_err(|e| WorkspaceError::BadProjectDir {
            dir: dir.to_string(),
            source: e,
        }),
        None => Ok(std::env::current_dir()?),
    }
}

/// Discover the workspace root by walking up from the given directory,
/// looking for a `.checklist/` subdirectory.
pub fn discover_workspace(start: &Path) -> Result<PathBuf, WorkspaceError> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(STORE_DIR_NAME).is_dir() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(WorkspaceError::NotAWorkspace);
        }
    }
}

/// Load the workspace rooted at `root`.
pub fn load_workspace(root: &Path) -> Result<Workspace, WorkspaceError> {
    let store_dir = root.join(STORE_DIR_NAME);
    if !store_dir.is_dir() {
        return Err(WorkspaceError::NotAWorkspace);
    }
    let config = config_io::read_config(&store_dir)?;
    Ok(Workspace {
        root: root.to_path_buf(),
        store_dir,
        config,
    })
}

/// Discover from `start` and load.
pub fn open_workspace(start: &Path) -> Result<Workspace, WorkspaceError> {
    let root = discover_workspace(start)?;
    load_workspace(&root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_workspace(dir: &Path, config: &str) {
        let store_dir = dir.join(STORE_DIR_NAME);
        fs::create_dir_all(&store_dir).unwrap();
        fs::write(store_dir.join("config.toml"), config).unwrap();
    }

    #[test]
    fn start_dir_is_absolute_and_walks_up() {
        let tmp = TempDir::new().unwrap();
        create_test_workspace(tmp.path(), "");
        let sub = tmp.path().join("a/b");
        fs::create_dir_all(&sub).unwrap();

        let dotted = sub.join("..").join(".");
        let start = resolve_start_dir(dotted.to_str()).unwrap();
        assert_eq!(start, fs::canonicalize(tmp.path().join("a")).unwrap());
        assert_eq!(
            discover_workspace(&start).unwrap(),
            fs::canonicalize(tmp.path()).unwrap()
        );

        assert!(resolve_start_dir(Some(".")).unwrap().is_absolute());
    }

    #[test]
    fn missing_start_dir_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");
        let err = resolve_start_dir(missing.to_str()).unwrap_err();
        assert!(matches!(err, WorkspaceError::BadProjectDir { .. }));
    }

    #[test]
    fn discover_from_root_and_subdirectory() {
        let tmp = TempDir::new().unwrap();
        create_test_workspace(tmp.path(), "");

        let root = discover_workspace(tmp.path()).unwrap();
        assert_eq!(root, tmp.path());

        let sub = tmp.path().join("a/b");
        fs::create_dir_all(&sub).unwrap();
        let root = discover_workspace(&sub).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn discover_not_found() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(
            discover_workspace(tmp.path()),
            Err(WorkspaceError::NotAWorkspace)
        ));
    }

    #[test]
    fn load_uses_configured_key() {
        let tmp = TempDir::new().unwrap();
        create_test_workspace(tmp.path(), "[storage]\nkey = \"groceries\"\n");

        let ws = open_workspace(tmp.path()).unwrap();
        assert_eq!(ws.config.storage.key, "groceries");
        assert_eq!(
            ws.record_path(),
            tmp.path().join(".checklist/groceries.json")
        );
    }

    #[test]
    fn load_without_config_file_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join(STORE_DIR_NAME)).unwrap();

        let ws = load_workspace(tmp.path()).unwrap();
        assert_eq!(ws.config.storage.key, "todos");
    }

    #[test]
    fn load_rejects_path_like_key() {
        let tmp = TempDir::new().unwrap();
        create_test_workspace(tmp.path(), "[storage]\nkey = \"../escape\"\n");
        assert!(matches!(
            load_workspace(tmp.path()),
            Err(WorkspaceError::InvalidKey(_))
        ));
    }
}
