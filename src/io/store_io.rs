use std::fs;
use std::path::{Path, PathBuf};

use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::collection::Collection;
use crate::model::workspace::Workspace;

/// Why a durable record could not be turned into a collection
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no record at {0}")]
    Missing(PathBuf),
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed record at {path}: {source}")]
    Malformed {
        path: PathBuf,
        /// The raw bytes that failed to parse
        content: Vec<u8>,
        source: serde_json::Error,
    },
}

/// Error type for persisting the collection
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not serialize checklist: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Read and parse the record at `path`.
///
/// A blank file counts as an empty collection, the same as a record that was
/// never written. Anything else that fails to decode, invalid UTF-8
/// included, is `Malformed`. `Read` is left for real I/O failures.
pub fn read_collection(path: &Path) -> Result<Collection, LoadError> {
    let content = match fs::read(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(LoadError::Missing(path.to_path_buf()));
        }
        Err(e) => {
            return Err(LoadError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    if content.iter().all(u8::is_ascii_whitespace) {
        return Ok(Collection::new());
    }

    serde_json::from_slice(&content).map_err(|e| LoadError::Malformed {
        path: path.to_path_buf(),
        content,
        source: e,
    })
}

/// Load the collection, falling back to an empty one on any failure.
///
/// Discarded content is copied into the recovery log in `store_dir` so the
/// next persist does not lose it for good. Loading the same bad record again
/// does not add a second copy.
pub fn load_collection(store_dir: &Path, path: &Path) -> Collection {
    match read_collection(path) {
        Ok(collection) => collection,
        Err(LoadError::Missing(_)) => Collection::new(),
        Err(LoadError::Read { path, source }) => {
            log_discarded(
                store_dir,
                "unreadable record",
                vec![
                    ("Source".to_string(), file_label(&path)),
                    ("Error".to_string(), source.to_string()),
                ],
                String::new(),
            );
            Collection::new()
        }
        Err(LoadError::Malformed {
            path,
            content,
            source,
        }) => {
            let mut fields = vec![
                ("Source".to_string(), file_label(&path)),
                ("Error".to_string(), source.to_string()),
            ];
            let body = match String::from_utf8(content) {
                Ok(text) => text,
                Err(e) => {
                    fields.push(("Encoding".to_string(), "hex".to_string()));
                    hex_lines(e.as_bytes())
                }
            };
            log_discarded(store_dir, "discarded malformed record", fields, body);
            Collection::new()
        }
    }
}

/// Append a parser entry unless the newest entry already holds the same thing.
fn log_discarded(
    store_dir: &Path,
    description: &str,
    fields: Vec<(String, String)>,
    body: String,
) {
    let already_logged = recovery::read_recovery_entries(store_dir, Some(1))
        .first()
        .is_some_and(|newest| {
            newest.category == RecoveryCategory::Parser
                && newest.description == description
                && newest.fields == fields
                && newest.body.trim_end() == body.trim_end()
        });
    if already_logged {
        return;
    }

    recovery::log_recovery(
        store_dir,
        RecoveryEntry {
            timestamp: chrono::Utc::now(),
            category: RecoveryCategory::Parser,
            description: description.to_string(),
            fields,
            body,
        },
    );
}

/// Hex dump of `bytes`, 32 bytes per line
fn hex_lines(bytes: &[u8]) -> String {
    bytes
        .chunks(32)
        .map(hex::encode)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize the whole collection and overwrite the record.
pub fn persist_collection(
    store_dir: &Path,
    path: &Path,
    collection: &Collection,
) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(collection)?;
    if let Err(e) = recovery::atomic_write(path, content.as_bytes()) {
        recovery::log_recovery(
            store_dir,
            RecoveryEntry {
                timestamp: chrono::Utc::now(),
                category: RecoveryCategory::Write,
                description: "record write failed".to_string(),
                fields: vec![
                    ("Target".to_string(), file_label(path)),
                    ("Error".to_string(), e.to_string()),
                ],
                body: content,
            },
        );
        return Err(StoreError::Write {
            path: path.to_path_buf(),
            source: e,
        });
    }
    Ok(())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string()
}

/// Handle on one durable record inside a workspace
#[derive(Debug, Clone)]
pub struct Store {
    store_dir: PathBuf,
    record_path: PathBuf,
}

impl Store {
    pub fn new(store_dir: PathBuf, record_path: PathBuf) -> Self {
        Store {
            store_dir,
            record_path,
        }
    }

    pub fn for_workspace(workspace: &Workspace) -> Self {
        Store::new(workspace.store_dir.clone(), workspace.record_path())
    }

    pub fn store_dir(&self) -> &Path {
        &self.store_dir
    }

    pub fn record_path(&self) -> &Path {
        &self.record_path
    }

    pub fn load(&self) -> Collection {
        load_collection(&self.store_dir, &self.record_path)
    }

    pub fn persist(&self, collection: &Collection) -> Result<(), StoreError> {
        persist_collection(&self.store_dir, &self.record_path, collection)
    }
}
