use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

/// Size at which the oldest entries get trimmed on the next append (1 MB).
const MAX_LOG_SIZE: u64 = 1_048_576;

/// Header written at the top of a new recovery log.
const FILE_HEADER: &str = "\
<!-- checklist recovery log: append-only
     Holds data that could not be read or saved normally.
     View with: ck recovery
     Safe to delete if empty or stale. -->

---
";

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Category of a recovery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryCategory {
    /// Stored content could not be parsed and was discarded
    Parser,
    /// A write to the durable record failed
    Write,
}

impl fmt::Display for RecoveryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecoveryCategory::Parser => write!(f, "parser"),
            RecoveryCategory::Write => write!(f, "write"),
        }
    }
}

impl RecoveryCategory {
    pub fn parse_category(s: &str) -> Option<Self> {
        match s {
            "parser" => Some(RecoveryCategory::Parser),
            "write" => Some(RecoveryCategory::Write),
            _ => None,
        }
    }
}

/// A single entry in the recovery log.
#[derive(Debug, Clone)]
pub struct RecoveryEntry {
    pub timestamp: DateTime<Utc>,
    pub category: RecoveryCategory,
    pub description: String,
    pub fields: Vec<(String, String)>,
    pub body: String,
}

/// Return the path to the recovery log file.
pub fn recovery_log_path(store_dir: &Path) -> PathBuf {
    store_dir.join(".recovery.log")
}

// ---------------------------------------------------------------------------
// Atomic file write
// ---------------------------------------------------------------------------

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry formatting
// ---------------------------------------------------------------------------

impl RecoveryEntry {
    fn to_markdown(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "## {} - {}: {}\n",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            self.category,
            self.description,
        ));
        out.push('\n');

        for (key, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", key, value));
        }

        if !self.body.is_empty() {
            let fence = body_fence(&self.body);
            out.push('\n');
            out.push_str(&format!("{}text\n", fence));
            out.push_str(&self.body);
            if !self.body.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&fence);
            out.push('\n');
        }

        out.push('\n');
        out.push_str("---\n");
        out
    }
}

/// A backtick fence longer than any backtick run inside `body`, at least three.
fn body_fence(body: &str) -> String {
    let longest = body
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Append a recovery entry to the log. Errors are swallowed and printed to stderr.
pub fn log_recovery(store_dir: &Path, entry: RecoveryEntry) {
    if let Err(e) = log_recovery_inner(store_dir, entry) {
        eprintln!("warning: could not write to recovery log: {}", e);
    }
}

fn log_recovery_inner(store_dir: &Path, entry: RecoveryEntry) -> io::Result<()> {
    let path = recovery_log_path(store_dir);

    if let Ok(meta) = std::fs::metadata(&path)
        && meta.len() > MAX_LOG_SIZE
    {
        trim_oldest(&path)?;
    }

    let needs_header = std::fs::metadata(&path).map_or(true, |m| m.len() == 0);

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    if needs_header {
        file.write_all(FILE_HEADER.as_bytes())?;
    }
    file.write_all(entry.to_markdown().as_bytes())?;
    Ok(())
}

/// Drop the oldest entries until the log is at most half of MAX_LOG_SIZE.
fn trim_oldest(path: &Path) -> io::Result<()> {
    let content = std::fs::read_to_string(path)?;
    let mut rendered: Vec<String> = parse_entries(&content)
        .iter()
        .map(RecoveryEntry::to_markdown)
        .collect();

    let target = (MAX_LOG_SIZE / 2) as usize;
    let mut total: usize = rendered.iter().map(|s| s.len()).sum();
    let mut drop_count = 0;
    while total > target && drop_count < rendered.len() {
        total -= rendered[drop_count].len();
        drop_count += 1;
    }
    rendered.drain(..drop_count);

    let mut out = String::from(FILE_HEADER);
    for block in rendered {
        out.push_str(&block);
    }
    atomic_write(path, out.as_bytes())
}

// ---------------------------------------------------------------------------
// Reading entries
// ---------------------------------------------------------------------------

/// Read recovery entries, most recent first. `limit` keeps only the newest N.
pub fn read_recovery_entries(store_dir: &Path, limit: Option<usize>) -> Vec<RecoveryEntry> {
    let path = recovery_log_path(store_dir);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };

    let mut entries = parse_entries(&content);
    if let Some(n) = limit {
        let skip = entries.len().saturating_sub(n);
        entries.drain(..skip);
    }
    entries.reverse();
    entries
}

/// Parse all entries from the log content, oldest first.
fn parse_entries(content: &str) -> Vec<RecoveryEntry> {
    let mut entries = Vec::new();
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        let Some(header) = line.strip_prefix("## ") else {
            continue;
        };
        let Some((timestamp, category, description)) = parse_entry_header(header) else {
            continue;
        };

        let mut fields = Vec::new();
        let mut body = String::new();
        // Closing fence of the open code block, if any
        let mut fence: Option<&str> = None;

        for line in lines.by_ref() {
            if let Some(close) = fence {
                if line == close {
                    fence = None;
                } else {
                    if !body.is_empty() {
                        body.push('\n');
                    }
                    body.push_str(line);
                }
                continue;
            }
            if line == "---" {
                break;
            }
            if line.starts_with("```") {
                let len = line.len() - line.trim_start_matches('`').len();
                fence = Some(&line[..len]);
                continue;
            }
            let trimmed = line.trim();
            if let Some((key, value)) = trimmed.split_once(": ") {
                fields.push((key.to_string(), value.to_string()));
            }
        }

        entries.push(RecoveryEntry {
            timestamp,
            category,
            description,
            fields,
            body,
        });
    }

    entries
}

/// Parse an entry header: `<timestamp> - <category>: <description>`
fn parse_entry_header(header: &str) -> Option<(DateTime<Utc>, RecoveryCategory, String)> {
    let (timestamp_str, rest) = header.split_once(" - ")?;
    let timestamp = DateTime::parse_from_rfc3339(timestamp_str)
        .ok()?
        .with_timezone(&Utc);
    let (category_str, description) = rest.split_once(": ")?;
    let category = RecoveryCategory::parse_category(category_str)?;
    Some((timestamp, category, description.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(description: &str, body: &str) -> RecoveryEntry {
        RecoveryEntry {
            timestamp: Utc::now(),
            category: RecoveryCategory::Parser,
            description: description.to_string(),
            fields: vec![("Source".to_string(), "todos.json".to_string())],
            body: body.to_string(),
        }
    }

    #[test]
    fn atomic_write_replaces_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("todos.json");
        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn log_and_read_back() {
        let tmp = TempDir::new().unwrap();
        log_recovery(tmp.path(), entry("discarded malformed record", "not json {{{"));

        let content = std::fs::read_to_string(recovery_log_path(tmp.path())).unwrap();
        assert!(content.starts_with("<!-- checklist recovery log"));

        let entries = read_recovery_entries(tmp.path(), None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, RecoveryCategory::Parser);
        assert_eq!(entries[0].description, "discarded malformed record");
        assert_eq!(
            entries[0].fields,
            vec![("Source".to_string(), "todos.json".to_string())]
        );
        assert_eq!(entries[0].body, "not json {{{");
    }

    #[test]
    fn read_returns_newest_first_with_limit() {
        let tmp = TempDir::new().unwrap();
        log_recovery(tmp.path(), entry("one", "a"));
        log_recovery(tmp.path(), entry("two", "b"));
        log_recovery(tmp.path(), entry("three", "c"));

        let entries = read_recovery_entries(tmp.path(), Some(2));
        let names: Vec<&str> = entries.iter().map(|e| e.description.as_str()).collect();
        assert_eq!(names, vec!["three", "two"]);
    }

    #[test]
    fn body_with_separator_line_survives() {
        let tmp = TempDir::new().unwrap();
        log_recovery(tmp.path(), entry("odd body", "line one\n---\nline three"));
        let entries = read_recovery_entries(tmp.path(), None);
        assert_eq!(entries[0].body, "line one\n---\nline three");
    }

    #[test]
    fn body_with_fence_line_survives() {
        let tmp = TempDir::new().unwrap();
        let body = "before\n```\nmiddle\n````\nafter";
        log_recovery(tmp.path(), entry("fenced body", body));
        log_recovery(tmp.path(), entry("next", "plain"));

        let entries = read_recovery_entries(tmp.path(), None);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].body, body);
        assert_eq!(entries[0].body, "plain");
    }

    #[test]
    fn fence_outgrows_backticks_in_body() {
        assert_eq!(body_fence("plain"), "```");
        assert_eq!(body_fence("a ``` b"), "````");
        assert_eq!(body_fence("`````"), "``````");
    }

    #[test]
    fn missing_log_reads_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(read_recovery_entries(tmp.path(), None).is_empty());
    }

    #[test]
    fn oversized_log_is_trimmed_on_append() {
        let tmp = TempDir::new().unwrap();
        let big = "x".repeat(200_000);
        for i in 0..6 {
            log_recovery(tmp.path(), entry(&format!("big {}", i), &big));
        }
        log_recovery(tmp.path(), entry("latest", "small"));

        let size = std::fs::metadata(recovery_log_path(tmp.path())).unwrap().len();
        assert!(size <= MAX_LOG_SIZE);
        let entries = read_recovery_entries(tmp.path(), None);
        assert_eq!(entries[0].description, "latest");
        assert!(entries.len() < 7);
    }
}
