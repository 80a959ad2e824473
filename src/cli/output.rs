use crate::io::recovery::RecoveryEntry;
use crate::ops::rows::Row;

/// Format one row: `[x] 3f2a9c01  ~~Buy milk~~`
pub fn format_row(row: &Row) -> String {
    let mark = if row.checked { 'x' } else { ' ' };
    let label = if row.struck {
        format!("~~{}~~", row.label)
    } else {
        row.label.clone()
    };
    format!("[{}] {}  {}", mark, row.short_id, label)
}

/// Format the whole list, one line per row.
pub fn format_rows(rows: &[Row]) -> Vec<String> {
    if rows.is_empty() {
        return vec!["(checklist is empty)".to_string()];
    }
    rows.iter().map(format_row).collect()
}

/// One-line summary: `2 open, 1 done`
pub fn format_counts(open: usize, done: usize) -> String {
    format!("{} open, {} done", open, done)
}

/// Format a recovery entry for terminal display.
pub fn format_recovery_entry(entry: &RecoveryEntry) -> Vec<String> {
    let mut lines = vec![format!(
        "{}  {}: {}",
        entry
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        entry.category,
        entry.description
    )];
    for (key, value) in &entry.fields {
        lines.push(format!("  {}: {}", key, value));
    }
    for line in entry.body.lines() {
        lines.push(format!("  | {}", line));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::recovery::RecoveryCategory;

    fn row(label: &str, done: bool) -> Row {
        Row {
            id: "3f2a9c01deadbeef".into(),
            short_id: "3f2a9c01".into(),
            checked: done,
            label: label.into(),
            struck: done,
        }
    }

    #[test]
    fn open_row_is_plain() {
        assert_eq!(format_row(&row("Buy milk", false)), "[ ] 3f2a9c01  Buy milk");
    }

    #[test]
    fn done_row_is_struck_through() {
        assert_eq!(
            format_row(&row("Buy milk", true)),
            "[x] 3f2a9c01  ~~Buy milk~~"
        );
    }

    #[test]
    fn empty_list_message() {
        assert_eq!(format_rows(&[]), vec!["(checklist is empty)"]);
    }

    #[test]
    fn counts_summary() {
        assert_eq!(format_counts(2, 1), "2 open, 1 done");
    }

    #[test]
    fn recovery_entry_lines() {
        let entry = RecoveryEntry {
            timestamp: chrono::DateTime::parse_from_rfc3339("2026-01-02T03:04:05Z")
                .unwrap()
                .with_timezone(&chrono::Utc),
            category: RecoveryCategory::Parser,
            description: "discarded malformed record".into(),
            fields: vec![("Source".into(), "todos.json".into())],
            body: "not json\n{{{".into(),
        };
        assert_eq!(
            format_recovery_entry(&entry),
            vec![
                "2026-01-02T03:04:05Z  parser: discarded malformed record",
                "  Source: todos.json",
                "  | not json",
                "  | {{{",
            ]
        );
    }
}
