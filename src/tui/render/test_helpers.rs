use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::store_io::Store;
use crate::model::{ChecklistConfig, Collection, Item};
use crate::ops::gateway::Gateway;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return it with styles intact.
pub fn render_to_buffer<F>(w: u16, h: u16, f: F) -> Buffer
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let buf = render_to_buffer(w, h, f);
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// An app over a temp store holding `titles` in order, with ids `id0`, `id1`, ...
pub fn app_with_titles(titles: &[&str]) -> (TempDir, App) {
    let tmp = TempDir::new().unwrap();
    let items = titles
        .iter()
        .enumerate()
        .map(|(i, t)| Item::new(format!("id{}", i), t.to_string(), i as i64))
        .collect();
    let store = Store::new(tmp.path().to_path_buf(), tmp.path().join("todos.json"));
    let gateway = Gateway::with_collection(store, Collection::from_items(items));
    let app = App::new(gateway, &ChecklistConfig::default());
    (tmp, app)
}
