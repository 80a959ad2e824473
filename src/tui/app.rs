use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::store_io::{Store, StoreError};
use crate::io::workspace_io::{open_workspace, resolve_start_dir};
use crate::model::ChecklistConfig;
use crate::ops::gateway::Gateway;
use crate::ops::rows::{self, Row};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new item title into the input line
    Input,
}

/// Main application state
pub struct App {
    pub gateway: Gateway,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Cursor index into the displayed rows
    pub cursor: usize,
    /// First visible row
    pub scroll_offset: usize,
    /// Text of the add-item input line
    pub input_buffer: String,
    /// Byte offset of the caret in `input_buffer`
    pub input_cursor: usize,
    /// Help overlay visible
    pub show_help: bool,
    /// One-shot message shown in the status row (cleared on next key)
    pub status_message: Option<String>,
}

impl App {
    pub fn new(gateway: Gateway, config: &ChecklistConfig) -> Self {
        App {
            gateway,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            cursor: 0,
            scroll_offset: 0,
            input_buffer: String::new(),
            input_cursor: 0,
            show_help: false,
            status_message: None,
        }
    }

    /// Fresh projection of the current collection
    pub fn rows(&self) -> Vec<Row> {
        rows::project(self.gateway.collection())
    }

    pub fn item_count(&self) -> usize {
        self.gateway.collection().len()
    }

    /// Id of the item under the cursor
    pub fn cursor_id(&self) -> Option<String> {
        self.gateway
            .collection()
            .items()
            .get(self.cursor)
            .map(|it| it.id.clone())
    }

    /// Keep the cursor inside the list after it shrinks
    pub fn clamp_cursor(&mut self) {
        let len = self.item_count();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Add trigger: submit the input line. Blank input just closes the line.
    pub fn submit_input(&mut self) {
        let raw = std::mem::take(&mut self.input_buffer);
        self.input_cursor = 0;
        self.mode = Mode::Navigate;
        match self.gateway.add_requested(&raw) {
            Ok(Some(_)) => {
                self.cursor = 0;
                self.scroll_offset = 0;
            }
            Ok(None) => {}
            Err(e) => self.report_store_error(e),
        }
    }

    /// Toggle trigger for the cursor row
    pub fn toggle_cursor(&mut self) {
        let Some(id) = self.cursor_id() else {
            return;
        };
        if let Err(e) = self.gateway.toggle(&id) {
            self.report_store_error(e);
        }
    }

    /// Remove trigger for the cursor row
    pub fn remove_cursor(&mut self) {
        let Some(id) = self.cursor_id() else {
            return;
        };
        if let Err(e) = self.gateway.remove_requested(&id) {
            self.report_store_error(e);
        }
        self.clamp_cursor();
    }

    fn report_store_error(&mut self, e: StoreError) {
        self.status_message = Some(format!("save failed: {} (see `ck recovery`)", e));
    }
}

/// Restore cursor position from .state.json
pub fn restore_ui_state(app: &mut App) {
    use crate::io::state::read_ui_state;

    let Some(ui_state) = read_ui_state(app.gateway.store().store_dir()) else {
        return;
    };
    if let Some(pos) = ui_state
        .cursor_id
        .as_deref()
        .and_then(|id| app.gateway.collection().position(id))
    {
        app.cursor = pos;
        app.scroll_offset = ui_state.scroll_offset.min(pos);
    }
}

/// Save cursor position to .state.json
pub fn save_ui_state(app: &App) {
    use crate::io::state::{UiState, write_ui_state};

    let ui_state = UiState {
        cursor_id: app.cursor_id(),
        scroll_offset: app.scroll_offset,
    };
    let _ = write_ui_state(app.gateway.store().store_dir(), &ui_state);
}

/// Run the TUI application
pub fn run(project_dir: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let start = resolve_start_dir(project_dir)?;
    let workspace = open_workspace(&start)?;
    let gateway = Gateway::open(Store::for_workspace(&workspace));

    let mut app = App::new(gateway, &workspace.config);
    restore_ui_state(&mut app);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal before the default hook prints the panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    save_ui_state(&app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Whole frame is rebuilt from the current collection every pass
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
