//! Main chat event loop.
//!
//! The loop owns all state. The single in-flight completion call runs in a
//! spawned task whose only capability is sending its outcome back over an
//! unbounded channel; the loop drains that channel between input events, so
//! every mutation happens on one logical thread in dispatch order.

use std::error::Error;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::api::CompletionClient;
use crate::core::config::Config;
use crate::core::constants::QUICK_QUESTIONS;
use crate::core::message::Message;
use crate::core::session::ChatSession;
use crate::core::transcript::TranscriptStore;
use crate::ui::markup;
use crate::ui::renderer::{build_display_lines, ui};
use crate::ui::theme::ThemeController;
use crate::ui::view::TuiView;
use crate::utils::scroll;

/// Outcome of the single in-flight completion call. Failure detail stays in
/// the logs; the session converts it to the fixed fallback reply.
enum CompletionOutcome {
    Answered(String),
    Failed,
}

pub struct ChatApp {
    pub session: ChatSession,
    pub view: TuiView,
    pub themes: ThemeController,
    pub input: String,
    pub input_cursor: usize,
    pub status: Option<String>,
    pub endpoint: String,
}

impl ChatApp {
    pub fn new(themes: ThemeController, store: TranscriptStore, endpoint: String) -> Self {
        Self {
            session: ChatSession::new(store),
            view: TuiView::new(),
            themes,
            input: String::new(),
            input_cursor: 0,
            status: None,
            endpoint,
        }
    }

    // Input editing. The cursor is a char offset into the input buffer.

    fn byte_index_at_cursor(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.input_cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    pub fn insert_char_at_cursor(&mut self, c: char) {
        let byte_index = self.byte_index_at_cursor();
        self.input.insert(byte_index, c);
        self.input_cursor += 1;
    }

    pub fn delete_char_before_cursor(&mut self) {
        if self.input_cursor == 0 {
            return;
        }
        let char_indices: Vec<(usize, char)> = self.input.char_indices().collect();
        let (start, ch) = char_indices[self.input_cursor - 1];
        self.input.drain(start..start + ch.len_utf8());
        self.input_cursor -= 1;
    }

    pub fn move_cursor_left(&mut self) {
        self.input_cursor = self.input_cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let max_position = self.input.chars().count();
        if self.input_cursor < max_position {
            self.input_cursor += 1;
        }
    }

    pub fn move_cursor_to_beginning(&mut self) {
        self.input_cursor = 0;
    }

    pub fn move_cursor_to_end(&mut self) {
        self.input_cursor = self.input.chars().count();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.input_cursor = 0;
    }

    /// Line and column of the cursor within the (unwrapped) input text.
    pub fn input_cursor_line_col(&self) -> (usize, usize) {
        let mut line = 0;
        let mut column = 0;
        for (i, ch) in self.input.chars().enumerate() {
            if i >= self.input_cursor {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 0;
            } else {
                column += 1;
            }
        }
        (line, column)
    }

    /// Rows the input box needs at this width, between 1 and 6.
    pub fn input_area_height(&self, width: u16) -> u16 {
        if self.input.is_empty() {
            return 1;
        }
        let available = width.saturating_sub(2).max(1) as usize;
        let rows: usize = self
            .input
            .split('\n')
            .map(|line| line.width().div_ceil(available).max(1))
            .sum();
        (rows as u16).clamp(1, 6)
    }
}

fn spawn_completion(
    client: Arc<dyn CompletionClient>,
    prompt: String,
    tx: mpsc::UnboundedSender<CompletionOutcome>,
) {
    tokio::spawn(async move {
        match client.complete(&prompt).await {
            Ok(text) => {
                let _ = tx.send(CompletionOutcome::Answered(text));
            }
            Err(e) => {
                debug!("completion call failed: {e}");
                let _ = tx.send(CompletionOutcome::Failed);
            }
        }
    });
}

fn try_submit(
    app: &mut ChatApp,
    client: &Arc<dyn CompletionClient>,
    tx: &mpsc::UnboundedSender<CompletionOutcome>,
) {
    let input_text = app.input.clone();
    if let Some(payload) = app.session.submit(&input_text, &mut app.view) {
        app.clear_input();
        app.status = None;
        spawn_completion(Arc::clone(client), payload, tx.clone());
    }
}

fn export_transcript(app: &mut ChatApp) {
    let messages: Vec<Message> = app.session.messages().iter().cloned().collect();
    let document = markup::transcript_document(&messages);
    let filename = format!(
        "healthassist-chat-{}.html",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    );
    match std::fs::write(&filename, document) {
        Ok(()) => app.status = Some(format!("Transcript exported to {filename}")),
        Err(e) => {
            debug!("transcript export failed: {e}");
            app.status = Some("Could not export transcript".to_string());
        }
    }
}

/// Scroll bound for the transcript pane at the current terminal size.
fn transcript_max_offset(app: &ChatApp, width: u16, height: u16) -> u16 {
    let input_height = app.input_area_height(width) + 2;
    let available_height = height.saturating_sub(input_height).saturating_sub(1);
    let lines = build_display_lines(app);
    let total_lines = scroll::wrapped_line_count(&lines, width);
    scroll::max_scroll_offset(total_lines, available_height)
}

pub async fn run_chat(
    endpoint: String,
    client: Arc<dyn CompletionClient>,
) -> Result<(), Box<dyn Error>> {
    let themes = ThemeController::initialize(Config::config_path());
    let store = TranscriptStore::open_default();
    let mut app = ChatApp::new(themes, store, endpoint);

    // The one chance to restore prior state, before any input is accepted
    app.session.restore(&mut app.view);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, mut rx) = mpsc::unbounded_channel::<CompletionOutcome>();

    let result = loop {
        terminal.draw(|f| ui(f, &app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL)
                    {
                        break Ok(());
                    }

                    // An armed clear confirmation captures the next keypress
                    if app.session.is_confirming_clear() {
                        match key.code {
                            KeyCode::Char('y') | KeyCode::Char('Y') => {
                                app.session.confirm_clear(&mut app.view);
                            }
                            _ => app.session.deny_clear(),
                        }
                        continue;
                    }

                    match key.code {
                        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.themes.toggle();
                        }
                        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.session.request_clear();
                        }
                        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            export_transcript(&mut app);
                        }
                        KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.move_cursor_to_beginning();
                        }
                        KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.move_cursor_to_end();
                        }
                        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                            app.insert_char_at_cursor('\n');
                        }
                        KeyCode::Enter => {
                            try_submit(&mut app, &client, &tx);
                        }
                        KeyCode::F(n @ 1..=4) => {
                            let question = QUICK_QUESTIONS[(n - 1) as usize];
                            app.input = question.to_string();
                            app.move_cursor_to_end();
                            try_submit(&mut app, &client, &tx);
                        }
                        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.insert_char_at_cursor(c);
                        }
                        KeyCode::Backspace => {
                            app.delete_char_before_cursor();
                        }
                        KeyCode::Left => {
                            app.move_cursor_left();
                        }
                        KeyCode::Right => {
                            app.move_cursor_right();
                        }
                        KeyCode::Home => {
                            app.move_cursor_to_beginning();
                        }
                        KeyCode::End => {
                            app.move_cursor_to_end();
                        }
                        KeyCode::Up => {
                            app.view.scroll_up(1);
                        }
                        KeyCode::Down => {
                            let size = terminal.size().unwrap_or_default();
                            let max = transcript_max_offset(&app, size.width, size.height);
                            app.view.scroll_down(1, max);
                        }
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        app.view.scroll_up(3);
                    }
                    MouseEventKind::ScrollDown => {
                        let size = terminal.size().unwrap_or_default();
                        let max = transcript_max_offset(&app, size.width, size.height);
                        app.view.scroll_down(3, max);
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        // Drain completion outcomes; the pending flag is released on both
        // arms, so the input can never stay locked.
        while let Ok(outcome) = rx.try_recv() {
            match outcome {
                CompletionOutcome::Answered(text) => app.session.resolve(text, &mut app.view),
                CompletionOutcome::Failed => app.session.fail(&mut app.view),
            }
        }
    };

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
