//! Main TUI application state and logic

use crate::constants::HISTORY_LIMIT;
use crate::report::Report;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Rows moved by PageUp/PageDown in the history pane.
const PAGE: usize = 10;

/// The main application state
pub struct App {
    /// The line being edited
    pub input: String,

    /// Cursor position within `input`, in characters
    pub cursor: usize,

    /// Checked lines, oldest first
    pub reports: Vec<Report>,

    /// Index into `reports` while browsing earlier inputs with Up/Down
    pub recall: Option<usize>,

    /// History pane scroll offset (clamped while rendering)
    pub history_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        App {
            input: String::new(),
            cursor: 0,
            reports: Vec::new(),
            recall: None,
            history_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the read loop until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub(crate) fn render(&mut self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(frame.area());

        super::panes::render_history_pane(frame, rows[0], &self.reports, &mut self.history_scroll);

        let latest = self.reports.last();
        super::panes::render_tokens_pane(
            frame,
            rows[1],
            latest.map(|r| r.tokens.as_slice()).unwrap_or_default(),
            latest.and_then(|r| r.outcome.as_ref().err()).map(|e| &e.token),
        );

        super::panes::render_input_pane(frame, rows[2], &self.input, self.cursor);

        super::panes::render_status_bar(
            frame,
            rows[3],
            &self.status_message,
            self.reports.len(),
            latest.map(Report::is_accepted),
        );
    }

    /// Handle keyboard events
    pub(crate) fn handle_key_event(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(c) => {
                let at = self.byte_index();
                self.input.insert(at, c);
                self.cursor += 1;
                self.recall = None;
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index();
                    self.input.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.input.chars().count() {
                    let at = self.byte_index();
                    self.input.remove(at);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.input.chars().count());
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.input.chars().count(),
            KeyCode::Up => self.recall_previous(),
            KeyCode::Down => self.recall_next(),
            KeyCode::PageUp => {
                self.history_scroll = self.history_scroll.saturating_sub(PAGE);
            }
            KeyCode::PageDown => {
                self.history_scroll = self.history_scroll.saturating_add(PAGE);
            }
            KeyCode::Enter => self.submit(),
            _ => {}
        }
    }

    /// Check the current line and append its report.
    ///
    /// Blank lines never reach the lexer.
    pub fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.cursor = 0;
        self.recall = None;

        if line.trim().is_empty() {
            self.status_message = "Blank line ignored".to_string();
            return;
        }

        let report = Report::check(&line);
        self.status_message = match &report.outcome {
            Ok(()) if report.lex_errors.is_empty() => report.verdict().to_string(),
            Ok(()) => format!(
                "{} ({} illegal character(s) skipped)",
                report.verdict(),
                report.lex_errors.len()
            ),
            Err(err) => err.to_string(),
        };

        self.reports.push(report);
        if self.reports.len() > HISTORY_LIMIT {
            let excess = self.reports.len() - HISTORY_LIMIT;
            self.reports.drain(..excess);
        }

        // Auto-scroll history to bottom
        self.history_scroll = usize::MAX;
    }

    fn recall_previous(&mut self) {
        if self.reports.is_empty() {
            return;
        }
        let index = match self.recall {
            Some(i) => i.saturating_sub(1),
            None => self.reports.len() - 1,
        };
        self.load_recalled(index);
    }

    fn recall_next(&mut self) {
        match self.recall {
            Some(i) if i + 1 < self.reports.len() => self.load_recalled(i + 1),
            Some(_) => {
                self.recall = None;
                self.input.clear();
                self.cursor = 0;
            }
            None => {}
        }
    }

    fn load_recalled(&mut self, index: usize) {
        self.recall = Some(index);
        self.input = self.reports[index].source.clone();
        self.cursor = self.input.chars().count();
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ACCEPTED, REJECTED};
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_line(app: &mut App, line: &str) {
        for c in line.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_enter_checks_the_line() {
        let mut app = App::new();
        type_line(&mut app, "loop do { puts 1 } end");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.reports.len(), 1);
        assert!(app.reports[0].is_accepted());
        assert_eq!(app.status_message, ACCEPTED);
        assert!(app.input.is_empty());
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_rejected_line_shows_error_in_status() {
        let mut app = App::new();
        type_line(&mut app, "while (1 < 2) { puts(1) }");
        press(&mut app, KeyCode::Enter);

        assert!(!app.reports[0].is_accepted());
        assert_eq!(app.status_message, "Syntax error at EOF");
        assert_eq!(app.reports[0].verdict(), REJECTED);
    }

    #[test]
    fn test_blank_line_is_ignored() {
        let mut app = App::new();
        type_line(&mut app, "   ");
        press(&mut app, KeyCode::Enter);

        assert!(app.reports.is_empty());
        assert_eq!(app.status_message, "Blank line ignored");
    }

    #[test]
    fn test_editing_in_the_middle() {
        let mut app = App::new();
        type_line(&mut app, "lop");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.input, "loop");

        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.input, "oop");

        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input, "oo");
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn test_recall_walks_earlier_inputs() {
        let mut app = App::new();
        type_line(&mut app, "first");
        press(&mut app, KeyCode::Enter);
        type_line(&mut app, "second");
        press(&mut app, KeyCode::Enter);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.input, "second");
        press(&mut app, KeyCode::Up);
        assert_eq!(app.input, "first");
        press(&mut app, KeyCode::Up);
        assert_eq!(app.input, "first");
        press(&mut app, KeyCode::Down);
        assert_eq!(app.input, "second");
        press(&mut app, KeyCode::Down);
        assert!(app.input.is_empty());
        assert_eq!(app.recall, None);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);

        let mut app = App::new();
        app.handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert!(!app.should_quit);
        assert!(app.input.is_empty());

        let mut app = App::new();
        type_line(&mut app, "q");
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_history_is_capped() {
        let mut app = App::new();
        for _ in 0..HISTORY_LIMIT + 3 {
            type_line(&mut app, "puts 1");
            press(&mut app, KeyCode::Enter);
        }
        assert_eq!(app.reports.len(), HISTORY_LIMIT);
    }

    #[test]
    fn test_render_shows_verdict_and_tokens() {
        let mut app = App::new();
        type_line(&mut app, "if (1 > 2) { puts (3) } end");
        press(&mut app, KeyCode::Enter);

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content.iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains(ACCEPTED));
        assert!(text.contains("Tokens"));
        assert!(text.contains("Ruby-code >"));
    }
}
