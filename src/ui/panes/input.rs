//! Input line rendering

use crate::constants::PROMPT;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the prompt and the line being edited, and place the terminal cursor.
///
/// `cursor` counts characters, not bytes.
pub fn render_input_pane(frame: &mut Frame, area: Rect, input: &str, cursor: usize) {
    let block = Block::default()
        .title(" Input ")
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        );

    let line = Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(DEFAULT_THEME.primary)),
        Span::styled(input.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);

    let prompt_width = PROMPT.chars().count();
    let x = area.x as usize + 1 + prompt_width + cursor;
    let max_x = (area.x + area.width).saturating_sub(2) as usize;
    frame.set_cursor_position((x.min(max_x) as u16, area.y + 1));
}
