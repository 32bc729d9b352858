//! History pane rendering
//!
//! Lists every checked line, newest last, followed by its diagnostics and the
//! verdict. Scrolling works in whole rendered rows.

use crate::report::Report;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Rows shown for one report.
fn report_lines(report: &Report) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled("› ", Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(report.source.clone(), Style::default().fg(DEFAULT_THEME.fg)),
    ])];

    for diagnostic in report.diagnostics() {
        lines.push(Line::from(Span::styled(
            format!("  {diagnostic}"),
            Style::default().fg(DEFAULT_THEME.error),
        )));
    }

    let verdict_color = if report.is_accepted() {
        DEFAULT_THEME.success
    } else {
        DEFAULT_THEME.error
    };
    lines.push(Line::from(Span::styled(
        format!("  {}", report.verdict()),
        Style::default()
            .fg(verdict_color)
            .add_modifier(Modifier::BOLD),
    )));

    lines
}

/// Render the history pane
pub fn render_history_pane(
    frame: &mut Frame,
    area: Rect,
    reports: &[Report],
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" History ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    if reports.is_empty() {
        let paragraph = Paragraph::new("(type a line and press Enter)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_lines: Vec<Line> = reports.iter().flat_map(report_lines).collect();

    let total_lines = all_lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    // Clamp scroll offset only if content exceeds visible area
    if total_lines > visible_height {
        let max_scroll = total_lines - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_lines: Vec<Line> = all_lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}
