//! Token stream pane rendering

use crate::parser::token::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn token_span(token: &Token) -> Span<'static> {
    let (text, style) = match token.kind {
        TokenKind::String => (
            format!("{:?}", token.lexeme),
            Style::default().fg(DEFAULT_THEME.string),
        ),
        TokenKind::Number => (
            token.lexeme.clone(),
            Style::default().fg(DEFAULT_THEME.number),
        ),
        TokenKind::Identifier => (
            token.lexeme.clone(),
            Style::default().fg(DEFAULT_THEME.identifier),
        ),
        kind if kind.is_keyword() => (
            token.lexeme.clone(),
            Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD),
        ),
        _ => (token.lexeme.clone(), Style::default().fg(DEFAULT_THEME.fg)),
    };

    Span::styled(text, style)
}

/// Render the tokens of the most recent line, the offending one underlined.
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    offending: Option<&Token>,
) {
    let block = Block::default()
        .title(" Tokens ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let visible: Vec<&Token> = tokens.iter().filter(|t| !t.is_eof()).collect();

    if visible.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let mut spans = Vec::with_capacity(visible.len() * 2);
    for token in visible {
        let mut span = token_span(token);
        if offending == Some(token) {
            span.style = span
                .style
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::UNDERLINED);
        }
        spans.push(span);
        spans.push(Span::raw(" "));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
