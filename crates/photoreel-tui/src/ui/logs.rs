//! Logs panel rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::logs::LogBuffer;

/// Render the logs panel, newest entries at the bottom.
///
/// `scroll` counts lines up from the newest entry.
pub fn render_logs_panel(log_buffer: &LogBuffer, scroll: usize, frame: &mut Frame, area: Rect) {
    let entries = log_buffer.entries();

    let block = Block::default()
        .title(format!(" logs ({}) ", entries.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if entries.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                " No log entries yet",
                Style::default().fg(Color::DarkGray),
            )),
            inner,
        );
        return;
    }

    let height = inner.height as usize;
    let end = entries.len().saturating_sub(scroll.min(entries.len().saturating_sub(1)));
    let start = end.saturating_sub(height);

    let lines: Vec<Line> = entries[start..end]
        .iter()
        .map(|entry| {
            let mut spans = vec![
                Span::styled(
                    entry.at.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    entry.level_prefix(),
                    Style::default()
                        .fg(entry.level_color())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {}: ", entry.short_target()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(entry.message.clone()),
            ];
            if !entry.fields.is_empty() {
                spans.push(Span::styled(
                    format!(" {}", entry.fields),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}
