//! Slide and thumbnail strip rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::carousel::{SlideView, ThumbnailView};

/// Columns taken by one thumbnail cell.
pub const THUMB_WIDTH: u16 = 6;

/// Columns of each navigation arrow beside the slide details.
const ARROW_WIDTH: u16 = 3;

/// Split the slide's inner area into previous arrow, details and next arrow.
///
/// The arrow columns are the click targets for stepping back and forward.
pub fn slide_columns(area: Rect) -> [Rect; 3] {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    Layout::horizontal([
        Constraint::Length(ARROW_WIDTH),
        Constraint::Min(0),
        Constraint::Length(ARROW_WIDTH),
    ])
    .areas(inner)
}

/// Screen cells of the visible thumbnails, paired with their item index.
///
/// The strip scrolls so that `selected` is always visible.
pub fn thumbnail_cells(strip: Rect, count: usize, selected: usize) -> Vec<(usize, Rect)> {
    let capacity = (strip.width / THUMB_WIDTH) as usize;
    if capacity == 0 || count == 0 || strip.height == 0 {
        return Vec::new();
    }

    let offset = selected.saturating_sub(capacity - 1);
    (offset..count.min(offset + capacity))
        .enumerate()
        .map(|(slot, index)| {
            let x = strip.x + slot as u16 * THUMB_WIDTH;
            (index, Rect::new(x, strip.y, THUMB_WIDTH, strip.height))
        })
        .collect()
}

/// Render the selected item's details, with its thumbnail variant when known.
pub fn render_slide(
    slide: &SlideView,
    thumbnail: Option<&ThumbnailView>,
    position: (usize, usize),
    frame: &mut Frame,
    area: Rect,
) {
    let block = Block::default()
        .title(format!(" {} ", slide.title))
        .title_top(Line::from(format!(" {} / {} ", position.0, position.1)).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();

    if let Some(ref date) = slide.taken_on {
        lines.push(Line::from(vec![
            Span::styled("Taken on  ", label),
            Span::raw(date.clone()),
        ]));
    }
    if let Some((w, h)) = slide.dimensions {
        lines.push(Line::from(vec![
            Span::styled("Size      ", label),
            Span::raw(format!("{} x {}", w, h)),
        ]));
    }
    if let Some(ref camera) = slide.camera {
        lines.push(Line::from(vec![
            Span::styled("Camera    ", label),
            Span::raw(camera.clone()),
        ]));
    }
    if let Some(ref description) = slide.description {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            description.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled("Image     ", label),
        Span::styled(slide.image_url.clone(), Style::default().fg(Color::Cyan)),
    ]));
    if let Some(thumbnail) = thumbnail {
        lines.push(Line::from(vec![
            Span::styled("Thumb     ", label),
            Span::styled(thumbnail.url.clone(), Style::default().fg(Color::Cyan)),
        ]));
    }
    if let Some(ref link) = slide.product_url {
        lines.push(Line::from(vec![
            Span::styled("Open      ", label),
            Span::styled(link.clone(), Style::default().fg(Color::Cyan)),
        ]));
    }

    let [previous, details, next] = slide_columns(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), details);

    let arrow = Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD);
    for (column, glyph) in [(previous, "‹"), (next, "›")] {
        if column.height == 0 {
            continue;
        }
        let middle = Rect::new(column.x, column.y + column.height / 2, column.width, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(glyph, arrow)).alignment(Alignment::Center),
            middle,
        );
    }
}

/// Render the thumbnail strip. Each cell shows the item's 1-based number.
pub fn render_thumbnails(thumbnails: &[ThumbnailView], frame: &mut Frame, strip: Rect) {
    let selected = thumbnails.iter().position(|t| t.selected).unwrap_or(0);

    for (index, cell) in thumbnail_cells(strip, thumbnails.len(), selected) {
        let style = if thumbnails[index].selected {
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let widget = Paragraph::new(Line::from(Span::styled((index + 1).to_string(), style)))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(style));
        frame.render_widget(widget, cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_start_at_zero() {
        let cells = thumbnail_cells(Rect::new(2, 10, 30, 3), 10, 0);
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[0], (0, Rect::new(2, 10, THUMB_WIDTH, 3)));
        assert_eq!(cells[4].0, 4);
    }

    #[test]
    fn test_cells_scroll_to_selection() {
        let cells = thumbnail_cells(Rect::new(0, 0, 30, 3), 10, 7);
        let indices: Vec<usize> = cells.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_cells_fewer_items_than_capacity() {
        let cells = thumbnail_cells(Rect::new(0, 0, 60, 3), 2, 1);
        assert_eq!(cells.len(), 2);
    }

    #[test]
    fn test_slide_columns_flank_details() {
        let [previous, details, next] = slide_columns(Rect::new(0, 0, 40, 10));
        assert_eq!(previous, Rect::new(1, 1, ARROW_WIDTH, 8));
        assert_eq!(details.x, 1 + ARROW_WIDTH);
        assert_eq!(next.x + next.width, 39);
    }

    #[test]
    fn test_no_room() {
        assert!(thumbnail_cells(Rect::new(0, 0, 3, 3), 5, 0).is_empty());
        assert!(thumbnail_cells(Rect::new(0, 0, 30, 3), 0, 0).is_empty());
    }
}
