//! Main layout rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, Screen};
use crate::carousel::CarouselView;
use crate::ui::carousel::{render_slide, render_thumbnails};
use crate::ui::logs::render_logs_panel;

/// Height of the thumbnail strip.
const STRIP_HEIGHT: u16 = 3;

/// Screen areas of the main layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub header: Rect,
    /// Slide details, or the message of a non-carousel screen.
    pub body: Rect,
    pub thumbnails: Rect,
    pub status: Rect,
    pub logs: Option<Rect>,
}

/// Split `area` into the main regions.
///
/// Used by both rendering and mouse hit-testing so the two always agree.
pub fn regions(area: Rect, show_logs: bool) -> Regions {
    let (main, logs) = if show_logs {
        let chunks =
            Layout::horizontal([Constraint::Min(30), Constraint::Percentage(35)]).split(area);
        (chunks[0], Some(chunks[1]))
    } else {
        (area, None)
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),            // Header
        Constraint::Min(3),               // Slide
        Constraint::Length(STRIP_HEIGHT), // Thumbnails
        Constraint::Length(1),            // Status bar
    ])
    .split(main);

    Regions {
        header: chunks[0],
        body: chunks[1],
        thumbnails: chunks[2],
        status: chunks[3],
        logs,
    }
}

/// Render the entire application UI.
pub fn render(app: &App, frame: &mut Frame) {
    let regions = regions(frame.area(), app.show_logs);

    render_header(app, frame, regions.header);

    match &app.screen {
        Screen::Loading => render_message(
            frame,
            regions.body,
            "Loading your photos...",
            None,
            Color::Gray,
        ),
        Screen::SignedOut => render_message(
            frame,
            regions.body,
            "Not signed in",
            Some("Run `photoreel login`, then press r to load your photos."),
            Color::Yellow,
        ),
        Screen::Failed(message) => render_message(
            frame,
            regions.body,
            message,
            Some("Press r to try again."),
            Color::Red,
        ),
        Screen::Carousel => match app.carousel.view() {
            CarouselView::Empty => render_message(
                frame,
                regions.body,
                "No photos found in your Google Photos library.",
                Some("Press r to refresh."),
                Color::Gray,
            ),
            CarouselView::Showing {
                current,
                position,
                thumbnails,
            } => {
                let selected = thumbnails.iter().find(|t| t.selected);
                render_slide(&current, selected, position, frame, regions.body);
                render_thumbnails(&thumbnails, frame, regions.thumbnails);
            }
        },
    }

    render_status_bar(app, frame, regions.status);

    if let Some(logs) = regions.logs {
        render_logs_panel(&app.log_buffer, app.log_scroll, frame, logs);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        " photoreel ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    )];

    if app.screen == Screen::Carousel {
        spans.push(Span::raw(format!(
            " {} photos · page {}",
            app.carousel.len(),
            app.page
        )));
    }
    spans.push(Span::styled(
        format!("  {}", app.client.base_url()),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_message(frame: &mut Frame, area: Rect, title: &str, hint: Option<&str>, color: Color) {
    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(hint) = hint {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_status_bar(app: &App, frame: &mut Frame, area: Rect) {
    let hint = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();

    if let Some(ref message) = app.status_message {
        spans.push(Span::raw(format!(" {} │", message)));
    }

    if app.screen == Screen::Carousel && !app.carousel.is_empty() {
        spans.push(Span::styled(" ←/h prev  →/l next  home/end  click thumb │", hint));
        if app.next_page_token.is_some() {
            spans.push(Span::styled(" n more │", hint));
        }
    }
    spans.push(Span::styled(" r reload  ^L logs  q quit", hint));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, ServerClient};
    use crate::logs::LogBuffer;
    use photoreel_photos::{MediaItem, MediaItemsPage, MediaMetadata};
    use ratatui::{Terminal, backend::TestBackend};

    fn app() -> App {
        let client = ServerClient::new("http://127.0.0.1:3000", None).unwrap();
        App::new(client, LogBuffer::new())
    }

    fn item(id: &str, filename: &str) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            description: None,
            product_url: None,
            base_url: format!("https://lh3.example/{}", id),
            mime_type: "image/jpeg".to_string(),
            media_metadata: MediaMetadata::default(),
            contributor_info: None,
            filename: Some(filename.to_string()),
        }
    }

    fn screen_text(app: &App) -> String {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(app, f)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_regions_without_logs() {
        let r = regions(Rect::new(0, 0, 80, 20), false);
        assert_eq!(r.header.height, 1);
        assert_eq!(r.thumbnails.height, STRIP_HEIGHT);
        assert_eq!(r.status.y, 19);
        assert!(r.logs.is_none());
    }

    #[test]
    fn test_regions_with_logs() {
        let r = regions(Rect::new(0, 0, 100, 20), true);
        let logs = r.logs.unwrap();
        assert!(logs.width > 0);
        assert_eq!(r.body.width + logs.width, 100);
    }

    #[test]
    fn test_render_loading() {
        assert!(screen_text(&app()).contains("Loading your photos..."));
    }

    #[test]
    fn test_render_signed_out() {
        let mut app = app();
        app.apply_load_result(Err(ClientError::NotAuthenticated));
        let text = screen_text(&app);
        assert!(text.contains("Not signed in"));
        assert!(text.contains("photoreel login"));
    }

    #[test]
    fn test_render_failure_offers_retry() {
        let mut app = app();
        app.apply_load_result(Err(ClientError::Server {
            status: 500,
            message: "Failed to fetch photos".to_string(),
        }));
        let text = screen_text(&app);
        assert!(text.contains("Failed to fetch photos"));
        assert!(text.contains("Press r to try again."));
    }

    #[test]
    fn test_render_empty_library() {
        let mut app = app();
        app.apply_load_result(Ok(MediaItemsPage::default()));
        assert!(screen_text(&app).contains("No photos found"));
    }

    #[test]
    fn test_render_slide_and_position() {
        let mut app = app();
        app.apply_load_result(Ok(MediaItemsPage {
            media_items: vec![item("a", "first.jpg"), item("b", "second.jpg")],
            next_page_token: None,
        }));
        app.carousel.next();

        let text = screen_text(&app);
        assert!(text.contains("second.jpg"));
        assert!(text.contains("2 / 2"));
        assert!(text.contains("https://lh3.example/b=w1200-h800"));
        assert!(text.contains("https://lh3.example/b=w100-h100"));
        assert!(!text.contains("https://lh3.example/a=w100-h100"));
        assert!(text.contains("‹"));
        assert!(text.contains("›"));
    }

    #[test]
    fn test_jump_renders_the_chosen_item() {
        let names: Vec<String> = (0..5).map(|i| format!("photo-{}.jpg", i)).collect();
        let mut app = app();
        app.apply_load_result(Ok(MediaItemsPage {
            media_items: names
                .iter()
                .enumerate()
                .map(|(i, name)| item(&format!("p{}", i), name))
                .collect(),
            next_page_token: None,
        }));

        for i in [3, 0, 4, 1, 2] {
            app.carousel.jump_to(i).unwrap();
            let text = screen_text(&app);

            assert!(text.contains(&names[i]), "title of item {} not shown", i);
            assert!(text.contains(&format!("{} / 5", i + 1)));
            assert!(text.contains(&format!("https://lh3.example/p{}=w1200-h800", i)));
            for (j, name) in names.iter().enumerate() {
                if j != i {
                    assert!(!text.contains(name.as_str()), "item {} leaked into slide {}", j, i);
                }
            }
        }
    }
}
