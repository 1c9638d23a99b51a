//! Application state and main loop.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use photoreel_photos::MediaItemsPage;
use ratatui::layout::{Position, Rect};

use crate::Tui;
use crate::carousel::{Carousel, CarouselAction};
use crate::client::{ClientError, ServerClient};
use crate::events::{Input, Inputs};
use crate::keys::{KeyListeners, Subscription, carousel_keys};
use crate::logs::LogBuffer;
use crate::ui;

/// Which screen is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// A fetch is in flight.
    Loading,
    /// The server has no session for us.
    SignedOut,
    /// The last fetch failed; `r` retries.
    Failed(String),
    /// Photos loaded (possibly none).
    Carousel,
}

/// Async work queued by key handlers and run by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Fetch a page of photos (first page when `None`).
    Load(Option<String>),
}

/// Main application state.
pub struct App {
    /// Client for the Photoreel server.
    pub client: ServerClient,
    /// Carousel over the current page.
    pub carousel: Carousel,
    pub screen: Screen,
    /// Key listeners of the active screen.
    pub keys: KeyListeners<CarouselAction>,
    /// Held while the carousel screen is up.
    carousel_keys: Option<Subscription<CarouselAction>>,
    /// Token of the page after the current one.
    pub next_page_token: Option<String>,
    /// 1-based number of the current page.
    pub page: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
    /// Status bar message.
    pub status_message: Option<String>,
    /// Log buffer for capturing and displaying logs.
    pub log_buffer: LogBuffer,
    /// Whether logs panel is visible.
    pub show_logs: bool,
    /// Log scroll offset, in lines up from the newest entry.
    pub log_scroll: usize,
    /// Terminal area of the last frame, for mouse hit-testing.
    pub last_area: Rect,
    pending: Option<PendingAction>,
}

impl App {
    /// Create a new App. The first page is fetched once the loop starts.
    pub fn new(client: ServerClient, log_buffer: LogBuffer) -> Self {
        Self {
            client,
            carousel: Carousel::default(),
            screen: Screen::Loading,
            keys: KeyListeners::new(),
            carousel_keys: None,
            next_page_token: None,
            page: 1,
            should_quit: false,
            status_message: None,
            log_buffer,
            show_logs: false,
            log_scroll: 0,
            last_area: Rect::default(),
            pending: Some(PendingAction::Load(None)),
        }
    }

    /// Run the main application loop.
    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut inputs = Inputs::terminal();

        while !self.should_quit {
            let completed = terminal.draw(|frame| ui::render(self, frame))?;
            self.last_area = completed.area;

            // Queued work runs after a frame so "Loading..." is on screen first
            if let Some(action) = self.pending.take() {
                self.process_action(action).await;
                continue;
            }

            match inputs.next().await? {
                Input::Key(key) => self.handle_key(key),
                Input::Click { column, row } => self.handle_click(column, row),
                Input::Resized => {}
            }
        }

        Ok(())
    }

    async fn process_action(&mut self, action: PendingAction) {
        match action {
            PendingAction::Load(page_token) => {
                tracing::info!(next_page = page_token.is_some(), "Fetching photos");
                let result = self.client.fetch_photos(page_token.as_deref()).await;
                if result.is_ok() {
                    self.page = if page_token.is_some() { self.page + 1 } else { 1 };
                }
                self.apply_load_result(result);
            }
        }
    }

    /// Queue a fetch and show the loading screen.
    pub fn request_load(&mut self, page_token: Option<String>) {
        self.set_screen(Screen::Loading);
        self.status_message = None;
        self.pending = Some(PendingAction::Load(page_token));
    }

    /// Move to the screen matching a fetch outcome.
    pub fn apply_load_result(&mut self, result: std::result::Result<MediaItemsPage, ClientError>) {
        match result {
            Ok(page) => {
                let count = page.media_items.len();
                tracing::info!(count, has_more = page.next_page_token.is_some(), "Photos loaded");
                self.carousel.load(page.media_items);
                self.next_page_token = page.next_page_token;
                self.status_message = Some(format!("Loaded {} photos", count));
                self.set_screen(Screen::Carousel);
            }
            Err(ClientError::NotAuthenticated) => {
                tracing::warn!("Server reports no session");
                self.carousel.load(Vec::new());
                self.next_page_token = None;
                self.set_screen(Screen::SignedOut);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch photos");
                self.set_screen(Screen::Failed(e.to_string()));
            }
        }
    }

    /// Switch screens, holding the carousel key subscription only while the
    /// carousel is up.
    fn set_screen(&mut self, screen: Screen) {
        if screen == Screen::Carousel {
            if self.carousel_keys.is_none() {
                self.carousel_keys = Some(self.keys.subscribe(carousel_keys));
            }
        } else {
            self.carousel_keys = None;
        }
        self.screen = screen;
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => self.should_quit = true,
                KeyCode::Char('l') => {
                    self.show_logs = !self.show_logs;
                    self.log_scroll = 0;
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('r') if self.screen != Screen::Loading => {
                self.request_load(None);
                return;
            }
            KeyCode::Char('n') if self.screen == Screen::Carousel => {
                if let Some(token) = self.next_page_token.clone() {
                    self.request_load(Some(token));
                }
                return;
            }
            KeyCode::Up if self.show_logs => {
                self.log_scroll = self.log_scroll.saturating_add(1);
                return;
            }
            KeyCode::Down if self.show_logs => {
                self.log_scroll = self.log_scroll.saturating_sub(1);
                return;
            }
            _ => {}
        }

        for action in self.keys.dispatch(&key) {
            self.navigate(action);
        }
    }

    /// Handle a left click: one on an arrow steps, one on a thumbnail
    /// selects it.
    pub fn handle_click(&mut self, column: u16, row: u16) {
        if self.screen != Screen::Carousel {
            return;
        }
        let Some(selected) = self.carousel.index() else {
            return;
        };

        let regions = ui::regions(self.last_area, self.show_logs);
        let clicked = Position::new(column, row);

        let [previous, _, next] = ui::slide_columns(regions.body);
        if previous.contains(clicked) {
            self.navigate(CarouselAction::Previous);
            return;
        }
        if next.contains(clicked) {
            self.navigate(CarouselAction::Next);
            return;
        }

        let hit = ui::thumbnail_cells(regions.thumbnails, self.carousel.len(), selected)
            .into_iter()
            .find(|(_, cell)| cell.contains(clicked));

        if let Some((index, _)) = hit {
            self.navigate(CarouselAction::JumpTo(index));
        }
    }

    fn navigate(&mut self, action: CarouselAction) {
        if let Err(e) = self.carousel.apply(action) {
            tracing::debug!(error = %e, "Ignored navigation");
        }
    }
}
