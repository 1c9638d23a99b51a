//! Photoreel TUI - a terminal carousel over your recent photos.
//!
//! Talks to the Photoreel server's `/api/photos` with the session cookie and
//! lets you step through the result with the keyboard or mouse.

pub mod app;
pub mod carousel;
pub mod client;
pub mod events;
pub mod keys;
pub mod logs;
pub mod ui;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::{self, Stdout};
use std::panic;

pub use app::{App, Screen};
pub use carousel::{Carousel, CarouselAction, CarouselError, CarouselView, SlideView, ThumbnailView};
pub use client::{ClientError, ServerClient};
pub use events::{Input, Inputs};
pub use keys::{KeyListeners, Subscription};
pub use logs::{LogBuffer, TuiLogLayer};

/// Terminal type alias for convenience.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode.
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Install a panic hook that restores the terminal before panicking.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));
}

/// Configuration for running the TUI.
#[derive(Debug, Clone)]
pub struct TuiConfig {
    /// Server URL to connect to.
    pub server_url: String,
    /// `Cookie` header value carrying the session.
    pub cookie: Option<String>,
    /// Buffer the caller's [`TuiLogLayer`] writes into.
    pub log_buffer: Option<LogBuffer>,
}

impl TuiConfig {
    /// Create config with just a server URL.
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            cookie: None,
            log_buffer: None,
        }
    }

    /// Send this `Cookie` header value with every request.
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    /// Show entries from this buffer in the logs panel.
    pub fn with_log_buffer(mut self, buffer: LogBuffer) -> Self {
        self.log_buffer = Some(buffer);
        self
    }
}

/// Run the TUI against `server_url` without a session cookie.
pub async fn run(server_url: &str) -> Result<()> {
    run_with_config(TuiConfig::new(server_url)).await
}

/// Run the TUI application with full configuration.
///
/// Tracing is left to the caller; route it into a [`TuiLogLayer`] over the
/// same buffer to see it in the logs panel.
pub async fn run_with_config(config: TuiConfig) -> Result<()> {
    let client = ServerClient::new(&config.server_url, config.cookie)?;
    let mut app = App::new(client, config.log_buffer.unwrap_or_default());

    install_panic_hook();
    let mut terminal = init_terminal()?;

    let result = app.run(&mut terminal).await;

    restore_terminal(&mut terminal)?;

    result
}
