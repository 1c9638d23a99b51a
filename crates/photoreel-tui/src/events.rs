//! Terminal input, reduced to what the viewer reacts to.
//!
//! The viewer only redraws after input or a finished fetch, so there is no
//! tick. Key releases, mouse moves, drags, scrolling, focus and paste events
//! never reach the app.

use std::io;

use anyhow::{Context as _, Result, bail};
use crossterm::event::{
    Event as TerminalEvent, EventStream, KeyEvent, KeyEventKind, MouseButton, MouseEventKind,
};
use futures::{Stream, StreamExt};

/// Input the app handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Key press or auto-repeat.
    Key(KeyEvent),
    /// Left button pressed at a terminal cell.
    Click { column: u16, row: u16 },
    /// Terminal size changed; the next frame re-lays out click targets.
    Resized,
}

impl Input {
    /// Keep the terminal events the viewer cares about.
    pub fn from_terminal(event: TerminalEvent) -> Option<Self> {
        match event {
            TerminalEvent::Key(key) if key.kind != KeyEventKind::Release => Some(Input::Key(key)),
            TerminalEvent::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                Some(Input::Click {
                    column: mouse.column,
                    row: mouse.row,
                })
            }
            TerminalEvent::Resize(..) => Some(Input::Resized),
            _ => None,
        }
    }
}

/// Filtered view over a stream of terminal events.
pub struct Inputs<S = EventStream> {
    events: S,
}

impl Inputs {
    /// Read from the real terminal.
    pub fn terminal() -> Self {
        Self::from_stream(EventStream::new())
    }
}

impl<S> Inputs<S>
where
    S: Stream<Item = io::Result<TerminalEvent>> + Unpin,
{
    pub fn from_stream(events: S) -> Self {
        Self { events }
    }

    /// Wait for the next relevant input.
    ///
    /// Fails when the terminal stops delivering events.
    pub async fn next(&mut self) -> Result<Input> {
        loop {
            match self.events.next().await {
                Some(Ok(event)) => {
                    if let Some(input) = Input::from_terminal(event) {
                        return Ok(input);
                    }
                }
                Some(Err(e)) => return Err(e).context("Failed to read terminal input"),
                None => bail!("Terminal input closed"),
            }
        }
    }
}
