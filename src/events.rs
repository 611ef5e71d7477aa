//! Keyboard handling for the terminal renderer.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

/// What the user asked for while a frame was on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Control {
    /// Keep animating at the configured pace.
    Continue,
    /// Skip every remaining frame delay.
    FastForward,
}

/// Waits out a frame delay while listening for keyboard input.
///
/// The wait ends early when the user presses `f`, which is reported as
/// [`Control::FastForward`]. Other keys are ignored and the remaining delay is still honored.
pub(crate) fn pace(delay: Duration) -> Result<Control> {
    let deadline = Instant::now() + delay;

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            return Ok(Control::Continue);
        }
        if event::poll(remaining)? && read_key()? == Some(KeyCode::Char('f')) {
            return Ok(Control::FastForward);
        }
    }
}

/// Blocks until the user presses `q` or `Esc`.
pub(crate) fn wait_for_quit() -> Result<()> {
    loop {
        if matches!(read_key()?, Some(KeyCode::Char('q') | KeyCode::Esc)) {
            return Ok(());
        }
    }
}

/// Reads the next event and returns its key code if it is a key press.
fn read_key() -> Result<Option<KeyCode>> {
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key.code)),
        _ => Ok(None),
    }
}
