//! Maze walker that visualizes a depth-first search with backtracking.
//!
//! The crate loads a rectangular maze from a text file, walks it from the entrance with a
//! backtracking depth-first search and draws the grid after every step, either as plain text or
//! in a full-screen terminal interface.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod cli;
mod events;
mod file_loader;
mod map;
mod pathfinding;
mod types;
mod ui;

pub use app::App;
pub use cli::{usage_exit_status, Args, RendererKind, Settings};
pub use file_loader::{load_file, parse_file_contents, LoadError};
pub use map::Map;
pub use pathfinding::{ExitCheck, Observer, Outcome, Report, Step, Walker};
pub use types::{Cell, Direction, Position};
pub use ui::{
    status_line, Pacer, TextRenderer, TuiRenderer, DEFAULT_FRAME_DELAY_MS, FOUND_MESSAGE,
    NOT_FOUND_MESSAGE,
};
