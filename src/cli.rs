//! Command line arguments and the settings resolved from them.

use std::{path::PathBuf, time::Duration};

use clap::{ArgAction, Parser};
use tracing::level_filters::LevelFilter;

use crate::{
    pathfinding::ExitCheck,
    ui::{Pacer, DEFAULT_FRAME_DELAY_MS},
};

/// Walks a maze with a depth-first search, printing the grid after every step.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Maze file: `<rows> <cols>` followed by the cell glyphs.
    #[arg(value_name = "MAZE_FILE")]
    pub maze_file: PathBuf,

    /// Delay between frames in milliseconds (100 on a terminal and 0 otherwise by default).
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Animate the walk in a full-screen terminal interface.
    #[arg(long)]
    pub tui: bool,

    /// Test for the exit only after the cell has been marked, which never finds it.
    #[arg(long)]
    pub legacy_exit_check: bool,

    /// Exit with status 2 when the exit cannot be reached.
    #[arg(long)]
    pub fail_if_unreachable: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Which renderer draws the walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RendererKind {
    /// Plain text frames on standard output.
    Text,
    /// Ratatui full-screen interface.
    Tui,
}

/// Run configuration resolved from the command line and the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Maze file to load.
    pub maze_file: PathBuf,
    /// Frame pacing.
    pub pacer: Pacer,
    /// Renderer to draw with.
    pub renderer: RendererKind,
    /// Exit test ordering of the walker.
    pub exit_check: ExitCheck,
    /// Whether an unreachable exit is reported through the exit status.
    pub fail_if_unreachable: bool,
    /// Default log level, overridden by `RUST_LOG`.
    pub log_level: LevelFilter,
}

impl Args {
    /// Resolves the arguments into run settings.
    ///
    /// Without an explicit `--delay-ms`, frames are paced only when someone can watch them: on a
    /// terminal or in the full-screen interface.
    pub fn into_settings(self, stdout_is_terminal: bool) -> Settings {
        let renderer = if self.tui {
            RendererKind::Tui
        } else {
            RendererKind::Text
        };
        let default_delay_ms = if stdout_is_terminal || renderer == RendererKind::Tui {
            DEFAULT_FRAME_DELAY_MS
        } else {
            0
        };
        let delay_ms = self.delay_ms.unwrap_or(default_delay_ms);
        let exit_check = if self.legacy_exit_check {
            ExitCheck::AfterMark
        } else {
            ExitCheck::BeforeMark
        };

        Settings {
            maze_file: self.maze_file,
            pacer: Pacer::new(Duration::from_millis(delay_ms)),
            renderer,
            exit_check,
            fail_if_unreachable: self.fail_if_unreachable,
            log_level: log_level(self.verbose),
        }
    }
}

/// Exit status of a run that stopped at argument parsing.
///
/// Help and version requests print to standard output and succeed. Every other parse failure is
/// a usage error and exits with status 1, rather than clap's own default of 2.
pub fn usage_exit_status(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Maps the `-v` count to a log level.
const fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}
