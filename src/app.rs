//! Core application flow: load the maze, walk it, report the outcome.

use std::{
    io::{self, Write},
    process::ExitCode,
};

use color_eyre::eyre::{eyre, Result, WrapErr as _};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::{RendererKind, Settings},
    file_loader,
    pathfinding::{Outcome, Walker},
    types::Position,
    ui::{self, TextRenderer, TuiRenderer},
};

/// Exit status used with `--fail-if-unreachable` when the exit cannot be reached.
const UNREACHABLE_EXIT_STATUS: u8 = 2;

/// Application entry point holding the resolved settings.
///
/// This structure drives a single run: it loads the maze file, hands the grid to a [`Walker`]
/// observed by the configured renderer, and turns the outcome into a status line and an exit
/// status.
#[derive(Debug)]
pub struct App {
    /// Run configuration.
    ///
    /// This field holds everything resolved from the command line: the maze file, frame pacing,
    /// the renderer, the walker's exit check and the exit-status policy.
    settings: Settings,
}

impl App {
    /// Creates an application for the given settings.
    ///
    /// This function does no I/O; the maze file is only read once [`App::run`] is called.
    pub const fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Installs the log subscriber, writing to standard error.
    ///
    /// The full-screen interface owns the terminal, so no subscriber is installed for it.
    ///
    /// # Errors
    ///
    /// This function returns an error if a global subscriber is already set.
    pub fn init_logging(&self) -> Result<()> {
        if self.settings.renderer == RendererKind::Tui {
            return Ok(());
        }

        init_subscriber(self.settings.log_level)
    }

    /// Loads the maze, walks it with the configured renderer and reports the outcome.
    ///
    /// This function is the main loop of the binary. In text mode every frame goes to standard
    /// output; in the full-screen interface the terminal is restored before the status line is
    /// printed.
    ///
    /// # Errors
    ///
    /// This function returns an error if the maze cannot be loaded or if rendering fails.
    pub fn run(&self) -> Result<ExitCode> {
        let outcome = match self.settings.renderer {
            RendererKind::Text => self.run_with_output(io::stdout().lock())?,
            RendererKind::Tui => self.run_tui()?,
        };

        Ok(ExitCode::from(self.exit_status(outcome)))
    }

    /// Runs the walk with the text renderer writing to `out`.
    ///
    /// # Errors
    ///
    /// This function returns an error if the maze cannot be loaded or if writing fails.
    pub fn run_with_output<W: Write>(&self, out: W) -> Result<Outcome> {
        let (walker, start) = self.prepare()?;

        let mut renderer = TextRenderer::new(out, self.settings.pacer);
        let report = walker.run(start, &mut renderer)?;
        renderer.report(report.outcome)?;

        Ok(report.outcome)
    }

    /// Runs the walk in the full-screen interface.
    fn run_tui(&self) -> Result<Outcome> {
        // Load before taking over the terminal so that loader errors print normally.
        let (walker, start) = self.prepare()?;

        let terminal = ratatui::try_init().wrap_err("failed to initialize the terminal")?;
        let mut renderer = TuiRenderer::new(terminal, self.settings.pacer, true);
        let result = walker
            .run(start, &mut renderer)
            .and_then(|report| {
                renderer.finish(&report.map, report.outcome)?;
                Ok(report.outcome)
            });
        ratatui::restore();

        let outcome = result?;
        println!("{}", ui::status_line(outcome));

        Ok(outcome)
    }

    /// Loads the maze file and builds the walker.
    fn prepare(&self) -> Result<(Walker, Position)> {
        let (map, start) = file_loader::load_file(&self.settings.maze_file)?;
        info!(
            exit_check = ?self.settings.exit_check,
            delay = ?self.settings.pacer.delay(),
            "starting walk"
        );

        Ok((
            Walker::new(map).with_exit_check(self.settings.exit_check),
            start,
        ))
    }

    /// Maps the outcome to the process exit status.
    ///
    /// Both outcomes exit with status 0 unless `--fail-if-unreachable` was given.
    pub const fn exit_status(&self, outcome: Outcome) -> u8 {
        if self.settings.fail_if_unreachable && !outcome.is_found() {
            UNREACHABLE_EXIT_STATUS
        } else {
            0
        }
    }
}

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, falling back to `level`.
fn init_subscriber(level: LevelFilter) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))
}
