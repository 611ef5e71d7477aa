//! Renderers that turn walker steps into visible frames.
//!
//! Two renderers are provided: [`TextRenderer`] prints every frame as plain text, and
//! [`TuiRenderer`] draws the frames in a Ratatui terminal. Both draw one frame per entered cell
//! and pause for the configured [`Pacer`] delay afterwards.

use std::{io::Write, thread, time::Duration};

use color_eyre::eyre::Result;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use crate::{
    events::{self, Control},
    map::Map,
    pathfinding::{Observer, Outcome, Step},
    types::Cell,
};

/// Default delay between frames, in milliseconds.
pub const DEFAULT_FRAME_DELAY_MS: u64 = 100;

/// Status line printed when the exit is reached.
pub const FOUND_MESSAGE: &str = "Exit found!";
/// Status line printed when the exit cannot be reached.
pub const NOT_FOUND_MESSAGE: &str = "Could not find the exit.";

/// Returns the status line for a finished walk.
pub const fn status_line(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Found(_) => FOUND_MESSAGE,
        Outcome::Exhausted => NOT_FOUND_MESSAGE,
    }
}

/// Frame pacing for visualization.
///
/// A zero delay disables pacing entirely, which is what non-interactive runs and tests use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pacer {
    /// Time to wait after each frame.
    delay: Duration,
}

impl Pacer {
    /// Creates a pacer waiting `delay` after each frame.
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Creates a pacer that never waits.
    pub const fn disabled() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    /// The delay applied after each frame.
    pub const fn delay(self) -> Duration {
        self.delay
    }

    /// Whether the pacer waits at all.
    pub const fn is_enabled(self) -> bool {
        !self.delay.is_zero()
    }

    /// Blocks the current thread for the frame delay.
    pub fn pause(self) {
        if self.is_enabled() {
            thread::sleep(self.delay);
        }
    }
}

/// Plain text renderer.
///
/// Each frame is the grid, one row per line with cells separated by single spaces, followed by a
/// blank line.
#[derive(Debug)]
pub struct TextRenderer<W> {
    /// Output sink, usually standard output.
    out: W,
    /// Frame pacing.
    pacer: Pacer,
}

impl<W: Write> TextRenderer<W> {
    /// Creates a text renderer writing to `out`.
    pub const fn new(out: W, pacer: Pacer) -> Self {
        Self { out, pacer }
    }

    /// Writes one frame of the grid.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn render(&mut self, map: &Map) -> Result<()> {
        writeln!(self.out, "{map}")?;
        self.out.flush()?;

        Ok(())
    }

    /// Writes the final status line.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn report(&mut self, outcome: Outcome) -> Result<()> {
        writeln!(self.out, "{}", status_line(outcome))?;
        self.out.flush()?;

        Ok(())
    }
}

impl<W: Write> Observer for TextRenderer<W> {
    fn on_step(&mut self, map: &Map, step: Step) -> Result<()> {
        if matches!(step, Step::Entered(_)) {
            self.render(map)?;
            self.pacer.pause();
        }

        Ok(())
    }
}

/// Ratatui renderer.
///
/// This structure draws the grid centered in the terminal with a status bar underneath. While the
/// walk runs, the `f` key drops the remaining frame delays; once it is over, `q` leaves the screen.
pub struct TuiRenderer<B: Backend> {
    /// Terminal the frames are drawn into.
    ///
    /// This field holds the Ratatui terminal, which is the alternate screen when running the
    /// binary and a `TestBackend` in tests.
    terminal: Terminal<B>,
    /// Frame pacing.
    ///
    /// This field holds the delay applied after each drawn frame, unless the user has asked to
    /// fast-forward.
    pacer: Pacer,
    /// Whether keyboard events are read from the real terminal.
    ///
    /// This field is `false` for backends that are not attached to a terminal, in which case no
    /// key hints are shown and no events are polled.
    interactive: bool,
    /// Set once the user asked to skip the remaining delays.
    fast_forward: bool,
    /// Cells entered so far.
    ///
    /// This field holds the step counter shown in the status bar. Abandon steps do not count.
    entered: usize,
}

impl<B: Backend> TuiRenderer<B> {
    /// Creates a renderer drawing into `terminal`.
    ///
    /// A non-interactive renderer never polls for keyboard input, which is needed for test
    /// backends that are not attached to a terminal.
    pub const fn new(terminal: Terminal<B>, pacer: Pacer, interactive: bool) -> Self {
        Self {
            terminal,
            pacer,
            interactive,
            fast_forward: false,
            entered: 0,
        }
    }

    /// Draws the final frame and, when interactive, waits for the user to quit.
    ///
    /// # Errors
    ///
    /// This function may return errors from drawing or reading terminal events.
    pub fn finish(&mut self, map: &Map, outcome: Outcome) -> Result<()> {
        let status = if self.interactive {
            format!("{} (q) quit", status_line(outcome))
        } else {
            status_line(outcome).to_owned()
        };
        self.draw(map, &status)?;

        if self.interactive {
            events::wait_for_quit()?;
        }

        Ok(())
    }

    /// Draws one frame with the given status text.
    fn draw(&mut self, map: &Map, status: &str) -> Result<()> {
        // Pre-compute everything before entering the draw closure; oversized grids saturate and
        // are clipped by the layout.
        let lines = grid_lines(map);
        let width =
            u16::try_from(map.cols().saturating_mul(2).saturating_add(1)).unwrap_or(u16::MAX);
        let height = u16::try_from(map.rows().saturating_add(2)).unwrap_or(u16::MAX);

        let _ = self
            .terminal
            .draw(|frame| draw_frame(frame, lines, width, height, status))?;

        Ok(())
    }
}

impl<B: Backend> Observer for TuiRenderer<B> {
    fn on_step(&mut self, map: &Map, step: Step) -> Result<()> {
        let Step::Entered(pos) = step else {
            return Ok(());
        };
        self.entered += 1;

        let status = if self.interactive && !self.fast_forward {
            format!("step {} at {pos} (f) fast-forward", self.entered)
        } else {
            format!("step {} at {pos}", self.entered)
        };
        self.draw(map, &status)?;

        if self.fast_forward || !self.pacer.is_enabled() {
            return Ok(());
        }
        if self.interactive {
            if events::pace(self.pacer.delay())? == Control::FastForward {
                self.fast_forward = true;
            }
        } else {
            self.pacer.pause();
        }

        Ok(())
    }
}

/// Converts the grid into styled lines, one per row.
fn grid_lines(map: &Map) -> Vec<Line<'static>> {
    map.iter_rows()
        .map(|row| {
            let mut spans = Vec::with_capacity(row.len().saturating_mul(2));
            for (idx, cell) in row.iter().enumerate() {
                if idx > 0 {
                    spans.push(Span::raw(" "));
                }
                spans.push(Span::styled(cell.glyph().to_string(), cell_style(*cell)));
            }
            Line::from(spans)
        })
        .collect()
}

/// Picks the display style of a cell.
fn cell_style(cell: Cell) -> Style {
    match cell {
        Cell::Entrance => Style::default().fg(Color::Cyan),
        Cell::Exit => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Cell::Open => Style::default().fg(Color::White),
        Cell::Current => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Cell::Visited => Style::default().fg(Color::DarkGray),
        Cell::Wall(_) => Style::default().fg(Color::Green),
    }
}

/// Lays out and renders the maze block and the status bar.
fn draw_frame(frame: &mut Frame, lines: Vec<Line<'static>>, width: u16, height: u16, status: &str) {
    frame.render_widget(Clear, frame.area());

    let [maze_area, status_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).areas(frame.area());

    let [maze_area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(maze_area);
    let [maze_area] = Layout::horizontal([Constraint::Length(width.saturating_add(2))])
        .flex(Flex::Center)
        .areas(maze_area);

    let block = Block::bordered()
        .title("Maze")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Rounded);
    let inner = block.inner(maze_area);
    frame.render_widget(block, maze_area);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered_row_area(inner),
    );

    let status_block = Block::default()
        .title(status.to_owned())
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    frame.render_widget(status_block, status_area);
}

/// Trims the inner block area to exclude the single column of horizontal padding.
const fn centered_row_area(inner: Rect) -> Rect {
    Rect {
        x: inner.x.saturating_add(1),
        width: inner.width.saturating_sub(2),
        ..inner
    }
}
