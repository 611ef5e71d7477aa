//! Depth-first maze walker.
//!
//! This module contains the backtracking search that explores the grid from the entrance,
//! rewriting cell markers as it goes and reporting every transition to an [`Observer`] so that
//! renderers can animate the walk.

use color_eyre::eyre::{eyre, Result};
use tracing::{debug, info, trace};

use crate::{
    map::Map,
    types::{Cell, Direction, Position},
};

/// When the walker checks whether a cell is the exit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExitCheck {
    /// Test the cell before it is overwritten with the current marker.
    #[default]
    BeforeMark,
    /// Test the cell after it has been overwritten with the current marker.
    ///
    /// The exit marker is gone by the time it is tested, so a walk in this mode never succeeds
    /// and ends with every reachable cell abandoned.
    AfterMark,
}

/// A single grid mutation performed by the walker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The walker stepped onto the cell and marked it as current.
    Entered(Position),
    /// The walker marked the cell as visited and is about to explore its neighbors.
    Abandoned(Position),
}

/// Receiver of the walker's step notifications.
///
/// The grid passed along reflects the state right after the step was applied.
pub trait Observer {
    /// Handles one walker step.
    ///
    /// # Errors
    ///
    /// Any error aborts the walk and is returned from [`Walker::run`].
    fn on_step(&mut self, map: &Map, step: Step) -> Result<()>;
}

impl<F> Observer for F
where
    F: FnMut(&Map, Step) -> Result<()>,
{
    fn on_step(&mut self, map: &Map, step: Step) -> Result<()> {
        self(map, step)
    }
}

/// Final result of a walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The exit was reached at the given position.
    Found(Position),
    /// Every reachable cell was explored without reaching the exit.
    Exhausted,
}

impl Outcome {
    /// Whether the exit was reached.
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Everything a finished walk leaves behind.
#[derive(Clone, Debug)]
pub struct Report {
    /// How the walk ended.
    pub outcome: Outcome,
    /// The grid with all the markers written during the walk.
    pub map: Map,
    /// Number of cells the walker stepped onto, the entrance included.
    pub entered: usize,
}

/// Backtracking depth-first walker over an owned grid.
///
/// This structure holds the grid for the duration of a single walk. The walk rewrites the grid
/// irreversibly, so [`Walker::run`] consumes the walker; the mutated grid comes back inside the
/// [`Report`].
#[derive(Debug)]
pub struct Walker {
    /// Grid being explored.
    ///
    /// This field holds the grid the walker writes its `o` and `.` markers into. Walls are never
    /// touched.
    map: Map,
    /// Exit test ordering.
    ///
    /// This field selects whether a cell is tested for the exit before or after it is overwritten
    /// with the current marker.
    exit_check: ExitCheck,
    /// Cells entered so far.
    ///
    /// This field counts every cell the walker stepped onto, the entrance included, and ends up
    /// in [`Report::entered`].
    entered: usize,
}

impl Walker {
    /// Creates a walker that checks for the exit before marking cells.
    ///
    /// This function takes ownership of the grid as loaded, with the entrance still carrying its
    /// `e` marker.
    pub const fn new(map: Map) -> Self {
        Self {
            map,
            exit_check: ExitCheck::BeforeMark,
            entered: 0,
        }
    }

    /// Selects when the exit test happens.
    #[must_use]
    pub fn with_exit_check(self, exit_check: ExitCheck) -> Self {
        Self { exit_check, ..self }
    }

    /// Explores the grid from `start` until the exit is reached or every reachable cell has been
    /// abandoned.
    ///
    /// Each explored cell owns its own frontier: its walkable neighbors in up, down, left, right
    /// order, explored last-in first-out. A frontier candidate that has been reached through
    /// another branch in the meantime is skipped when popped, so no cell is entered twice. The
    /// frontiers are kept on an explicit stack rather than the call stack, which keeps large
    /// mazes from exhausting the native stack.
    ///
    /// # Errors
    ///
    /// This function returns an error if `start` lies outside the grid or if the observer fails.
    pub fn run<O>(mut self, start: Position, observer: &mut O) -> Result<Report>
    where
        O: Observer + ?Sized,
    {
        if !self.map.contains(start) {
            return Err(eyre!(
                "start {start} lies outside the {}x{} grid",
                self.map.rows(),
                self.map.cols()
            ));
        }

        let outcome = self.explore(start, observer)?;
        info!(?outcome, entered = self.entered, "walk finished");

        Ok(Report {
            outcome,
            map: self.map,
            entered: self.entered,
        })
    }

    /// Drives the frontier stack.
    fn explore<O>(&mut self, start: Position, observer: &mut O) -> Result<Outcome>
    where
        O: Observer + ?Sized,
    {
        let mut frontiers = match self.enter(start, observer)? {
            Some(frontier) => vec![frontier],
            None => return Ok(Outcome::Found(start)),
        };

        while let Some(frontier) = frontiers.last_mut() {
            let Some(next) = frontier.pop() else {
                // Dead end: backtrack to the previous cell's frontier.
                let _ = frontiers.pop();
                continue;
            };

            if !self.map.get(next).is_some_and(Cell::is_walkable) {
                trace!(%next, "skipping candidate reached through another branch");
                continue;
            }

            match self.enter(next, observer)? {
                Some(frontier) => frontiers.push(frontier),
                None => return Ok(Outcome::Found(next)),
            }
        }

        Ok(Outcome::Exhausted)
    }

    /// Steps onto a cell.
    ///
    /// Returns `None` when the cell is the exit, otherwise the frontier of the now abandoned cell.
    fn enter<O>(&mut self, pos: Position, observer: &mut O) -> Result<Option<Vec<Position>>>
    where
        O: Observer + ?Sized,
    {
        let original = self
            .map
            .set(pos, Cell::Current)
            .ok_or_else(|| eyre!("position {pos} lies outside the grid"))?;
        self.entered += 1;
        debug!(%pos, cell = %original, "entered cell");
        observer.on_step(&self.map, Step::Entered(pos))?;

        let reached_exit = match self.exit_check {
            ExitCheck::BeforeMark => original == Cell::Exit,
            ExitCheck::AfterMark => self.map.get(pos) == Some(Cell::Exit),
        };
        if reached_exit {
            return Ok(None);
        }

        let _ = self.map.set(pos, Cell::Visited);
        observer.on_step(&self.map, Step::Abandoned(pos))?;

        Ok(Some(self.frontier(pos)))
    }

    /// Collects the walkable neighbors of a cell in enumeration order.
    fn frontier(&self, pos: Position) -> Vec<Position> {
        let frontier: Vec<Position> = Direction::ALL
            .iter()
            .filter_map(|&direction| pos.step(direction))
            .filter(|&next| self.map.get(next).is_some_and(Cell::is_walkable))
            .collect();
        trace!(%pos, ?frontier, "pushed frontier");

        frontier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::grid;

    /// Runs a walk and records every step it reports.
    fn walk(map: Map, start: Position, exit_check: ExitCheck) -> (Report, Vec<Step>) {
        let mut steps = Vec::new();
        let mut record = |_: &Map, step: Step| -> Result<()> {
            steps.push(step);
            Ok(())
        };
        let report = Walker::new(map)
            .with_exit_check(exit_check)
            .run(start, &mut record)
            .expect("walk should succeed");

        (report, steps)
    }

    /// Extracts the entered positions from a step log.
    fn entered(steps: &[Step]) -> Vec<Position> {
        steps
            .iter()
            .filter_map(|step| match *step {
                Step::Entered(pos) => Some(pos),
                Step::Abandoned(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_open_grid_finds_exit() {
        let map = grid(&["exx", "xxx", "xxs"]);

        let (report, _) = walk(map, Position::new(0, 0), ExitCheck::BeforeMark);

        assert_eq!(report.outcome, Outcome::Found(Position::new(2, 2)));
        assert!(report.outcome.is_found());
    }

    #[test]
    fn test_open_grid_visit_order() {
        let map = grid(&["exx", "xxx", "xxs"]);

        let (report, steps) = walk(map, Position::new(0, 0), ExitCheck::BeforeMark);

        assert_eq!(
            entered(&steps),
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 2),
                Position::new(1, 1),
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(2, 1),
                Position::new(2, 2),
            ]
        );
        assert_eq!(report.entered, 9);
    }

    #[test]
    fn test_entrance_marked_current_then_visited() {
        let map = grid(&["exx", "xxx", "xxs"]);
        let start = Position::new(0, 0);
        let mut seen = Vec::new();
        let mut record = |map: &Map, step: Step| -> Result<()> {
            seen.push((step, map.get(start)));
            Ok(())
        };

        let _ = Walker::new(map)
            .run(start, &mut record)
            .expect("walk should succeed");

        assert_eq!(
            seen.get(..2),
            Some(
                &[
                    (Step::Entered(start), Some(Cell::Current)),
                    (Step::Abandoned(start), Some(Cell::Visited)),
                ][..]
            )
        );
    }

    #[test]
    fn test_walled_row_exhausts() {
        let map = grid(&["exx", "###", "xxs"]);

        let (report, _) = walk(map, Position::new(0, 0), ExitCheck::BeforeMark);

        assert_eq!(report.outcome, Outcome::Exhausted);
        assert_eq!(report.map.to_string(), ". . .\n# # #\nx x s\n");
    }

    #[test]
    fn test_exhausted_walk_abandons_every_reachable_cell() {
        let map = grid(&["exx#x", "x#x#x", "xxx#s"]);

        let (report, steps) = walk(map, Position::new(0, 0), ExitCheck::BeforeMark);

        assert_eq!(report.outcome, Outcome::Exhausted);
        assert_eq!(report.map.to_string(), ". . . # x\n. # . # x\n. . . # s\n");
        assert_eq!(report.entered, 8);
        let mut visited = entered(&steps);
        visited.sort();
        visited.dedup();
        assert_eq!(visited.len(), 8, "no cell should be entered twice");
    }

    #[test]
    fn test_cycle_does_not_reenter_cells() {
        let map = grid(&["ex", "xx"]);

        let (report, steps) = walk(map, Position::new(0, 0), ExitCheck::BeforeMark);

        assert_eq!(report.outcome, Outcome::Exhausted);
        assert_eq!(
            entered(&steps),
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 1),
                Position::new(1, 0),
            ]
        );
    }

    #[test]
    fn test_right_explored_before_down() {
        let map = grid(&["exs", "x##", "x##"]);

        let (report, steps) = walk(map, Position::new(0, 0), ExitCheck::BeforeMark);

        assert_eq!(report.outcome, Outcome::Found(Position::new(0, 2)));
        assert_eq!(
            entered(&steps),
            vec![Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
        );
    }

    #[test]
    fn test_backtracks_out_of_dead_end() {
        let map = grid(&["ex#", "x##", "xxs"]);

        let (report, steps) = walk(map, Position::new(0, 0), ExitCheck::BeforeMark);

        assert_eq!(report.outcome, Outcome::Found(Position::new(2, 2)));
        assert_eq!(
            entered(&steps).first().copied(),
            Some(Position::new(0, 0))
        );
        assert_eq!(
            entered(&steps).get(1).copied(),
            Some(Position::new(0, 1)),
            "the right branch is explored first and dead-ends"
        );
        assert_eq!(report.map.get(Position::new(0, 1)), Some(Cell::Visited));
        assert_eq!(report.map.get(Position::new(2, 2)), Some(Cell::Current));
    }

    #[test]
    fn test_exit_cell_left_as_current() {
        let map = grid(&["es"]);

        let (report, steps) = walk(map, Position::new(0, 0), ExitCheck::BeforeMark);

        assert_eq!(report.outcome, Outcome::Found(Position::new(0, 1)));
        assert_eq!(report.map.to_string(), ". o\n");
        assert_eq!(steps.last(), Some(&Step::Entered(Position::new(0, 1))));
    }

    #[test]
    fn test_after_mark_check_never_finds_exit() {
        let map = grid(&["exx", "xxx", "xxs"]);

        let (report, _) = walk(map, Position::new(0, 0), ExitCheck::AfterMark);

        assert_eq!(report.outcome, Outcome::Exhausted);
        assert_eq!(report.map.to_string(), ". . .\n. . .\n. . .\n");
    }

    #[test]
    fn test_single_entrance_cell_cannot_succeed() {
        let map = grid(&["e"]);

        let (report, steps) = walk(map, Position::new(0, 0), ExitCheck::BeforeMark);

        assert_eq!(report.outcome, Outcome::Exhausted);
        assert_eq!(steps.len(), 2);
    }

    #[test]
    fn test_start_out_of_bounds() {
        let map = grid(&["es"]);
        let mut ignore = |_: &Map, _: Step| -> Result<()> { Ok(()) };

        let result = Walker::new(map).run(Position::new(3, 0), &mut ignore);

        assert!(result.is_err(), "start outside the grid should fail");
    }

    #[test]
    fn test_observer_error_aborts_walk() {
        let map = grid(&["exs"]);
        let mut calls = 0_usize;
        let mut failing = |_: &Map, _: Step| -> Result<()> {
            calls += 1;
            Err(eyre!("renderer gone"))
        };

        let result = Walker::new(map).run(Position::new(0, 0), &mut failing);

        assert!(result.is_err(), "observer failure should abort the walk");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_long_corridor_does_not_overflow() {
        let mut row = String::from("e");
        row.push_str(&"x".repeat(200_000));
        row.push('s');
        let map = grid(&[row.as_str()]);

        let (report, _) = walk(map, Position::new(0, 0), ExitCheck::BeforeMark);

        assert_eq!(report.outcome, Outcome::Found(Position::new(0, 200_001)));
        assert_eq!(report.entered, 200_002);
    }
}
