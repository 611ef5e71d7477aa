//! Type definitions for maze cells, grid coordinates and movement directions.

use std::fmt;

/// Marker of the entrance cell in maze files.
pub(crate) const ENTRANCE: char = 'e';
/// Marker of the exit cell in maze files.
pub(crate) const EXIT: char = 's';
/// Marker of an open, traversable cell.
pub(crate) const OPEN: char = 'x';
/// Runtime marker of the cell currently being explored.
pub(crate) const CURRENT: char = 'o';
/// Runtime marker of a cell that was explored and abandoned.
pub(crate) const VISITED: char = '.';

/// A single cell of the maze grid.
///
/// Cells carry both the terrain read from the maze file and the markers written by the walker
/// while it explores the grid. Any character outside the known alphabet is a wall and keeps its
/// original glyph so that rendering reproduces the input layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// The entrance of the maze, where the walk starts.
    Entrance,
    /// The exit of the maze, the goal of the walk.
    Exit,
    /// An open cell that has not been explored yet.
    Open,
    /// The cell the walker is standing on.
    Current,
    /// A cell that was explored and left behind.
    Visited,
    /// A blocked cell, holding the glyph it was read with.
    Wall(char),
}

impl Cell {
    /// Builds a cell from its maze file glyph.
    pub const fn from_char(glyph: char) -> Self {
        match glyph {
            ENTRANCE => Self::Entrance,
            EXIT => Self::Exit,
            OPEN => Self::Open,
            CURRENT => Self::Current,
            VISITED => Self::Visited,
            other => Self::Wall(other),
        }
    }

    /// Returns the glyph used to render the cell.
    pub const fn glyph(self) -> char {
        match self {
            Self::Entrance => ENTRANCE,
            Self::Exit => EXIT,
            Self::Open => OPEN,
            Self::Current => CURRENT,
            Self::Visited => VISITED,
            Self::Wall(glyph) => glyph,
        }
    }

    /// Whether the walker may still step onto this cell.
    ///
    /// Only unvisited open cells and the exit qualify; everything the walker has already marked
    /// is out of the frontier for good.
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Open | Self::Exit)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.glyph())
    }
}

/// A zero-indexed `(row, col)` coordinate in the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Row index, counted from the top.
    pub row: usize,
    /// Column index, counted from the left.
    pub col: usize,
}

impl Position {
    /// Creates a new position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the neighboring position in the given direction.
    ///
    /// Moving above the first row or left of the first column yields `None`; the upper bounds are
    /// checked by the grid itself.
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (row_delta, col_delta) = direction.delta();
        let Some(row) = self.row.checked_add_signed(row_delta) else {
            return None;
        };
        let Some(col) = self.col.checked_add_signed(col_delta) else {
            return None;
        };

        Some(Self { row, col })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.row, self.col)
    }
}

/// The four axis-aligned moves, in the order neighbors are enumerated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// One row up.
    Up,
    /// One row down.
    Down,
    /// One column left.
    Left,
    /// One column right.
    Right,
}

impl Direction {
    /// Enumeration order used when collecting frontier candidates.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the `(row, col)` offset of the move.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_from_char_known_markers() {
        assert_eq!(Cell::from_char('e'), Cell::Entrance);
        assert_eq!(Cell::from_char('s'), Cell::Exit);
        assert_eq!(Cell::from_char('x'), Cell::Open);
        assert_eq!(Cell::from_char('o'), Cell::Current);
        assert_eq!(Cell::from_char('.'), Cell::Visited);
    }

    #[test]
    fn test_cell_from_char_walls_keep_glyph() {
        assert_eq!(Cell::from_char('#'), Cell::Wall('#'));
        assert_eq!(Cell::from_char('1'), Cell::Wall('1'));
        assert_eq!(Cell::Wall('#').glyph(), '#');
        assert_eq!(format!("{}", Cell::Wall('|')), "|");
    }

    #[test]
    fn test_cell_glyph_inverts_from_char() {
        for glyph in ['e', 's', 'x', 'o', '.', '#', 'w'] {
            assert_eq!(Cell::from_char(glyph).glyph(), glyph);
        }
    }

    #[test]
    fn test_cell_walkable() {
        assert!(Cell::Open.is_walkable());
        assert!(Cell::Exit.is_walkable());
        assert!(!Cell::Entrance.is_walkable());
        assert!(!Cell::Current.is_walkable());
        assert!(!Cell::Visited.is_walkable());
        assert!(!Cell::Wall('#').is_walkable());
    }

    #[test]
    fn test_position_step_in_all_directions() {
        let origin = Position::new(1, 1);

        assert_eq!(origin.step(Direction::Up), Some(Position::new(0, 1)));
        assert_eq!(origin.step(Direction::Down), Some(Position::new(2, 1)));
        assert_eq!(origin.step(Direction::Left), Some(Position::new(1, 0)));
        assert_eq!(origin.step(Direction::Right), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_position_step_underflow() {
        let corner = Position::new(0, 0);

        assert_eq!(corner.step(Direction::Up), None);
        assert_eq!(corner.step(Direction::Left), None);
    }

    #[test]
    fn test_direction_order() {
        assert_eq!(
            Direction::ALL,
            [
                Direction::Up,
                Direction::Down,
                Direction::Left,
                Direction::Right
            ]
        );
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(2, 7).to_string(), "(2, 7)");
    }
}
