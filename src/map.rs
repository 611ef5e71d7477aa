//! Maze grid module.
//!
//! This module contains the `Map` struct, the fixed-size grid of cells the loader fills and the
//! walker mutates in place.

use std::fmt;

use crate::types::{Cell, Position};

/// Labyrinth grid of `rows × cols` cells.
///
/// This structure represents the maze as loaded from a file and as rewritten by the walker while
/// it explores. Cells are stored in row-major order. The dimensions are fixed at construction; the
/// walker only ever rewrites cell markers, never the shape of the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    /// Number of rows in the grid.
    ///
    /// This field holds the row count declared by the maze file header, which never changes after
    /// loading.
    rows: usize,
    /// Number of columns in the grid.
    ///
    /// This field holds the column count declared by the maze file header. It doubles as the
    /// stride used to convert positions into storage indices.
    cols: usize,
    /// Cell storage, `rows * cols` long.
    ///
    /// This field holds every cell of the grid in row-major order, so that the cell at `(row,
    /// col)` lives at index `row * cols + col`.
    cells: Vec<Cell>,
}

impl Map {
    /// Builds a grid from row-major cells and its dimensions.
    ///
    /// Returns `None` when the cell count does not match `rows * cols`.
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Option<Self> {
        (rows.checked_mul(cols) == Some(cells.len())).then_some(Self { rows, cols, cells })
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the position lies inside the grid.
    pub const fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Returns the cell at the position, or `None` when out of bounds.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.index(pos).and_then(|idx| self.cells.get(idx)).copied()
    }

    /// Overwrites the cell at the position.
    ///
    /// Returns the previous cell, or `None` when the position is out of bounds and nothing was
    /// written.
    pub fn set(&mut self, pos: Position, cell: Cell) -> Option<Cell> {
        let idx = self.index(pos)?;
        self.cells
            .get_mut(idx)
            .map(|slot| std::mem::replace(slot, cell))
    }

    /// Iterates over the rows of the grid as slices.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        // `chunks` panics on zero; an empty grid yields no rows either way.
        self.cells.chunks(self.cols.max(1))
    }

    /// Iterates over every position holding the given cell, in row-major order.
    pub fn positions_of(&self, cell: Cell) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |&(_, candidate)| *candidate == cell)
            .filter_map(move |(idx, _)| self.position(idx))
    }

    /// Converts a position into a storage index.
    const fn index(&self, pos: Position) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        match pos.row.checked_mul(self.cols) {
            Some(offset) => offset.checked_add(pos.col),
            None => None,
        }
    }

    /// Converts a storage index back into a position.
    const fn position(&self, idx: usize) -> Option<Position> {
        match (idx.checked_div(self.cols), idx.checked_rem(self.cols)) {
            (Some(row), Some(col)) => Some(Position::new(row, col)),
            _ => None,
        }
    }
}

/// Renders the grid one row per line with cells separated by single spaces.
impl fmt::Display for Map {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            let mut cells = row.iter();
            if let Some(first) = cells.next() {
                write!(formatter, "{first}")?;
            }
            for cell in cells {
                write!(formatter, " {cell}")?;
            }
            writeln!(formatter)?;
        }

        Ok(())
    }
}

/// Builds a grid from string rows, one glyph per cell.
///
/// This helper is shared by the test modules of the crate so that mazes can be written inline as
/// short string slices.
#[cfg(test)]
pub(crate) fn grid(rows: &[&str]) -> Map {
    let cols = rows.first().map_or(0, |row| row.chars().count());
    let cells = rows
        .iter()
        .flat_map(|row| row.chars().map(Cell::from_char))
        .collect();
    Map::from_cells(rows.len(), cols, cells).expect("test rows should be rectangular")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_grid_dimensions() {
        let map = grid(&["exx", "#xs"]);

        assert_eq!(map.rows(), 2);
        assert_eq!(map.cols(), 3);
        assert_eq!(map.get(Position::new(0, 0)), Some(Cell::Entrance));
        assert_eq!(map.get(Position::new(1, 2)), Some(Cell::Exit));
        assert_eq!(map.get(Position::new(1, 0)), Some(Cell::Wall('#')));
    }

    #[test]
    fn test_map_from_cells_count_mismatch() {
        assert!(Map::from_cells(2, 2, vec![Cell::Open; 3]).is_none());
        assert!(Map::from_cells(2, 2, vec![Cell::Open; 4]).is_some());
    }

    #[test]
    fn test_map_out_of_bounds() {
        let mut map = grid(&["ex", "xs"]);

        assert!(!map.contains(Position::new(2, 0)));
        assert!(!map.contains(Position::new(0, 2)));
        assert_eq!(map.get(Position::new(2, 0)), None);
        assert_eq!(map.set(Position::new(0, 5), Cell::Visited), None);
        assert_eq!(map, grid(&["ex", "xs"]));
    }

    #[test]
    fn test_map_set_returns_previous() {
        let mut map = grid(&["ex", "xs"]);

        let previous = map.set(Position::new(1, 1), Cell::Current);

        assert_eq!(previous, Some(Cell::Exit));
        assert_eq!(map.get(Position::new(1, 1)), Some(Cell::Current));
    }

    #[test]
    fn test_map_positions_of() {
        let map = grid(&["ex#", "x#x", "#xs"]);

        let open: Vec<Position> = map.positions_of(Cell::Open).collect();

        assert_eq!(
            open,
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 2),
                Position::new(2, 1)
            ]
        );
    }

    #[test]
    fn test_map_display() {
        let map = grid(&["ex#", "#xs"]);
        assert_eq!(map.to_string(), "e x #\n# x s\n");
    }

    #[test]
    fn test_map_empty() {
        let map = Map::from_cells(0, 0, Vec::new()).expect("empty grid is rectangular");

        assert_eq!(map.rows(), 0);
        assert_eq!(map.iter_rows().count(), 0);
        assert_eq!(map.to_string(), "");
    }
}
