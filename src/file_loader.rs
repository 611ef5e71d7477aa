//! File loading and validation utilities for maze files.
//!
//! A maze file starts with the `rows` and `cols` integers, followed by `rows × cols` cell glyphs
//! in row-major order. Whitespace between glyphs is optional, so both `x x s` and `xxs` describe
//! the same three cells.
//!
//! Files are read as bytes. Valid UTF-8 is decoded as such; anything else is decoded one byte per
//! glyph, so single-byte wall characters from legacy code pages load as walls.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    map::Map,
    types::{Cell, Position},
};

/// Errors raised while reading a maze file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The maze file could not be read.
    #[error("failed to open maze file {}", path.display())]
    Open {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file ended before both dimensions were read.
    #[error("missing maze dimensions, expected `<rows> <cols>` at the start of the file")]
    MissingDimensions,
    /// A dimension token is not a non-negative integer.
    #[error("invalid maze dimension `{token}`")]
    InvalidDimension {
        /// Offending token.
        token: String,
    },
    /// One of the dimensions is zero.
    #[error("maze dimensions {rows}x{cols} describe an empty grid")]
    EmptyMaze {
        /// Declared rows.
        rows: usize,
        /// Declared columns.
        cols: usize,
    },
    /// The declared cell count does not fit in memory addressing.
    #[error("maze dimensions {rows}x{cols} are too large")]
    TooLarge {
        /// Declared rows.
        rows: usize,
        /// Declared columns.
        cols: usize,
    },
    /// The file holds fewer cells than the dimensions declare.
    #[error("maze declares {expected} cells but only {found} were found")]
    TooFewCells {
        /// Cells declared by the dimensions.
        expected: usize,
        /// Cells actually present.
        found: usize,
    },
    /// The file holds more cells than the dimensions declare.
    #[error("maze declares {expected} cells but the file holds more")]
    TooManyCells {
        /// Cells declared by the dimensions.
        expected: usize,
    },
    /// More than one entrance marker is present.
    #[error("maze has more than one entrance, at {first} and {second}")]
    MultipleEntrances {
        /// First entrance in row-major order.
        first: Position,
        /// Second entrance in row-major order.
        second: Position,
    },
    /// No entrance marker is present.
    #[error("starting position not found in the maze")]
    StartNotFound,
}

/// Reads and validates a maze file from disk.
///
/// # Errors
///
/// Returns [`LoadError::Open`] when the file cannot be read, and any error of
/// [`parse_file_contents`] for its contents.
pub fn load_file(path: &Path) -> Result<(Map, Position), LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let contents = match String::from_utf8(bytes) {
        Ok(contents) => contents,
        Err(err) => {
            debug!(path = %path.display(), "maze file is not utf-8, decoding bytes as latin-1");
            err.into_bytes().into_iter().map(char::from).collect()
        }
    };

    let (map, start) = parse_file_contents(&contents)?;
    info!(
        path = %path.display(),
        rows = map.rows(),
        cols = map.cols(),
        %start,
        "loaded maze"
    );

    Ok((map, start))
}

/// Parses maze file contents into a grid and the position of its entrance.
///
/// The grid is returned exactly as read: the entrance keeps its `e` marker.
///
/// # Errors
///
/// This function returns an error if:
/// - The dimensions are missing, malformed, zero or overflowing
/// - The cell count differs from `rows * cols`
/// - The entrance marker is missing or repeated
pub fn parse_file_contents(input: &str) -> Result<(Map, Position), LoadError> {
    let mut tokens = input.split_ascii_whitespace();
    let rows = parse_dimension(tokens.next())?;
    let cols = parse_dimension(tokens.next())?;

    if rows == 0 || cols == 0 {
        return Err(LoadError::EmptyMaze { rows, cols });
    }
    let expected = rows
        .checked_mul(cols)
        .ok_or(LoadError::TooLarge { rows, cols })?;

    let mut glyphs = tokens.flat_map(str::chars);
    let mut cells = Vec::with_capacity(expected.min(input.len()));
    let mut start = None;

    for glyph in glyphs.by_ref().take(expected) {
        let cell = Cell::from_char(glyph);
        if cell == Cell::Entrance {
            let pos = Position::new(cells.len() / cols, cells.len() % cols);
            if let Some(first) = start {
                return Err(LoadError::MultipleEntrances { first, second: pos });
            }
            start = Some(pos);
        }
        cells.push(cell);
    }

    if cells.len() < expected {
        return Err(LoadError::TooFewCells {
            expected,
            found: cells.len(),
        });
    }
    if glyphs.next().is_some() {
        return Err(LoadError::TooManyCells { expected });
    }

    let start = start.ok_or(LoadError::StartNotFound)?;
    let map = Map::from_cells(rows, cols, cells).ok_or(LoadError::TooFewCells {
        expected,
        found: 0,
    })?;
    debug!(rows, cols, %start, "parsed maze contents");

    Ok((map, start))
}

/// Parses one of the two leading dimension tokens.
fn parse_dimension(token: Option<&str>) -> Result<usize, LoadError> {
    let token = token.ok_or(LoadError::MissingDimensions)?;
    token.parse().map_err(|_err| LoadError::InvalidDimension {
        token: token.to_owned(),
    })
}
