//! Program grid storage
//!
//! A program is an ordered sequence of rows, each an ordered sequence of
//! characters. Rows are stored verbatim: no trimming, no padding, and rows
//! may differ in length.
//!
//! # Out-of-bounds reads
//!
//! The cursor is free to walk off the stored text (for example after a
//! direction change at an edge). Reading such a position yields
//! [`Cell::Void`], which every dispatch mode treats as a no-op.

use std::fmt;

/// A position in the grid, 0-based
///
/// Coordinates are signed because the cursor may leave the grid on any side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: i64,
    pub col: i64,
}

impl Position {
    pub fn new(row: i64, col: i64) -> Self {
        Position { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, column {}", self.row, self.col)
    }
}

/// The content of one grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// A stored character (space included)
    Char(char),
    /// Outside the stored rows or past the end of a row
    Void,
}

impl Cell {
    /// The stored character, if any
    pub fn as_char(self) -> Option<char> {
        match self {
            Cell::Char(c) => Some(c),
            Cell::Void => None,
        }
    }
}

/// The immutable program text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<char>>,
}

impl Grid {
    /// Build a grid from rows, keeping each row exactly as given
    pub fn load<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = lines
            .into_iter()
            .map(|line| line.as_ref().chars().collect())
            .collect();
        Grid { rows }
    }

    /// Split program text into rows on `\n` / `\r\n`
    ///
    /// A trailing line break does not produce an extra empty row.
    pub fn from_source(source: &str) -> Self {
        Self::load(source.lines())
    }

    /// Read the cell at `(row, col)`
    pub fn cell_at(&self, row: i64, col: i64) -> Cell {
        if row < 0 || col < 0 {
            return Cell::Void;
        }
        self.rows
            .get(row as usize)
            .and_then(|r| r.get(col as usize))
            .map_or(Cell::Void, |&c| Cell::Char(c))
    }

    /// Read the cell under a [`Position`]
    pub fn cell(&self, position: Position) -> Cell {
        self.cell_at(position.row, position.col)
    }

    /// Number of stored rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// All rows (for UI display)
    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether a position holds a stored character
    pub fn contains(&self, position: Position) -> bool {
        matches!(self.cell(position), Cell::Char(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows_kept_verbatim() {
        let grid = Grid::load(["12 ", "", "v"]);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.rows()[0], vec!['1', '2', ' ']);
        assert!(grid.rows()[1].is_empty());
    }

    #[test]
    fn test_out_of_bounds_is_void() {
        let grid = Grid::load(["ab", "c"]);
        assert_eq!(grid.cell_at(0, 1), Cell::Char('b'));
        assert_eq!(grid.cell_at(1, 1), Cell::Void);
        assert_eq!(grid.cell_at(2, 0), Cell::Void);
        assert_eq!(grid.cell_at(-1, 0), Cell::Void);
        assert_eq!(grid.cell_at(0, -1), Cell::Void);
    }

    #[test]
    fn test_space_is_a_stored_char() {
        let grid = Grid::load([" "]);
        assert_eq!(grid.cell_at(0, 0), Cell::Char(' '));
        assert!(grid.contains(Position::new(0, 0)));
    }

    #[test]
    fn test_from_source_line_endings() {
        let grid = Grid::from_source("1E\r\n2\n");
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.cell_at(0, 1), Cell::Char('E'));
        assert_eq!(grid.cell_at(0, 2), Cell::Void);
        assert_eq!(grid.cell_at(1, 0), Cell::Char('2'));
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::from_source("");
        assert!(grid.is_empty());
        assert_eq!(grid.width(), 0);
        assert_eq!(grid.cell_at(0, 0), Cell::Void);
    }
}
