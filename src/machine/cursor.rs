//! The program counter: a position plus a heading

use crate::grid::Position;
use std::fmt;

/// Direction of travel across the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    /// Row and column delta for one step
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }

    /// Arrow glyph used by the viewer
    pub fn arrow(self) -> char {
        match self {
            Direction::Right => '→',
            Direction::Left => '←',
            Direction::Up => '↑',
            Direction::Down => '↓',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Right => "right",
            Direction::Left => "left",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

/// Execution cursor, starting at the top-left cell heading right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub position: Position,
    pub direction: Direction,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move exactly one cell in the current direction
    pub fn advance(&mut self) {
        let (dr, dc) = self.direction.delta();
        self.position.row += dr;
        self.position.col += dc;
    }

    pub fn row(&self) -> i64 {
        self.position.row
    }

    pub fn col(&self) -> i64 {
        self.position.col
    }
}
