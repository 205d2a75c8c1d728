//! Board coordinates
//!
//! x is the column (0 = left), y is the row (0 = bottom, increases upward).

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A single cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rotate 90 degrees clockwise about the origin
    pub const fn rotate_cw(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Rotate clockwise `turns` times (taken mod 4)
    pub fn rotate_cw_n(self, turns: u8) -> Self {
        (0..turns % 4).fold(self, |p, _| p.rotate_cw())
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, other: Position) -> Position {
        Position::new(self.x + other.x, self.y + other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An intersection between four cells
///
/// Used as the centre of the I and O pieces. The intersection at (x, y) sits
/// at the bottom-left corner of cell (x, y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn top_left(self) -> Position {
        Position::new(self.x - 1, self.y)
    }

    pub const fn top_right(self) -> Position {
        Position::new(self.x, self.y)
    }

    pub const fn bottom_left(self) -> Position {
        Position::new(self.x - 1, self.y - 1)
    }

    pub const fn bottom_right(self) -> Position {
        Position::new(self.x, self.y - 1)
    }
}

impl Add<Position> for GridPosition {
    type Output = GridPosition;

    fn add(self, offset: Position) -> GridPosition {
        GridPosition::new(self.x + offset.x, self.y + offset.y)
    }
}
