//! Tetromino definitions and orientations
//!
//! All 7 standard tetrominoes with the constant data each one needs:
//! colour, Up-relative block offsets and spawn pose.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::position::{GridPosition, Position};

/// Colour tag stored in board cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Colour {
    LightBlue,
    Blue,
    Orange,
    Yellow,
    Green,
    Purple,
    Red,
}

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TetrominoType {
    I, // Light blue - long bar
    O, // Yellow - square
    T, // Purple - T-shape
    S, // Green - S-shape
    Z, // Red - Z-shape
    J, // Blue - J-shape
    L, // Orange - L-shape
}

impl TetrominoType {
    /// Get the colour for this tetromino
    pub fn colour(&self) -> Colour {
        match self {
            TetrominoType::I => Colour::LightBlue,
            TetrominoType::O => Colour::Yellow,
            TetrominoType::T => Colour::Purple,
            TetrominoType::S => Colour::Green,
            TetrominoType::Z => Colour::Red,
            TetrominoType::J => Colour::Blue,
            TetrominoType::L => Colour::Orange,
        }
    }

    /// Get all tetromino types for bag randomization
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::S,
            TetrominoType::Z,
            TetrominoType::J,
            TetrominoType::L,
        ]
    }

    /// I and O are centred on a grid intersection rather than on a cell
    pub fn is_grid_centred(&self) -> bool {
        matches!(self, TetrominoType::I | TetrominoType::O)
    }

    /// Block offsets relative to the centre in the Up orientation
    ///
    /// Rotating these clockwise gives the other orientations. I and O are
    /// placed around a grid centre instead, see `Piece::blocks`.
    pub fn normalised_offsets(&self) -> [Position; 4] {
        let p = Position::new;
        match self {
            TetrominoType::I => [p(-1, 1), p(0, 1), p(1, 1), p(2, 1)],
            TetrominoType::O => [p(0, 0), p(0, 1), p(-1, 0), p(-1, 1)],
            // .T.
            // TXT
            TetrominoType::T => [p(-1, 0), p(0, 0), p(0, 1), p(1, 0)],
            // .SS
            // SX.
            TetrominoType::S => [p(-1, 0), p(0, 0), p(0, 1), p(1, 1)],
            // ZZ.
            // .XZ
            TetrominoType::Z => [p(-1, 1), p(0, 1), p(0, 0), p(1, 0)],
            // J..
            // JXJ
            TetrominoType::J => [p(-1, 1), p(-1, 0), p(0, 0), p(1, 0)],
            // ..L
            // LXL
            TetrominoType::L => [p(-1, 0), p(0, 0), p(1, 0), p(1, 1)],
        }
    }

    /// Centre at spawn - pieces spawn in the top row, nubs in the headroom row
    pub fn spawn_center(&self) -> Center {
        if self.is_grid_centred() {
            Center::Grid(GridPosition::new(5, 19))
        } else {
            Center::Cell(Position::new(4, 19))
        }
    }

    pub fn letter(&self) -> char {
        match self {
            TetrominoType::I => 'I',
            TetrominoType::O => 'O',
            TetrominoType::T => 'T',
            TetrominoType::S => 'S',
            TetrominoType::Z => 'Z',
            TetrominoType::J => 'J',
            TetrominoType::L => 'L',
        }
    }
}

impl fmt::Display for TetrominoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Where a piece is anchored: on a cell, or between four cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Center {
    Cell(Position),
    Grid(GridPosition),
}

impl Center {
    pub fn translated(self, offset: Position) -> Center {
        match self {
            Center::Cell(p) => Center::Cell(p + offset),
            Center::Grid(g) => Center::Grid(g + offset),
        }
    }

    /// Raw coordinates of the anchor
    pub fn position(self) -> Position {
        match self {
            Center::Cell(p) => p,
            Center::Grid(g) => Position::new(g.x, g.y),
        }
    }
}

/// Orientation states (using SRS naming convention)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Up, // Spawn state
    Right, // Clockwise from Up
    Down,  // 180 from Up
    Left,  // Counter-clockwise from Up
}

impl Orientation {
    /// Rotate clockwise: Up → Right → Down → Left → Up
    pub fn clockwise(&self) -> Orientation {
        match self {
            Orientation::Up => Orientation::Right,
            Orientation::Right => Orientation::Down,
            Orientation::Down => Orientation::Left,
            Orientation::Left => Orientation::Up,
        }
    }

    /// Rotate counter-clockwise: Up → Left → Down → Right → Up
    pub fn counterclockwise(&self) -> Orientation {
        match self {
            Orientation::Up => Orientation::Left,
            Orientation::Left => Orientation::Down,
            Orientation::Down => Orientation::Right,
            Orientation::Right => Orientation::Up,
        }
    }

    pub fn flipped(&self) -> Orientation {
        self.clockwise().clockwise()
    }

    pub fn index(&self) -> u8 {
        match self {
            Orientation::Up => 0,
            Orientation::Right => 1,
            Orientation::Down => 2,
            Orientation::Left => 3,
        }
    }

    /// Clockwise quarter turns needed to go from `from` to `to`
    pub fn rotations_required(from: Orientation, to: Orientation) -> u8 {
        (to.index() + 4 - from.index()) % 4
    }

    pub fn all() -> [Orientation; 4] {
        [
            Orientation::Up,
            Orientation::Right,
            Orientation::Down,
            Orientation::Left,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_cycle() {
        for o in Orientation::all() {
            assert_eq!(o.clockwise().counterclockwise(), o);
            assert_eq!(o.flipped().flipped(), o);
            assert_eq!(o.clockwise().clockwise().clockwise().clockwise(), o);
        }
    }

    #[test]
    fn test_rotations_required() {
        assert_eq!(Orientation::rotations_required(Orientation::Up, Orientation::Up), 0);
        assert_eq!(Orientation::rotations_required(Orientation::Up, Orientation::Left), 3);
        assert_eq!(Orientation::rotations_required(Orientation::Left, Orientation::Up), 1);
        assert_eq!(Orientation::rotations_required(Orientation::Right, Orientation::Left), 2);
    }

    #[test]
    fn test_spawn_centres() {
        assert!(matches!(TetrominoType::I.spawn_center(), Center::Grid(_)));
        assert!(matches!(TetrominoType::O.spawn_center(), Center::Grid(_)));
        assert_eq!(
            TetrominoType::T.spawn_center(),
            Center::Cell(Position::new(4, 19))
        );
    }

    #[test]
    fn test_display_letters() {
        let letters: String = TetrominoType::all().iter().map(|k| k.to_string()).collect();
        assert_eq!(letters, "IOTSZJL");
    }
}
