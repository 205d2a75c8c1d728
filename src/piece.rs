//! A tetromino instance: shape, centre and orientation
//!
//! The four occupied cells are always derived from those three values.
//! Mutations here are unchecked; `movement` validates them against a board.

use serde::{Deserialize, Serialize};

use crate::board::ROWS;
use crate::position::Position;
use crate::tetromino::{Center, Colour, Orientation, TetrominoType};

/// Centre and orientation, enough to undo a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pose {
    pub center: Center,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    kind: TetrominoType,
    center: Center,
    orientation: Orientation,
}

impl Piece {
    /// Create a new piece at its spawn pose
    pub fn new(kind: TetrominoType) -> Self {
        Self {
            kind,
            center: kind.spawn_center(),
            orientation: Orientation::Up,
        }
    }

    /// Create a piece at an arbitrary pose
    ///
    /// Returns `None` if the centre kind does not fit the shape
    /// (I and O need a grid centre, everything else a cell centre).
    pub fn with_pose(
        kind: TetrominoType,
        center: Center,
        orientation: Orientation,
    ) -> Option<Self> {
        let grid = matches!(center, Center::Grid(_));
        if grid != kind.is_grid_centred() {
            return None;
        }
        Some(Self {
            kind,
            center,
            orientation,
        })
    }

    pub fn kind(&self) -> TetrominoType {
        self.kind
    }

    pub fn colour(&self) -> Colour {
        self.kind.colour()
    }

    pub fn center(&self) -> Center {
        self.center
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn pose(&self) -> Pose {
        Pose {
            center: self.center,
            orientation: self.orientation,
        }
    }

    pub fn restore(&mut self, pose: Pose) {
        self.center = pose.center;
        self.orientation = pose.orientation;
    }

    /// Absolute positions of all 4 blocks
    pub fn blocks(&self) -> [Position; 4] {
        match self.center {
            Center::Grid(g) => match (self.kind, self.orientation) {
                (TetrominoType::I, Orientation::Up) => {
                    let (l, r) = (g.top_left(), g.top_right());
                    [l + Position::new(-1, 0), l, r, r + Position::new(1, 0)]
                }
                (TetrominoType::I, Orientation::Right) => {
                    let (t, b) = (g.top_right(), g.bottom_right());
                    [t + Position::new(0, 1), t, b, b + Position::new(0, -1)]
                }
                (TetrominoType::I, Orientation::Down) => {
                    let (l, r) = (g.bottom_left(), g.bottom_right());
                    [l + Position::new(-1, 0), l, r, r + Position::new(1, 0)]
                }
                (TetrominoType::I, Orientation::Left) => {
                    let (t, b) = (g.top_left(), g.bottom_left());
                    [t + Position::new(0, 1), t, b, b + Position::new(0, -1)]
                }
                // O looks the same in every orientation
                _ => [g.top_left(), g.top_right(), g.bottom_left(), g.bottom_right()],
            },
            Center::Cell(c) => {
                let turns = Orientation::rotations_required(Orientation::Up, self.orientation);
                self.kind
                    .normalised_offsets()
                    .map(|offset| offset.rotate_cw_n(turns) + c)
            }
        }
    }

    /// Whether any block sits above the visible rows
    pub fn is_above_field(&self) -> bool {
        self.blocks().iter().any(|b| b.y >= ROWS as i32)
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.center = self.center.translated(Position::new(dx, dy));
    }

    pub fn left(&mut self) {
        self.translate(-1, 0);
    }

    pub fn right(&mut self) {
        self.translate(1, 0);
    }

    pub fn down(&mut self) {
        self.translate(0, -1);
    }

    pub fn rotate_cw(&mut self) {
        self.orientation = self.orientation.clockwise();
    }

    pub fn rotate_ccw(&mut self) {
        self.orientation = self.orientation.counterclockwise();
    }

    pub fn rotate_180(&mut self) {
        self.orientation = self.orientation.flipped();
    }

    /// Return to the spawn pose of this shape
    pub fn reset_to_spawn(&mut self) {
        *self = Piece::new(self.kind);
    }
}
