//! Validated piece movement
//!
//! Every move follows the same shape: snapshot the pose, apply the raw
//! mutation, validate against the board and restore on failure.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::board::{Board, COLUMNS, ROWS};
use crate::piece::Piece;
use crate::srs::{KickTable, SRS};
use crate::tetromino::TetrominoType;

/// Rows a piece may occupy: the visible field plus one row of headroom
pub const PLAYABLE_ROWS: i32 = ROWS as i32 + 1;

/// The kind of a successful move, kept for T-spin detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveType {
    Left,
    Right,
    Down,
    RotateCw,
    RotateCcw,
    Rotate180,
}

impl MoveType {
    pub fn is_rotation(&self) -> bool {
        matches!(
            self,
            MoveType::RotateCw | MoveType::RotateCcw | MoveType::Rotate180
        )
    }
}

/// Check every block is inside the playable area and on an empty cell
pub fn is_valid_position(piece: &Piece, board: &Board) -> bool {
    piece.blocks().iter().all(|b| {
        (0..COLUMNS as i32).contains(&b.x)
            && (0..PLAYABLE_ROWS).contains(&b.y)
            && !board.is_occupied(*b)
    })
}

/// Applies moves to a piece against a board
///
/// Holds no per-game state; callers keep track of the last successful move.
#[derive(Debug, Clone, Copy)]
pub struct MovementEngine {
    kicks: &'static KickTable,
}

impl Default for MovementEngine {
    fn default() -> Self {
        Self::new(&SRS)
    }
}

impl MovementEngine {
    pub fn new(kicks: &'static KickTable) -> Self {
        Self { kicks }
    }

    /// Apply `change`, keep it if the result is valid, otherwise undo it
    fn attempt(piece: &mut Piece, board: &Board, change: impl FnOnce(&mut Piece)) -> bool {
        let pose = piece.pose();
        change(piece);
        if is_valid_position(piece, board) {
            true
        } else {
            piece.restore(pose);
            false
        }
    }

    pub fn move_left(&self, piece: &mut Piece, board: &Board) -> bool {
        Self::attempt(piece, board, Piece::left)
    }

    pub fn move_right(&self, piece: &mut Piece, board: &Board) -> bool {
        Self::attempt(piece, board, Piece::right)
    }

    pub fn move_down(&self, piece: &mut Piece, board: &Board) -> bool {
        Self::attempt(piece, board, Piece::down)
    }

    pub fn rotate_cw(&self, piece: &mut Piece, board: &Board) -> bool {
        self.rotate_with_kicks(piece, board, true)
    }

    pub fn rotate_ccw(&self, piece: &mut Piece, board: &Board) -> bool {
        self.rotate_with_kicks(piece, board, false)
    }

    /// Half turn in place; no kicks are tried
    pub fn rotate_180(&self, piece: &mut Piece, board: &Board) -> bool {
        Self::attempt(piece, board, Piece::rotate_180)
    }

    fn rotate_with_kicks(&self, piece: &mut Piece, board: &Board, clockwise: bool) -> bool {
        let from = piece.orientation();
        let to = if clockwise {
            from.clockwise()
        } else {
            from.counterclockwise()
        };
        let Some(kicks) = self
            .kicks
            .kicks(from, to, piece.kind() == TetrominoType::I)
        else {
            return false;
        };

        for (i, &(dx, dy)) in kicks.iter().enumerate() {
            let rotated = Self::attempt(piece, board, |p| {
                if clockwise {
                    p.rotate_cw();
                } else {
                    p.rotate_ccw();
                }
                p.translate(dx, dy);
            });
            if rotated {
                trace!(kind = %piece.kind(), ?from, ?to, kick = i, "rotated");
                return true;
            }
        }
        false
    }

    /// Drop as far as possible, returning the number of rows travelled
    pub fn hard_drop(&self, piece: &mut Piece, board: &Board) -> u32 {
        let mut rows = 0;
        while self.move_down(piece, board) {
            rows += 1;
        }
        rows
    }

    /// Where the piece would land if hard dropped now
    pub fn ghost(&self, piece: &Piece, board: &Board) -> Piece {
        let mut ghost = *piece;
        self.hard_drop(&mut ghost, board);
        ghost
    }

    pub fn perform(&self, move_type: MoveType, piece: &mut Piece, board: &Board) -> bool {
        let moved = match move_type {
            MoveType::Left => self.move_left(piece, board),
            MoveType::Right => self.move_right(piece, board),
            MoveType::Down => self.move_down(piece, board),
            MoveType::RotateCw => self.rotate_cw(piece, board),
            MoveType::RotateCcw => self.rotate_ccw(piece, board),
            MoveType::Rotate180 => self.rotate_180(piece, board),
        };
        trace!(?move_type, moved, "move");
        moved
    }
}
