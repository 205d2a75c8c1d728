//! Super Rotation System (SRS) wall kick data
//!
//! SRS defines the wall kicks attempted when rotating a piece.
//! If a rotation would cause collision, these offsets are tried in order.
//! Offsets are (x, y) with x+ right and y+ up.

use crate::tetromino::Orientation;

type Kicks = [(i32, i32); 5];

/// Kick candidates for the 8 single-step transitions
///
/// Indexed by transition, see [`KickTable::kicks`]. J, L, S, T, Z and O share
/// one table; I has its own.
#[derive(Debug)]
pub struct KickTable {
    normal: [Kicks; 8],
    i: [Kicks; 8],
}

/// The standard SRS tables
pub static SRS: KickTable = KickTable {
    normal: [
        // 0→R
        [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        // R→0
        [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
        // R→2
        [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
        // 2→R
        [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        // 2→L
        [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
        // L→2
        [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        // L→0
        [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        // 0→L
        [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    ],
    i: [
        // 0→R
        [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
        // R→0
        [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
        // R→2
        [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
        // 2→R
        [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
        // 2→L
        [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
        // L→2
        [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
        // L→0
        [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
        // 0→L
        [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    ],
};

impl KickTable {
    /// Candidate offsets for rotating `from` → `to`, in the order to try them
    ///
    /// `None` for anything other than a single clockwise or counter-clockwise
    /// step.
    pub fn kicks(&self, from: Orientation, to: Orientation, is_i: bool) -> Option<&[(i32, i32)]> {
        use Orientation::*;

        let slot = match (from, to) {
            (Up, Right) => 0,
            (Right, Up) => 1,
            (Right, Down) => 2,
            (Down, Right) => 3,
            (Down, Left) => 4,
            (Left, Down) => 5,
            (Left, Up) => 6,
            (Up, Left) => 7,
            _ => return None,
        };
        let table = if is_i { &self.i } else { &self.normal };
        Some(&table[slot])
    }
}
