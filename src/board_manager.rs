//! Locking pieces into the board and clearing lines

use tracing::{debug, info};

use crate::board::{Board, COLUMNS, Cell};
use crate::error::RulesError;
use crate::movement::MoveType;
use crate::piece::Piece;
use crate::position::Position;
use crate::score::LineClear;
use crate::tetromino::TetrominoType;

/// Owns the board; the only way pieces become board cells
#[derive(Debug, Clone, Default)]
pub struct BoardManager {
    board: Board,
}

impl BoardManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Write the piece's colour into each of its cells
    ///
    /// Fails without touching the board if any block is off the grid.
    pub fn add_piece(&mut self, piece: &Piece) -> Result<(), RulesError> {
        let blocks = piece.blocks();
        if let Some(b) = blocks.iter().find(|b| !Board::in_bounds(**b)) {
            return Err(RulesError::OutOfRange { x: b.x, y: b.y });
        }
        for b in blocks {
            self.board.set_cell(b, Cell::Filled(piece.colour()))?;
        }
        debug!(kind = %piece.kind(), ?blocks, "piece locked");
        Ok(())
    }

    /// Clear any filled rows and describe what was cleared
    ///
    /// `piece` is the piece that just locked and `last_move` the last move it
    /// made before locking; together they decide whether this was a T-spin.
    pub fn find_and_clear_lines(
        &mut self,
        piece: &Piece,
        last_move: Option<MoveType>,
    ) -> Result<Option<LineClear>, RulesError> {
        let rows = self.board.find_filled_rows();
        if rows.is_empty() {
            return Ok(None);
        }

        // Corners must be checked before the rows move
        let tspin = self.is_t_spin(piece, last_move);
        let lines = u8::try_from(rows.len()).unwrap_or(u8::MAX);
        let clear = LineClear::new(lines, tspin)?;

        self.board.clear_rows(&rows);
        info!(%clear, ?rows, "line clear");
        Ok(Some(clear))
    }

    /// T piece, last moved by a rotation, with 3 or more diagonal corners filled
    ///
    /// Walls and the floor count as filled corners.
    pub fn is_t_spin(&self, piece: &Piece, last_move: Option<MoveType>) -> bool {
        if piece.kind() != TetrominoType::T {
            return false;
        }
        if !last_move.is_some_and(|m| m.is_rotation()) {
            return false;
        }

        let center = piece.center().position();
        let corners = [(-1, -1), (-1, 1), (1, -1), (1, 1)]
            .into_iter()
            .map(|(dx, dy)| center + Position::new(dx, dy))
            .filter(|&p| self.is_corner_blocked(p))
            .count();
        corners >= 3
    }

    fn is_corner_blocked(&self, p: Position) -> bool {
        p.x < 0 || p.x >= COLUMNS as i32 || p.y < 0 || self.board.is_occupied(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::{MovementEngine, is_valid_position};
    use crate::tetromino::{Center, Colour, Orientation};

    fn fill(board: &mut Board, cells: impl IntoIterator<Item = (i32, i32)>) {
        for (x, y) in cells {
            board.set_cell(Position::new(x, y), Cell::Filled(Colour::Red)).unwrap();
        }
    }

    fn t_at(x: i32, y: i32, orientation: Orientation) -> Piece {
        Piece::with_pose(
            TetrominoType::T,
            Center::Cell(Position::new(x, y)),
            orientation,
        )
        .unwrap()
    }

    #[test]
    fn test_add_piece_writes_colour() {
        let mut manager = BoardManager::new();
        let mut o = Piece::new(TetrominoType::O);
        MovementEngine::default().hard_drop(&mut o, manager.board());
        manager.add_piece(&o).unwrap();
        for b in o.blocks() {
            assert_eq!(manager.board().get_cell(b), Ok(Cell::Filled(Colour::Yellow)));
        }
    }

    #[test]
    fn test_add_piece_out_of_range_is_atomic() {
        let mut manager = BoardManager::new();
        // Nub in the headroom row
        let t = Piece::new(TetrominoType::T);
        assert_eq!(
            manager.add_piece(&t),
            Err(RulesError::OutOfRange { x: 4, y: 20 })
        );
        assert!(manager.board().is_empty());
    }

    #[test]
    fn test_no_lines() {
        let mut manager = BoardManager::new();
        let mut o = Piece::new(TetrominoType::O);
        MovementEngine::default().hard_drop(&mut o, manager.board());
        manager.add_piece(&o).unwrap();
        assert_eq!(manager.find_and_clear_lines(&o, Some(MoveType::Down)), Ok(None));
    }

    #[test]
    fn test_single_with_vertical_i() {
        let mut manager = BoardManager::new();
        fill(manager.board_mut(), (0..9).map(|x| (x, 0)));

        let engine = MovementEngine::default();
        let mut i = Piece::new(TetrominoType::I);
        assert!(engine.rotate_cw(&mut i, manager.board()));
        while engine.move_right(&mut i, manager.board()) {}
        engine.hard_drop(&mut i, manager.board());
        assert!(i.blocks().iter().all(|b| b.x == 9));

        manager.add_piece(&i).unwrap();
        let clear = manager
            .find_and_clear_lines(&i, Some(MoveType::Right))
            .unwrap()
            .unwrap();
        assert_eq!(clear, LineClear::new(1, false).unwrap());
        assert_eq!(clear.score(), 0);
        // Remaining three blocks of the I fell by one
        assert!(manager.board().is_occupied(Position::new(9, 0)));
        assert!(!manager.board().is_occupied(Position::new(0, 0)));
        assert_eq!(manager.board().height(), 20);
    }

    #[test]
    fn test_t_spin_single() {
        let mut manager = BoardManager::new();
        // Row 0 full apart from column 4, row 1 open at 3..=5 and 9
        fill(manager.board_mut(), (0..10).filter(|&x| x != 4).map(|x| (x, 0)));
        fill(manager.board_mut(), [0, 1, 2, 6, 7, 8].map(|x| (x, 1)));
        // Overhang over the top-left corner
        fill(manager.board_mut(), [(3, 2)]);

        let engine = MovementEngine::default();
        let mut t = t_at(4, 1, Orientation::Up);
        assert!(engine.rotate_180(&mut t, manager.board()));
        assert_eq!(t.orientation(), Orientation::Down);
        manager.add_piece(&t).unwrap();

        let clear = manager
            .find_and_clear_lines(&t, Some(MoveType::Rotate180))
            .unwrap();
        assert_eq!(clear, Some(LineClear::new(1, true).unwrap()));
        // Old row 1 is now row 0
        assert!(manager.board().is_occupied(Position::new(3, 0)));
        assert!(!manager.board().is_occupied(Position::new(9, 0)));
        // Overhang dropped too
        assert!(manager.board().is_occupied(Position::new(3, 1)));
    }

    #[test]
    fn test_t_spin_kicked_onto_floor() {
        let mut manager = BoardManager::new();
        // Floor slot at columns 0..=2, (2, 1) blocks the plain rotation
        fill(manager.board_mut(), (3..10).map(|x| (x, 0)));
        fill(manager.board_mut(), [(2, 1)]);

        let engine = MovementEngine::default();
        let mut t = t_at(0, 1, Orientation::Right);
        assert!(is_valid_position(&t, manager.board()));

        // R→0: (0,0) hits the wall, (1,0) hits (2,1), (1,-1) drops into the slot
        assert!(engine.rotate_ccw(&mut t, manager.board()));
        assert_eq!(t.orientation(), Orientation::Up);
        assert_eq!(t.center(), Center::Cell(Position::new(1, 0)));
        assert_eq!(engine.hard_drop(&mut t, manager.board()), 0);

        manager.add_piece(&t).unwrap();
        let clear = manager
            .find_and_clear_lines(&t, Some(MoveType::RotateCcw))
            .unwrap();
        assert_eq!(clear, Some(LineClear::new(1, true).unwrap()));
        // (2, 1) fell into row 0
        assert!(manager.board().is_occupied(Position::new(2, 0)));
    }

    #[test]
    fn test_t_spin_with_floor_corners() {
        let mut manager = BoardManager::new();
        // Row 0 full except a T-shaped slot; centre (1, 0) sits on the floor
        fill(manager.board_mut(), (3..10).map(|x| (x, 0)));
        fill(manager.board_mut(), [(0, 1)]);

        // T pointing up with its flat side on row 0: blocks (0,0) (1,0) (2,0) (1,1)
        let t = t_at(1, 0, Orientation::Up);
        manager.add_piece(&t).unwrap();

        // Corners: (0,-1) floor, (2,-1) floor, (0,1) filled, (2,1) empty
        assert!(manager.is_t_spin(&t, Some(MoveType::RotateCcw)));
        assert!(!manager.is_t_spin(&t, Some(MoveType::Left)));
        assert!(!manager.is_t_spin(&t, None));

        let clear = manager
            .find_and_clear_lines(&t, Some(MoveType::RotateCcw))
            .unwrap();
        assert_eq!(clear, Some(LineClear::new(1, true).unwrap()));
        assert_eq!(clear.map(|c| c.score()), Some(200));
    }

    #[test]
    fn test_not_t_spin_for_other_shapes() {
        let mut manager = BoardManager::new();
        fill(manager.board_mut(), [(0, 0), (2, 0), (0, 2), (2, 2)]);
        let s = Piece::with_pose(
            TetrominoType::S,
            Center::Cell(Position::new(1, 1)),
            Orientation::Up,
        )
        .unwrap();
        assert!(!manager.is_t_spin(&s, Some(MoveType::RotateCw)));
    }
}
