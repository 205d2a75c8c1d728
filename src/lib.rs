//! TETRS core - the rules of a falling-block puzzle game
//!
//! A 10x20 board, the 7 tetrominoes with SRS wall kicks, a 7-bag queue,
//! hold and T-spin detection, driven one tick at a time. Rendering and input
//! are left to the caller: feed a [`TickInput`] to [`Game::tick`] and listen
//! for [`GameEvent`]s through an [`Observer`].

pub mod bag;
pub mod board;
pub mod board_manager;
pub mod error;
pub mod game;
pub mod hold;
pub mod movement;
pub mod piece;
pub mod position;
pub mod score;
pub mod settings;
pub mod srs;
pub mod tetromino;

pub use board::{Board, Cell};
pub use error::{RulesError, SettingsError};
pub use game::{Game, GameEvent, GameState, GameStatus, Observer, TickInput};
pub use movement::MoveType;
pub use piece::Piece;
pub use position::{GridPosition, Position};
pub use score::{LineClear, ScoreHistory};
pub use settings::Settings;
pub use tetromino::{Orientation, TetrominoType};
