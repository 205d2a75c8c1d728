//! Core game state and the per-tick state machine

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::bag::PieceQueue;
use crate::board::Board;
use crate::board_manager::BoardManager;
use crate::error::RulesError;
use crate::hold::Hold;
use crate::movement::{MoveType, MovementEngine};
use crate::piece::Piece;
use crate::score::{LineClear, ScoreHistory};
use crate::settings::Settings;
use crate::tetromino::TetrominoType;

/// Everything the player asked for during one tick
///
/// Move counts are attempts; each one is validated on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    pub left: u8,
    pub right: u8,
    pub rotate_cw: u8,
    pub rotate_ccw: u8,
    pub rotate_180: u8,
    pub hold: bool,
    pub soft_drop: bool,
    pub hard_drop: bool,
}

/// Something observers should know about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// The visible state changed
    Normal,
    LineClear(LineClear),
    Death,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    Alive,
    Dead,
}

/// Receives game events, in registration order, after they happen
pub trait Observer {
    fn on_event(&mut self, state: &GameState, event: &GameEvent);
}

impl<F> Observer for F
where
    F: FnMut(&GameState, &GameEvent),
{
    fn on_event(&mut self, state: &GameState, event: &GameEvent) {
        self(state, event)
    }
}

/// Result of resolving the vertical part of a tick
struct DropOutcome {
    moved: bool,
    /// The piece that locked, with the move it made just before locking
    locked: Option<(Piece, Option<MoveType>)>,
}

/// Read-only view handed to observers, and everything a game owns
#[derive(Debug, Clone)]
pub struct GameState {
    current: Piece,
    previous: Option<Piece>,
    manager: BoardManager,
    queue: PieceQueue,
    hold: Hold,
    engine: MovementEngine,
    status: GameStatus,
    gravity_ticks: u32,
    last_move: Option<MoveType>,
    history: ScoreHistory,
    settings: Settings,
    ticks: u64,
}

impl GameState {
    fn new(settings: Settings) -> Self {
        let mut queue = PieceQueue::new(settings.rules.preview_length, settings.seed);
        let current = queue.pop();
        Self {
            current,
            previous: None,
            manager: BoardManager::new(),
            queue,
            hold: Hold::new(),
            engine: MovementEngine::default(),
            status: GameStatus::Alive,
            gravity_ticks: 0,
            last_move: None,
            history: ScoreHistory::new(),
            settings,
            ticks: 0,
        }
    }

    pub fn current_piece(&self) -> &Piece {
        &self.current
    }

    /// Where the current piece would land on a hard drop
    pub fn ghost_piece(&self) -> Piece {
        self.engine.ghost(&self.current, self.manager.board())
    }

    /// The last piece to lock
    pub fn previous_piece(&self) -> Option<&Piece> {
        self.previous.as_ref()
    }

    pub fn board(&self) -> &Board {
        self.manager.board()
    }

    pub fn hold(&self) -> &Hold {
        &self.hold
    }

    /// Upcoming shapes, nearest first
    pub fn preview(&self) -> &[TetrominoType] {
        self.queue.peek(self.queue.preview_length())
    }

    pub fn score_history(&self) -> &ScoreHistory {
        &self.history
    }

    pub fn previous_clear(&self) -> Option<LineClear> {
        self.history.last()
    }

    pub fn current_score(&self) -> u64 {
        self.history.total_score()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_alive(&self) -> bool {
        self.status == GameStatus::Alive
    }

    pub fn last_move(&self) -> Option<MoveType> {
        self.last_move
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Ticks processed since the game started
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn perform(&mut self, move_type: MoveType) -> bool {
        let moved = self
            .engine
            .perform(move_type, &mut self.current, self.manager.board());
        if moved {
            self.last_move = Some(move_type);
        }
        moved
    }

    /// Try `move_type` up to `count` times, reporting whether any succeeded
    fn repeat(&mut self, move_type: MoveType, count: u8) -> bool {
        let mut moved = false;
        for _ in 0..count {
            moved |= self.perform(move_type);
        }
        moved
    }

    /// Horizontal moves, rotations and hold, in that order
    fn apply_moves(&mut self, input: &TickInput) -> bool {
        let mut changed = false;
        changed |= self.repeat(MoveType::Left, input.left);
        changed |= self.repeat(MoveType::Right, input.right);
        changed |= self.repeat(MoveType::RotateCw, input.rotate_cw);
        changed |= self.repeat(MoveType::RotateCcw, input.rotate_ccw);
        changed |= self.repeat(MoveType::Rotate180, input.rotate_180);
        if input.hold {
            changed |= self.hold_current();
        }
        changed
    }

    fn hold_current(&mut self) -> bool {
        match self.hold.hold(self.current) {
            Ok(Some(swapped)) => self.current = swapped,
            Ok(None) => self.current = self.queue.pop(),
            Err(e) => {
                debug!("hold rejected: {}", e);
                return false;
            }
        }
        self.last_move = None;
        true
    }

    /// Hard drop, soft drop or gravity; exactly one of them per tick
    fn resolve_drop(&mut self, input: &TickInput) -> Result<DropOutcome, RulesError> {
        if input.hard_drop {
            let locked = self.hard_drop()?;
            return Ok(DropOutcome {
                moved: true,
                locked: Some(locked),
            });
        }

        let moved = if input.soft_drop {
            self.gravity_ticks = 0;
            self.perform(MoveType::Down)
        } else {
            self.gravity_ticks += 1;
            if self.gravity_ticks > self.settings.rules.gravity {
                self.gravity_ticks = 0;
                self.perform(MoveType::Down)
            } else {
                false
            }
        };
        Ok(DropOutcome { moved, locked: None })
    }

    /// Drop the current piece, lock it and spawn the next one
    fn hard_drop(&mut self) -> Result<(Piece, Option<MoveType>), RulesError> {
        let rows = self.engine.hard_drop(&mut self.current, self.manager.board());
        if rows > 0 {
            self.last_move = Some(MoveType::Down);
        }
        let piece = self.current;
        let last_move = self.last_move.take();

        if piece.is_above_field() {
            // Locked above the visible field; the death check ends the game
            warn!(kind = %piece.kind(), "lock out");
        } else {
            self.manager.add_piece(&piece)?;
        }

        self.previous = Some(piece);
        self.hold.enable();
        self.gravity_ticks = 0;
        self.current = self.queue.pop();
        debug!(locked = %piece.kind(), next = %self.current.kind(), rows, "spawned next piece");
        Ok((piece, last_move))
    }


    fn is_blocked_out(&self) -> bool {
        let board = self.manager.board();
        self.current.blocks().iter().any(|b| board.is_occupied(*b))
    }
}

/// A single game with its observers
pub struct Game {
    state: GameState,
    observers: Vec<Box<dyn Observer>>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Game {
    /// Start a new game with the given settings
    pub fn new(settings: Settings) -> Self {
        info!(
            "new game: gravity={}, preview={}, seed={:?}",
            settings.rules.gravity, settings.rules.preview_length, settings.seed
        );
        Self {
            state: GameState::new(settings),
            observers: Vec::new(),
        }
    }

    /// Throw away the current game and start over; observers stay registered
    pub fn reset(&mut self) {
        info!("game reset after {} ticks", self.state.ticks);
        self.state = GameState::new(self.state.settings.clone());
    }

    pub fn register_observer(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Advance the game by one tick
    ///
    /// Errors only when an internal invariant breaks; a dead game keeps
    /// returning `Dead` without changing.
    pub fn tick(&mut self, input: &TickInput) -> Result<GameStatus, RulesError> {
        if self.state.status == GameStatus::Dead {
            return Ok(GameStatus::Dead);
        }
        self.state.ticks += 1;

        let mut changed = self.state.apply_moves(input);
        // A hold can bring in a piece whose spawn is already covered
        if self.state.is_blocked_out() {
            if changed {
                self.notify(&GameEvent::Normal);
            }
            self.die();
            return Ok(self.state.status);
        }

        let drop = self.state.resolve_drop(input)?;
        changed |= drop.moved;
        if changed {
            self.notify(&GameEvent::Normal);
        }

        let locked = drop.locked.map(|(piece, _)| piece);
        if let Some((piece, last_move)) = drop.locked {
            let clear = self
                .state
                .manager
                .find_and_clear_lines(&piece, last_move)?;
            if let Some(clear) = clear {
                self.state.history.record(clear);
                self.notify(&GameEvent::LineClear(clear));
            }
        }

        if locked.is_some_and(|p| p.is_above_field()) || self.state.is_blocked_out() {
            self.die();
        }

        Ok(self.state.status)
    }

    fn die(&mut self) {
        self.state.status = GameStatus::Dead;
        info!(
            "game over after {} ticks, score {}",
            self.state.ticks,
            self.state.current_score()
        );
        self.notify(&GameEvent::Death);
    }

    fn notify(&mut self, event: &GameEvent) {
        for observer in &mut self.observers {
            observer.on_event(&self.state, event);
        }
    }
}
