//! Hold slot
//!
//! Stores one piece for later. Holding is allowed once per piece; the game
//! re-enables it every time a piece locks.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RulesError;
use crate::piece::Piece;

/// Contents of the hold slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HoldSlot {
    #[default]
    Empty,
    Occupied(Piece),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hold {
    slot: HoldSlot,
    allowed: bool,
}

impl Default for Hold {
    fn default() -> Self {
        Self::new()
    }
}

impl Hold {
    pub fn new() -> Self {
        Self {
            slot: HoldSlot::Empty,
            allowed: true,
        }
    }

    /// Put `current` in the slot
    ///
    /// Returns the previously held piece at its spawn pose, or `None` if the
    /// slot was empty and the caller should take the next piece from the
    /// queue instead.
    pub fn hold(&mut self, current: Piece) -> Result<Option<Piece>, RulesError> {
        if !self.allowed {
            return Err(RulesError::HoldDisabled);
        }

        let mut stored = current;
        stored.reset_to_spawn();
        let previous = std::mem::replace(&mut self.slot, HoldSlot::Occupied(stored));
        self.allowed = false;

        debug!(held = %current.kind(), "hold");
        Ok(match previous {
            HoldSlot::Empty => None,
            HoldSlot::Occupied(piece) => Some(Piece::new(piece.kind())),
        })
    }

    /// Allow holding again; call once per lock
    pub fn enable(&mut self) {
        self.allowed = true;
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub fn slot(&self) -> HoldSlot {
        self.slot
    }

    pub fn held(&self) -> Option<&Piece> {
        match &self.slot {
            HoldSlot::Empty => None,
            HoldSlot::Occupied(piece) => Some(piece),
        }
    }
}
