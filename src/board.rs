//! Game board representation and row clearing

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::position::Position;
use crate::tetromino::Colour;

/// Standard board dimensions
pub const COLUMNS: usize = 10;
pub const ROWS: usize = 20;

/// A cell on the board - either empty or filled with a colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Colour),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// One row of cells, left to right
pub type Row = [Cell; COLUMNS];

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Stored as rows[y][x], row 0 is bottom
    rows: Vec<Row>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            rows: vec![[Cell::Empty; COLUMNS]; ROWS],
        }
    }

    fn index(pos: Position) -> Option<(usize, usize)> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < COLUMNS && y < ROWS).then_some((x, y))
    }

    pub fn in_bounds(pos: Position) -> bool {
        Self::index(pos).is_some()
    }

    pub fn get_cell(&self, pos: Position) -> Result<Cell, RulesError> {
        let (x, y) = Self::index(pos).ok_or(RulesError::OutOfRange { x: pos.x, y: pos.y })?;
        Ok(self.rows[y][x])
    }

    pub fn set_cell(&mut self, pos: Position, cell: Cell) -> Result<(), RulesError> {
        let (x, y) = Self::index(pos).ok_or(RulesError::OutOfRange { x: pos.x, y: pos.y })?;
        self.rows[y][x] = cell;
        Ok(())
    }

    /// Whether a cell holds a block; positions off the board are never occupied
    pub fn is_occupied(&self, pos: Position) -> bool {
        Self::index(pos).is_some_and(|(x, y)| self.rows[y][x].is_filled())
    }

    /// Indices of completely filled rows, ascending
    pub fn find_filled_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().all(Cell::is_filled))
            .map(|(y, _)| y)
            .collect()
    }

    /// Remove the given rows and add the same number of empty rows on top
    ///
    /// Indices refer to the board before any removal. Out-of-range and
    /// duplicate indices are ignored.
    pub fn clear_rows(&mut self, rows: &[usize]) {
        let mut targets: Vec<usize> = rows.iter().copied().filter(|&y| y < ROWS).collect();
        targets.sort_unstable();
        targets.dedup();

        // Highest first so lower indices stay valid
        for &y in targets.iter().rev() {
            self.rows.remove(y);
        }
        self.rows
            .extend(std::iter::repeat_n([Cell::Empty; COLUMNS], targets.len()));
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Iterate over rows, bottom to top
    pub fn rows(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.rows.iter().enumerate()
    }

    /// Number of rows; always `ROWS`
    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

impl fmt::Display for Board {
    /// Top row first, `#` for filled and `.` for empty
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows.iter().rev() {
            for cell in row {
                f.write_str(if cell.is_filled() { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
