use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer is allowed to know about a cell.
///
/// Mine identity is only filled in once the cell is open or the game is over, the mine count
/// only once a safe cell is open.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub is_open: bool,
    pub is_flagged: bool,
    pub is_mine: Option<bool>,
    pub mine_count: Option<u8>,
}

impl CellView {
    pub fn of(cell: &Cell, game_over: bool) -> Self {
        let is_open = cell.is_open();
        Self {
            is_open,
            is_flagged: cell.is_flagged(),
            is_mine: (is_open || game_over).then_some(cell.is_mine()),
            mine_count: (is_open && !cell.is_mine()).then_some(cell.mine_count()),
        }
    }

    /// Flag that turned out to sit on a safe cell, only known after the game ends.
    pub fn is_wrong_flag(&self) -> bool {
        self.is_flagged && self.is_mine == Some(false)
    }
}

/// Outcome of opening a cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    AlreadyOpen,
    Mine,
    Cleared(u8),
    /// Every cell opened by the flood fill, starting with the requested one.
    Cascade(Vec<Coord2>),
}

impl OpenOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::AlreadyOpen)
    }

    pub fn opened_count(&self) -> usize {
        match self {
            Self::AlreadyOpen => 0,
            Self::Mine | Self::Cleared(_) => 1,
            Self::Cascade(opened) => opened.len(),
        }
    }
}

/// Outcome of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagOutcome {
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}
