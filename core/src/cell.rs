use serde::{Deserialize, Serialize};

/// Result of opening a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellOpen {
    AlreadyOpen,
    RevealedMine,
    RevealedEmpty(u8),
}

/// State of one grid position.
///
/// `is_mine` and `mine_count` are written while the board generates and stay fixed afterwards.
/// `is_open` only ever goes from `false` to `true`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    is_mine: bool,
    mine_count: u8,
    is_open: bool,
    is_flagged: bool,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn mine_count(&self) -> u8 {
        self.mine_count
    }

    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub(crate) fn set_mine(&mut self) {
        self.is_mine = true;
    }

    pub(crate) fn set_mine_count(&mut self, count: u8) {
        debug_assert!(count <= 8, "a cell has at most 8 neighbors");
        self.mine_count = count;
    }

    /// Opens the cell, dropping any flag on it.
    pub fn open(&mut self) -> CellOpen {
        if self.is_open {
            return CellOpen::AlreadyOpen;
        }

        self.is_open = true;
        self.is_flagged = false;

        if self.is_mine {
            CellOpen::RevealedMine
        } else {
            CellOpen::RevealedEmpty(self.mine_count)
        }
    }

    /// Flips the flag and returns the new state, open cells keep theirs.
    pub fn toggle_flag(&mut self) -> bool {
        if !self.is_open {
            self.is_flagged = !self.is_flagged;
        }
        self.is_flagged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_closed_and_safe() {
        let cell = Cell::default();
        assert!(!cell.is_mine());
        assert!(!cell.is_open());
        assert!(!cell.is_flagged());
        assert_eq!(cell.mine_count(), 0);
    }

    #[test]
    fn open_reports_count_once() {
        let mut cell = Cell::default();
        cell.set_mine_count(3);

        assert_eq!(cell.open(), CellOpen::RevealedEmpty(3));
        assert_eq!(cell.open(), CellOpen::AlreadyOpen);
        assert!(cell.is_open());
    }

    #[test]
    fn open_mine_reports_mine() {
        let mut cell = Cell::default();
        cell.set_mine();
        cell.set_mine();

        assert!(cell.is_mine());
        assert_eq!(cell.open(), CellOpen::RevealedMine);
    }

    #[test]
    fn open_clears_flag() {
        let mut cell = Cell::default();
        assert!(cell.toggle_flag());

        cell.open();

        assert!(!cell.is_flagged());
    }

    #[test]
    fn flag_is_locked_once_open() {
        let mut cell = Cell::default();
        cell.open();

        assert!(!cell.toggle_flag());
        assert!(!cell.is_flagged());
    }

    #[test]
    fn toggle_flag_flips_closed_cell() {
        let mut cell = Cell::default();
        assert!(cell.toggle_flag());
        assert!(!cell.toggle_flag());
    }
}
