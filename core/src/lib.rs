#![no_std]

extern crate alloc;
#[cfg(test)]
extern crate std;

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use types::*;
pub use view::*;

mod board;
mod cell;
mod error;
mod event;
mod generator;
mod types;
mod view;

/// Board dimensions and the fraction of cells that hold a mine.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub density: f64,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, density: f64) -> Self {
        Self { size, density }
    }

    pub fn new(size: Coord2, density: f64) -> Result<Self> {
        let config = Self::new_unchecked(size, density);
        config.validate()?;
        Ok(config)
    }

    /// 9x9 with 10 mines.
    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10.0 / 81.0)
    }

    /// 16x16 with 40 mines.
    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40.0 / 256.0)
    }

    /// 30x16 with 99 mines.
    pub const fn expert() -> Self {
        Self::new_unchecked((30, 16), 99.0 / 480.0)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(BoardError::InvalidSize);
        }
        // written so that NaN is rejected too
        if !(self.density > 0.0 && self.density < 1.0) {
            return Err(BoardError::InvalidDensity);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// `total_cells * density`, rounded half up.
    ///
    /// Never exceeds `total_cells` for a valid density.
    pub fn target_mines(&self) -> CellCount {
        let product = f64::from(self.total_cells()) * self.density.max(0.0);
        // truncation of a non-negative value is floor
        let rounded = (product + 0.5) as CellCount;
        rounded.min(self.total_cells())
    }
}

/// Where the mines are, independent of any play state.
///
/// Both dimensions of the mask are always in `1..=Coord::MAX`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Array2<bool>", into = "Array2<bool>")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let fits = |dim: usize| (1..=usize::from(Coord::MAX)).contains(&dim);
        let (x, y) = mine_mask.dim();
        if !fits(x) || !fits(y) {
            return Err(BoardError::InvalidSize);
        }
        Ok(Self::from_sized_mask(mine_mask))
    }

    /// Caller guarantees the mask was allocated from a `Coord2`.
    pub(crate) fn from_sized_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Repeated coordinates name the same mine.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(BoardError::InvalidSize);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(BoardError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_sized_mask(mine_mask))
    }

    /// Config describing this layout; the density is whatever the mine count works out to.
    pub fn game_config(&self) -> GameConfig {
        let density = f64::from(self.mine_count) / f64::from(self.total_cells());
        GameConfig::new_unchecked(self.size(), density)
    }

    pub fn size(&self) -> Coord2 {
        // dimensions are checked on construction
        let (x, y) = self.mine_mask.dim();
        (x as Coord, y as Coord)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && self[coords]
    }

    pub fn mine_coords(&self) -> Vec<Coord2> {
        iter_coords(self.size()).filter(|&coords| self[coords]).collect()
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        NeighborIter::new(coords, self.size())
            .filter(|&pos| self[pos])
            .count() as u8
    }
}

impl TryFrom<Array2<bool>> for MineLayout {
    type Error = BoardError;

    fn try_from(mine_mask: Array2<bool>) -> Result<Self> {
        Self::from_mine_mask(mine_mask)
    }
}

impl From<MineLayout> for Array2<bool> {
    fn from(layout: MineLayout) -> Self {
        layout.mine_mask
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for MineLayout {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.mine_mask[coords.to_nd_index()]
    }
}
