use rand::prelude::*;

use super::*;

/// Places mines by rejection sampling: pick a uniform random cell, keep it if it is not a mine
/// yet, repeat until the target count is reached.
///
/// The generator owns its RNG, so each call draws a fresh layout while a fixed seed still
/// reproduces the whole sequence.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    rng: SmallRng,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: &GameConfig) -> MineLayout {
        let (size_x, size_y) = config.size;
        let target = config.target_mines();
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());

        if target == config.total_cells() {
            log::warn!("Every cell of the {size_x}x{size_y} board will be a mine");
        }

        let mut placed: CellCount = 0;
        let mut attempts: u64 = 0;
        while placed < target {
            attempts += 1;
            let coords: Coord2 = (
                self.rng.random_range(0..size_x),
                self.rng.random_range(0..size_y),
            );
            let cell = &mut mine_mask[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }

        log::debug!("Placed {placed} mines on {size_x}x{size_y} in {attempts} draws");
        MineLayout::from_sized_mask(mine_mask)
    }
}
