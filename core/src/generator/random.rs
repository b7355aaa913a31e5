use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniform placement without replacement: draw a coordinate, redraw on collision.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn mine_coords(self, config: GameConfig) -> Vec<Coord2> {
        let (width, height) = config.size;
        if width == 0 || height == 0 {
            return Vec::new();
        }

        // rejection sampling never terminates on a full board
        let capacity = config.total_cells().saturating_sub(1);
        let mines = if config.mines > capacity {
            log::warn!(
                "Cannot place {} mines on a {}x{} board, placing {} instead",
                config.mines,
                width,
                height,
                capacity
            );
            capacity
        } else {
            config.mines
        };

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut taken: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut coords = Vec::with_capacity(mines.into());

        while coords.len() < usize::from(mines) {
            let candidate = (rng.random_range(0..width), rng.random_range(0..height));
            let slot = &mut taken[candidate.to_nd_index()];
            if *slot {
                continue;
            }
            *slot = true;
            coords.push(candidate);
        }

        coords
    }
}
