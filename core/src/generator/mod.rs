use alloc::vec::Vec;

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Decides where the mines of a new board go.
pub trait MinefieldGenerator {
    /// Distinct mine coordinates, the board validates bounds before placing them.
    fn mine_coords(self, config: GameConfig) -> Vec<Coord2>;
}
