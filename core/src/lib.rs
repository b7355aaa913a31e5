#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use flags::*;
pub use generator::*;
pub use types::*;
pub use undo::*;

mod board;
mod cell;
mod error;
mod flags;
mod generator;
mod types;
mod undo;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// Unvalidated, see [`GameConfig::validate`].
    pub const fn new(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Rejects empty boards and boards without a single safe cell.
    pub fn validate(&self) -> Result<Self> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(*self)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// 9x9, 10 mines
    Easy,
    /// 16x16, 40 mines
    Medium,
    /// 30x16, 99 mines
    Hard,
}

impl Difficulty {
    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new((9, 9), 10),
            Self::Medium => GameConfig::new((16, 16), 40),
            Self::Hard => GameConfig::new((30, 16), 99),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }

    pub const fn hit_mine(self) -> bool {
        matches!(self, Self::HitMine)
    }
}

/// Used to merge outcomes when chording
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Won, _) => Won,
            (_, Won) => Won,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let config = GameConfig::from(difficulty);
            assert_eq!(config.validate(), Ok(config));
        }
        assert_eq!(Difficulty::Hard.config().safe_cells(), 30 * 16 - 99);
    }

    #[test]
    fn validate_rejects_bad_configs() {
        assert_eq!(
            GameConfig::new((0, 4), 1).validate(),
            Err(GameError::InvalidSize)
        );
        assert_eq!(
            GameConfig::new((3, 3), 9).validate(),
            Err(GameError::TooManyMines)
        );
        assert!(GameConfig::new((3, 3), 8).validate().is_ok());
        assert!(GameConfig::new((1, 1), 0).validate().is_ok());
    }

    #[test]
    fn config_from_json() {
        let config: GameConfig = serde_json::from_str(r#"{"size":[12,8],"mines":15}"#).unwrap();
        assert_eq!(config, GameConfig::new((12, 8), 15));

        let difficulty: Difficulty = serde_json::from_str(r#""Medium""#).unwrap();
        assert_eq!(difficulty.config(), GameConfig::new((16, 16), 40));
    }

    #[test]
    fn mine_outcome_wins_merge() {
        use RevealOutcome::*;
        assert_eq!(Revealed | HitMine | Won, HitMine);
        assert_eq!(NoChange | Won, Won);
        assert_eq!(NoChange | NoChange, NoChange);
        assert!((Revealed | HitMine).hit_mine());
    }
}
