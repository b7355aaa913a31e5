use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must be at least 1x1")]
    InvalidSize,
    #[error("Too many mines, at least one cell must be safe")]
    TooManyMines,
    #[error("No game in progress, no moves are accepted")]
    NotPlaying,
}

pub type Result<T> = core::result::Result<T, GameError>;
