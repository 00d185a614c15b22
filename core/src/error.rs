use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Game already ended, no new moves are accepted")]
    GameOver,
    #[error("Cell is already open")]
    CellAlreadyOpen,
    #[error("Board width and height must be between 1 and 255")]
    InvalidSize,
    #[error("Mine density must be strictly between 0 and 1")]
    InvalidDensity,
}

pub type Result<T> = core::result::Result<T, BoardError>;
