use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board width and height must be at least 1")]
    InvalidSize,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Coordinates out of bounds")]
    OutOfBounds,
}

impl GameError {
    /// Whether the error comes from an invalid game configuration.
    pub const fn is_configuration(self) -> bool {
        matches!(self, Self::InvalidSize | Self::TooManyMines)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
