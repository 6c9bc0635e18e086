use thiserror::Error;

use crate::Coord;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates: {x}, {y}")]
    InvalidCoords { x: Coord, y: Coord },
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("No safe zero tile left to hint")]
    NoSafeTile,
}

pub type Result<T> = core::result::Result<T, GameError>;
