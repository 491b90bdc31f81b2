use thiserror::Error;

use crate::board::Line;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("line ({x}, {y}, {orientation}) is outside the 5x5 board")]
    OutOfRange { x: u8, y: u8, orientation: u8 },
    #[error("line index {0} is outside 0..60")]
    BadIndex(usize),
    #[error("line {0} is already drawn")]
    AlreadyDrawn(Line),
    #[error("cannot parse line from {0:?}: expected \"x,y,o\" or a line index")]
    Parse(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("no undrawn line left on the board")]
    NoMoves,
    #[error(transparent)]
    Board(#[from] BoardError),
}
