// Dots-and-Boxes engine: incremental chain graph + alpha-beta
pub mod board;
pub mod engine;
pub mod error;
pub mod game;
pub mod search;
pub mod select;

pub use board::{BoardLines, Line, Orientation, Position};
pub use engine::{Engine, EngineConfig};
pub use error::{BoardError, EngineError};
pub use game::{play_match, Agent, Game, GameRecord, RandomAgent};
pub use select::{choose_move, Decision};
