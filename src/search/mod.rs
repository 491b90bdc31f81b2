pub mod alphabeta;
pub mod expand;
pub mod time;

pub use alphabeta::{SearchParams, SearchResult, Searcher};
pub use expand::{Child, Move};
pub use time::TimeManager;
