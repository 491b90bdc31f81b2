//! Referee for full games: legality, box ownership, scores, forfeits.

use std::fmt;
use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::{all_lines, edge_id, edge_line, empty_board, BoardLines, Line, BOX_X, BOX_Y, DOT_X, DOT_Y, NUM_LINES};
use crate::error::BoardError;

/// Cumulative thinking time a player may use in one game.
pub const MAX_GAME_TIME: Duration = Duration::from_secs(24);

/// Anything that can pick a line for the side to move.
pub trait Agent {
    fn name(&self) -> &str;
    fn choose(&mut self, board: &BoardLines) -> anyhow::Result<Line>;
}

/// Plays a uniformly random undrawn line.
pub struct RandomAgent {
    rng: SmallRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self { Self { rng: SmallRng::seed_from_u64(seed) } }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str { "random" }

    fn choose(&mut self, board: &BoardLines) -> anyhow::Result<Line> {
        let legal: Vec<Line> = all_lines().filter(|l| !l.is_drawn(board)).collect();
        legal.choose(&mut self.rng).copied().ok_or_else(|| anyhow::anyhow!("no undrawn line left"))
    }
}

fn box_complete(board: &BoardLines, x: usize, y: usize) -> bool {
    (0..4).all(|side| edge_line(edge_id(x, y, side)).is_drawn(board))
}

#[derive(Clone, Debug)]
pub struct Game {
    board: BoardLines,
    owner: [[Option<u8>; BOX_Y]; BOX_X],
    scores: [u32; 2],
    to_move: u8,
    moves: Vec<Line>,
}

impl Default for Game {
    fn default() -> Self { Self::new() }
}

impl Game {
    pub fn new() -> Self {
        Self { board: empty_board(), owner: [[None; BOX_Y]; BOX_X], scores: [0; 2], to_move: 0, moves: Vec::with_capacity(NUM_LINES) }
    }

    pub fn board_lines(&self) -> &BoardLines { &self.board }
    pub fn to_move(&self) -> usize { self.to_move as usize }
    pub fn scores(&self) -> [u32; 2] { self.scores }
    pub fn moves(&self) -> &[Line] { &self.moves }
    pub fn owner(&self, x: usize, y: usize) -> Option<u8> { self.owner[x][y] }

    pub fn legal_lines(&self) -> Vec<Line> {
        all_lines().filter(|l| !l.is_drawn(&self.board)).collect()
    }

    pub fn is_over(&self) -> bool { all_lines().all(|l| l.is_drawn(&self.board)) }

    /// Draws `line` for the side to move and returns how many boxes it
    /// completed. The turn passes only when nothing was completed.
    pub fn play(&mut self, line: Line) -> Result<u32, BoardError> {
        let line = line.validate()?;
        if line.is_drawn(&self.board) { return Err(BoardError::AlreadyDrawn(line)); }
        line.set(&mut self.board, true);
        self.moves.push(line);
        let mut completed = 0;
        for (x, y) in line.boxes() {
            if self.owner[x][y].is_none() && box_complete(&self.board, x, y) {
                self.owner[x][y] = Some(self.to_move);
                completed += 1;
            }
        }
        if completed > 0 { self.scores[self.to_move as usize] += completed; } else { self.to_move = 1 - self.to_move; }
        Ok(completed)
    }

    /// Player with more boxes, once the board is full.
    pub fn winner(&self) -> Option<usize> {
        if !self.is_over() { return None; }
        match self.scores[0].cmp(&self.scores[1]) {
            std::cmp::Ordering::Greater => Some(0),
            std::cmp::Ordering::Less => Some(1),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..DOT_Y {
            let mut row = String::new();
            for x in 0..DOT_X {
                row.push('+');
                if x < BOX_X { row.push_str(if Line::horizontal(x as u8, y as u8).is_drawn(&self.board) { "---" } else { "   " }); }
            }
            writeln!(f, "{}", row.trim_end())?;
            if y == BOX_Y { break; }
            let mut row = String::new();
            for x in 0..DOT_X {
                row.push(if Line::vertical(x as u8, y as u8).is_drawn(&self.board) { '|' } else { ' ' });
                if x < BOX_X {
                    let mark = match self.owner[x][y] { Some(0) => 'A', Some(_) => 'B', None => ' ' };
                    row.push(' ');
                    row.push(mark);
                    row.push(' ');
                }
            }
            writeln!(f, "{}", row.trim_end())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Normal,
    Timeout,
    InvalidMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedMove {
    pub player: u8,
    pub line: Line,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub moves: Vec<PlayedMove>,
    pub scores: [u32; 2],
    pub winner: Option<usize>,
    pub reason: EndReason,
    pub time_ms: [u64; 2],
}

/// Plays one game, `first` moving first. A player whose total thinking time
/// exceeds `time_cap`, or who returns an error or a drawn line, forfeits.
pub fn play_match(first: &mut dyn Agent, second: &mut dyn Agent, time_cap: Duration) -> GameRecord {
    let mut agents: [&mut dyn Agent; 2] = [first, second];
    let mut game = Game::new();
    let mut used = [Duration::ZERO; 2];
    let mut moves = Vec::with_capacity(NUM_LINES);
    let mut forfeit: Option<(usize, EndReason)> = None;

    while !game.is_over() {
        let p = game.to_move();
        let t0 = Instant::now();
        let choice = agents[p].choose(game.board_lines());
        used[p] += t0.elapsed();
        if used[p] > time_cap {
            log::info!("{} ran out of time", agents[p].name());
            forfeit = Some((p, EndReason::Timeout));
            break;
        }
        let line = match choice {
            Ok(line) => line,
            Err(e) => {
                log::info!("{} failed to move: {e:#}", agents[p].name());
                forfeit = Some((p, EndReason::InvalidMove));
                break;
            }
        };
        moves.push(PlayedMove { player: p as u8, line });
        if let Err(e) = game.play(line) {
            log::info!("{} played an illegal line: {e}", agents[p].name());
            forfeit = Some((p, EndReason::InvalidMove));
            break;
        }
    }

    let (winner, reason) = match forfeit {
        Some((loser, reason)) => (Some(1 - loser), reason),
        None => (game.winner(), EndReason::Normal),
    };
    GameRecord {
        moves,
        scores: game.scores(),
        winner,
        reason,
        time_ms: [used[0].as_millis() as u64, used[1].as_millis() as u64],
    }
}
