use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::{drawn_count, BoardLines, Line, Position, NUM_BOXES, NUM_LINES};
use crate::error::EngineError;
use crate::game::Agent;
use crate::search::{SearchParams, Searcher, TimeManager};
use crate::select::{self, Decision};

pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_millis(24_000);

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Clock for a whole game, spread over our moves by the time manager.
    pub time_limit: Duration,
    /// Shuffle the base move order at the start of every game.
    pub shuffle: bool,
    /// Seed for the shuffle; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { time_limit: DEFAULT_TIME_LIMIT, shuffle: true, seed: None }
    }
}

/// Session state kept across calls for one seat at the table. A call whose
/// board has fewer drawn lines than the previous one starts a new game.
pub struct Engine {
    config: EngineConfig,
    time_left: Duration,
    prev_drawn: u32,
    rng: SmallRng,
    time_manager: TimeManager,
    searcher: Searcher,
}

impl Default for Engine {
    fn default() -> Self { Self::new(EngineConfig::default()) }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => SmallRng::from_entropy(),
        };
        Self {
            config,
            time_left: config.time_limit,
            // above any real count, so the first call starts a game
            prev_drawn: NUM_LINES as u32 + 1,
            rng,
            time_manager: TimeManager::new(config.time_limit, NUM_LINES as u32, NUM_BOXES as u32),
            searcher: Searcher::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig { &self.config }
    pub fn time_left(&self) -> Duration { self.time_left }

    /// Resets the clock and reshuffles the move order.
    pub fn new_game(&mut self) {
        self.time_left = self.config.time_limit;
        if self.config.shuffle {
            let mut order = *self.searcher.order();
            order.shuffle(&mut self.rng);
            self.searcher.set_order(order);
        }
    }

    pub fn choose_move(&mut self, board: &BoardLines) -> Result<Decision, EngineError> {
        let start = Instant::now();
        let drawn = drawn_count(board);
        if self.prev_drawn > drawn {
            log::debug!("new game ({} lines drawn, previously {})", drawn, self.prev_drawn);
            self.new_game();
        }
        self.prev_drawn = drawn;

        let pos = Position::from_lines(board);
        let budget = self.time_manager.time_for_move(self.time_left, NUM_LINES as u32 - drawn, pos.remaining_boxes().max(0) as u32);
        let params = SearchParams { movetime: Some(budget.saturating_sub(start.elapsed())), ..SearchParams::default() };
        let decision = select::choose_move(&mut self.searcher, &pos, params);

        let elapsed = start.elapsed();
        self.time_left = self.time_left.saturating_sub(elapsed);
        if let Ok(d) = &decision {
            log::debug!(
                "move {} forced={} budget={:?} elapsed={:?} left={:?} nodes={}",
                d.line, d.forced, budget, elapsed, self.time_left, d.nodes
            );
        }
        decision
    }
}

impl Agent for Engine {
    fn name(&self) -> &str { "boxbot" }

    fn choose(&mut self, board: &BoardLines) -> anyhow::Result<Line> {
        Ok(self.choose_move(board)?.line)
    }
}
