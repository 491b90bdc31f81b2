use std::time::{Duration, Instant};

use crate::board::{EdgeId, Position, NUM_EDGE};
use crate::search::expand::{natural_order, Child, Move};

pub const MAX_DEPTH: u32 = 60;
pub const VALUE_INF: i32 = 127;
const CHECK_MASK: u64 = 0x7FFF;

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    /// Root plies for the last iteration; 0 means `MAX_DEPTH`.
    pub depth: u32,
    pub movetime: Option<Duration>,
    pub max_nodes: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { depth: MAX_DEPTH, movetime: None, max_nodes: None }
    }
}

#[derive(Default, Debug, Clone, Copy)]
pub struct RootResult {
    pub best: usize,
    pub score: i32,
    pub depth: u32,
    pub nodes: u64,
}

#[derive(Default, Debug, Clone)]
pub struct SearchResult {
    pub bestmove: Option<Move>,
    pub score: i32,
    pub depth: u32,
    pub nodes: u64,
}

pub struct Searcher {
    pub(crate) nodes: u64,
    node_limit: u64,
    deadline: Option<Instant>,
    time_up: bool,
    order: [EdgeId; NUM_EDGE],
    scratch: Vec<Vec<Child>>,
}

impl Default for Searcher {
    fn default() -> Self {
        Self {
            nodes: 0,
            node_limit: u64::MAX,
            deadline: None,
            time_up: false,
            order: natural_order(),
            scratch: (0..=MAX_DEPTH as usize + 3).map(|_| Vec::new()).collect(),
        }
    }
}

pub fn leaf_value(pos: &Position) -> i32 {
    let (score, rem) = (pos.score() as i32, pos.remaining_boxes() as i32);
    if pos.double_deal() != 0 { score + (rem + (rem & 1)) / 2 } else { score }
}

impl Searcher {
    pub fn with_order(order: [EdgeId; NUM_EDGE]) -> Self {
        Self { order, ..Self::default() }
    }

    pub fn order(&self) -> &[EdgeId; NUM_EDGE] { &self.order }
    pub fn set_order(&mut self, order: [EdgeId; NUM_EDGE]) { self.order = order; }
    pub fn nodes(&self) -> u64 { self.nodes }
    pub fn time_up(&self) -> bool { self.time_up }

    fn begin(&mut self, params: &SearchParams) {
        self.nodes = 0;
        self.time_up = false;
        self.node_limit = params.max_nodes.unwrap_or(u64::MAX);
        self.deadline = params.movetime.map(|d| Instant::now() + d);
    }

    fn check_time(&mut self) -> bool {
        if let Some(dl) = self.deadline { if Instant::now() >= dl { self.time_up = true; } }
        self.time_up
    }

    // same-turn children keep the window and are not negated
    pub fn negamax(&mut self, pos: &Position, depth: u32, mut alpha: i32, beta: i32) -> i32 {
        if self.time_up { return 0; }
        self.nodes += 1;
        if self.nodes >= self.node_limit { self.time_up = true; return 0; }
        if (self.nodes & CHECK_MASK) == 0 && self.check_time() { return 0; }
        if depth == 0 || pos.remaining_boxes() == 0 { return leaf_value(pos); }

        let slot = (depth as usize).min(self.scratch.len() - 1);
        let mut children = std::mem::take(&mut self.scratch[slot]);
        pos.children_into(&self.order, &mut children);
        if children.is_empty() {
            self.scratch[slot] = children;
            return leaf_value(pos);
        }
        let mut best = -VALUE_INF;
        for child in children.iter() {
            let v = if child.pos.turn() == pos.turn() {
                self.negamax(&child.pos, depth - 1, alpha, beta)
            } else {
                -self.negamax(&child.pos, depth - 1, -beta, -alpha)
            };
            best = best.max(v);
            if best >= beta { break; }
            alpha = alpha.max(best);
        }
        self.scratch[slot] = children;
        best
    }

    pub fn search_root(&mut self, root: &Position, children: &[Child], params: SearchParams) -> RootResult {
        self.begin(&params);
        let mut result = RootResult::default();
        if children.is_empty() { return result; }
        let max_depth = if params.depth == 0 { MAX_DEPTH } else { params.depth.clamp(3, MAX_DEPTH) };
        let mut scores: Vec<(usize, i32)> = (0..children.len()).map(|i| (i, 0)).collect();
        result.best = scores[0].0;

        for depth in 3..=max_depth {
            for (idx, val) in scores.iter_mut() {
                let child = &children[*idx];
                let v = self.negamax(&child.pos, depth - 1, -VALUE_INF, VALUE_INF);
                *val = if child.pos.turn() == root.turn() { v } else { -v };
                if self.time_up { break; }
            }
            if self.time_up {
                log::trace!("depth {} cut by deadline after {} nodes", depth, self.nodes);
                break;
            }
            // stable: ties keep the previous iteration's order
            scores.sort_by(|a, b| b.1.cmp(&a.1));
            result = RootResult { best: scores[0].0, score: scores[0].1, depth, nodes: self.nodes };
            log::trace!("depth {} best={:?} score={} nodes={}", depth, children[scores[0].0].mv, scores[0].1, self.nodes);
        }
        result.nodes = self.nodes;
        result
    }

    pub fn search_with_params(&mut self, pos: &Position, params: SearchParams) -> SearchResult {
        let children = pos.children(&self.order);
        let r = self.search_root(pos, &children, params);
        SearchResult { bestmove: children.get(r.best).map(|c| c.mv), score: r.score, depth: r.depth, nodes: r.nodes }
    }
}
