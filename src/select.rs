use serde::Serialize;

use crate::board::{edge_line, EdgeId, Line, Position, DEADEND, MAX_COMPONENTS, NUM_EDGE, REMOVED};
use crate::error::EngineError;
use crate::search::{Move, SearchParams, Searcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub line: Line,
    pub edge: EdgeId,
    pub forced: bool,
    pub score: i32,
    pub depth: u32,
    pub nodes: u64,
}

impl Decision {
    fn forced(edge: EdgeId) -> Self {
        Self { line: edge_line(edge), edge, forced: true, score: 0, depth: 0, nodes: 0 }
    }
}

/// In the uncollapsed position, the far side of the first box behind `e`.
/// For a two-box strand this is the middle line.
fn past_first_box(original: &Position, e: EdgeId) -> EdgeId {
    let o = original.opp(e);
    if original.is_live(o) { original.next(o) } else { e }
}

pub fn choose_move(searcher: &mut Searcher, pos: &Position, params: SearchParams) -> Result<Decision, EngineError> {
    let original = *pos;
    let mut gs = *pos;
    gs.stage_double_deal(0);

    let mut component_edge = [DEADEND; MAX_COMPONENTS];
    for e in 0..NUM_EDGE as EdgeId {
        if gs.opp(e) == REMOVED { continue; }
        let idx = gs.raw_components().len();
        if gs.simplify(e) { component_edge[idx] = e; }
    }

    let mut chains: Vec<EdgeId> = Vec::new();
    let mut loops: Vec<EdgeId> = Vec::new();
    let mut staged = None;
    for e in 0..NUM_EDGE as EdgeId {
        let oe = gs.opp(e);
        if oe == REMOVED || gs.next(e) != e { continue; }
        if oe != DEADEND && gs.next(oe) == oe {
            if gs.simplified_len(e) != 2 { return Ok(Decision::forced(e)); }
            loops.push(e);
        } else {
            if gs.simplified_len(e) != 1 { return Ok(Decision::forced(e)); }
            chains.push(e);
        }
        staged = Some(e);
    }
    if !chains.is_empty() && !loops.is_empty() { return Ok(Decision::forced(loops[0])); }
    if chains.len() > 1 { return Ok(Decision::forced(chains[0])); }
    if loops.len() > 2 { return Ok(Decision::forced(loops[0])); }
    if chains.len() == 1 { gs.stage_double_deal(2); }
    if loops.len() == 2 { gs.stage_double_deal(4); }
    if let Some(e) = staged {
        let first_new = gs.raw_components().len();
        if let Some(c) = gs.remove_and_simplify(e) {
            for slot in component_edge.iter_mut().take(gs.raw_components().len()).skip(first_new) { *slot = c; }
        }
    }

    debug_assert_eq!(gs.check_links(), Ok(()));

    let children = gs.children(searcher.order());
    if children.is_empty() { return Err(EngineError::NoMoves); }
    let r = searcher.search_root(&gs, &children, params);
    let mv = children[r.best].mv;

    let edge = match (mv, staged) {
        (Move::DeclineSplit, Some(s)) => s,
        (Move::AcceptSplit, Some(s)) => past_first_box(&original, s),
        (Move::DeclineSplit | Move::AcceptSplit, None) => unreachable!("split offered without a staged edge"),
        (Move::OpenComponent(n), _) => {
            let ce = component_edge[n as usize];
            debug_assert!(ce >= 0, "component {n} has no recorded edge");
            if gs.raw_components()[n as usize] == -2 && original.opp(ce) == DEADEND { original.next(ce) } else { ce }
        }
        (Move::Plain(e), _) => if gs.simplified_len(e) == 2 { past_first_box(&original, e) } else { e },
    };
    log::debug!("chose {} via {:?}: score={} depth={} nodes={}", edge_line(edge), mv, r.score, r.depth, r.nodes);
    Ok(Decision { line: edge_line(edge), edge, forced: false, score: r.score, depth: r.depth, nodes: r.nodes })
}
