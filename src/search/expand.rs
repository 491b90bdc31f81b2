use crate::board::{EdgeId, Position, NUM_EDGE, REMOVED};

pub const BRANCH_CAP: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Plain(EdgeId),
    DeclineSplit,
    // give the split away and keep control
    AcceptSplit,
    OpenComponent(u8),
}

#[derive(Clone, Copy, Debug)]
pub struct Child {
    pub mv: Move,
    pub pos: Position,
}

pub fn natural_order() -> [EdgeId; NUM_EDGE] {
    let mut order = [0; NUM_EDGE];
    for (i, e) in order.iter_mut().enumerate() { *e = i as EdgeId; }
    order
}

impl Position {
    pub fn children_into(&self, order: &[EdgeId], out: &mut Vec<Child>) {
        out.clear();
        if self.double_deal != 0 {
            for (mv, give) in [(Move::DeclineSplit, false), (Move::AcceptSplit, true)] {
                let mut ns = *self;
                if give { ns.score = -ns.score; ns.turn = -ns.turn; }
                ns.score += ns.double_deal;
                ns.remaining_boxes -= ns.double_deal;
                ns.double_deal = 0;
                out.push(Child { mv, pos: ns });
            }
            return;
        }

        for &e in order {
            let oe = self.opp(e);
            if oe == REMOVED || e < oe { continue; }
            let e3 = self.companion(e, oe);
            let length = self.simplified_len(e) + e3.map_or(0, |c| self.simplified_len(c) + 1);
            let mut ns = *self;
            ns.remove_and_simplify(e);
            if let Some(c) = e3 { ns.remove_and_simplify(c); }
            ns.apply_score(length, 2, 3);
            out.push(Child { mv: Move::Plain(e), pos: ns });
            if out.len() >= BRANCH_CAP { break; }
        }

        let mut best_chain: Option<(usize, i8)> = None;
        let mut best_loop: Option<(usize, i8)> = None;
        for (i, &raw) in self.raw_components().iter().enumerate() {
            if raw < 0 {
                if best_chain.map_or(true, |(_, len)| -raw < len) { best_chain = Some((i, -raw)); }
            } else if best_loop.map_or(true, |(_, len)| raw < len) {
                best_loop = Some((i, raw));
            }
        }
        for (idx, length) in best_chain.into_iter().chain(best_loop) {
            let is_chain = self.raw_components()[idx] < 0;
            let (leave, min) = if is_chain { (2, 3) } else { (4, 4) };
            let mut ns = *self;
            ns.apply_score(length, leave, min);
            ns.swap_remove_component(idx);
            out.push(Child { mv: Move::OpenComponent(idx as u8), pos: ns });
        }
    }

    pub fn children(&self, order: &[EdgeId]) -> Vec<Child> {
        let mut out = Vec::with_capacity(BRANCH_CAP + 2);
        self.children_into(order, &mut out);
        out
    }
}
