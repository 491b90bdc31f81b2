// Per-box circular lists of undrawn half-edges. Two-sided boxes are collapsed;
// isolated strands go to `components` (negative chain, non-negative loop).

use super::{edge_id, edge_line, BoardLines, EdgeId, BOX_X, BOX_Y, DEADEND, MAX_COMPONENTS, NUM_BOXES, NUM_EDGE, REMOVED};

const INITIAL_OPP: [EdgeId; NUM_EDGE] = initial_opp();
const INITIAL_NEXT: [EdgeId; NUM_EDGE] = initial_ring(1);
const INITIAL_PREV: [EdgeId; NUM_EDGE] = initial_ring(3);

const fn initial_opp() -> [EdgeId; NUM_EDGE] {
    let mut opp = [DEADEND; NUM_EDGE];
    let mut y = 0;
    while y < BOX_Y {
        let mut x = 0;
        while x < BOX_X {
            if y > 0 { opp[edge_id(x, y, 0) as usize] = edge_id(x, y - 1, 2); }
            if x + 1 < BOX_X { opp[edge_id(x, y, 1) as usize] = edge_id(x + 1, y, 3); }
            if y + 1 < BOX_Y { opp[edge_id(x, y, 2) as usize] = edge_id(x, y + 1, 0); }
            if x > 0 { opp[edge_id(x, y, 3) as usize] = edge_id(x - 1, y, 1); }
            x += 1;
        }
        y += 1;
    }
    opp
}

const fn initial_ring(step: usize) -> [EdgeId; NUM_EDGE] {
    let mut ring = [0; NUM_EDGE];
    let mut e = 0;
    while e < NUM_EDGE {
        ring[e] = (e - e % 4 + (e + step) % 4) as EdgeId;
        e += 1;
    }
    ring
}

#[inline(always)]
fn ix(e: EdgeId) -> usize {
    debug_assert!(e >= 0, "sentinel used as index: {e}");
    e as usize
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Component {
    Chain(u8),
    Loop(u8),
}

impl Component {
    pub fn from_raw(raw: i8) -> Self {
        if raw < 0 { Component::Chain(raw.unsigned_abs()) } else { Component::Loop(raw as u8) }
    }

    pub fn len(self) -> u8 {
        match self { Component::Chain(n) | Component::Loop(n) => n }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    opp: [EdgeId; NUM_EDGE],
    next: [EdgeId; NUM_EDGE],
    prev: [EdgeId; NUM_EDGE],
    simplified: [i8; NUM_EDGE],
    components: [i8; MAX_COMPONENTS],
    components_len: u8,
    pub(crate) double_deal: i8,
    pub(crate) score: i8,
    pub(crate) turn: i8,
    pub(crate) remaining_boxes: i8,
}

impl Default for Position {
    fn default() -> Self { Self::new() }
}

impl Position {
    pub fn new() -> Self {
        Self {
            opp: INITIAL_OPP,
            next: INITIAL_NEXT,
            prev: INITIAL_PREV,
            simplified: [0; NUM_EDGE],
            components: [0; MAX_COMPONENTS],
            components_len: 0,
            double_deal: 0,
            score: 0,
            turn: 1,
            remaining_boxes: NUM_BOXES as i8,
        }
    }

    /// Removes the half-edges of every drawn line. Nothing is collapsed yet.
    pub fn from_lines(board: &BoardLines) -> Self {
        let mut pos = Self::new();
        for y in 0..BOX_Y {
            for x in 0..BOX_X {
                let mut drawn = 0;
                for side in 0..4 {
                    let e = edge_id(x, y, side);
                    if edge_line(e).is_drawn(board) { pos.remove(e); drawn += 1; }
                }
                if drawn == 4 { pos.remaining_boxes -= 1; }
            }
        }
        pos
    }

    pub fn opp(&self, e: EdgeId) -> EdgeId { self.opp[ix(e)] }
    pub fn next(&self, e: EdgeId) -> EdgeId { self.next[ix(e)] }
    pub fn prev(&self, e: EdgeId) -> EdgeId { self.prev[ix(e)] }
    pub fn simplified_len(&self, e: EdgeId) -> i8 { self.simplified[ix(e)] }
    pub fn is_live(&self, e: EdgeId) -> bool { e >= 0 && self.next[ix(e)] >= 0 }

    pub fn score(&self) -> i8 { self.score }
    pub fn turn(&self) -> i8 { self.turn }
    pub fn remaining_boxes(&self) -> i8 { self.remaining_boxes }
    pub fn double_deal(&self) -> i8 { self.double_deal }

    pub fn raw_components(&self) -> &[i8] { &self.components[..self.components_len as usize] }

    pub fn components(&self) -> impl Iterator<Item = Component> + '_ {
        self.raw_components().iter().map(|&c| Component::from_raw(c))
    }

    pub fn stage_double_deal(&mut self, boxes: i8) { self.double_deal = boxes; }

    pub(crate) fn swap_remove_component(&mut self, idx: usize) {
        debug_assert!(idx < self.components_len as usize);
        self.components_len -= 1;
        self.components[idx] = self.components[self.components_len as usize];
    }

    fn push_component(&mut self, raw: i8) -> bool {
        debug_assert!((self.components_len as usize) < MAX_COMPONENTS, "component list overflow");
        if self.components_len as usize >= MAX_COMPONENTS { return false; }
        self.components[self.components_len as usize] = raw;
        self.components_len += 1;
        true
    }

    fn hide(&mut self, e: EdgeId) {
        let i = ix(e);
        self.opp[i] = REMOVED;
        self.next[i] = REMOVED;
        self.prev[i] = REMOVED;
        self.simplified[i] = REMOVED;
    }

    pub fn remove(&mut self, e: EdgeId) {
        if !self.is_live(e) { return; }
        let (p, n) = (self.prev[ix(e)], self.next[ix(e)]);
        self.next[ix(p)] = n;
        self.prev[ix(n)] = p;
        self.hide(e);
    }

    /// True when the collapse closed a chain or loop into the component list.
    pub fn simplify(&mut self, e: EdgeId) -> bool {
        if !self.is_live(e) { return false; }
        let ne = self.next[ix(e)];
        if ne == e || self.next[ix(ne)] != e { return false; }
        let (one, oe) = (self.opp[ix(ne)], self.opp[ix(e)]);
        let mut recorded = false;
        if one == e {
            recorded = self.push_component(self.simplified[ix(oe)] + 1);
        } else {
            let length = self.simplified[ix(ne)] + self.simplified[ix(e)] + 1;
            if oe != DEADEND { self.opp[ix(oe)] = one; self.simplified[ix(oe)] = length; }
            if one != DEADEND { self.opp[ix(one)] = oe; self.simplified[ix(one)] = length; }
            if one == DEADEND && oe == DEADEND { recorded = self.push_component(-length); }
        }
        self.hide(e);
        self.hide(ne);
        // a box holding nothing but both ends of one strand is a closed loop
        if oe >= 0 && one >= 0 && self.next[ix(oe)] == one && self.next[ix(one)] == oe {
            recorded |= self.simplify(oe);
        }
        recorded
    }

    pub fn remove_and_simplify(&mut self, e: EdgeId) -> Option<EdgeId> {
        if !self.is_live(e) { return None; }
        let (oe, ne) = (self.opp[ix(e)], self.next[ix(e)]);
        self.remove(e);
        if oe >= 0 && self.same_box(ne, oe) {
            let noe = self.next[ix(oe)];
            self.remove(oe);
            return self.simplify(noe).then_some(noe);
        }
        let mut recorded = self.simplify(ne).then_some(ne);
        if oe >= 0 {
            let noe = self.next[ix(oe)];
            self.remove(oe);
            if self.simplify(noe) { recorded = recorded.or(Some(noe)); }
        }
        recorded
    }

    fn same_box(&self, a: EdgeId, b: EdgeId) -> bool {
        if !self.is_live(a) { return false; }
        let mut c = a;
        for _ in 0..4 {
            if c == b { return true; }
            c = self.next[ix(c)];
            if c == a { break; }
        }
        false
    }

    /// For a live `e` whose strand returns to its own three-sided box, the
    /// box's remaining half-edge: drawing `e` then also completes that box.
    pub(crate) fn companion(&self, e: EdgeId, oe: EdgeId) -> Option<EdgeId> {
        if oe < 0 { return None; }
        let ne = self.next[ix(e)];
        let nne = self.next[ix(ne)];
        if self.next[ix(nne)] != e || (ne != oe && nne != oe) { return None; }
        Some(if ne == oe { nne } else { ne })
    }

    // strands of at least `min` boxes are taken down to `leave`, left as a split
    pub fn apply_score(&mut self, length: i8, leave: i8, min: i8) {
        self.turn = -self.turn;
        self.score = -self.score;
        let big = length >= min;
        let gain = if big { length - leave } else { length };
        self.score += gain;
        self.remaining_boxes -= gain;
        self.double_deal = if big { leave } else { 0 };
    }

    pub fn check_links(&self) -> Result<(), String> {
        for e in 0..NUM_EDGE as EdgeId {
            if !self.is_live(e) {
                if self.prev[ix(e)] != REMOVED || self.opp[ix(e)] != REMOVED {
                    return Err(format!("edge {e} half removed"));
                }
                continue;
            }
            let (n, p, o) = (self.next(e), self.prev(e), self.opp(e));
            if !self.is_live(n) || self.prev(n) != e { return Err(format!("prev[next[{e}]] != {e}")); }
            if !self.is_live(p) || self.next(p) != e { return Err(format!("next[prev[{e}]] != {e}")); }
            if n / 4 != e / 4 { return Err(format!("edge {e} linked across boxes to {n}")); }
            if o != DEADEND && (!self.is_live(o) || self.opp(o) != e) {
                return Err(format!("opp of {e} is {o}, not symmetric"));
            }
            if self.simplified_len(e) < 0 { return Err(format!("edge {e} has negative length")); }
        }
        if self.components_len as usize > MAX_COMPONENTS {
            return Err(format!("{} components", self.components_len));
        }
        Ok(())
    }
}
