use boxbot::board::{edge_line, Position};
use boxbot::search::expand::{natural_order, Move, BRANCH_CAP};
use pretty_assertions::assert_eq;

#[test]
fn pending_split_has_exactly_two_children() {
    let mut p = Position::new();
    p.stage_double_deal(2);
    let kids = p.children(&natural_order());
    assert_eq!(kids.iter().map(|c| c.mv).collect::<Vec<_>>(), vec![Move::DeclineSplit, Move::AcceptSplit]);

    let decline = &kids[0].pos;
    assert_eq!((decline.turn(), decline.score(), decline.remaining_boxes(), decline.double_deal()), (1, 2, 23, 0));
    let accept = &kids[1].pos;
    assert_eq!((accept.turn(), accept.score(), accept.remaining_boxes(), accept.double_deal()), (-1, 2, 23, 0));
}

#[test]
fn empty_board_is_capped_and_each_line_appears_once() {
    let p = Position::new();
    let kids = p.children(&natural_order());
    assert_eq!(kids.len(), BRANCH_CAP);
    let mut lines = Vec::new();
    for c in &kids {
        match c.mv {
            Move::Plain(e) => lines.push(edge_line(e)),
            other => panic!("unexpected child {other:?} on an empty board"),
        }
        // no box can be completed on an empty board
        assert_eq!(c.pos.remaining_boxes(), 25);
        assert_eq!(c.pos.turn(), -1);
    }
    let n = lines.len();
    lines.sort_by_key(|l| l.index());
    lines.dedup();
    assert_eq!(lines.len(), n, "a line was expanded from both of its half-edges");
}

#[test]
fn opening_components_scores_by_length() {
    // lengths: short chain taken whole, long chain leaves a split of 2, loop leaves 4
    let cases = [(2i8, true, 2, 0), (5, true, 3, 2), (4, false, 0, 4), (6, false, 2, 4)];
    for (len, chain, gain, leave) in cases {
        let mut p = Position::new();
        if chain { p.apply_score(len, 2, 3) } else { p.apply_score(len, 4, 4) }
        assert_eq!(p.score(), gain, "len {len} chain {chain}");
        assert_eq!(p.double_deal(), leave, "len {len} chain {chain}");
        assert_eq!(p.remaining_boxes(), 25 - gain);
        assert_eq!(p.turn(), -1);
    }
}

/// Follows the first child down to the end of the game, checking that every
/// resolved box goes to exactly one side.
#[test]
fn first_child_playout_accounts_for_every_box() {
    let order = natural_order();
    let mut pos = Position::new();
    let mut boxes = [0i32; 2];
    for _ in 0..200 {
        if pos.remaining_boxes() == 0 { break; }
        let kids = pos.children(&order);
        assert!(!kids.is_empty(), "no children with {} boxes left", pos.remaining_boxes());
        let child = kids[0].pos;
        child.check_links().expect("playout position");
        let gained = (pos.remaining_boxes() - child.remaining_boxes()) as i32;
        let rel = if child.turn() == pos.turn() { child.score() - pos.score() } else { child.score() + pos.score() };
        assert_eq!(rel as i32, gained, "score moved by a different amount than the boxes resolved by {:?}", kids[0].mv);
        boxes[if child.turn() == 1 { 0 } else { 1 }] += gained;
        pos = child;
    }
    assert_eq!(pos.remaining_boxes(), 0);
    assert_eq!(boxes[0] + boxes[1], 25);
    assert_eq!(boxes[0] - boxes[1], pos.score() as i32 * pos.turn() as i32);
}

#[test]
fn smallest_chain_and_loop_are_offered() {
    use boxbot::board::{all_lines, empty_board, Line};
    // a corner chain of two, a column chain of five and a ring in the middle
    let open = [
        Line::horizontal(0, 0), Line::horizontal(0, 1), Line::vertical(0, 1),
        Line::horizontal(4, 0), Line::horizontal(4, 1), Line::horizontal(4, 2), Line::horizontal(4, 3), Line::horizontal(4, 4), Line::horizontal(4, 5),
        Line::vertical(2, 1), Line::vertical(2, 2), Line::horizontal(1, 2), Line::horizontal(2, 2),
    ];
    let mut b = empty_board();
    for l in all_lines() { l.set(&mut b, !open.contains(&l)); }
    let mut p = Position::from_lines(&b);
    for e in 0..100 { p.simplify(e); }
    let mut raw = p.raw_components().to_vec();
    raw.sort();
    assert_eq!(raw, vec![-5, -2, 4]);

    let kids = p.children(&natural_order());
    let opened: Vec<i8> = kids.iter().map(|c| match c.mv {
        Move::OpenComponent(i) => p.raw_components()[i as usize],
        other => panic!("unexpected child {other:?}"),
    }).collect();
    assert_eq!(opened, vec![-2, 4]);
    assert!(kids.iter().all(|c| c.pos.raw_components().len() == 2));
}
