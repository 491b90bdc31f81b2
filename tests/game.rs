use boxbot::board::Line;
use boxbot::{BoardError, Game};
use std::time::Duration;

#[test]
fn line_indices_follow_the_harness_numbering() {
    assert_eq!(Line::horizontal(0, 0).index(), 0);
    assert_eq!(Line::horizontal(4, 5).index(), 29);
    assert_eq!(Line::vertical(0, 0).index(), 30);
    assert_eq!(Line::vertical(5, 4).index(), 59);
    assert_eq!(Line::from_index(37), Ok(Line::vertical(1, 2)));
    assert_eq!(Line::from_index(60), Err(BoardError::BadIndex(60)));
}

#[test]
fn lines_parse_from_triples_or_indices() {
    assert_eq!("2,3,1".parse::<Line>(), Ok(Line::vertical(2, 3)));
    assert_eq!(" 4 5 0 ".parse::<Line>(), Ok(Line::horizontal(4, 5)));
    assert_eq!("31".parse::<Line>(), Ok(Line::vertical(0, 1)));
    assert!(matches!("5,0,0".parse::<Line>(), Err(BoardError::OutOfRange { .. })));
    assert!(matches!("a,b".parse::<Line>(), Err(BoardError::Parse(_))));
    assert_eq!(Line::vertical(2, 3).to_string(), "2,3,1");
}

#[test]
fn completing_a_box_keeps_the_turn() {
    let mut g = Game::new();
    assert_eq!(g.play(Line::horizontal(0, 0)), Ok(0));
    assert_eq!(g.to_move(), 1);
    assert_eq!(g.play(Line::vertical(0, 0)), Ok(0));
    assert_eq!(g.play(Line::horizontal(0, 1)), Ok(0));
    assert_eq!(g.to_move(), 1);
    // fourth side of box (0,0)
    assert_eq!(g.play(Line::vertical(1, 0)), Ok(1));
    assert_eq!(g.to_move(), 1, "capturing player moves again");
    assert_eq!(g.scores(), [0, 1]);
    assert_eq!(g.owner(0, 0), Some(1));
    assert_eq!(g.play(Line::vertical(1, 0)), Err(BoardError::AlreadyDrawn(Line::vertical(1, 0))));
}

#[test]
fn one_line_can_complete_two_boxes() {
    let mut g = Game::new();
    for l in [Line::horizontal(0, 0), Line::horizontal(0, 1), Line::vertical(0, 0), Line::horizontal(1, 0), Line::horizontal(1, 1), Line::vertical(2, 0)] {
        g.play(l).expect("legal");
    }
    let mover = g.to_move();
    assert_eq!(g.play(Line::vertical(1, 0)), Ok(2));
    assert_eq!(g.scores()[mover], 2);
    assert_eq!(g.to_move(), mover);
}

#[test]
fn engine_finishes_a_game_against_random() {
    use boxbot::game::EndReason;
    use boxbot::{play_match, Engine, EngineConfig, RandomAgent};
    let config = EngineConfig { time_limit: Duration::from_millis(1_500), seed: Some(3), ..EngineConfig::default() };
    let mut engine = Engine::new(config);
    let mut random = RandomAgent::new(11);
    let rec = play_match(&mut engine, &mut random, Duration::from_secs(120));
    assert_eq!(rec.reason, EndReason::Normal, "game ended early: {:?}", rec.reason);
    assert_eq!(rec.scores[0] + rec.scores[1], 25);
    assert_eq!(rec.moves.len(), 60, "every line drawn exactly once");
}

#[test]
fn erroring_agent_forfeits() {
    use boxbot::game::EndReason;
    use boxbot::{play_match, Agent, BoardLines, RandomAgent};
    struct Broken;
    impl Agent for Broken {
        fn name(&self) -> &str { "broken" }
        fn choose(&mut self, _: &BoardLines) -> anyhow::Result<Line> { anyhow::bail!("no idea") }
    }
    let rec = play_match(&mut RandomAgent::new(1), &mut Broken, Duration::from_secs(1));
    assert_eq!(rec.reason, EndReason::InvalidMove);
    assert_eq!(rec.winner, Some(0));
}

#[test]
fn off_board_line_forfeits() {
    use boxbot::board::Orientation;
    use boxbot::game::EndReason;
    use boxbot::{play_match, Agent, BoardLines, RandomAgent};
    struct Fixed(Line);
    impl Agent for Fixed {
        fn name(&self) -> &str { "fixed" }
        fn choose(&mut self, _: &BoardLines) -> anyhow::Result<Line> { Ok(self.0) }
    }
    // outside the grid, and a grid cell that names no line
    for bad in [Line { x: 9, y: 0, orientation: Orientation::Vertical }, Line { x: 5, y: 0, orientation: Orientation::Horizontal }] {
        assert!(matches!(Game::new().play(bad), Err(BoardError::OutOfRange { .. })), "{bad:?} accepted");
        let rec = play_match(&mut Fixed(bad), &mut RandomAgent::new(1), Duration::from_secs(1));
        assert_eq!(rec.reason, EndReason::InvalidMove, "{bad:?}");
        assert_eq!(rec.winner, Some(1));
        assert_eq!(rec.scores, [0, 0]);
    }
}
