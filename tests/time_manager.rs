use boxbot::search::TimeManager;
use std::time::Duration;

fn manager() -> TimeManager {
    TimeManager::new(Duration::from_millis(24_000), 60, 25)
}

#[test]
fn opening_moves_get_a_small_slice() {
    let t = manager().time_for_move(Duration::from_millis(24_000), 60, 25);
    // 24s over 17.5 moves, scaled by the 0.03 floor
    assert!(t > Duration::from_millis(40) && t < Duration::from_millis(42), "opening slice {:?}", t);
}

#[test]
fn endgame_spends_more_but_keeps_a_reserve() {
    let tm = manager();
    let remaining = Duration::from_millis(10_000);
    let late = tm.time_for_move(remaining, 10, 8);
    assert_eq!(late, remaining.mul_f64(0.9), "late slice should hit the cap");
    let mid = tm.time_for_move(remaining, 40, 20);
    let early = tm.time_for_move(remaining, 56, 25);
    assert!(early < mid && mid < late, "not increasing: {:?} {:?} {:?}", early, mid, late);
}

#[test]
fn slice_never_drops_below_a_millisecond() {
    let t = manager().time_for_move(Duration::from_millis(10), 60, 25);
    assert_eq!(t, Duration::from_millis(1));
}

#[test]
fn nothing_left_means_nothing_spent() {
    let t = manager().time_for_move(Duration::ZERO, 30, 10);
    assert_eq!(t, Duration::ZERO);
}
