use std::time::Duration;

const LOW: f64 = 0.03;
const HIGH: f64 = 3.0;
const GAMMA: f64 = 2.0;
const MIN_MOVE: Duration = Duration::from_millis(1);
const MAX_FRACTION: f64 = 0.9;

#[derive(Debug, Clone, Copy)]
pub struct TimeManager {
    pub total: Duration,
    d0: f64,
}

fn moves_left(lines: u32, boxes: u32) -> f64 {
    ((lines as f64 - boxes as f64) / 2.0).max(1.0)
}

impl TimeManager {
    pub fn new(total: Duration, initial_lines: u32, initial_boxes: u32) -> Self {
        Self { total, d0: moves_left(initial_lines, initial_boxes) }
    }

    pub fn time_for_move(&self, remaining: Duration, remaining_lines: u32, remaining_boxes: u32) -> Duration {
        let d = moves_left(remaining_lines, remaining_boxes);
        let base = remaining.as_secs_f64() / d;
        let progress = (1.0 - d / self.d0).clamp(0.0, 1.0);
        let factor = LOW + (HIGH - LOW) * progress.powf(GAMMA);
        let mut t = Duration::from_secs_f64(base * factor);
        if t < MIN_MOVE { t = MIN_MOVE; }
        let cap = remaining.mul_f64(MAX_FRACTION);
        if t > cap { t = cap; }
        t
    }
}
