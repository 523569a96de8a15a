//! Fixed-step frame clock
//!
//! The display drives one callback per frame with a variable delta. The
//! simulation wants fixed ticks, so real time is accumulated and drained in
//! `TICK_MS` steps.

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, TICK_MS};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f64,
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame timestamp (ms); returns how many fixed ticks to run
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time.replace(now_ms) {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => 0.0,
        };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= TICK_MS && substeps < MAX_SUBSTEPS {
            self.accumulator -= TICK_MS;
            substeps += 1;
        }
        // Drop whatever the substep cap could not absorb
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(TICK_MS);
        }
        substeps
    }

    /// Forget the previous timestamp (after pause or tab switch)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_runs_nothing() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1234.0), 0);
    }

    #[test]
    fn test_accumulates_partial_frames() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(10.0), 0);
        assert_eq!(clock.advance(20.0), 1);
        assert_eq!(clock.advance(20.0 + 2.0 * TICK_MS), 2);
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let ticks = clock.advance(60_000.0);
        // 100 ms worth of ticks, not a minute's
        assert!(ticks > 0 && ticks <= 6);
    }

    #[test]
    fn test_reset_forgets_last_time() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.reset();
        assert_eq!(clock.advance(5_000.0), 0);
    }
}
