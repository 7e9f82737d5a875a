//! Platform abstraction layer
//!
//! Converts real frame timestamps into fixed simulation steps and tracks
//! focus, so time spent in the background never reaches the game clock.

use crate::consts::{MAX_FRAME_DT_MS, MAX_SUBSTEPS, SIM_DT_MS};

/// Fixed-step accumulator fed by real frame timestamps (ms)
#[derive(Debug, Clone)]
pub struct FrameClock {
    accumulator: f64,
    last_time: Option<f64>,
    focused: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            last_time: None,
            focused: true,
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Number of fixed steps to run for a frame at `now_ms`
    ///
    /// The first frame after construction or refocus only sets the baseline.
    /// Non-finite timestamps are skipped without disturbing the baseline.
    /// Long frames are clamped and at most `MAX_SUBSTEPS` run per frame.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        if !self.focused || !now_ms.is_finite() {
            return 0;
        }
        let Some(last) = self.last_time.replace(now_ms) else {
            return 0;
        };
        let dt = (now_ms - last).clamp(0.0, MAX_FRAME_DT_MS);
        self.accumulator += dt;

        let step = SIM_DT_MS as f64;
        let mut substeps = 0;
        while self.accumulator >= step && substeps < MAX_SUBSTEPS {
            self.accumulator -= step;
            substeps += 1;
        }
        substeps
    }

    /// Stop counting time until focus returns
    pub fn focus_lost(&mut self) {
        self.focused = false;
        self.last_time = None;
        self.accumulator = 0.0;
    }

    pub fn focus_gained(&mut self) {
        self.focused = true;
        self.last_time = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_sets_baseline() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(1_000.0), 0);
        assert_eq!(clock.advance(1_016.0), 1);
    }

    #[test]
    fn test_accumulates_remainder() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(10.0), 0);
        assert_eq!(clock.advance(20.0), 1);
        assert_eq!(clock.advance(52.0), 2);
    }

    #[test]
    fn test_long_frame_clamped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        // 100 ms cap -> 6 steps, not 62
        assert_eq!(clock.advance(1_000.0), 6);
    }

    #[test]
    fn test_backwards_time_ignored() {
        let mut clock = FrameClock::new();
        clock.advance(500.0);
        assert_eq!(clock.advance(400.0), 0);
    }

    #[test]
    fn test_non_finite_time_ignored() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        assert_eq!(clock.advance(f64::NAN), 0);
        assert_eq!(clock.advance(f64::INFINITY), 0);
        assert_eq!(clock.advance(f64::NEG_INFINITY), 0);

        let steps: u32 = (1..=100).map(|i| clock.advance(i as f64 * 16.0)).sum();
        assert_eq!(steps, 100);
    }

    #[test]
    fn test_unfocused_time_discarded() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        clock.advance(16.0);
        clock.focus_lost();
        assert!(!clock.is_focused());
        assert_eq!(clock.advance(5_000.0), 0);
        clock.focus_gained();
        assert_eq!(clock.advance(60_000.0), 0);
        assert_eq!(clock.advance(60_016.0), 1);
    }
}
