//! Randomized blinking.
//!
//! Eyes stay open for a uniformly random interval, close for a fixed
//! short duration, then reopen; the next interval is drawn fresh after
//! every completed blink, which reads as natural rather than metronomic.
//! Transitions are deadline timestamps checked against the caller's
//! clock, so there is no timer that could fire after teardown.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::params::BlinkParams;

/// Blink state machine driven by a caller-supplied clock
#[derive(Debug)]
pub struct BlinkScheduler {
    params: BlinkParams,
    rng: StdRng,
    eyes_open: bool,
    next_event_at: Duration,
}

impl BlinkScheduler {
    /// Scheduler starting with open eyes at time `start`
    pub fn new(params: BlinkParams, start: Duration) -> Self {
        Self::with_rng(params, start, StdRng::from_os_rng())
    }

    /// Scheduler with an explicit RNG (deterministic tests)
    pub fn with_rng(params: BlinkParams, start: Duration, rng: StdRng) -> Self {
        let mut scheduler = Self {
            params,
            rng,
            eyes_open: true,
            next_event_at: start,
        };
        let interval = scheduler.draw_interval();
        scheduler.next_event_at = start + interval;
        scheduler
    }

    fn draw_interval(&mut self) -> Duration {
        let (min, max) = self.params.interval_ms;
        Duration::from_millis(self.rng.random_range(min..=max))
    }

    /// Advance to `now` and return the eye-open driver: 1.0 open,
    /// 0.0 closed. Transitions are binary, not eased.
    pub fn tick(&mut self, now: Duration) -> f32 {
        if !self.params.enabled {
            return 1.0;
        }

        // Catch up across however many deadlines have passed
        while now >= self.next_event_at {
            if self.eyes_open {
                self.eyes_open = false;
                self.next_event_at += Duration::from_millis(self.params.duration_ms);
            } else {
                self.eyes_open = true;
                let interval = self.draw_interval();
                self.next_event_at += interval;
            }
        }

        if self.eyes_open {
            1.0
        } else {
            0.0
        }
    }

    pub fn eyes_open(&self) -> bool {
        self.eyes_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn seeded(params: BlinkParams) -> BlinkScheduler {
        BlinkScheduler::with_rng(params, Duration::ZERO, StdRng::seed_from_u64(0xb117))
    }

    #[test]
    fn test_interval_draws_are_uniform_within_bounds() {
        let params = BlinkParams::default();
        let mut scheduler = seeded(params.clone());
        let (min, max) = params.interval_ms;

        let n = 2000;
        let mut sum = 0u64;
        for _ in 0..n {
            let drawn = scheduler.draw_interval().as_millis() as u64;
            assert!(drawn >= min && drawn <= max, "draw {drawn} out of range");
            sum += drawn;
        }

        // Mean of Uniform[2000,6000] is 4000; allow 5% drift
        let mean = sum as f64 / n as f64;
        let expected = (min + max) as f64 / 2.0;
        assert!(
            (mean - expected).abs() < expected * 0.05,
            "mean {mean} too far from {expected}"
        );
    }

    #[test]
    fn test_eyes_start_open_and_stay_open_before_first_deadline() {
        let mut scheduler = seeded(BlinkParams::default());
        let (min, _) = BlinkParams::default().interval_ms;

        assert_eq!(scheduler.tick(Duration::ZERO), 1.0);
        assert_eq!(scheduler.tick(ms(min - 1)), 1.0);
    }

    #[test]
    fn test_exactly_one_blink_per_short_interval_window() {
        // With 2*min > max, a second close cannot fit inside one
        // max-interval-plus-duration window, whatever the draws.
        let params = BlinkParams {
            enabled: true,
            interval_ms: (500, 600),
            duration_ms: 100,
        };
        let mut scheduler = seeded(params.clone());

        let window_ms = params.interval_ms.1 + params.duration_ms;
        let mut closes = 0;
        let mut opens = 0;
        let mut last = scheduler.tick(Duration::ZERO);

        for t in (0..=window_ms).step_by(4) {
            let value = scheduler.tick(ms(t));
            if last == 1.0 && value == 0.0 {
                closes += 1;
            }
            if last == 0.0 && value == 1.0 {
                opens += 1;
            }
            last = value;
        }

        assert_eq!(closes, 1, "expected exactly one close");
        assert_eq!(opens, 1, "expected exactly one reopen");
    }

    #[test]
    fn test_blink_closes_for_configured_duration() {
        let params = BlinkParams {
            enabled: true,
            interval_ms: (1000, 1000),
            duration_ms: 100,
        };
        let mut scheduler = seeded(params);

        assert_eq!(scheduler.tick(ms(999)), 1.0);
        assert_eq!(scheduler.tick(ms(1000)), 0.0);
        assert_eq!(scheduler.tick(ms(1099)), 0.0);
        assert_eq!(scheduler.tick(ms(1100)), 1.0);
    }

    #[test]
    fn test_catches_up_over_long_gaps() {
        let params = BlinkParams {
            enabled: true,
            interval_ms: (100, 200),
            duration_ms: 50,
        };
        let mut scheduler = seeded(params);

        // A huge jump lands in a consistent state, not a panic or stall
        let value = scheduler.tick(ms(60_000));
        assert!(value == 0.0 || value == 1.0);
        assert_eq!(scheduler.eyes_open(), value == 1.0);
    }

    #[test]
    fn test_disabled_scheduler_keeps_eyes_open() {
        let params = BlinkParams {
            enabled: false,
            ..BlinkParams::default()
        };
        let mut scheduler = seeded(params);

        for t in (0..20_000).step_by(100) {
            assert_eq!(scheduler.tick(ms(t)), 1.0);
        }
    }
}
