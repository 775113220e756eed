//! Frame pacing for the drive loop.

use std::thread;
use std::time::{Duration, Instant};

/// Caps the drive loop at a target frame rate and reports measured
/// per-frame deltas.
///
/// Hosts with their own vsync'd render callback don't need this; the
/// headless demo does.
#[derive(Debug)]
pub struct FramePacer {
    frame_budget: Duration,
    last: Instant,
}

impl FramePacer {
    /// Pacer for the given target rate; rates of 0 fall back to 60
    pub fn new(target_fps: u32) -> Self {
        let fps = if target_fps == 0 { 60 } else { target_fps };
        Self {
            frame_budget: Duration::from_secs_f64(1.0 / fps as f64),
            last: Instant::now(),
        }
    }

    /// Sleep out the remainder of the current frame budget and return
    /// the measured delta since the previous call.
    pub fn pace(&mut self) -> Duration {
        let elapsed = self.last.elapsed();
        if elapsed < self.frame_budget {
            thread::sleep(self.frame_budget - elapsed);
        }
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        dt
    }
}
