//! Breathing: a slow sinusoidal body offset.

use crate::params::BreathingParams;

/// Continuous phase accumulator producing a periodic breathing driver.
///
/// The phase advances by measured elapsed time, so breathing speed is
/// wall-clock correct at any frame rate. The accumulator is never
/// reset; it wraps implicitly through `sin`.
#[derive(Debug)]
pub struct BreathingOscillator {
    params: BreathingParams,
    phase: f32,
}

impl BreathingOscillator {
    pub fn new(params: BreathingParams) -> Self {
        Self { params, phase: 0.0 }
    }

    /// Advance by `dt_secs` and return the breathing driver, bounded by
    /// ±intensity. `None` while disabled.
    pub fn tick(&mut self, dt_secs: f32) -> Option<f32> {
        if !self.params.enabled {
            return None;
        }
        self.phase += dt_secs * self.params.speed;
        Some(self.value())
    }

    /// Current driver value without advancing
    pub fn value(&self) -> f32 {
        self.phase.sin() * self.params.intensity
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }
}
