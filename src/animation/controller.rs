//! The animation controller: one tick per rendered frame.
//!
//! Owns every driver and is the only code that touches the model. The
//! model itself is passed in by the host (no global), and `stop()` is
//! the single teardown point: after it, no tick, simulated timer
//! expiration, or stray pointer event produces another write.

use std::time::Duration;

use rand::rngs::StdRng;

use super::applier::{self, DriverSet};
use super::blink::BlinkScheduler;
use super::breathing::BreathingOscillator;
use super::lip_sync::LipSync;
use super::tracking::TrackingFilter;
use crate::error::Result;
use crate::model::Model;
use crate::params::AnimatorConfig;

/// Composes lip-sync, blinking, breathing and tracking into per-frame
/// parameter writes
pub struct AnimationController {
    lip_sync: LipSync,
    blink: BlinkScheduler,
    breathing: BreathingOscillator,
    tracking: TrackingFilter,
    drivers: DriverSet,
    running: bool,
}

impl AnimationController {
    /// Build a controller; `tick` timestamps are measured from the same
    /// zero as the `Duration`s passed here on.
    pub fn new(config: AnimatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            lip_sync: LipSync::new(config.lip_sync.clone()),
            blink: BlinkScheduler::new(config.blink.clone(), Duration::ZERO),
            breathing: BreathingOscillator::new(config.breathing.clone()),
            tracking: TrackingFilter::new(config.tracking.clone()),
            drivers: DriverSet::default(),
            running: false,
        })
    }

    /// As [`new`](Self::new), with a deterministic blink RNG
    pub fn with_rng(config: AnimatorConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            lip_sync: LipSync::new(config.lip_sync.clone()),
            blink: BlinkScheduler::with_rng(config.blink.clone(), Duration::ZERO, rng),
            breathing: BreathingOscillator::new(config.breathing.clone()),
            tracking: TrackingFilter::new(config.tracking.clone()),
            drivers: DriverSet::default(),
            running: false,
        })
    }

    /// Begin animating: writes the resting pose and enables ticking.
    /// Calling on a started controller is a no-op.
    pub fn start(&mut self, model: &mut dyn Model) {
        if self.running {
            return;
        }
        applier::apply_initial_pose(model);
        self.running = true;
    }

    /// Route a pointer event into the tracking filter. Accepted between
    /// ticks at any rate; ignored once stopped.
    pub fn pointer_moved(&mut self, x: f32, y: f32, bounds: (f32, f32)) {
        if !self.running {
            return;
        }
        self.tracking.pointer_moved(x, y, bounds);
    }

    /// Advance one frame and write the full driver set to the model.
    ///
    /// `now` is elapsed time on the controller's clock (drives blink
    /// deadlines), `dt` the measured delta since the previous tick
    /// (drives breathing), `volume` the current loudness in [0,1]
    /// (zero while audio is paused or stopped).
    pub fn tick(&mut self, now: Duration, dt: Duration, volume: f32, model: &mut dyn Model) {
        if !self.running {
            return;
        }

        self.drivers = DriverSet {
            mouth_open: self.lip_sync.drive(volume),
            eye_open: self.blink.tick(now),
            breath: self.breathing.tick(dt.as_secs_f32()),
            tracking: self.tracking.tick(),
        };

        applier::apply(model, &self.drivers);
    }

    /// Tear down: cancels every pending transition. Idempotent; the
    /// controller writes nothing after this returns.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Driver values from the most recent tick
    pub fn drivers(&self) -> &DriverSet {
        &self.drivers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{param_ids, RecordingModel};
    use crate::params::{BlinkParams, TrackingParams};
    use rand::SeedableRng;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn controller(config: AnimatorConfig) -> AnimationController {
        AnimationController::with_rng(config, StdRng::seed_from_u64(7)).unwrap()
    }

    fn all_enabled() -> AnimatorConfig {
        AnimatorConfig {
            tracking: TrackingParams {
                enabled: true,
                ..TrackingParams::default()
            },
            ..AnimatorConfig::default()
        }
    }

    #[test]
    fn test_start_writes_resting_pose_once() {
        let mut model = RecordingModel::standard(2048.0, 2048.0);
        let mut controller = controller(AnimatorConfig::default());

        controller.start(&mut model);
        controller.start(&mut model);

        assert_eq!(model.value(param_ids::MOUTH_OPEN_Y), Some(0.0));
        assert_eq!(model.value(param_ids::EYE_L_OPEN), Some(1.0));
        assert_eq!(model.write_count(), 3);
    }

    #[test]
    fn test_tick_before_start_writes_nothing() {
        let mut model = RecordingModel::standard(2048.0, 2048.0);
        let mut controller = controller(AnimatorConfig::default());

        controller.tick(ms(16), ms(16), 0.5, &mut model);
        assert_eq!(model.write_count(), 0);
    }

    #[test]
    fn test_volume_drives_mouth() {
        let mut model = RecordingModel::standard(2048.0, 2048.0);
        let mut controller = controller(AnimatorConfig::default());
        controller.start(&mut model);

        controller.tick(ms(16), ms(16), 0.4, &mut model);
        let mouth = model.value(param_ids::MOUTH_OPEN_Y).unwrap();
        assert!((mouth - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_stop_silences_everything() {
        let mut model = RecordingModel::standard(2048.0, 2048.0);
        let mut controller = controller(all_enabled());
        controller.start(&mut model);

        for i in 1..=10 {
            controller.tick(ms(i * 16), ms(16), 0.5, &mut model);
        }

        controller.stop();
        let writes_at_stop = model.write_count();

        // Further frames, long-past blink deadlines, pointer events:
        // none of it may reach the model
        controller.pointer_moved(640.0, 0.0, (640.0, 960.0));
        for i in 11..=2000 {
            controller.tick(ms(i * 16), ms(16), 0.9, &mut model);
        }

        assert!(!controller.is_running());
        assert_eq!(model.write_count(), writes_at_stop);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut controller = controller(AnimatorConfig::default());
        controller.stop();
        controller.stop();
        assert!(!controller.is_running());
    }

    #[test]
    fn test_blink_pair_appears_in_eye_writes() {
        let config = AnimatorConfig {
            blink: BlinkParams {
                enabled: true,
                interval_ms: (200, 300),
                duration_ms: 50,
            },
            ..AnimatorConfig::default()
        };
        let mut model = RecordingModel::standard(2048.0, 2048.0);
        let mut controller = controller(config);
        controller.start(&mut model);

        for i in 1..=100 {
            controller.tick(ms(i * 8), ms(8), 0.0, &mut model);
        }

        let eye_writes = model.writes_for(param_ids::EYE_L_OPEN);
        assert!(eye_writes.contains(&0.0), "no close observed");
        assert!(eye_writes.last() == Some(&1.0) || eye_writes.contains(&1.0));
        let right = model.writes_for(param_ids::EYE_R_OPEN);
        assert_eq!(eye_writes, right, "eyes must blink together");
    }

    #[test]
    fn test_tracking_disabled_leaves_angles_untouched() {
        let mut model = RecordingModel::standard(2048.0, 2048.0);
        let mut controller = controller(AnimatorConfig::default());
        controller.start(&mut model);

        controller.pointer_moved(640.0, 0.0, (640.0, 960.0));
        controller.tick(ms(16), ms(16), 0.0, &mut model);

        assert_eq!(model.value(param_ids::ANGLE_X), None);
    }

    #[test]
    fn test_tracking_enabled_moves_head_toward_pointer() {
        let mut model = RecordingModel::standard(2048.0, 2048.0);
        let mut controller = controller(all_enabled());
        controller.start(&mut model);

        controller.pointer_moved(640.0, 480.0, (640.0, 960.0));
        for i in 1..=200 {
            controller.tick(ms(i * 16), ms(16), 0.0, &mut model);
        }

        let angle_x = model.value(param_ids::ANGLE_X).unwrap();
        assert!((angle_x - 30.0).abs() < 0.1, "head should settle at 30°");
        let body_x = model.value(param_ids::BODY_ANGLE_X).unwrap();
        assert!((body_x - 15.0).abs() < 0.1, "body follows at half weight");
    }

    #[test]
    fn test_breathing_writes_are_bounded() {
        let mut model = RecordingModel::standard(2048.0, 2048.0);
        let mut controller = controller(AnimatorConfig::default());
        controller.start(&mut model);

        for i in 1..=500 {
            controller.tick(ms(i * 16), ms(16), 0.0, &mut model);
        }

        for value in model.writes_for(param_ids::BREATH) {
            assert!(value.abs() <= 0.5 + 1e-6);
        }
        assert!(!model.writes_for(param_ids::BREATH).is_empty());
    }
}
