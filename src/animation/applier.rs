//! The single write path from computed drivers to the model.

use glam::Vec2;

use crate::model::{param_ids, Model};

/// Body follows the head at half strength
const BODY_FOLLOW_WEIGHT: f32 = 0.5;

/// Eyeballs lead slightly less than the head turns
const EYE_FOLLOW_WEIGHT: f32 = 0.8;

/// Gain applied when breathing falls back to the body-angle parameter
const BREATH_BODY_FALLBACK_GAIN: f32 = 2.0;

/// All driver values for one frame.
///
/// Recomputed every tick and written in full; optional fields belong to
/// drivers that are disabled (or soft-failed) this frame and write
/// nothing at all.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriverSet {
    /// Mouth openness in [0,1]
    pub mouth_open: f32,

    /// Eye openness, both eyes: 1.0 open, 0.0 closed
    pub eye_open: f32,

    /// Smoothed view angle in degrees, when tracking is active
    pub tracking: Option<Vec2>,

    /// Breathing offset in [-intensity, intensity], when active
    pub breath: Option<f32>,
}

/// Write one parameter if the rig defines it; missing parameters are a
/// cosmetic no-op, never an error.
fn set(model: &mut dyn Model, id: &str, value: f32) {
    if model.has_parameter(id) {
        model.set_parameter(id, value);
    } else {
        log::trace!("skipping undefined parameter {id}");
    }
}

/// Push a full driver set onto the model.
///
/// Writes are unconditional (no dirty tracking): the parameter count is
/// small and an idempotent overwrite is cheaper than bookkeeping.
/// Tracking and breathing target disjoint parameters, so write order
/// within one frame never races.
pub fn apply(model: &mut dyn Model, drivers: &DriverSet) {
    set(model, param_ids::MOUTH_OPEN_Y, drivers.mouth_open);
    set(model, param_ids::EYE_L_OPEN, drivers.eye_open);
    set(model, param_ids::EYE_R_OPEN, drivers.eye_open);

    if let Some(angle) = drivers.tracking {
        set(model, param_ids::ANGLE_X, angle.x);
        set(model, param_ids::ANGLE_Y, angle.y);
        set(model, param_ids::BODY_ANGLE_X, angle.x * BODY_FOLLOW_WEIGHT);
        set(model, param_ids::EYE_BALL_X, angle.x * EYE_FOLLOW_WEIGHT);
        set(model, param_ids::EYE_BALL_Y, angle.y * EYE_FOLLOW_WEIGHT);
    }

    if let Some(breath) = drivers.breath {
        if model.has_parameter(param_ids::BREATH) {
            model.set_parameter(param_ids::BREATH, breath);
        } else if model.has_parameter(param_ids::BODY_ANGLE_Y) {
            model.set_parameter(param_ids::BODY_ANGLE_Y, breath * BREATH_BODY_FALLBACK_GAIN);
        }
        // Rigs without either parameter simply don't breathe
    }
}

/// Write the resting pose: mouth closed, both eyes open
pub fn apply_initial_pose(model: &mut dyn Model) {
    set(model, param_ids::MOUTH_OPEN_Y, 0.0);
    set(model, param_ids::EYE_L_OPEN, 1.0);
    set(model, param_ids::EYE_R_OPEN, 1.0);
}
