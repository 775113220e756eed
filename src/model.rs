//! The character model capability consumed by the animation engine.
//!
//! The engine never owns a renderer; it talks to whatever displays the
//! character through the [`Model`] trait: guarded named-parameter writes
//! plus the extents needed for stage placement. Rigs differ in which
//! parameters they define, so callers probe with [`Model::has_parameter`]
//! instead of treating a missing name as an error.

use std::collections::{HashMap, HashSet};

/// Parameter ids shared by the common 2D character rigs this engine
/// targets (Cubism naming convention).
pub mod param_ids {
    pub const MOUTH_OPEN_Y: &str = "ParamMouthOpenY";
    pub const EYE_L_OPEN: &str = "ParamEyeLOpen";
    pub const EYE_R_OPEN: &str = "ParamEyeROpen";
    pub const ANGLE_X: &str = "ParamAngleX";
    pub const ANGLE_Y: &str = "ParamAngleY";
    pub const BODY_ANGLE_X: &str = "ParamBodyAngleX";
    pub const BODY_ANGLE_Y: &str = "ParamBodyAngleY";
    pub const EYE_BALL_X: &str = "ParamEyeBallX";
    pub const EYE_BALL_Y: &str = "ParamEyeBallY";
    pub const BREATH: &str = "ParamBreath";

    /// The full standard set, in write order
    pub const STANDARD: &[&str] = &[
        MOUTH_OPEN_Y,
        EYE_L_OPEN,
        EYE_R_OPEN,
        ANGLE_X,
        ANGLE_Y,
        BODY_ANGLE_X,
        BODY_ANGLE_Y,
        EYE_BALL_X,
        EYE_BALL_Y,
        BREATH,
    ];
}

/// A rendered character exposing named animatable parameters.
///
/// Implementations must tolerate writes to unknown ids (ignore them);
/// the engine additionally guards every write with `has_parameter`.
pub trait Model {
    fn set_parameter(&mut self, id: &str, value: f32);
    fn has_parameter(&self, id: &str) -> bool;

    /// Intrinsic model width in model units (used for stage placement)
    fn width(&self) -> f32;

    /// Intrinsic model height in model units
    fn height(&self) -> f32;
}

/// In-memory model that records every accepted parameter write.
///
/// Serves as the sink for the headless demo and as the observation
/// point in tests: the write log shows exactly what the control loop
/// did and when it stopped doing it.
#[derive(Debug)]
pub struct RecordingModel {
    defined: HashSet<String>,
    values: HashMap<String, f32>,
    writes: Vec<(String, f32)>,
    width: f32,
    height: f32,
}

impl RecordingModel {
    /// Model defining the full standard parameter set
    pub fn standard(width: f32, height: f32) -> Self {
        Self::with_parameters(width, height, param_ids::STANDARD.iter().copied())
    }

    /// Model defining only the given parameters (for sparse rigs)
    pub fn with_parameters<'a>(
        width: f32,
        height: f32,
        ids: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            defined: ids.into_iter().map(String::from).collect(),
            values: HashMap::new(),
            writes: Vec::new(),
            width,
            height,
        }
    }

    /// Last written value for a parameter, if any write was accepted
    pub fn value(&self, id: &str) -> Option<f32> {
        self.values.get(id).copied()
    }

    /// Chronological log of accepted writes
    pub fn writes(&self) -> &[(String, f32)] {
        &self.writes
    }

    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    /// Values written to one parameter, in order
    pub fn writes_for(&self, id: &str) -> Vec<f32> {
        self.writes
            .iter()
            .filter(|(wid, _)| wid == id)
            .map(|&(_, v)| v)
            .collect()
    }
}

impl Model for RecordingModel {
    fn set_parameter(&mut self, id: &str, value: f32) {
        if !self.defined.contains(id) {
            return;
        }
        self.values.insert(id.to_string(), value);
        self.writes.push((id.to_string(), value));
    }

    fn has_parameter(&self, id: &str) -> bool {
        self.defined.contains(id)
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }
}
