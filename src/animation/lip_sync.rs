//! Lip-sync: loudness to mouth-open driver.

use crate::params::LipSyncParams;

/// Map a loudness value to the mouth-open driver.
///
/// Amplifies by `sensitivity`, then clamps into the model's valid [0,1]
/// parameter range. Stateless; any temporal smoothing comes from the
/// analyzer upstream.
pub fn mouth_open(volume: f32, sensitivity: f32) -> f32 {
    (volume * sensitivity).clamp(0.0, 1.0)
}

/// Lip-sync driver with its configuration
#[derive(Debug, Clone)]
pub struct LipSync {
    params: LipSyncParams,
}

impl LipSync {
    pub fn new(params: LipSyncParams) -> Self {
        Self { params }
    }

    /// Mouth driver for the current loudness; 0.0 while disabled
    pub fn drive(&self, volume: f32) -> f32 {
        if !self.params.enabled {
            return 0.0;
        }
        mouth_open(volume, self.params.sensitivity)
    }
}
