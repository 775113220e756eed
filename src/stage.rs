//! Stage placement: fitting a model's extents into the render surface.

use crate::params::StageConfig;

/// Fraction of the stage the model should cover at scale 1.0
const FILL_RATIO: f32 = 0.8;

/// Computed placement of a model on the stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Final model scale (stage-fit × configured scale)
    pub scale: f32,

    /// Model center X in logical pixels
    pub x: f32,

    /// Model center Y in logical pixels
    pub y: f32,

    /// Pixel surface width after the resolution multiplier
    pub surface_width: u32,

    /// Pixel surface height after the resolution multiplier
    pub surface_height: u32,
}

/// Fit a model into the stage.
///
/// The model covers at most `FILL_RATIO` of either stage dimension,
/// anchored at its center; `position_x`/`position_y` shift the center by
/// up to half a stage in each direction.
pub fn fit(model_width: f32, model_height: f32, stage: &StageConfig) -> Placement {
    let sw = stage.width as f32;
    let sh = stage.height as f32;

    let scale_x = (sw * FILL_RATIO) / model_width.max(f32::EPSILON);
    let scale_y = (sh * FILL_RATIO) / model_height.max(f32::EPSILON);
    let base_scale = scale_x.min(scale_y);

    Placement {
        scale: base_scale * stage.scale,
        x: sw / 2.0 + stage.position_x * sw / 2.0,
        y: sh / 2.0 + stage.position_y * sh / 2.0,
        surface_width: (sw * stage.resolution).round() as u32,
        surface_height: (sh * stage.resolution).round() as u32,
    }
}
