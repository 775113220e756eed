//! Parameter definitions with documented defaults and semantics.
//!
//! Every tunable of the animation engine lives here with:
//! - Units (milliseconds, degrees, Hz, normalized ranges)
//! - Documented defaults matching typical speech audio and rigs
//! - `validate()` where a bad value would corrupt the control loop

use crate::error::{KuchipakuError, Result};

/// Loudness analyzer configuration, fixed at construction.
///
/// Changing these requires building a new analyzer; there is no
/// hot-reconfiguration.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Number of frequency bins per analysis frame (must be a power of 2).
    /// The analysis window spans twice this many samples.
    pub transform_size: usize,

    /// Per-bin exponential smoothing constant in [0,1).
    /// 0.0 = raw frames, values near 1.0 = slow, stable loudness.
    pub smoothing: f32,

    /// Nominal sample rate of the analyzed signal (Hz).
    /// Only affects which frequencies land in which bin.
    pub sample_rate_hz: u32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            transform_size: 256,
            smoothing: 0.8,
            sample_rate_hz: 44100,
        }
    }
}

impl AnalyzerConfig {
    /// Samples per analysis window (a real FFT of this length yields
    /// `transform_size` usable bins).
    pub fn window_len(&self) -> usize {
        self.transform_size * 2
    }

    /// Convert frequency (Hz) to bin index
    pub fn hz_to_bin(&self, hz: f32) -> usize {
        ((hz * self.window_len() as f32) / self.sample_rate_hz as f32) as usize
    }

    pub fn validate(&self) -> Result<()> {
        if !self.transform_size.is_power_of_two() {
            return Err(KuchipakuError::InvalidConfig {
                reason: format!(
                    "transform size must be a power of 2, got {}",
                    self.transform_size
                ),
            });
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(KuchipakuError::InvalidConfig {
                reason: format!("smoothing must be in [0,1), got {}", self.smoothing),
            });
        }
        if self.sample_rate_hz == 0 {
            return Err(KuchipakuError::InvalidConfig {
                reason: "sample rate must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Lip-sync (mouth) driver parameters
#[derive(Debug, Clone)]
pub struct LipSyncParams {
    pub enabled: bool,

    /// Loudness multiplier applied before clamping to [0,1].
    /// Average speech energy is quiet; >1 keeps the mouth visibly moving.
    pub sensitivity: f32,
}

impl Default for LipSyncParams {
    fn default() -> Self {
        Self {
            enabled: true,
            sensitivity: 1.5,
        }
    }
}

/// Blink scheduler parameters
#[derive(Debug, Clone)]
pub struct BlinkParams {
    pub enabled: bool,

    /// Open-eye interval range in milliseconds; each interval is drawn
    /// uniformly from this range after a completed blink.
    pub interval_ms: (u64, u64),

    /// How long the eyes stay closed per blink (milliseconds)
    pub duration_ms: u64,
}

impl Default for BlinkParams {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: (2000, 6000),
            duration_ms: 100,
        }
    }
}

impl BlinkParams {
    pub fn validate(&self) -> Result<()> {
        let (min, max) = self.interval_ms;
        if min == 0 || min > max {
            return Err(KuchipakuError::InvalidConfig {
                reason: format!("blink interval range [{min},{max}]ms is not ascending"),
            });
        }
        if self.duration_ms == 0 {
            return Err(KuchipakuError::InvalidConfig {
                reason: "blink duration must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Breathing oscillator parameters
#[derive(Debug, Clone)]
pub struct BreathingParams {
    pub enabled: bool,

    /// Phase advance per second (1.0 ≈ one breath cycle every 2π seconds)
    pub speed: f32,

    /// Peak driver amplitude; output stays within ±intensity
    pub intensity: f32,
}

impl Default for BreathingParams {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 1.0,
            intensity: 0.5,
        }
    }
}

/// Pointer tracking parameters
#[derive(Debug, Clone)]
pub struct TrackingParams {
    pub enabled: bool,

    /// First-order low-pass factor per tick in (0,1].
    /// Smaller = slower, smoother motion; larger = twitchier.
    pub smoothing: f32,

    /// Maximum head deflection (degrees) at the stage edge
    pub range_deg: f32,
}

impl Default for TrackingParams {
    fn default() -> Self {
        Self {
            enabled: false,
            smoothing: 0.1,
            range_deg: 30.0,
        }
    }
}

impl TrackingParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(KuchipakuError::InvalidConfig {
                reason: format!("tracking smoothing must be in (0,1], got {}", self.smoothing),
            });
        }
        Ok(())
    }
}

/// Aggregated animation driver configuration
#[derive(Debug, Clone, Default)]
pub struct AnimatorConfig {
    pub lip_sync: LipSyncParams,
    pub blink: BlinkParams,
    pub breathing: BreathingParams,
    pub tracking: TrackingParams,
}

impl AnimatorConfig {
    pub fn validate(&self) -> Result<()> {
        self.blink.validate()?;
        self.tracking.validate()?;
        Ok(())
    }
}

/// Stage (render surface) configuration
#[derive(Debug, Clone)]
pub struct StageConfig {
    /// Stage width (logical pixels)
    pub width: u32,

    /// Stage height (logical pixels)
    pub height: u32,

    /// Extra model scale on top of the stage-fit scale
    pub scale: f32,

    /// Horizontal offset in [-1,1]: -1 = left edge, 1 = right edge
    pub position_x: f32,

    /// Vertical offset in [-1,1]: -1 = top edge, 1 = bottom edge
    pub position_y: f32,

    /// Pixel surface multiplier (lower = better performance)
    pub resolution: f32,

    /// Target frame rate for the drive loop
    pub target_fps: u32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 960,
            scale: 1.0,
            position_x: 0.0,
            position_y: 0.0,
            resolution: 1.0,
            target_fps: 60,
        }
    }
}

impl StageConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
