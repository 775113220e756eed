//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::params::{
    AnalyzerConfig, AnimatorConfig, BlinkParams, BreathingParams, LipSyncParams, StageConfig,
    TrackingParams,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Kuchipaku")]
#[command(about = "Audio-reactive character animator", long_about = None)]
pub struct Args {
    /// WAV file to lip-sync against
    #[arg(value_name = "AUDIO")]
    pub audio: Option<PathBuf>,

    /// Synthesize speech for this text instead of reading a file
    /// (requires the `tts` feature)
    #[arg(long, value_name = "TEXT")]
    pub speak: Option<String>,

    /// TTS relay endpoint
    #[arg(long, value_name = "URL", default_value = "http://localhost:3000/api/tts")]
    pub tts_endpoint: String,

    /// Lip-sync sensitivity multiplier
    #[arg(long, default_value = "1.5")]
    pub sensitivity: f32,

    /// Follow a simulated pointer circling the stage
    #[arg(long)]
    pub tracking: bool,

    /// Disable blinking
    #[arg(long)]
    pub no_blink: bool,

    /// Disable breathing
    #[arg(long)]
    pub no_breathing: bool,

    /// Apply an expression file before animating
    #[arg(long, value_name = "FILE")]
    pub expression: Option<PathBuf>,

    /// Target frame rate
    #[arg(long, default_value = "60")]
    pub fps: u32,
}

impl Args {
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig::default()
    }

    pub fn animator_config(&self) -> AnimatorConfig {
        AnimatorConfig {
            lip_sync: LipSyncParams {
                enabled: true,
                sensitivity: self.sensitivity,
            },
            blink: BlinkParams {
                enabled: !self.no_blink,
                ..BlinkParams::default()
            },
            breathing: BreathingParams {
                enabled: !self.no_breathing,
                ..BreathingParams::default()
            },
            tracking: TrackingParams {
                enabled: self.tracking,
                ..TrackingParams::default()
            },
        }
    }

    pub fn stage_config(&self) -> StageConfig {
        StageConfig {
            target_fps: self.fps,
            ..StageConfig::default()
        }
    }
}
