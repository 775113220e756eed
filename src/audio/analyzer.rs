//! Loudness analysis: frequency-domain energy reduced to one [0,1] value.
//!
//! The analyzer taps the playback stream, runs a Hann-windowed FFT over
//! the newest samples, and keeps an exponentially smoothed per-bin
//! spectrum. Loudness is the mean of the lowest 30% of bins, the range
//! carrying vocal fundamentals, so speech moves the mouth while
//! high-frequency noise mostly does not.

use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::SampleTap;
use crate::error::Result;
use crate::params::AnalyzerConfig;

/// Fraction of bins (from the bottom) treated as the speech band
const SPEECH_BAND_FRACTION: f32 = 0.3;

/// Decibel range mapped onto the 0-255 byte scale
const MIN_DECIBELS: f32 = -100.0;
const MAX_DECIBELS: f32 = -30.0;

/// Reduce one frequency frame to a normalized loudness value.
///
/// Averages the lowest 30% of bins and rescales 0-255 to [0,1].
pub fn volume_from_frame(frame: &[u8]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let speech_bins = ((frame.len() as f32 * SPEECH_BAND_FRACTION) as usize).max(1);
    let sum: u32 = frame[..speech_bins].iter().map(|&b| u32::from(b)).sum();
    (sum as f32 / speech_bins as f32) / 255.0
}

/// Frequency-domain loudness analyzer over a playback tap
pub struct LoudnessAnalyzer {
    config: AnalyzerConfig,
    fft: Arc<dyn Fft<f32>>,
    hann: Vec<f32>,
    input: Vec<f32>,
    spectrum: Vec<Complex<f32>>,
    /// Smoothed per-bin magnitude, normalized to [0,1] for full scale
    smoothed: Vec<f32>,
    tap: Option<SampleTap>,
}

impl LoudnessAnalyzer {
    /// Create an analyzer with the given configuration.
    ///
    /// Transform size and smoothing are fixed for the analyzer's
    /// lifetime; build a new instance to change them.
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;

        let window_len = config.window_len();
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(window_len);

        let hann = (0..window_len)
            .map(|i| 0.5 * (1.0 - ((2.0 * PI * i as f32) / (window_len as f32 - 1.0)).cos()))
            .collect();

        Ok(Self {
            hann,
            input: vec![0.0; window_len],
            spectrum: vec![Complex::new(0.0, 0.0); window_len],
            smoothed: vec![0.0; config.transform_size],
            fft,
            config,
            tap: None,
        })
    }

    /// Attach to a playback tap. Attaching while already attached is a
    /// no-op; the first tap stays in place until [`detach`](Self::detach).
    pub fn attach(&mut self, tap: &SampleTap) {
        if self.tap.is_some() {
            return;
        }
        self.tap = Some(tap.clone());
    }

    pub fn is_attached(&self) -> bool {
        self.tap.is_some()
    }

    /// Release the tap and clear analysis state. Idempotent; afterwards
    /// [`volume`](Self::volume) reports 0.
    pub fn detach(&mut self) {
        self.tap = None;
        self.smoothed.fill(0.0);
    }

    /// Current loudness in [0,1]; 0.0 when not attached
    pub fn volume(&mut self) -> f32 {
        match self.frequency_frame() {
            Some(frame) => volume_from_frame(&frame),
            None => 0.0,
        }
    }

    /// Capture the current frequency frame: one 0-255 magnitude byte per
    /// bin, smoothed over time by the configured constant.
    ///
    /// Returns `None` when no tap is attached.
    pub fn frequency_frame(&mut self) -> Option<Vec<u8>> {
        let tap = self.tap.as_ref()?.clone();
        tap.latest(&mut self.input);

        let window_len = self.config.window_len();
        for i in 0..window_len {
            self.spectrum[i] = Complex::new(self.input[i] * self.hann[i], 0.0);
        }
        self.fft.process(&mut self.spectrum);

        let s = self.config.smoothing;
        let mut frame = Vec::with_capacity(self.config.transform_size);
        for (bin, smoothed) in self.smoothed.iter_mut().enumerate() {
            let magnitude = self.spectrum[bin].norm() / window_len as f32;
            *smoothed = s * *smoothed + (1.0 - s) * magnitude;

            frame.push(if *smoothed > 0.0 {
                let db = 20.0 * smoothed.log10();
                let scaled = (db - MIN_DECIBELS) / (MAX_DECIBELS - MIN_DECIBELS);
                (scaled.clamp(0.0, 1.0) * 255.0).round() as u8
            } else {
                0
            });
        }

        Some(frame)
    }
}
