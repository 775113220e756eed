//! Audio playback transport: decoded samples out the default output
//! device, with play/pause/ended state and a tap for the analyzer.

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use super::SampleTap;
use crate::error::{KuchipakuError, Result};

/// Samples of playback history kept for analysis
const TAP_CAPACITY: usize = 8192;

/// Decoded mono audio ready for playback
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate_hz: u32,
}

impl DecodedAudio {
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate_hz as f32
    }
}

fn decode_err(e: hound::Error) -> KuchipakuError {
    KuchipakuError::AudioDecode {
        reason: e.to_string(),
        source: Some(Box::new(e)),
    }
}

/// Decode WAV bytes into mono samples.
///
/// Multi-channel audio is mixed down by averaging; integer formats are
/// rescaled to [-1,1]. The source of the bytes (file upload, TTS
/// response) is irrelevant here.
pub fn decode_wav(bytes: &[u8]) -> Result<DecodedAudio> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes)).map_err(decode_err)?;
    let spec = reader.spec();

    let raw: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()
            .map_err(decode_err)?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<_, _>>()
                .map_err(decode_err)?
        }
    };

    let channels = spec.channels.max(1) as usize;
    let samples: Vec<f32> = if channels == 1 {
        raw
    } else {
        raw.chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    if samples.is_empty() {
        return Err(KuchipakuError::AudioDecode {
            reason: "audio contains no samples".to_string(),
            source: None,
        });
    }

    Ok(DecodedAudio {
        samples,
        sample_rate_hz: spec.sample_rate,
    })
}

struct PlaybackState {
    samples: Vec<f32>,
    /// Fractional read position into `samples`
    pos: f64,
    /// Source frames consumed per output frame
    step: f64,
}

struct TransportFlags {
    playing: AtomicBool,
    ended: AtomicBool,
    /// Set by the first output callback; basis of `wait_ready`
    started: AtomicBool,
}

/// Plays one decoded clip through the default output device.
///
/// The stream lives as long as the transport; dropping the transport
/// tears the stream down. Pausing keeps the stream open and emits
/// silence, so the tap keeps a truthful record of what was heard.
pub struct AudioTransport {
    tap: SampleTap,
    flags: Arc<TransportFlags>,
    _stream: cpal::Stream,
    output_rate_hz: u32,
}

impl AudioTransport {
    /// Start playing the clip immediately
    pub fn play(audio: DecodedAudio) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| KuchipakuError::AudioDevice {
                reason: "no audio output device found".to_string(),
            })?;

        let config = device
            .default_output_config()
            .map_err(|e| KuchipakuError::AudioDevice {
                reason: format!("failed to query output config: {e}"),
            })?;

        let channels = config.channels() as usize;
        let output_rate_hz = config.sample_rate().0;

        let tap = SampleTap::new(TAP_CAPACITY);
        let tap_cb = tap.clone();

        let flags = Arc::new(TransportFlags {
            playing: AtomicBool::new(true),
            ended: AtomicBool::new(false),
            started: AtomicBool::new(false),
        });
        let flags_cb = Arc::clone(&flags);

        let state = Mutex::new(PlaybackState {
            step: audio.sample_rate_hz as f64 / output_rate_hz as f64,
            samples: audio.samples,
            pos: 0.0,
        });

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    flags_cb.started.store(true, Ordering::Release);

                    let mut state = state.lock().unwrap();
                    let playing = flags_cb.playing.load(Ordering::Acquire);
                    let frames = data.len() / channels;
                    let mut emitted = Vec::with_capacity(frames);

                    for frame in 0..frames {
                        // Nearest-sample resampling keeps the callback cheap
                        let sample = if playing {
                            let idx = state.pos as usize;
                            if idx < state.samples.len() {
                                let s = state.samples[idx];
                                state.pos += state.step;
                                s
                            } else {
                                flags_cb.ended.store(true, Ordering::Release);
                                0.0
                            }
                        } else {
                            0.0
                        };

                        for ch in 0..channels {
                            data[frame * channels + ch] = sample;
                        }
                        emitted.push(sample);
                    }

                    tap_cb.push(&emitted);
                },
                |err| log::error!("audio stream error: {err}"),
                None,
            )
            .map_err(|e| KuchipakuError::AudioDevice {
                reason: format!("failed to build output stream: {e}"),
            })?;

        stream.play().map_err(|e| KuchipakuError::AudioDevice {
            reason: format!("failed to start output stream: {e}"),
        })?;

        Ok(Self {
            tap,
            flags,
            _stream: stream,
            output_rate_hz,
        })
    }

    /// Block until the output callback has run once, or fail after
    /// `timeout`. Replaces polling loops in the host: await readiness
    /// exactly once, with failure surfaced as an error.
    pub fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while !self.flags.started.load(Ordering::Acquire) {
            if Instant::now() >= deadline {
                return Err(KuchipakuError::TransportNotReady {
                    waited_ms: timeout.as_millis() as u64,
                });
            }
            thread::sleep(Duration::from_millis(1));
        }
        Ok(())
    }

    pub fn pause(&self) {
        self.flags.playing.store(false, Ordering::Release);
    }

    pub fn resume(&self) {
        if !self.has_ended() {
            self.flags.playing.store(true, Ordering::Release);
        }
    }

    pub fn is_paused(&self) -> bool {
        !self.flags.playing.load(Ordering::Acquire)
    }

    pub fn has_ended(&self) -> bool {
        self.flags.ended.load(Ordering::Acquire)
    }

    /// Shared tap carrying the emitted samples
    pub fn tap(&self) -> SampleTap {
        self.tap.clone()
    }

    pub fn output_rate_hz(&self) -> u32 {
        self.output_rate_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes(spec: hound::WavSpec, samples: &[i16]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_decode_mono_i16() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let bytes = wav_bytes(spec, &[0, 16384, -16384]);

        let decoded = decode_wav(&bytes).unwrap();
        assert_eq!(decoded.sample_rate_hz, 22050);
        assert_eq!(decoded.samples.len(), 3);
        assert!((decoded.samples[1] - 0.5).abs() < 1e-4);
        assert!((decoded.samples[2] + 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_decode_mixes_stereo_to_mono() {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        // One frame: left 16384, right 0 -> mixed 0.25
        let bytes = wav_bytes(spec, &[16384, 0]);

        let decoded = decode_wav(&bytes).unwrap();
        assert_eq!(decoded.samples.len(), 1);
        assert!((decoded.samples[0] - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_wav(b"definitely not a wav file").is_err());
    }

    #[test]
    fn test_decode_rejects_empty_audio() {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let bytes = wav_bytes(spec, &[]);
        assert!(decode_wav(&bytes).is_err());
    }

    #[test]
    fn test_duration() {
        let audio = DecodedAudio {
            samples: vec![0.0; 44100],
            sample_rate_hz: 44100,
        };
        assert!((audio.duration_secs() - 1.0).abs() < 1e-6);
    }
}
