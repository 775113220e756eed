//! Audio playback and loudness analysis.

pub mod analyzer;
pub mod transport;

pub use analyzer::{volume_from_frame, LoudnessAnalyzer};
pub use transport::{decode_wav, AudioTransport, DecodedAudio};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Shared view of the most recent playback samples.
///
/// The transport's output callback pushes what it emits; the analyzer
/// reads the newest window on demand. Clones share one buffer.
#[derive(Debug, Clone)]
pub struct SampleTap {
    inner: Arc<Mutex<TapBuffer>>,
}

#[derive(Debug)]
struct TapBuffer {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl SampleTap {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TapBuffer {
                samples: VecDeque::with_capacity(capacity),
                capacity,
            })),
        }
    }

    /// Append emitted samples, discarding the oldest beyond capacity
    pub fn push(&self, chunk: &[f32]) {
        let mut buf = self.inner.lock().unwrap();
        for &s in chunk {
            if buf.samples.len() == buf.capacity {
                buf.samples.pop_front();
            }
            buf.samples.push_back(s);
        }
    }

    /// Copy the newest `out.len()` samples into `out`, zero-padding the
    /// front when fewer have been captured.
    pub fn latest(&self, out: &mut [f32]) {
        let buf = self.inner.lock().unwrap();
        let available = buf.samples.len().min(out.len());
        let pad = out.len() - available;

        out[..pad].fill(0.0);
        let start = buf.samples.len() - available;
        for (dst, src) in out[pad..].iter_mut().zip(buf.samples.iter().skip(start)) {
            *dst = *src;
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
