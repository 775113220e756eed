//! Error handling for kuchipaku.
//!
//! Only resource acquisition (audio decode, device setup, file loads)
//! surfaces errors. Per-frame animation failures such as unsupported
//! model parameters are absorbed where they occur.

use thiserror::Error;

/// Result type alias for kuchipaku operations
pub type Result<T> = std::result::Result<T, KuchipakuError>;

/// Main error type for kuchipaku operations
#[derive(Error, Debug)]
pub enum KuchipakuError {
    #[error("Undecodable audio: {reason}")]
    AudioDecode {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Audio device error: {reason}")]
    AudioDevice { reason: String },

    #[error("Audio transport not ready after {waited_ms}ms")]
    TransportNotReady { waited_ms: u64 },

    #[error("TTS request failed (status {status}): {reason}")]
    Tts { status: u16, reason: String },

    #[error("Expression file {path}: {reason}")]
    Expression { path: String, reason: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
