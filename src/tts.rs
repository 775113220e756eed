//! Relay client for a hosted text-to-speech endpoint.
//!
//! The endpoint contract is deliberately thin: POST `{"text": ...}`,
//! receive encoded audio bytes. Where the bytes come from is the
//! relay's business; this crate only needs something it can decode.

use serde::Serialize;

use crate::error::{KuchipakuError, Result};

#[derive(Serialize)]
struct SynthesizeRequest<'a> {
    text: &'a str,
}

/// Blocking TTS relay client
pub struct TtsClient {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl TtsClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Synthesize speech for `text`, returning encoded audio bytes
    pub fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        if text.trim().is_empty() {
            return Err(KuchipakuError::Tts {
                status: 400,
                reason: "text is required".to_string(),
            });
        }

        let response = self
            .http
            .post(&self.endpoint)
            .json(&SynthesizeRequest { text })
            .send()
            .map_err(|e| KuchipakuError::Tts {
                status: 0,
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(KuchipakuError::Tts {
                status: status.as_u16(),
                reason: response.text().unwrap_or_default(),
            });
        }

        let bytes = response.bytes().map_err(|e| KuchipakuError::Tts {
            status: status.as_u16(),
            reason: e.to_string(),
        })?;
        Ok(bytes.to_vec())
    }
}
