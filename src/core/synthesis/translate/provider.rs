//! Translate TTS provider implementation.
//!
//! Long text is split into backend-sized chunks which are requested one
//! after another; the MP3 responses are concatenated in order. Any failed
//! chunk fails the whole call and no partial audio is returned.

use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use tracing::{debug, warn};

use super::config::TranslateTtsConfig;
use super::{NORMAL_SPEED, SLOW_SPEED};
use crate::core::synthesis::base::{
    SynthesisAdapter, SynthesisConfig, SynthesisError, SynthesisResult,
};
use crate::core::synthesis::chunking::split_for_synthesis;

/// Longest backend error body kept in [`SynthesisError::Backend`].
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Speech synthesis through the Google Translate TTS endpoint.
///
/// # Example
///
/// ```rust,ignore
/// use prosody_tts::core::synthesis::{SynthesisAdapter, SynthesisConfig, TranslateTts};
///
/// let tts = TranslateTts::new(SynthesisConfig::default())?;
/// let mp3 = tts.synthesize("SUUN ~ riisees. . ", true).await?;
/// ```
pub struct TranslateTts {
    client: reqwest::Client,
    config: TranslateTtsConfig,
}

impl TranslateTts {
    pub fn new(config: SynthesisConfig) -> SynthesisResult<Self> {
        let config = TranslateTtsConfig::from_base(&config)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("prosody-tts/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                SynthesisError::InvalidConfiguration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TranslateTtsConfig {
        &self.config
    }

    fn build_request(
        &self,
        chunk: &str,
        index: usize,
        total: usize,
        slow: bool,
    ) -> reqwest::RequestBuilder {
        let query: Vec<(&str, String)> = vec![
            ("ie", "UTF-8".to_string()),
            ("client", "tw-ob".to_string()),
            ("tl", self.config.language.clone()),
            ("q", chunk.to_string()),
            ("total", total.to_string()),
            ("idx", index.to_string()),
            ("textlen", chunk.chars().count().to_string()),
            (
                "ttsspeed",
                if slow { SLOW_SPEED } else { NORMAL_SPEED }.to_string(),
            ),
        ];

        self.client
            .get(self.config.endpoint.clone())
            .query(&query)
    }

    fn map_transport_error(&self, error: reqwest::Error) -> SynthesisError {
        if error.is_timeout() {
            SynthesisError::Timeout(self.config.timeout_seconds)
        } else {
            SynthesisError::Network(error.to_string())
        }
    }
}

#[async_trait]
impl SynthesisAdapter for TranslateTts {
    async fn synthesize(&self, text: &str, slow: bool) -> SynthesisResult<Bytes> {
        let chunks = split_for_synthesis(text, self.config.max_chunk_chars);
        if chunks.is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        debug!(
            chunks = chunks.len(),
            chars = text.chars().count(),
            slow,
            "Requesting speech from translate backend"
        );

        let total = chunks.len();
        let mut audio = BytesMut::new();

        for (index, chunk) in chunks.iter().enumerate() {
            let response = self
                .build_request(chunk, index, total, slow)
                .send()
                .await
                .map_err(|e| self.map_transport_error(e))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
                warn!(
                    status = status.as_u16(),
                    chunk = index,
                    "Translate backend rejected request"
                );
                return Err(SynthesisError::Backend {
                    status: status.as_u16(),
                    message: if message.is_empty() {
                        status.canonical_reason().unwrap_or("unknown").to_string()
                    } else {
                        message
                    },
                });
            }

            let bytes = response
                .bytes()
                .await
                .map_err(|e| self.map_transport_error(e))?;
            audio.extend_from_slice(&bytes);
        }

        debug!(bytes = audio.len(), "Received synthesized audio");
        Ok(audio.freeze())
    }

    fn provider_id(&self) -> &'static str {
        "google-translate"
    }
}
