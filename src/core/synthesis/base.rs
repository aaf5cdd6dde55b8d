use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for synthesis operations
pub type SynthesisResult<T> = Result<T, SynthesisError>;

/// Shared, type-erased synthesis adapter
pub type BoxedSynthesisAdapter = Arc<dyn SynthesisAdapter>;

/// Failures at the synthesis backend boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("Cannot synthesize empty text")]
    EmptyText,

    #[error("Invalid synthesis configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Network error talking to synthesis backend: {0}")]
    Network(String),

    #[error("Synthesis backend timed out after {0} seconds")]
    Timeout(u64),

    #[error("Synthesis backend returned HTTP {status}: {message}")]
    Backend { status: u16, message: String },
}

/// Connection settings shared by synthesis adapters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Adapter name, e.g. `google-translate`
    pub provider: String,
    /// Backend base URL
    pub base_url: String,
    /// Language code sent to the backend
    pub language: String,
    /// Per-request timeout
    pub timeout_seconds: u64,
    /// Longest text the backend accepts in one request, in characters
    pub max_chunk_chars: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            provider: super::DEFAULT_PROVIDER.to_string(),
            base_url: super::translate::TRANSLATE_TTS_BASE_URL.to_string(),
            language: super::translate::DEFAULT_LANGUAGE.to_string(),
            timeout_seconds: super::translate::DEFAULT_TIMEOUT_SECONDS,
            max_chunk_chars: super::translate::DEFAULT_MAX_CHUNK_CHARS,
        }
    }
}

/// The speech-generation boundary.
///
/// Takes final text and a slow flag and returns opaque audio bytes. Callers
/// must not assume anything about the bytes. Implementations perform no
/// retries; one call is one attempt.
#[async_trait]
pub trait SynthesisAdapter: Send + Sync {
    /// Synthesizes `text`, asking for slower speech when `slow` is set.
    async fn synthesize(&self, text: &str, slow: bool) -> SynthesisResult<Bytes>;

    /// Short identifier of the backend, e.g. `google-translate`.
    fn provider_id(&self) -> &'static str;
}
