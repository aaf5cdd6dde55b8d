//! Translate TTS configuration.

use url::Url;

use super::{MAX_MAX_CHUNK_CHARS, MIN_MAX_CHUNK_CHARS, TRANSLATE_TTS_PATH};
use crate::core::synthesis::base::{SynthesisConfig, SynthesisError, SynthesisResult};

/// Validated settings for [`super::TranslateTts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateTtsConfig {
    /// Full speech endpoint, base URL joined with [`TRANSLATE_TTS_PATH`]
    pub endpoint: Url,
    pub language: String,
    pub timeout_seconds: u64,
    pub max_chunk_chars: usize,
}

impl TranslateTtsConfig {
    /// Builds the adapter config from the shared synthesis config.
    pub fn from_base(config: &SynthesisConfig) -> SynthesisResult<Self> {
        let this = Self {
            endpoint: endpoint_url(&config.base_url)?,
            language: config.language.trim().to_string(),
            timeout_seconds: config.timeout_seconds,
            max_chunk_chars: config.max_chunk_chars,
        };
        this.validate()?;
        Ok(this)
    }

    pub fn validate(&self) -> SynthesisResult<()> {
        if self.language.is_empty() {
            return Err(SynthesisError::InvalidConfiguration(
                "language must not be empty".to_string(),
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(SynthesisError::InvalidConfiguration(
                "timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if !(MIN_MAX_CHUNK_CHARS..=MAX_MAX_CHUNK_CHARS).contains(&self.max_chunk_chars) {
            return Err(SynthesisError::InvalidConfiguration(format!(
                "max_chunk_chars must be between {} and {}, got {}",
                MIN_MAX_CHUNK_CHARS, MAX_MAX_CHUNK_CHARS, self.max_chunk_chars
            )));
        }

        Ok(())
    }
}

/// Joins the base URL with the speech path, keeping any path prefix.
fn endpoint_url(base_url: &str) -> SynthesisResult<Url> {
    let mut base = base_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }

    let url = Url::parse(&base).map_err(|e| {
        SynthesisError::InvalidConfiguration(format!("invalid base_url '{base_url}': {e}"))
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(SynthesisError::InvalidConfiguration(format!(
            "base_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    url.join(TRANSLATE_TTS_PATH).map_err(|e| {
        SynthesisError::InvalidConfiguration(format!("invalid base_url '{base_url}': {e}"))
    })
}
