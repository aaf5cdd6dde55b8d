mod base;
pub mod chunking;
pub mod translate;

pub use base::{
    BoxedSynthesisAdapter, SynthesisAdapter, SynthesisConfig, SynthesisError, SynthesisResult,
};
pub use chunking::split_for_synthesis;
pub use translate::{TRANSLATE_TTS_BASE_URL, TranslateTts, TranslateTtsConfig};

use std::sync::Arc;

/// Adapter used when no provider is configured.
pub const DEFAULT_PROVIDER: &str = "google-translate";

/// Factory function to create a synthesis adapter.
///
/// # Supported Providers
///
/// - `"google-translate"`, `"gtts"` or `"translate"` - Google Translate TTS endpoint
///
/// # Example
///
/// ```rust,ignore
/// use prosody_tts::core::synthesis::{create_synthesis_adapter, SynthesisConfig};
///
/// let adapter = create_synthesis_adapter("gtts", SynthesisConfig::default())?;
/// let audio = adapter.synthesize("hello. . ", false).await?;
/// ```
pub fn create_synthesis_adapter(
    provider_type: &str,
    config: SynthesisConfig,
) -> SynthesisResult<BoxedSynthesisAdapter> {
    if !is_supported_provider(provider_type) {
        return Err(SynthesisError::InvalidConfiguration(format!(
            "Unsupported synthesis provider: {provider_type}. Supported providers: google-translate"
        )));
    }
    Ok(Arc::new(TranslateTts::new(config)?))
}

/// Returns whether `provider_type` names a known adapter.
pub fn is_supported_provider(provider_type: &str) -> bool {
    matches!(
        provider_type.trim().to_lowercase().as_str(),
        "google-translate" | "google_translate" | "gtts" | "translate"
    )
}
