//! Speech generation: pipeline plus one synthesis call.

use bytes::Bytes;
use tracing::{error, info};

use crate::core::prosody::{FinalText, ParameterSet, ProsodyPipeline};
use crate::core::synthesis::BoxedSynthesisAdapter;
use crate::errors::ProsodyResult;

/// Output of a successful generation request
#[derive(Debug, Clone)]
pub struct GeneratedSpeech {
    /// Text that was sent to the backend
    pub final_text: FinalText,
    /// Whether slow speech was requested
    pub slow: bool,
    /// Audio bytes exactly as the backend returned them
    pub audio: Bytes,
    /// Backend that produced the audio
    pub provider: &'static str,
}

/// Runs the prosody pipeline and hands the result to a synthesis adapter.
///
/// Stateless between requests: a failed generation leaves nothing behind
/// that could affect the next one.
#[derive(Clone)]
pub struct SpeechGenerator {
    pipeline: ProsodyPipeline,
    adapter: BoxedSynthesisAdapter,
}

impl SpeechGenerator {
    pub fn new(pipeline: ProsodyPipeline, adapter: BoxedSynthesisAdapter) -> Self {
        Self { pipeline, adapter }
    }

    pub fn pipeline(&self) -> &ProsodyPipeline {
        &self.pipeline
    }

    pub fn provider_id(&self) -> &'static str {
        self.adapter.provider_id()
    }

    /// Builds the final text without calling the backend.
    pub fn render(&self, raw_text: &str, params: &ParameterSet) -> ProsodyResult<FinalText> {
        self.pipeline.build(raw_text, params)
    }

    /// Builds the final text and synthesizes it.
    ///
    /// The backend is called exactly once. Its failure is returned as
    /// [`crate::errors::ProsodyError::Synthesis`] with no partial output.
    pub async fn generate(
        &self,
        raw_text: &str,
        params: &ParameterSet,
    ) -> ProsodyResult<GeneratedSpeech> {
        let final_text = self.pipeline.build(raw_text, params)?;
        let slow = params.is_slow();

        let audio = match self.adapter.synthesize(final_text.as_str(), slow).await {
            Ok(audio) => audio,
            Err(e) => {
                error!(provider = self.adapter.provider_id(), "Synthesis failed: {}", e);
                return Err(e.into());
            }
        };

        info!(
            provider = self.adapter.provider_id(),
            slow,
            text_chars = final_text.len(),
            audio_bytes = audio.len(),
            "Generated speech"
        );

        Ok(GeneratedSpeech {
            final_text,
            slow,
            audio,
            provider: self.adapter.provider_id(),
        })
    }
}
