//! Errors surfaced by the prosody pipeline and the speech generator.
//!
//! Text transform stages never fail. The only reportable conditions are an
//! invalid parameter set, blank input, and a failed call to the synthesis
//! backend.

use thiserror::Error;

use crate::core::synthesis::SynthesisError;

/// Result type for pipeline and generation operations
pub type ProsodyResult<T> = Result<T, ProsodyError>;

/// Top-level error for a single generation request
#[derive(Error, Debug)]
pub enum ProsodyError {
    /// A parameter is out of range or a preset name is unknown.
    /// Generation is not attempted.
    #[error("Invalid prosody configuration: {0}")]
    Configuration(String),

    /// The raw text is empty or whitespace only. The pipeline halts before
    /// any stage runs.
    #[error("Input text is empty; enter some text to synthesize")]
    EmptyInput,

    /// The synthesis backend failed. No partial output is returned.
    #[error("Speech synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),
}

impl ProsodyError {
    /// Shorthand for building a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns whether the request was rejected before reaching the backend.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::EmptyInput)
    }
}
