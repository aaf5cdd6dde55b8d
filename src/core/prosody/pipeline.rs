//! Pipeline orchestration.
//!
//! Applies the stages in their fixed order, appends the cluster and repeat
//! gaps and repeats the whole result `repeat_count` times.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

use super::markup::{MarkupOptions, RepeatScope, expand_markup};
use super::params::ParameterSet;
use super::pause::encode_pause;
use super::stages::{apply_style, apply_vowel_mode, chant_join, stress_first_word};
use crate::errors::{ProsodyError, ProsodyResult};

// =============================================================================
// Final Text
// =============================================================================

/// Fully transformed text, ready for the synthesis backend.
///
/// Built once per request and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FinalText(String);

impl FinalText {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for FinalText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FinalText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Pipeline-wide behavior that is not part of a per-request parameter set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Target of inline `[repeat=n]` tags
    pub repeat_scope: RepeatScope,
    /// Append `!` to the stressed first word
    pub stress_suffix: bool,
}

/// The prosody transform pipeline.
///
/// Holds no per-request state; one instance can serve any number of
/// concurrent requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProsodyPipeline {
    options: PipelineOptions,
}

impl ProsodyPipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Transforms `raw_text` according to `params`.
    ///
    /// # Errors
    ///
    /// - [`ProsodyError::EmptyInput`] when `raw_text` is blank; no stage runs.
    /// - [`ProsodyError::Configuration`] when `params` fails validation.
    pub fn build(&self, raw_text: &str, params: &ParameterSet) -> ProsodyResult<FinalText> {
        if raw_text.trim().is_empty() {
            return Err(ProsodyError::EmptyInput);
        }
        params.validate()?;

        let markup = MarkupOptions {
            repeat_scope: self.options.repeat_scope,
        };

        let text = expand_markup(raw_text, &markup);
        trace!(stage = "markup", %text);

        let text = apply_vowel_mode(&text, params.vowel_mode);
        trace!(stage = "vowel", mode = %params.vowel_mode, %text);

        let text = apply_style(&text, params.style);
        trace!(stage = "style", style = %params.style, %text);

        let text = if params.stress_first {
            stress_first_word(&text, self.options.stress_suffix)
        } else {
            text
        };
        trace!(stage = "stress", enabled = params.stress_first, %text);

        let text = if params.chant_enabled {
            chant_join(&text, params.style)
        } else {
            text
        };
        trace!(stage = "chant", enabled = params.chant_enabled, %text);

        let cluster_gap = encode_pause(params.cluster_pause_ms);
        let repeat_gap = encode_pause(params.repeat_pause_ms);

        let mut unit = String::with_capacity(text.len() + cluster_gap.len() + repeat_gap.len());
        unit.push_str(&text);
        unit.push_str(cluster_gap.as_str());
        unit.push_str(repeat_gap.as_str());

        let final_text = unit.repeat(usize::from(params.repeat_count));

        debug!(
            input_chars = raw_text.len(),
            output_chars = final_text.len(),
            repeat_count = params.repeat_count,
            cluster_groups = cluster_gap.groups(),
            repeat_groups = repeat_gap.groups(),
            "Built final text"
        );

        Ok(FinalText(final_text))
    }
}

/// Runs the pipeline with default [`PipelineOptions`].
pub fn build_final_text(raw_text: &str, params: &ParameterSet) -> ProsodyResult<FinalText> {
    ProsodyPipeline::default().build(raw_text, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::prosody::params::{Style, VowelMode};

    #[test]
    fn test_empty_input_rejected() {
        let params = ParameterSet::default();
        assert!(matches!(
            build_final_text("", &params),
            Err(ProsodyError::EmptyInput)
        ));
        assert!(matches!(
            build_final_text(" \n\t ", &params),
            Err(ProsodyError::EmptyInput)
        ));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = ParameterSet {
            tempo_bpm: 10,
            ..Default::default()
        };
        assert!(matches!(
            build_final_text("hello", &params),
            Err(ProsodyError::Configuration(_))
        ));
    }

    #[test]
    fn test_single_repeat_appends_one_gap_pair() {
        let params = ParameterSet::builder()
            .cluster_pause_ms(0)
            .repeat_pause_ms(500)
            .build()
            .unwrap();
        let text = build_final_text("hello world", &params).unwrap();
        assert_eq!(text.as_str(), "hello world. . . ");
    }

    #[test]
    fn test_whole_text_repetition() {
        let params = ParameterSet::builder()
            .repeat_count(3)
            .cluster_pause_ms(0)
            .repeat_pause_ms(0)
            .build()
            .unwrap();
        let text = build_final_text("go", &params).unwrap();
        assert_eq!(text.as_str(), "go. . go. . go. . ");
    }

    #[test]
    fn test_stage_order_vowel_before_stress() {
        let params = ParameterSet::builder()
            .vowel_mode(VowelMode::Long)
            .stress_first(true)
            .build()
            .unwrap();
        let text = build_final_text("go on", &params).unwrap();
        assert!(text.as_str().starts_with("GOO oon"));
    }

    #[test]
    fn test_chant_overrides_staccato() {
        let params = ParameterSet::builder()
            .style(Style::Staccato)
            .chant_enabled(true)
            .build()
            .unwrap();
        let text = build_final_text("a b c", &params).unwrap();
        assert!(text.as_str().starts_with("a ~ b ~ c. "));
    }

    #[test]
    fn test_stress_suffix_option() {
        let pipeline = ProsodyPipeline::new(PipelineOptions {
            stress_suffix: true,
            ..Default::default()
        });
        let params = ParameterSet::builder().stress_first(true).build().unwrap();
        let text = pipeline.build("listen now", &params).unwrap();
        assert!(text.as_str().starts_with("LISTEN! now"));
    }

    #[test]
    fn test_markup_resolved_before_word_stages() {
        let params = ParameterSet::builder()
            .style(Style::Clipped)
            .build()
            .unwrap();
        let text = build_final_text("go [repeat=2] home", &params).unwrap();
        assert!(text.as_str().starts_with("go! go! home"));
    }

    #[test]
    fn test_repeat_scope_option() {
        let pipeline = ProsodyPipeline::new(PipelineOptions {
            repeat_scope: RepeatScope::Preceding,
            ..Default::default()
        });
        let text = pipeline
            .build("sun rises [repeat=2]", &ParameterSet::default())
            .unwrap();
        assert!(text.as_str().starts_with("sun rises sun rises. "));
    }

    #[test]
    fn test_final_text_accessors() {
        let text = build_final_text("hi", &ParameterSet::default()).unwrap();
        assert_eq!(text.to_string(), text.as_str());
        assert_eq!(text.len(), text.as_str().len());
        assert!(!text.is_empty());
        assert_eq!(text.clone().into_string(), "hi. . ");
    }
}
