//! Prosody preprocessing pipeline.
//!
//! The synthesis backend accepts nothing but text and a slow/normal flag, so
//! every prosodic intent (tempo, stress, vowel length, pauses, repetition,
//! chant) is expressed by rewriting the text before it is sent.
//!
//! # Architecture
//!
//! ```text
//!  raw text ──▶ markup ──▶ vowel ──▶ style ──▶ stress ──▶ chant ──▶ gaps + repeat ──▶ FinalText
//!               [pause=]    long      staccato  FIRST      a ~ b      ". " x n         │
//!               [repeat=]   short     clipped   word                                   ▼
//!               *emph*                                                         SynthesisAdapter
//! ```
//!
//! The order is fixed. Markup is resolved first because the later stages
//! split on whitespace and would otherwise corrupt the tags.
//!
//! # Example
//!
//! ```rust
//! use prosody_tts::core::prosody::{PresetCatalog, build_final_text};
//!
//! let catalog = PresetCatalog::builtin();
//! let params = catalog.resolve("Slow Chant").unwrap();
//!
//! let text = build_final_text("sun rises", &params).unwrap();
//! assert!(text.as_str().starts_with("SUUN ~ riisees"));
//! assert!(params.is_slow());
//! ```

pub mod markup;
pub mod params;
pub mod pause;
pub mod pipeline;
pub mod presets;
pub mod stages;

pub use markup::{MarkupOptions, RepeatScope, contains_markup, expand_markup};
pub use params::{ParameterOverrides, ParameterSet, ParameterSetBuilder, Style, VowelMode};
pub use pause::{PauseToken, encode_pause};
pub use pipeline::{FinalText, PipelineOptions, ProsodyPipeline, build_final_text};
pub use presets::{CUSTOM_PRESET, Preset, PresetCatalog, SLOW_CHANT_PRESET};
pub use stages::{
    apply_style, apply_vowel_mode, chant_join, elongate_vowels, shorten_vowels, stress_first_word,
};

// =============================================================================
// Parameter Ranges
// =============================================================================

pub const MIN_TEMPO_BPM: u16 = 60;
pub const MAX_TEMPO_BPM: u16 = 220;
pub const DEFAULT_TEMPO_BPM: u16 = 120;

/// Tempos strictly below this ask the backend for slow speech.
pub const SLOW_TEMPO_THRESHOLD_BPM: u16 = 110;

/// Upper bound for any pause, configured or inline. Keeps tokens at 40 groups or fewer.
pub const MAX_PAUSE_MS: u32 = 10_000;
pub const DEFAULT_CLUSTER_PAUSE_MS: u32 = 150;
pub const DEFAULT_REPEAT_PAUSE_MS: u32 = 0;

pub const MIN_REPEAT_COUNT: u8 = 1;
pub const MAX_REPEAT_COUNT: u8 = 5;
pub const DEFAULT_REPEAT_COUNT: u8 = 1;

/// Largest `n` accepted in an inline `[repeat=n]` tag.
pub const MAX_INLINE_REPEAT: u32 = 20;

/// Length in bytes that a `[repeat=n]` expansion may grow the text to.
/// A tag that would go past it stays in the text literally.
pub const MAX_EXPANDED_BYTES: usize = 20_000;

// =============================================================================
// Text Tokens
// =============================================================================

/// Milliseconds represented by one terminator group.
pub const PAUSE_BUCKET_MS: u32 = 250;

/// One terminator group of a pause token.
pub const PAUSE_GROUP: &str = ". ";

/// Word separator in chant mode.
pub const CHANT_SEPARATOR: &str = " ~ ";
