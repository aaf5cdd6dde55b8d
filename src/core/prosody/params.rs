//! Prosody parameter types.
//!
//! A [`ParameterSet`] is the immutable, validated description of the prosody
//! a single generation request asks for. Callers build one from a preset or
//! from explicit values and then layer [`ParameterOverrides`] on top; the last
//! layer applied wins.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    DEFAULT_CLUSTER_PAUSE_MS, DEFAULT_REPEAT_COUNT, DEFAULT_REPEAT_PAUSE_MS, DEFAULT_TEMPO_BPM,
    MAX_PAUSE_MS, MAX_REPEAT_COUNT, MAX_TEMPO_BPM, MIN_REPEAT_COUNT, MIN_TEMPO_BPM,
    SLOW_TEMPO_THRESHOLD_BPM,
};
use crate::errors::{ProsodyError, ProsodyResult};

// =============================================================================
// Delivery Style
// =============================================================================

/// Inter-word segmentation style.
///
/// | Style | Separator between words |
/// |-------|-------------------------|
/// | `Legato` | unchanged |
/// | `Neutral` | unchanged |
/// | `Clipped` | `"! "` |
/// | `Staccato` | `". "` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    /// Smooth, connected delivery
    Legato,
    /// No segmentation
    #[default]
    Neutral,
    /// Short exclamations between words
    Clipped,
    /// A sentence break after every word
    Staccato,
}

impl Style {
    #[inline]
    pub const fn all() -> &'static [Style] {
        &[Style::Legato, Style::Neutral, Style::Clipped, Style::Staccato]
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Style::Legato => "legato",
            Style::Neutral => "neutral",
            Style::Clipped => "clipped",
            Style::Staccato => "staccato",
        }
    }

    /// Parses a style name (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "legato" => Some(Style::Legato),
            "neutral" => Some(Style::Neutral),
            "clipped" => Some(Style::Clipped),
            "staccato" => Some(Style::Staccato),
            _ => None,
        }
    }

    /// The punctuation mark this style places after every non-final word,
    /// or `None` when the style leaves word separators alone.
    #[inline]
    pub const fn separator_mark(&self) -> Option<char> {
        match self {
            Style::Staccato => Some('.'),
            Style::Clipped => Some('!'),
            Style::Legato | Style::Neutral => None,
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Vowel Mode
// =============================================================================

/// Vowel rewriting mode. Exactly one applies; `Normal` is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VowelMode {
    #[default]
    Normal,
    /// Apostrophe after every vowel
    Short,
    /// Every vowel doubled
    Long,
}

impl VowelMode {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            VowelMode::Normal => "normal",
            VowelMode::Short => "short",
            VowelMode::Long => "long",
        }
    }

    /// Parses a vowel mode name (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Some(VowelMode::Normal),
            "short" => Some(VowelMode::Short),
            "long" => Some(VowelMode::Long),
            _ => None,
        }
    }
}

impl fmt::Display for VowelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Parameter Set
// =============================================================================

/// Validated prosody parameters for one generation request.
///
/// # Example
///
/// ```rust
/// use prosody_tts::core::prosody::{ParameterSet, Style, VowelMode};
///
/// let params = ParameterSet::builder()
///     .tempo_bpm(90)
///     .style(Style::Staccato)
///     .vowel_mode(VowelMode::Long)
///     .build()
///     .unwrap();
///
/// assert!(params.is_slow());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSet {
    /// Tempo in beats per minute, 60..=220
    pub tempo_bpm: u16,
    pub style: Style,
    pub vowel_mode: VowelMode,
    /// Pause appended after the processed text, in milliseconds
    pub cluster_pause_ms: u32,
    /// Pause appended after the cluster pause, in milliseconds
    pub repeat_pause_ms: u32,
    /// Upper-case the first word
    pub stress_first: bool,
    /// Whole-text repetition factor, 1..=5
    pub repeat_count: u8,
    /// Join words with `" ~ "`
    pub chant_enabled: bool,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            tempo_bpm: DEFAULT_TEMPO_BPM,
            style: Style::default(),
            vowel_mode: VowelMode::default(),
            cluster_pause_ms: DEFAULT_CLUSTER_PAUSE_MS,
            repeat_pause_ms: DEFAULT_REPEAT_PAUSE_MS,
            stress_first: false,
            repeat_count: DEFAULT_REPEAT_COUNT,
            chant_enabled: false,
        }
    }
}

impl ParameterSet {
    pub fn builder() -> ParameterSetBuilder {
        ParameterSetBuilder::default()
    }

    /// Whether the synthesis backend should be asked for slow speech.
    #[inline]
    pub fn is_slow(&self) -> bool {
        self.tempo_bpm < SLOW_TEMPO_THRESHOLD_BPM
    }

    /// Checks every field against its allowed range.
    ///
    /// Out-of-range values are rejected rather than clamped.
    pub fn validate(&self) -> ProsodyResult<()> {
        check_range(
            "tempo_bpm",
            i64::from(self.tempo_bpm),
            i64::from(MIN_TEMPO_BPM),
            i64::from(MAX_TEMPO_BPM),
        )?;
        check_range(
            "cluster_pause_ms",
            i64::from(self.cluster_pause_ms),
            0,
            i64::from(MAX_PAUSE_MS),
        )?;
        check_range(
            "repeat_pause_ms",
            i64::from(self.repeat_pause_ms),
            0,
            i64::from(MAX_PAUSE_MS),
        )?;
        check_range(
            "repeat_count",
            i64::from(self.repeat_count),
            i64::from(MIN_REPEAT_COUNT),
            i64::from(MAX_REPEAT_COUNT),
        )?;
        Ok(())
    }

    /// Returns a copy with `overrides` applied, validated.
    pub fn with_overrides(&self, overrides: &ParameterOverrides) -> ProsodyResult<Self> {
        overrides.apply_to(self)
    }
}

fn check_range(field: &str, value: i64, min: i64, max: i64) -> ProsodyResult<i64> {
    if value < min || value > max {
        return Err(ProsodyError::configuration(format!(
            "{field} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(value)
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for explicit parameter values. Starts from the defaults.
#[derive(Debug, Clone, Default)]
pub struct ParameterSetBuilder {
    params: ParameterSet,
}

impl ParameterSetBuilder {
    pub fn tempo_bpm(mut self, bpm: u16) -> Self {
        self.params.tempo_bpm = bpm;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.params.style = style;
        self
    }

    pub fn vowel_mode(mut self, mode: VowelMode) -> Self {
        self.params.vowel_mode = mode;
        self
    }

    pub fn cluster_pause_ms(mut self, ms: u32) -> Self {
        self.params.cluster_pause_ms = ms;
        self
    }

    pub fn repeat_pause_ms(mut self, ms: u32) -> Self {
        self.params.repeat_pause_ms = ms;
        self
    }

    pub fn stress_first(mut self, enabled: bool) -> Self {
        self.params.stress_first = enabled;
        self
    }

    pub fn repeat_count(mut self, count: u8) -> Self {
        self.params.repeat_count = count;
        self
    }

    pub fn chant_enabled(mut self, enabled: bool) -> Self {
        self.params.chant_enabled = enabled;
        self
    }

    pub fn build(self) -> ProsodyResult<ParameterSet> {
        self.params.validate()?;
        Ok(self.params)
    }
}

// =============================================================================
// Overrides
// =============================================================================

/// Optional per-field overrides coming from request bodies, CLI flags or
/// YAML presets.
///
/// Numeric fields are signed so that negative input reaches validation and
/// is reported as a configuration error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tempo_bpm: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vowel_mode: Option<VowelMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_pause_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_pause_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress_first: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chant_enabled: Option<bool>,
}

impl ParameterOverrides {
    /// Returns whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Layers `later` on top of `self`; fields set in `later` win.
    pub fn merge(self, later: ParameterOverrides) -> Self {
        Self {
            tempo_bpm: later.tempo_bpm.or(self.tempo_bpm),
            style: later.style.or(self.style),
            vowel_mode: later.vowel_mode.or(self.vowel_mode),
            cluster_pause_ms: later.cluster_pause_ms.or(self.cluster_pause_ms),
            repeat_pause_ms: later.repeat_pause_ms.or(self.repeat_pause_ms),
            stress_first: later.stress_first.or(self.stress_first),
            repeat_count: later.repeat_count.or(self.repeat_count),
            chant_enabled: later.chant_enabled.or(self.chant_enabled),
        }
    }

    /// Applies the overrides to `base` and validates the result.
    pub fn apply_to(&self, base: &ParameterSet) -> ProsodyResult<ParameterSet> {
        let mut params = *base;

        if let Some(bpm) = self.tempo_bpm {
            let bpm = check_range(
                "tempo_bpm",
                bpm,
                i64::from(MIN_TEMPO_BPM),
                i64::from(MAX_TEMPO_BPM),
            )?;
            params.tempo_bpm = bpm as u16;
        }
        if let Some(style) = self.style {
            params.style = style;
        }
        if let Some(mode) = self.vowel_mode {
            params.vowel_mode = mode;
        }
        if let Some(ms) = self.cluster_pause_ms {
            params.cluster_pause_ms =
                check_range("cluster_pause_ms", ms, 0, i64::from(MAX_PAUSE_MS))? as u32;
        }
        if let Some(ms) = self.repeat_pause_ms {
            params.repeat_pause_ms =
                check_range("repeat_pause_ms", ms, 0, i64::from(MAX_PAUSE_MS))? as u32;
        }
        if let Some(stress) = self.stress_first {
            params.stress_first = stress;
        }
        if let Some(count) = self.repeat_count {
            let count = check_range(
                "repeat_count",
                count,
                i64::from(MIN_REPEAT_COUNT),
                i64::from(MAX_REPEAT_COUNT),
            )?;
            params.repeat_count = count as u8;
        }
        if let Some(chant) = self.chant_enabled {
            params.chant_enabled = chant;
        }

        params.validate()?;
        Ok(params)
    }
}
