//! Named parameter presets.
//!
//! Presets are data: a name plus the overrides it layers on top of the
//! default [`ParameterSet`]. `Custom` is the identity preset. Explicit
//! overrides supplied with a request are applied after the preset, so they
//! always win.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::params::{ParameterOverrides, ParameterSet, Style, VowelMode};
use crate::errors::{ProsodyError, ProsodyResult};

pub const CUSTOM_PRESET: &str = "Custom";
pub const SLOW_CHANT_PRESET: &str = "Slow Chant";
pub const STACCATO_DRILL_PRESET: &str = "Staccato Drill";
pub const CLIPPED_COMMAND_PRESET: &str = "Clipped Command";

/// A named bundle of parameter overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(flatten)]
    pub overrides: ParameterOverrides,
}

impl Preset {
    pub fn new(name: impl Into<String>, overrides: ParameterOverrides) -> Self {
        Self {
            name: name.into(),
            overrides,
        }
    }

    /// Resolves the preset against the default parameter set.
    pub fn parameters(&self) -> ProsodyResult<ParameterSet> {
        self.overrides
            .apply_to(&ParameterSet::default())
            .map_err(|e| match e {
                ProsodyError::Configuration(msg) => {
                    ProsodyError::Configuration(format!("preset '{}': {msg}", self.name))
                }
                other => other,
            })
    }
}

fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset::new(CUSTOM_PRESET, ParameterOverrides::default()),
        Preset::new(
            SLOW_CHANT_PRESET,
            ParameterOverrides {
                tempo_bpm: Some(70),
                style: Some(Style::Legato),
                vowel_mode: Some(VowelMode::Long),
                cluster_pause_ms: Some(180),
                repeat_pause_ms: Some(300),
                stress_first: Some(true),
                repeat_count: Some(1),
                chant_enabled: Some(true),
            },
        ),
        Preset::new(
            STACCATO_DRILL_PRESET,
            ParameterOverrides {
                tempo_bpm: Some(160),
                style: Some(Style::Staccato),
                vowel_mode: Some(VowelMode::Short),
                cluster_pause_ms: Some(250),
                repeat_pause_ms: Some(500),
                stress_first: Some(true),
                repeat_count: Some(2),
                chant_enabled: Some(false),
            },
        ),
        Preset::new(
            CLIPPED_COMMAND_PRESET,
            ParameterOverrides {
                tempo_bpm: Some(140),
                style: Some(Style::Clipped),
                vowel_mode: Some(VowelMode::Normal),
                cluster_pause_ms: Some(100),
                repeat_pause_ms: Some(250),
                stress_first: Some(true),
                repeat_count: Some(1),
                chant_enabled: Some(false),
            },
        ),
    ]
}

/// Case-insensitive lookup table of presets.
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    /// Presets in insertion order
    presets: Vec<Preset>,
    /// Lower-cased name -> index into `presets`
    index: HashMap<String, usize>,
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PresetCatalog {
    /// Catalog with only the built-in presets.
    pub fn builtin() -> Self {
        let mut catalog = Self {
            presets: Vec::new(),
            index: HashMap::new(),
        };
        for preset in builtin_presets() {
            catalog.insert(preset);
        }
        catalog
    }

    /// Adds or replaces a preset. A preset with the same name (ignoring case)
    /// is shadowed in place.
    pub fn insert(&mut self, preset: Preset) {
        let key = preset.name.trim().to_lowercase();
        match self.index.get(&key) {
            Some(&position) => self.presets[position] = preset,
            None => {
                self.index.insert(key, self.presets.len());
                self.presets.push(preset);
            }
        }
    }

    /// Builds a catalog from the built-ins plus `extra`, validating every
    /// extra preset.
    pub fn with_presets(extra: impl IntoIterator<Item = Preset>) -> ProsodyResult<Self> {
        let mut catalog = Self::builtin();
        for preset in extra {
            preset.parameters()?;
            catalog.insert(preset);
        }
        Ok(catalog)
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.index
            .get(&name.trim().to_lowercase())
            .map(|&position| &self.presets[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Resolves a preset name to its parameter set.
    pub fn resolve(&self, name: &str) -> ProsodyResult<ParameterSet> {
        self.get(name)
            .ok_or_else(|| {
                ProsodyError::configuration(format!(
                    "unknown preset '{name}'. Available presets: {}",
                    self.names().join(", ")
                ))
            })?
            .parameters()
    }

    /// Resolves `preset` (or `Custom` when absent) and applies `overrides`
    /// on top of it.
    pub fn resolve_with_overrides(
        &self,
        preset: Option<&str>,
        overrides: &ParameterOverrides,
    ) -> ProsodyResult<ParameterSet> {
        let base = self.resolve(preset.unwrap_or(CUSTOM_PRESET))?;
        overrides.apply_to(&base)
    }

    pub fn names(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
