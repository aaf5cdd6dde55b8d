use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::prosody::{ParameterOverrides, RepeatScope, Style, VowelMode};

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present
/// here override environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 3001
///
/// backend:
///   provider: "google-translate"
///   base_url: "https://translate.google.com"
///   language: "en"
///   timeout_seconds: 10
///   max_chunk_chars: 100
///
/// pipeline:
///   repeat_scope: "phrase"
///   stress_suffix: true
///   default_preset: "Slow Chant"
///
/// presets:
///   "Whisper Drill":
///     tempo_bpm: 90
///     style: "legato"
///     vowel_mode: "short"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub backend: Option<BackendYaml>,
    pub pipeline: Option<PipelineYaml>,
    /// Preset name -> overrides applied to the default parameter set
    pub presets: Option<BTreeMap<String, PresetYaml>>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Synthesis backend configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct BackendYaml {
    pub provider: Option<String>,
    pub base_url: Option<String>,
    pub language: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub max_chunk_chars: Option<usize>,
}

/// Pipeline configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PipelineYaml {
    pub repeat_scope: Option<RepeatScope>,
    pub stress_suffix: Option<bool>,
    pub default_preset: Option<String>,
}

/// One preset from YAML
///
/// Unlike the other sections, unknown keys are rejected: a misspelled
/// parameter would otherwise fall back to its default without notice.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PresetYaml {
    pub tempo_bpm: Option<i64>,
    pub style: Option<Style>,
    pub vowel_mode: Option<VowelMode>,
    pub cluster_pause_ms: Option<i64>,
    pub repeat_pause_ms: Option<i64>,
    pub stress_first: Option<bool>,
    pub repeat_count: Option<i64>,
    pub chant_enabled: Option<bool>,
}

impl From<PresetYaml> for ParameterOverrides {
    fn from(preset: PresetYaml) -> Self {
        Self {
            tempo_bpm: preset.tempo_bpm,
            style: preset.style,
            vowel_mode: preset.vowel_mode,
            cluster_pause_ms: preset.cluster_pause_ms,
            repeat_pause_ms: preset.repeat_pause_ms,
            stress_first: preset.stress_first,
            repeat_count: preset.repeat_count,
            chant_enabled: preset.chant_enabled,
        }
    }
}

impl YamlConfig {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be read
    /// - The YAML is malformed
    /// - Fields have invalid types or unknown enum values
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_config_full() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 8080

backend:
  provider: "gtts"
  base_url: "http://localhost:9000"
  language: "de"
  timeout_seconds: 3
  max_chunk_chars: 200

pipeline:
  repeat_scope: "phrase"
  stress_suffix: true
  default_preset: "Slow Chant"

presets:
  "Whisper Drill":
    tempo_bpm: 90
    style: "legato"
"#;

        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();

        let server = config.server.unwrap();
        assert_eq!(server.host, Some("127.0.0.1".to_string()));
        assert_eq!(server.port, Some(8080));

        let backend = config.backend.unwrap();
        assert_eq!(backend.provider, Some("gtts".to_string()));
        assert_eq!(backend.language, Some("de".to_string()));
        assert_eq!(backend.timeout_seconds, Some(3));
        assert_eq!(backend.max_chunk_chars, Some(200));

        let pipeline = config.pipeline.unwrap();
        assert_eq!(pipeline.repeat_scope, Some(RepeatScope::Phrase));
        assert_eq!(pipeline.stress_suffix, Some(true));
        assert_eq!(pipeline.default_preset, Some("Slow Chant".to_string()));

        let presets = config.presets.unwrap();
        let drill = presets.get("Whisper Drill").unwrap();
        assert_eq!(drill.tempo_bpm, Some(90));
        assert_eq!(drill.style, Some(Style::Legato));
        assert_eq!(drill.vowel_mode, None);
    }

    #[test]
    fn test_yaml_config_partial() {
        let yaml = r#"
server:
  port: 4000
"#;
        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.unwrap().port, Some(4000));
        assert!(config.backend.is_none());
        assert!(config.presets.is_none());
    }

    #[test]
    fn test_yaml_config_empty() {
        let config: YamlConfig = serde_yaml::from_str("").unwrap_or_default();
        assert!(config.server.is_none());
    }

    #[test]
    fn test_yaml_rejects_unknown_repeat_scope() {
        let yaml = r#"
pipeline:
  repeat_scope: "sentence"
"#;
        assert!(serde_yaml::from_str::<YamlConfig>(yaml).is_err());
    }

    #[test]
    fn test_yaml_rejects_misspelled_preset_field() {
        let yaml = r#"
presets:
  "Whisper Drill":
    tempo: 90
"#;
        let err = serde_yaml::from_str::<YamlConfig>(yaml).unwrap_err();
        assert!(err.to_string().contains("tempo"));
    }

    #[test]
    fn test_preset_yaml_into_overrides() {
        let yaml = "tempo_bpm: 90\nvowel_mode: \"long\"\nchant_enabled: true\n";
        let preset: PresetYaml = serde_yaml::from_str(yaml).unwrap();
        let overrides = ParameterOverrides::from(preset);

        assert_eq!(overrides.tempo_bpm, Some(90));
        assert_eq!(overrides.vowel_mode, Some(VowelMode::Long));
        assert_eq!(overrides.chant_enabled, Some(true));
        assert_eq!(overrides.style, None);
    }

    #[test]
    fn test_yaml_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "server:\n  host: \"localhost\"\n").unwrap();

        let config = YamlConfig::from_file(&path).unwrap();
        assert_eq!(config.server.unwrap().host, Some("localhost".to_string()));
    }

    #[test]
    fn test_yaml_from_missing_file() {
        let path = PathBuf::from("/nonexistent/prosody.yaml");
        let err = YamlConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_yaml_from_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "server: [unclosed").unwrap();

        let err = YamlConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse YAML config"));
    }
}
