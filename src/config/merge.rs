//! YAML overlay on top of the environment configuration.

use super::ServiceConfig;
use super::env::load_from_env;
use super::yaml::YamlConfig;
use crate::core::prosody::Preset;

/// Loads the environment configuration and applies `yaml` on top of it.
///
/// Priority: YAML > environment variables > defaults.
pub(super) fn merge_config(
    yaml: Option<YamlConfig>,
) -> Result<ServiceConfig, Box<dyn std::error::Error>> {
    let mut config = load_from_env()?;

    let Some(yaml) = yaml else {
        return Ok(config);
    };

    if let Some(server) = yaml.server {
        if let Some(host) = server.host {
            config.host = host;
        }
        if let Some(port) = server.port {
            config.port = port;
        }
    }

    if let Some(backend) = yaml.backend {
        if let Some(provider) = backend.provider {
            config.synthesis.provider = provider;
        }
        if let Some(base_url) = backend.base_url {
            config.synthesis.base_url = base_url;
        }
        if let Some(language) = backend.language {
            config.synthesis.language = language;
        }
        if let Some(timeout) = backend.timeout_seconds {
            config.synthesis.timeout_seconds = timeout;
        }
        if let Some(max_chars) = backend.max_chunk_chars {
            config.synthesis.max_chunk_chars = max_chars;
        }
    }

    if let Some(pipeline) = yaml.pipeline {
        if let Some(scope) = pipeline.repeat_scope {
            config.pipeline.repeat_scope = scope;
        }
        if let Some(suffix) = pipeline.stress_suffix {
            config.pipeline.stress_suffix = suffix;
        }
        if let Some(preset) = pipeline.default_preset {
            config.default_preset = preset;
        }
    }

    if let Some(presets) = yaml.presets {
        config.presets = presets
            .into_iter()
            .map(|(name, preset)| Preset::new(name, preset.into()))
            .collect();
    }

    Ok(config)
}
