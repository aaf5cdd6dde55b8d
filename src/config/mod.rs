//! Service configuration
//!
//! Configuration comes from three sources. The priority is YAML > ENV vars
//! (.env values are loaded into the environment by `main`) > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: YAML overlay on top of the environment
//! - `validation`: Checks run on the merged result
//!
//! # Example
//! ```rust,no_run
//! use prosody_tts::config::ServiceConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServiceConfig::from_env()?;
//!
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServiceConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod env;
mod merge;
mod validation;
pub mod yaml;

pub use env::ALL_ENV_VARS;
pub use yaml::YamlConfig;

use crate::core::prosody::{
    CUSTOM_PRESET, ParameterOverrides, ParameterSet, PipelineOptions, Preset, PresetCatalog,
    ProsodyPipeline,
};
use crate::core::synthesis::SynthesisConfig;
use crate::errors::ProsodyResult;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;

/// Complete service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,

    /// Synthesis backend connection
    pub synthesis: SynthesisConfig,

    /// Pipeline-wide options
    pub pipeline: PipelineOptions,

    /// Preset used when a request names none
    pub default_preset: String,

    /// Presets defined in YAML. They shadow built-ins with the same name.
    pub presets: Vec<Preset>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            synthesis: SynthesisConfig::default(),
            pipeline: PipelineOptions::default(),
            default_preset: CUSTOM_PRESET.to_string(),
            presets: Vec::new(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable cannot be parsed or validation fails.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = merge::merge_config(None)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file, with environment variables as
    /// the base layer
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the merged configuration.
    pub fn validate(&self) -> Result<(), String> {
        validation::validate_server(self)?;
        validation::validate_backend(self)?;
        validation::validate_presets(self)?;
        Ok(())
    }

    /// Get the server address as a string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Built-in presets plus the configured ones.
    pub fn preset_catalog(&self) -> ProsodyResult<PresetCatalog> {
        PresetCatalog::with_presets(self.presets.iter().cloned())
    }

    pub fn prosody_pipeline(&self) -> ProsodyPipeline {
        ProsodyPipeline::new(self.pipeline)
    }

    /// Resolves `preset` (or the configured default) with `overrides`
    /// applied on top.
    pub fn resolve_parameters(
        &self,
        catalog: &PresetCatalog,
        preset: Option<&str>,
        overrides: &ParameterOverrides,
    ) -> ProsodyResult<ParameterSet> {
        catalog.resolve_with_overrides(Some(preset.unwrap_or(&self.default_preset)), overrides)
    }
}
