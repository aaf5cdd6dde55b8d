use std::sync::Arc;

use tracing::info;

use crate::config::ServiceConfig;
use crate::core::generator::SpeechGenerator;
use crate::core::prosody::{ParameterOverrides, ParameterSet, PresetCatalog};
use crate::core::synthesis::{BoxedSynthesisAdapter, create_synthesis_adapter};
use crate::errors::{ProsodyError, ProsodyResult};

/// Shared, read-only state handed to every request handler.
pub struct AppState {
    pub config: ServiceConfig,
    pub presets: PresetCatalog,
    pub generator: SpeechGenerator,
}

impl AppState {
    /// Builds the state with the adapter named in the configuration.
    pub fn new(config: ServiceConfig) -> ProsodyResult<Arc<Self>> {
        let adapter =
            create_synthesis_adapter(&config.synthesis.provider, config.synthesis.clone())
                .map_err(|e| ProsodyError::configuration(e.to_string()))?;
        Self::with_adapter(config, adapter)
    }

    /// Builds the state around an existing adapter.
    pub fn with_adapter(
        config: ServiceConfig,
        adapter: BoxedSynthesisAdapter,
    ) -> ProsodyResult<Arc<Self>> {
        let presets = config.preset_catalog()?;
        let generator = SpeechGenerator::new(config.prosody_pipeline(), adapter);

        info!(
            provider = generator.provider_id(),
            presets = presets.len(),
            default_preset = %config.default_preset,
            "Application state ready"
        );

        Ok(Arc::new(Self {
            config,
            presets,
            generator,
        }))
    }

    /// Resolves a request's preset and overrides to a parameter set.
    pub fn resolve_parameters(
        &self,
        preset: Option<&str>,
        overrides: &ParameterOverrides,
    ) -> ProsodyResult<ParameterSet> {
        self.config.resolve_parameters(&self.presets, preset, overrides)
    }
}
