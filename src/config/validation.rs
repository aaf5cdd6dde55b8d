//! Checks run on a fully merged configuration.

use super::ServiceConfig;
use crate::core::synthesis::{TranslateTtsConfig, is_supported_provider};

pub(super) fn validate_server(config: &ServiceConfig) -> Result<(), String> {
    if config.host.trim().is_empty() {
        return Err("server host must not be empty".to_string());
    }
    if config.port == 0 {
        return Err("server port must be non-zero".to_string());
    }
    Ok(())
}

/// Provider name plus the adapter's own connection checks.
pub(super) fn validate_backend(config: &ServiceConfig) -> Result<(), String> {
    if !is_supported_provider(&config.synthesis.provider) {
        return Err(format!(
            "unsupported backend provider '{}'",
            config.synthesis.provider
        ));
    }
    TranslateTtsConfig::from_base(&config.synthesis).map_err(|e| e.to_string())?;
    Ok(())
}

/// Every configured preset must be valid and the default must resolve.
pub(super) fn validate_presets(config: &ServiceConfig) -> Result<(), String> {
    let catalog = config.preset_catalog().map_err(|e| e.to_string())?;
    if !catalog.contains(&config.default_preset) {
        return Err(format!(
            "default preset '{}' is not defined. Available presets: {}",
            config.default_preset,
            catalog.names().join(", ")
        ));
    }
    Ok(())
}
