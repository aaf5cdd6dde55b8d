//! Environment variable loading.

use std::env;
use std::str::FromStr;

use super::ServiceConfig;
use crate::core::prosody::RepeatScope;

pub const ENV_HOST: &str = "PROSODY_HOST";
pub const ENV_PORT: &str = "PROSODY_PORT";
pub const ENV_BACKEND_PROVIDER: &str = "PROSODY_BACKEND_PROVIDER";
pub const ENV_BACKEND_URL: &str = "PROSODY_BACKEND_URL";
pub const ENV_LANGUAGE: &str = "PROSODY_LANGUAGE";
pub const ENV_TIMEOUT_SECONDS: &str = "PROSODY_TIMEOUT_SECONDS";
pub const ENV_MAX_CHUNK_CHARS: &str = "PROSODY_MAX_CHUNK_CHARS";
pub const ENV_REPEAT_SCOPE: &str = "PROSODY_REPEAT_SCOPE";
pub const ENV_STRESS_SUFFIX: &str = "PROSODY_STRESS_SUFFIX";
pub const ENV_DEFAULT_PRESET: &str = "PROSODY_DEFAULT_PRESET";

/// Every variable read by [`load_from_env`].
pub const ALL_ENV_VARS: &[&str] = &[
    ENV_HOST,
    ENV_PORT,
    ENV_BACKEND_PROVIDER,
    ENV_BACKEND_URL,
    ENV_LANGUAGE,
    ENV_TIMEOUT_SECONDS,
    ENV_MAX_CHUNK_CHARS,
    ENV_REPEAT_SCOPE,
    ENV_STRESS_SUFFIX,
    ENV_DEFAULT_PRESET,
];

/// Builds a configuration from defaults overlaid with environment variables.
pub(super) fn load_from_env() -> Result<ServiceConfig, Box<dyn std::error::Error>> {
    let mut config = ServiceConfig::default();

    if let Some(host) = env_string(ENV_HOST) {
        config.host = host;
    }
    if let Some(port) = env_parse::<u16>(ENV_PORT)? {
        config.port = port;
    }
    if let Some(provider) = env_string(ENV_BACKEND_PROVIDER) {
        config.synthesis.provider = provider;
    }
    if let Some(url) = env_string(ENV_BACKEND_URL) {
        config.synthesis.base_url = url;
    }
    if let Some(language) = env_string(ENV_LANGUAGE) {
        config.synthesis.language = language;
    }
    if let Some(timeout) = env_parse::<u64>(ENV_TIMEOUT_SECONDS)? {
        config.synthesis.timeout_seconds = timeout;
    }
    if let Some(max_chars) = env_parse::<usize>(ENV_MAX_CHUNK_CHARS)? {
        config.synthesis.max_chunk_chars = max_chars;
    }
    if let Some(scope) = env_string(ENV_REPEAT_SCOPE) {
        config.pipeline.repeat_scope = RepeatScope::from_str(&scope).ok_or_else(|| {
            format!("{ENV_REPEAT_SCOPE} must be one of word, phrase, preceding; got '{scope}'")
        })?;
    }
    if let Some(suffix) = env_string(ENV_STRESS_SUFFIX) {
        config.pipeline.stress_suffix = parse_bool(&suffix)
            .ok_or_else(|| format!("{ENV_STRESS_SUFFIX} must be true or false; got '{suffix}'"))?;
    }
    if let Some(preset) = env_string(ENV_DEFAULT_PRESET) {
        config.default_preset = preset;
    }

    Ok(config)
}

/// Reads a non-empty variable.
fn env_string(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(key) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid value for {key} '{raw}': {e}")),
        None => Ok(None),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
