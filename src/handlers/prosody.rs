use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::prosody::{FinalText, ParameterOverrides, ParameterSet};
use crate::errors::AppResult;
use crate::state::AppState;

const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Response header carrying the slow flag of a `/speak` call.
pub const SLOW_HEADER: &str = "x-prosody-slow";

/// Body of `/render` and `/speak`.
///
/// Override fields sit at the top level next to `text` and `preset`:
///
/// ```json
/// { "text": "sun rises", "preset": "Slow Chant", "repeat_count": 2 }
/// ```
///
/// Keys that match nothing land in `extra` and are logged, not rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct ProsodyRequest {
    pub text: String,
    #[serde(default)]
    pub preset: Option<String>,
    #[serde(flatten)]
    pub overrides: ParameterOverrides,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ProsodyRequest {
    /// Names of the keys that were not recognised.
    pub fn unknown_fields(&self) -> Vec<&str> {
        self.extra.keys().map(String::as_str).collect()
    }

    fn warn_unknown_fields(&self) {
        if !self.extra.is_empty() {
            warn!(fields = ?self.unknown_fields(), "Ignoring unknown request fields");
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderResponse {
    pub final_text: FinalText,
    pub slow: bool,
    pub tempo_bpm: u16,
}

#[derive(Debug, Clone, Serialize)]
pub struct PresetInfo {
    pub name: String,
    pub parameters: ParameterSet,
}

/// Lists every preset with its resolved parameters.
pub async fn list_presets(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<PresetInfo>>> {
    let presets = state
        .presets
        .iter()
        .map(|preset| -> AppResult<PresetInfo> {
            Ok(PresetInfo {
                name: preset.name.clone(),
                parameters: preset.parameters()?,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(presets))
}

/// Runs the pipeline only and returns the text that would be synthesized.
pub async fn render_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProsodyRequest>,
) -> AppResult<Json<RenderResponse>> {
    request.warn_unknown_fields();
    let params = state.resolve_parameters(request.preset.as_deref(), &request.overrides)?;
    let final_text = state.generator.render(&request.text, &params)?;

    debug!(chars = final_text.len(), "Rendered final text");

    Ok(Json(RenderResponse {
        final_text,
        slow: params.is_slow(),
        tempo_bpm: params.tempo_bpm,
    }))
}

/// Generates speech and returns the backend's audio unchanged.
pub async fn speak_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProsodyRequest>,
) -> AppResult<Response> {
    request.warn_unknown_fields();
    let params = state.resolve_parameters(request.preset.as_deref(), &request.overrides)?;
    let speech = state.generator.generate(&request.text, &params).await?;

    info!(
        provider = speech.provider,
        slow = speech.slow,
        bytes = speech.audio.len(),
        "Speak request completed"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(AUDIO_CONTENT_TYPE)),
            (
                header::HeaderName::from_static(SLOW_HEADER),
                HeaderValue::from_static(if speech.slow { "true" } else { "false" }),
            ),
        ],
        speech.audio,
    )
        .into_response())
}
