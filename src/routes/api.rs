use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, prosody};
use crate::state::AppState;
use std::sync::Arc;

/// Create the API router
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(api::health_check))
        .route("/presets", get(prosody::list_presets))
        .route("/render", post(prosody::render_handler))
        .route("/speak", post(prosody::speak_handler))
        .layer(TraceLayer::new_for_http())
}
