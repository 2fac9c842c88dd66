//! Liveness and configuration summary.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

/// GET /api/health
async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let settings = state.pipeline.summarizer().settings();
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": settings.provider.to_string(),
        "model": settings.model,
        "remoteConfigured": state.config.has_credential(),
        "sessions": state.sessions.len(),
        "maxSessions": state.sessions.capacity(),
    }))
}
