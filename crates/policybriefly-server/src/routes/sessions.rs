//! Session routes: inspect, analyze, export, discard.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use policybriefly_analyze::{export_filename, render, AnalysisOptions, AnalysisResult, ExportFormat};
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::session::Session;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions/{id}", get(get_session).delete(delete_session))
        .route("/sessions/{id}/analyze", post(analyze_session))
        .route("/sessions/{id}/export", get(export_session))
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: Option<String>,
}

fn find(state: &AppState, id: &str) -> Result<Session, ApiError> {
    state
        .sessions
        .get(id)
        .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))
}

/// Radar chart series: one `{dimension, value}` point per impact dimension,
/// values in percent.
pub fn chart_data(result: &AnalysisResult) -> serde_json::Value {
    let radar: Vec<serde_json::Value> = result
        .impact
        .as_ref()
        .map(|impact| {
            impact
                .radar_series()
                .into_iter()
                .map(|(dimension, value)| serde_json::json!({ "dimension": dimension, "value": value }))
                .collect()
        })
        .unwrap_or_default();
    serde_json::json!({ "radar": radar })
}

/// GET /api/sessions/{id}
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let session = find(&state, &id)?;
    Ok(Json(serde_json::json!({
        "sessionId": session.id,
        "createdAt": session.created_at,
        "document": session.document.info(),
        "result": session.result.as_deref(),
    })))
}

/// POST /api/sessions/{id}/analyze — body is `AnalysisOptions`.
async fn analyze_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(options): Json<AnalysisOptions>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let document = find(&state, &id)?.document;
    let result = state.pipeline.run(&document, &options).await;
    let result = state
        .sessions
        .set_result(&id, result)
        .ok_or_else(|| ApiError::SessionNotFound(id.clone()))?;

    Ok(Json(serde_json::json!({
        "sessionId": id,
        "chart": chart_data(&result),
        "result": &*result,
    })))
}

/// GET /api/sessions/{id}/export?format=text|json
async fn export_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let format = match query.format.as_deref() {
        None => ExportFormat::default(),
        Some(raw) => ExportFormat::parse(raw)
            .ok_or_else(|| ApiError::BadRequest(format!("Unknown export format: {}", raw)))?,
    };
    let result = find(&state, &id)?
        .result
        .ok_or_else(|| ApiError::NotAnalyzed(id.clone()))?;

    let body = render(&result, format)?;
    let filename = export_filename(format, result.analyzed_at);
    info!("Exporting session {} as {}", id, filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.mime().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    ))
}

/// DELETE /api/sessions/{id}
async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.remove(&id) {
        info!("Session {} discarded", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound(id))
    }
}
