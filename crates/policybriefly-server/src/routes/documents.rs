//! Document intake: each route loads a document and opens a session for it.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use policybriefly_core::ExtractionError;
use policybriefly_ingest::sample::epa_sample;
use policybriefly_ingest::Document;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::session::Session;
use crate::state::AppState;

const PREVIEW_CHARS: usize = 1000;
const DEFAULT_TEXT_FILENAME: &str = "pasted.txt";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/documents", post(upload_document))
        .route("/documents/text", post(submit_text))
        .route("/documents/sample", post(load_sample))
}

#[derive(Debug, Deserialize)]
pub struct TextSubmission {
    pub text: String,
    #[serde(default)]
    pub filename: Option<String>,
}

/// Response body shared by every intake route.
pub fn session_created(session: &Session) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "sessionId": session.id,
            "document": session.document.info(),
            "preview": session.document.preview(PREVIEW_CHARS),
        })),
    )
}

fn open_session(state: &AppState, document: Document) -> (StatusCode, Json<serde_json::Value>) {
    let session = state.sessions.create(document);
    info!(
        "Session {} opened for {} ({} pages, {} chars)",
        session.id,
        session.document.filename(),
        session.document.pages(),
        session.document.char_count()
    );
    session_created(&session)
}

/// POST /api/documents — multipart upload, `file` field.
async fn upload_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let mime = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        // PDF parsing is CPU-bound; keep it off the async workers.
        let loader = state.loader;
        let document = tokio::task::spawn_blocking(move || {
            loader.load_bytes(&bytes, &filename, mime.as_deref())
        })
        .await
        .map_err(|e| ApiError::Internal(format!("Extraction task failed: {}", e)))??;
        return Ok(open_session(&state, document));
    }
    Err(ApiError::BadRequest("Missing multipart field 'file'".into()))
}

/// POST /api/documents/text — `{text, filename?}`.
async fn submit_text(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TextSubmission>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    if body.text.trim().is_empty() {
        return Err(ExtractionError::Empty.into());
    }
    let filename = body
        .filename
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(DEFAULT_TEXT_FILENAME);
    Ok(open_session(&state, Document::from_text(body.text, filename)))
}

/// POST /api/documents/sample — the bundled EPA rule.
async fn load_sample(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    open_session(&state, epa_sample())
}
