//! Publishing endpoints.
//!
//! Published documents are immutable HTML snapshots reachable under
//! `/p/{id}` until they expire or are unpublished. Script tags are stripped
//! before the HTML is persisted; everything else was already escaped by the
//! renderer.

use std::sync::Arc;
use std::sync::LazyLock;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use regex::Regex;
use serde_json::json;
use sow_storage::PublishRequest;

use crate::error::ServerError;
use crate::state::AppState;

/// Matches `<script>...</script>` pairs and stray opening tags.
static SCRIPT_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script>|<script\b[^>]*>").unwrap()
});

/// Remove script tags from HTML bound for storage.
fn strip_script_tags(html: &str) -> String {
    SCRIPT_TAG_RE.replace_all(html, "").into_owned()
}

/// Handle POST /api/publish.
pub(crate) async fn publish(
    State(state): State<Arc<AppState>>,
    Json(mut request): Json<PublishRequest>,
) -> Result<impl IntoResponse, ServerError> {
    request.html = strip_script_tags(&request.html);
    let receipt = state.publish.create(&state.policy, request).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// Handle GET /p/{id}: the shareable read-only page.
pub(crate) async fn view_published(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let document = state.publish.get(&id).await?;
    state.publish.record_view(&id).await?;

    let title = sow_renderer::escape_html(&document.title);
    let page = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n\
         <main class=\"published-sow\">\n{}\n</main>\n</body>\n</html>\n",
        document.html
    );
    Ok(Html(page))
}

/// Handle GET /api/published/{id}: document metadata.
pub(crate) async fn published_meta(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let document = state.publish.get(&id).await?;
    Ok(Json(json!({
        "id": document.id,
        "title": document.title,
        "created_at": document.created_at,
        "expires_at": document.expires_at,
        "views": document.views,
        "revision": document.revision,
        "signed": document.signed,
        "jurisdiction": document.jurisdiction,
        "template": document.template,
        "page_size": document.page_size,
    })))
}

/// Handle DELETE /api/published/{id}.
pub(crate) async fn unpublish(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    state.publish.soft_delete(&id).await?;
    tracing::info!(id = %id, "Unpublished document");
    Ok(Json(json!({ "message": "Deleted" })))
}

/// Handle POST /api/cleanup: soft-delete all expired documents.
pub(crate) async fn cleanup(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let cleaned = state.publish.cleanup_expired().await?;
    tracing::info!(cleaned, "Cleaned up expired published documents");
    Ok(Json(json!({ "cleaned": cleaned })))
}
