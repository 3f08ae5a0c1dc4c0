//! Template CRUD endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::json;
use sow_storage::{NewTemplate, Template, TemplateUpdate};

use crate::error::ServerError;
use crate::state::AppState;

/// Response wrapper for a single template.
#[derive(Serialize)]
struct TemplateResponse {
    template: Template,
}

/// Handle GET /api/templates.
pub(crate) async fn list_templates(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let templates = state.templates.list().await?;
    Ok(Json(json!({ "templates": templates })))
}

/// Handle POST /api/templates.
pub(crate) async fn create_template(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewTemplate>,
) -> Result<impl IntoResponse, ServerError> {
    let template = state.templates.create(new).await?;
    tracing::info!(id = template.id, name = %template.name, "Created template");
    Ok((StatusCode::CREATED, Json(TemplateResponse { template })))
}

/// Handle GET /api/templates/{id}.
pub(crate) async fn get_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let template = state.templates.get(id).await?;
    Ok(Json(TemplateResponse { template }))
}

/// Handle PUT /api/templates/{id}.
pub(crate) async fn update_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(update): Json<TemplateUpdate>,
) -> Result<impl IntoResponse, ServerError> {
    let template = state.templates.update(id, update).await?;
    Ok(Json(TemplateResponse { template }))
}

/// Handle DELETE /api/templates/{id}.
pub(crate) async fn delete_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    state.templates.delete(id).await?;
    tracing::info!(id, "Deleted template");
    Ok(Json(json!({ "message": "Deleted" })))
}

/// Handle POST /api/templates/{id}/duplicate.
pub(crate) async fn duplicate_template(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ServerError> {
    let template = state.templates.duplicate(id).await?;
    Ok((StatusCode::CREATED, Json(TemplateResponse { template })))
}
