//! Live preview endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::state::AppState;

/// Request body for POST /api/preview.
#[derive(Deserialize)]
pub(crate) struct PreviewRequest {
    /// SOW markdown source.
    #[serde(default)]
    pub(crate) markdown: String,
    /// Variable values for `{{placeholder}}` substitution.
    #[serde(default)]
    pub(crate) variables: HashMap<String, String>,
    /// Document template echoed back to the client.
    #[serde(default = "default_template")]
    pub(crate) template: String,
}

pub(crate) fn default_template() -> String {
    "modern".to_owned()
}

/// Response for POST /api/preview.
#[derive(Serialize)]
pub(crate) struct PreviewResponse {
    /// Rendered HTML.
    pub(crate) html: String,
    /// Document template name.
    pub(crate) template: String,
}

/// Handle POST /api/preview.
pub(crate) async fn preview(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, ServerError> {
    let html = state.renderer.render(&request.markdown, &request.variables);
    Ok(Json(PreviewResponse {
        html,
        template: request.template,
    }))
}
