//! PDF export endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;
use sow_pdf::DocumentOptions;

use crate::error::ServerError;
use crate::state::AppState;

/// Request body for POST /api/export.
#[derive(Deserialize)]
pub(crate) struct ExportRequest {
    /// SOW markdown source.
    #[serde(default)]
    markdown: String,
    /// Variable values for `{{placeholder}}` substitution.
    #[serde(default)]
    variables: HashMap<String, String>,
    /// Document template name.
    #[serde(default = "super::preview::default_template")]
    template: String,
    /// Page size name.
    #[serde(default = "default_page_size")]
    page_size: String,
}

fn default_page_size() -> String {
    "Letter".to_owned()
}

/// Handle POST /api/export.
///
/// Renders the markdown, converts it through the PDF render service, and
/// streams the result as an attachment named after the `project_name`
/// variable.
pub(crate) async fn export_pdf(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExportRequest>,
) -> Result<impl IntoResponse, ServerError> {
    if state.pdf.is_none() {
        return Err(ServerError::PdfUnavailable);
    }

    let filename = attachment_filename(&request.variables);
    let html = state.renderer.render(&request.markdown, &request.variables);

    // Unknown template or page size names fall back to the defaults, in
    // keeping with the renderer's degrade-instead-of-fail behavior.
    let options = DocumentOptions {
        template: request.template.parse().unwrap_or_default(),
        page_size: request.page_size.parse().unwrap_or_default(),
        brand_color: state.brand_color.clone(),
        logo_url: None,
    };

    // ureq is blocking; keep it off the async runtime threads.
    let shared = Arc::clone(&state);
    let pdf_bytes = tokio::task::spawn_blocking(move || {
        shared
            .pdf
            .as_ref()
            .ok_or(ServerError::PdfUnavailable)?
            .render(&html, &options)
            .map_err(ServerError::from)
    })
    .await
    .map_err(|e| ServerError::Internal(e.to_string()))??;

    tracing::info!(filename = %filename, bytes = pdf_bytes.len(), "Exported PDF");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        pdf_bytes,
    ))
}

/// Attachment filename derived from the `project_name` variable.
fn attachment_filename(variables: &HashMap<String, String>) -> String {
    let project = variables
        .get("project_name")
        .map_or("proposal", String::as_str);
    format!("{}_SOW.pdf", project.replace(' ', "_"))
}
