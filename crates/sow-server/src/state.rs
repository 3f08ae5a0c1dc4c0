//! Application state.
//!
//! Shared state for all request handlers.

use sow_pdf::PdfEngine;
use sow_renderer::SowRenderer;
use sow_storage::{PublishPolicy, PublishStore, TemplateStore};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Markdown renderer for SOW documents.
    pub(crate) renderer: SowRenderer,
    /// Template store.
    pub(crate) templates: TemplateStore,
    /// Published-document store.
    pub(crate) publish: PublishStore,
    /// Publish validation policy.
    pub(crate) policy: PublishPolicy,
    /// PDF engine (`None` when no render service is configured).
    pub(crate) pdf: Option<PdfEngine>,
    /// Brand color applied to exported documents.
    pub(crate) brand_color: String,
}
