//! PDF export via an external HTML to PDF render service.
//!
//! [`PdfEngine`] assembles a complete HTML document (document template,
//! brand color, `@page` size rule) and POSTs it to the configured render
//! service, returning the PDF bytes. The engine holds a reusable
//! [`ureq::Agent`] for connection pooling.

mod document;

use std::time::Duration;

use ureq::Agent;

pub use document::{DocumentOptions, DocumentTemplate, PageSize, build_document};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// PDF conversion error.
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// Transport-level failure talking to the render service.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The render service answered with an error status.
    #[error("render service returned HTTP {status}: {body}")]
    UnexpectedStatus {
        /// Response status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// Failed reading the response body.
    #[error("I/O error: {0}")]
    Io(String),

    /// The response body is not a PDF document.
    #[error("render service returned invalid PDF data")]
    InvalidPdf,
}

/// Client for the external HTML to PDF render service.
pub struct PdfEngine {
    agent: Agent,
    base_url: String,
}

impl PdfEngine {
    /// Create an engine for the service at `base_url` with the default
    /// timeout.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create an engine with an explicit request timeout.
    #[must_use]
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Convert a pre-rendered SOW body into a PDF.
    pub fn render(&self, body: &str, options: &DocumentOptions) -> Result<Vec<u8>, PdfError> {
        let html = build_document(body, options);
        self.convert(&html)
    }

    /// POST a complete HTML document to the render service and return the
    /// PDF bytes.
    pub fn convert(&self, html: &str) -> Result<Vec<u8>, PdfError> {
        let url = format!("{}/convert", self.base_url);
        tracing::debug!(url = %url, bytes = html.len(), "Requesting PDF conversion");

        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "text/html")
            .send(html.as_bytes())
            .map_err(|e| PdfError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| String::from("(unable to read error body)"));
            return Err(PdfError::UnexpectedStatus {
                status,
                body: error_body,
            });
        }

        let data = body.read_to_vec().map_err(|e| PdfError::Io(e.to_string()))?;
        if !is_pdf(&data) {
            return Err(PdfError::InvalidPdf);
        }
        Ok(data)
    }
}

/// Check the PDF magic bytes.
fn is_pdf(data: &[u8]) -> bool {
    data.starts_with(b"%PDF-")
}
