//! HTTP server for the SOW generator.
//!
//! Serves the JSON API used by the editor frontend:
//! - `POST /api/preview` and `POST /api/export` render SOW markdown
//! - `/api/templates` CRUD for saved templates
//! - `/api/publish` and `/p/{id}` for shareable read-only documents
//!
//! # Quick Start
//!
//! ```ignore
//! use sow_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     run_server(config).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use sow_pdf::PdfEngine;
use sow_renderer::SowRenderer;
use sow_storage::{PublishPolicy, SowDb};
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// SQLite database path.
    pub db_path: PathBuf,
    /// PDF render service URL (`None` disables export).
    pub pdf_renderer_url: Option<String>,
    /// Brand color applied to exported documents.
    pub brand_color: String,
    /// Publish validation policy.
    pub publish_policy: PublishPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8750,
            db_path: PathBuf::from("data/sow.db"),
            pdf_renderer_url: None,
            brand_color: "#2563eb".to_owned(),
            publish_policy: PublishPolicy {
                default_expiry_days: 14,
                allowed_jurisdictions: vec![
                    "US_BASE".to_owned(),
                    "US_NY".to_owned(),
                    "US_CA".to_owned(),
                    "EU_BASE".to_owned(),
                ],
                allowed_templates: vec![
                    "modern".to_owned(),
                    "classic".to_owned(),
                    "minimal".to_owned(),
                ],
                allowed_page_sizes: vec![
                    "Letter".to_owned(),
                    "A4".to_owned(),
                    "Legal".to_owned(),
                ],
            },
        }
    }
}

/// Run the server.
///
/// Opens the database, initializes the schema, and serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the listener fails
/// to bind.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db = SowDb::connect(&config.db_path).await?;
    db.init().await?;

    let pdf = config
        .pdf_renderer_url
        .as_deref()
        .map(PdfEngine::new);

    let state = Arc::new(AppState {
        renderer: SowRenderer::new(),
        templates: db.templates(),
        publish: db.publish(),
        policy: config.publish_policy.clone(),
        pdf,
        brand_color: config.brand_color.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from the loaded SOW config.
#[must_use]
pub fn server_config_from_config(config: &sow_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        db_path: config.storage.resolved_db_path(),
        pdf_renderer_url: config.pdf.renderer_url.clone(),
        brand_color: config.pdf.brand_color.clone(),
        publish_policy: PublishPolicy {
            default_expiry_days: config.publish.default_expiry_days,
            allowed_jurisdictions: config.publish.allowed_jurisdictions.clone(),
            allowed_templates: config.publish.allowed_templates.clone(),
            allowed_page_sizes: config.publish.allowed_page_sizes.clone(),
        },
    }
}
