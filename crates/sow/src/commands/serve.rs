//! `sow serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use sow_config::{CliSettings, Config};
use sow_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover sow.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database path (overrides config).
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// PDF render service URL (overrides config).
    #[arg(long)]
    pdf_renderer_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            db_path: self.db_path,
            pdf_renderer_url: self.pdf_renderer_url,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Database: {}",
            config.storage.resolved_db_path().display()
        ));

        if let Some(renderer_url) = &config.pdf.renderer_url {
            output.info(&format!("PDF renderer: {renderer_url}"));
        } else {
            output.info("PDF export: disabled (no renderer_url in config)");
        }

        let server_config = server_config_from_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        output.success("Server stopped");
        Ok(())
    }
}
