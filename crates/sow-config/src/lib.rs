//! Configuration management for the SOW generator.
//!
//! Parses `sow.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sow.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override database path.
    pub db_path: Option<PathBuf>,
    /// Override the HTML-to-PDF renderer URL.
    pub pdf_renderer_url: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Publish policy configuration.
    pub publish: PublishConfig,
    /// PDF export configuration.
    pub pdf: PdfConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8750,
        }
    }
}

/// Storage configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SQLite database path (`~` is expanded).
    pub db_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: "data/sow.db".to_owned(),
        }
    }
}

impl StorageConfig {
    /// Database path with `~` and environment variables expanded.
    #[must_use]
    pub fn resolved_db_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.db_path).as_ref())
    }
}

/// Policy for published read-only documents.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Default link lifetime in days when the request does not specify one.
    pub default_expiry_days: i64,
    /// Jurisdictions accepted on publish.
    pub allowed_jurisdictions: Vec<String>,
    /// Document templates accepted on publish and export.
    pub allowed_templates: Vec<String>,
    /// Page sizes accepted on publish and export.
    pub allowed_page_sizes: Vec<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
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
            allowed_page_sizes: vec!["Letter".to_owned(), "A4".to_owned(), "Legal".to_owned()],
        }
    }
}

/// PDF export configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Base URL of the HTML-to-PDF render service.
    /// PDF export is disabled when unset.
    pub renderer_url: Option<String>,
    /// Primary brand color hex code used by document templates.
    pub brand_color: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            renderer_url: None,
            brand_color: "#2563eb".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sow.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist or parsing
    /// fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load and parse a config file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&contents)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(db_path) = &settings.db_path {
            self.storage.db_path = db_path.display().to_string();
        }
        if let Some(url) = &settings.pdf_renderer_url {
            self.pdf.renderer_url = Some(url.clone());
        }
    }

    /// Validate cross-field constraints.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.publish.default_expiry_days < 1 || self.publish.default_expiry_days > 365 {
            return Err(ConfigError::Validation(
                "publish.default_expiry_days must be between 1 and 365".to_owned(),
            ));
        }
        if let Some(url) = &self.pdf.renderer_url
            && !url.starts_with("http://")
            && !url.starts_with("https://")
        {
            return Err(ConfigError::Validation(
                "pdf.renderer_url must start with http:// or https://".to_owned(),
            ));
        }
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }
}
