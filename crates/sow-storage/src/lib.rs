//! SQLite persistence for the SOW generator.
//!
//! Two stores share one database:
//!
//! - [`TemplateStore`]: CRUD for reusable SOW templates (name, markdown,
//!   default variables).
//! - [`PublishStore`]: lifecycle of published read-only documents - creation
//!   with expiry, view counting, soft deletion, and cleanup of expired links.
//!
//! [`SowDb::init`] creates the schema and seeds sample templates on first
//! run. Timestamps are stored as RFC 3339 UTC strings.

mod error;
mod publish;
mod samples;
mod templates;

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

pub use error::StorageError;
pub use publish::{
    PublishPolicy, PublishReceipt, PublishRequest, PublishStore, PublishedDocument,
};
pub use templates::{NewTemplate, Template, TemplateStore, TemplateUpdate};

/// Handle to the SOW database.
#[derive(Clone)]
pub struct SowDb {
    pool: SqlitePool,
}

impl SowDb {
    /// Open (creating if missing) the database at `path`.
    pub async fn connect(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Open an in-memory database (used by tests).
    ///
    /// The pool is limited to a single connection; each SQLite in-memory
    /// connection is otherwise its own database.
    pub async fn connect_in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::new().in_memory(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Create the schema and seed sample templates when the store is empty.
    pub async fn init(&self) -> Result<(), StorageError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS templates (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT DEFAULT '',
                markdown TEXT NOT NULL,
                variables TEXT DEFAULT '{}',
                pdf_template TEXT DEFAULT 'modern',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS published_docs (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                html TEXT NOT NULL,
                created_at TEXT NOT NULL,
                expires_at TEXT NOT NULL,
                deleted INTEGER NOT NULL DEFAULT 0,
                views INTEGER NOT NULL DEFAULT 0,
                revision INTEGER,
                signed INTEGER NOT NULL DEFAULT 0,
                jurisdiction TEXT NOT NULL DEFAULT 'US_BASE',
                template TEXT NOT NULL DEFAULT 'modern',
                page_size TEXT NOT NULL DEFAULT 'Letter'
            )",
        )
        .execute(&self.pool)
        .await?;

        let count: i64 = sqlx::query("SELECT COUNT(*) AS n FROM templates")
            .fetch_one(&self.pool)
            .await?
            .try_get("n")?;
        if count == 0 {
            samples::seed(&self.pool).await?;
            tracing::info!("Seeded sample SOW templates");
        }

        Ok(())
    }

    /// Template store backed by this database.
    #[must_use]
    pub fn templates(&self) -> TemplateStore {
        TemplateStore::new(self.pool.clone())
    }

    /// Published-document store backed by this database.
    #[must_use]
    pub fn publish(&self) -> PublishStore {
        PublishStore::new(self.pool.clone())
    }

    /// Underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
