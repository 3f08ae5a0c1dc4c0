//! Published-document lifecycle.
//!
//! Publishing creates a read-only snapshot of rendered HTML under a random
//! URL-safe id with an expiry date. Reads are access-logged via a view
//! counter; deletion is soft (the row stays, flagged) so links can be
//! invalidated without losing the audit trail.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::error::StorageError;

/// A published read-only document.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedDocument {
    /// URL-safe id.
    pub id: String,
    /// Document title.
    pub title: String,
    /// Sanitized rendered HTML.
    pub html: String,
    /// Creation time (RFC 3339).
    pub created_at: String,
    /// Expiry time (RFC 3339).
    pub expires_at: String,
    /// Soft-deletion flag.
    pub deleted: bool,
    /// Number of times the document has been viewed.
    pub views: i64,
    /// Optional document revision number (>= 1).
    pub revision: Option<i64>,
    /// Whether the document was signed before publishing.
    pub signed: bool,
    /// Legal jurisdiction tag.
    pub jurisdiction: String,
    /// Document template name.
    pub template: String,
    /// Page size name.
    pub page_size: String,
}

/// Request to publish a document.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishRequest {
    /// Document title.
    pub title: String,
    /// Rendered HTML (sanitized by the caller before storage).
    pub html: String,
    /// Link lifetime in days; clamped to 1..=365. Policy default when unset.
    #[serde(default)]
    pub expires_in_days: Option<i64>,
    /// Optional revision number (>= 1).
    #[serde(default)]
    pub revision: Option<i64>,
    /// Whether the document is signed.
    #[serde(default)]
    pub signed: bool,
    /// Require `signed` to be true.
    #[serde(default)]
    pub signed_only: bool,
    /// Legal jurisdiction tag.
    pub jurisdiction: String,
    /// Document template name.
    pub template: String,
    /// Page size name.
    pub page_size: String,
}

/// Receipt returned after a successful publish.
#[derive(Debug, Clone, Serialize)]
pub struct PublishReceipt {
    /// Id under which the document is reachable.
    pub publish_id: String,
    /// Expiry time (RFC 3339).
    pub expires_at: String,
    /// Revision number, when provided.
    pub revision: Option<i64>,
    /// Signed flag as persisted.
    pub signed: bool,
    /// Jurisdiction as persisted.
    pub jurisdiction: String,
    /// Template as persisted.
    pub template: String,
    /// Page size as persisted.
    pub page_size: String,
}

/// Validation policy for publish requests.
#[derive(Debug, Clone)]
pub struct PublishPolicy {
    /// Lifetime applied when the request does not specify one.
    pub default_expiry_days: i64,
    /// Accepted jurisdiction tags.
    pub allowed_jurisdictions: Vec<String>,
    /// Accepted document templates.
    pub allowed_templates: Vec<String>,
    /// Accepted page sizes.
    pub allowed_page_sizes: Vec<String>,
}

/// Manage published documents in the database.
#[derive(Clone)]
pub struct PublishStore {
    pool: SqlitePool,
}

impl PublishStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Validate and persist a published document.
    pub async fn create(
        &self,
        policy: &PublishPolicy,
        request: PublishRequest,
    ) -> Result<PublishReceipt, StorageError> {
        if request.html.is_empty() {
            return Err(StorageError::Validation("html is required".to_owned()));
        }
        if request.signed_only && !request.signed {
            return Err(StorageError::Validation(
                "signed_only publish requires signed=true".to_owned(),
            ));
        }
        if let Some(revision) = request.revision
            && revision < 1
        {
            return Err(StorageError::Validation(
                "revision must be >= 1 when provided".to_owned(),
            ));
        }
        if !policy.allowed_jurisdictions.contains(&request.jurisdiction) {
            return Err(StorageError::Validation("invalid jurisdiction".to_owned()));
        }
        if !policy.allowed_templates.contains(&request.template) {
            return Err(StorageError::Validation("invalid template".to_owned()));
        }
        if !policy.allowed_page_sizes.contains(&request.page_size) {
            return Err(StorageError::Validation("invalid page_size".to_owned()));
        }

        let expires_in_days = request
            .expires_in_days
            .unwrap_or(policy.default_expiry_days)
            .clamp(1, 365);
        let publish_id = Uuid::new_v4().simple().to_string();
        let now = Utc::now();
        let expires_at = now + Duration::days(expires_in_days);

        sqlx::query(
            "INSERT INTO published_docs
             (id, title, html, created_at, expires_at, revision, signed, jurisdiction, template, page_size)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&publish_id)
        .bind(&request.title)
        .bind(&request.html)
        .bind(now.to_rfc3339())
        .bind(expires_at.to_rfc3339())
        .bind(request.revision)
        .bind(request.signed)
        .bind(&request.jurisdiction)
        .bind(&request.template)
        .bind(&request.page_size)
        .execute(&self.pool)
        .await?;

        tracing::info!(id = %publish_id, expires_in_days, "Published document");

        Ok(PublishReceipt {
            publish_id,
            expires_at: expires_at.to_rfc3339(),
            revision: request.revision,
            signed: request.signed,
            jurisdiction: request.jurisdiction,
            template: request.template,
            page_size: request.page_size,
        })
    }

    /// Load a published document, enforcing non-deleted and non-expired
    /// constraints.
    pub async fn get(&self, id: &str) -> Result<PublishedDocument, StorageError> {
        let row = sqlx::query("SELECT * FROM published_docs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;
        let document = row_to_document(&row)?;

        if document.deleted {
            return Err(StorageError::NotFound);
        }
        let expires_at = DateTime::parse_from_rfc3339(&document.expires_at)?;
        if expires_at < Utc::now() {
            return Err(StorageError::Expired);
        }
        Ok(document)
    }

    /// Record an access to a published document.
    pub async fn record_view(&self, id: &str) -> Result<(), StorageError> {
        sqlx::query("UPDATE published_docs SET views = views + 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::debug!(id, "Recorded published-document view");
        Ok(())
    }

    /// Soft-delete a published document.
    pub async fn soft_delete(&self, id: &str) -> Result<(), StorageError> {
        let result = sqlx::query("UPDATE published_docs SET deleted = 1 WHERE id = ? AND deleted = 0")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    /// Flag all expired, still-visible documents as deleted.
    /// Returns the number of rows cleaned.
    pub async fn cleanup_expired(&self) -> Result<u64, StorageError> {
        let result =
            sqlx::query("UPDATE published_docs SET deleted = 1 WHERE deleted = 0 AND expires_at < ?")
                .bind(Utc::now().to_rfc3339())
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }
}

fn row_to_document(row: &SqliteRow) -> Result<PublishedDocument, StorageError> {
    Ok(PublishedDocument {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        html: row.try_get("html")?,
        created_at: row.try_get("created_at")?,
        expires_at: row.try_get("expires_at")?,
        deleted: row.try_get("deleted")?,
        views: row.try_get("views")?,
        revision: row.try_get("revision")?,
        signed: row.try_get("signed")?,
        jurisdiction: row.try_get("jurisdiction")?,
        template: row.try_get("template")?,
        page_size: row.try_get("page_size")?,
    })
}
