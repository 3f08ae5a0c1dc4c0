//! Template CRUD operations.

use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::error::StorageError;

/// A stored SOW template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Row id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Short description shown in the gallery.
    pub description: String,
    /// SOW markdown source.
    pub markdown: String,
    /// Default variable values for `{{placeholder}}` substitution.
    pub variables: HashMap<String, String>,
    /// Document template used for PDF export.
    pub pdf_template: String,
    /// Creation time (RFC 3339).
    pub created_at: String,
    /// Last update time (RFC 3339).
    pub updated_at: String,
}

/// Fields for creating a template.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTemplate {
    /// Display name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// SOW markdown source.
    pub markdown: String,
    /// Default variable values.
    #[serde(default)]
    pub variables: HashMap<String, String>,
    /// Document template for PDF export.
    #[serde(default)]
    pub pdf_template: Option<String>,
}

/// Partial update; `None` fields keep their existing values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateUpdate {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New markdown source.
    pub markdown: Option<String>,
    /// New default variables (replaces the whole mapping).
    pub variables: Option<HashMap<String, String>>,
    /// New PDF document template.
    pub pdf_template: Option<String>,
}

/// Manage SOW templates in the database.
#[derive(Clone)]
pub struct TemplateStore {
    pool: SqlitePool,
}

impl TemplateStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Return all templates, most recently updated first.
    pub async fn list(&self) -> Result<Vec<Template>, StorageError> {
        let rows = sqlx::query("SELECT * FROM templates ORDER BY updated_at DESC")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_template).collect()
    }

    /// Get a single template by id.
    pub async fn get(&self, id: i64) -> Result<Template, StorageError> {
        let row = sqlx::query("SELECT * FROM templates WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;
        row_to_template(&row)
    }

    /// Create a new template.
    pub async fn create(&self, new: NewTemplate) -> Result<Template, StorageError> {
        let now = Utc::now().to_rfc3339();
        let variables = serde_json::to_string(&new.variables)?;
        let pdf_template = new.pdf_template.unwrap_or_else(|| "modern".to_owned());

        let result = sqlx::query(
            "INSERT INTO templates (name, description, markdown, variables, pdf_template, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.markdown)
        .bind(&variables)
        .bind(&pdf_template)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    /// Update an existing template; missing fields keep their values.
    pub async fn update(&self, id: i64, update: TemplateUpdate) -> Result<Template, StorageError> {
        let existing = self.get(id).await?;
        let now = Utc::now().to_rfc3339();

        let variables = update.variables.unwrap_or(existing.variables);
        let variables_json = serde_json::to_string(&variables)?;

        sqlx::query(
            "UPDATE templates
             SET name = ?, description = ?, markdown = ?, variables = ?, pdf_template = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(update.name.unwrap_or(existing.name))
        .bind(update.description.unwrap_or(existing.description))
        .bind(update.markdown.unwrap_or(existing.markdown))
        .bind(&variables_json)
        .bind(update.pdf_template.unwrap_or(existing.pdf_template))
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get(id).await
    }

    /// Delete a template.
    pub async fn delete(&self, id: i64) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM templates WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    /// Duplicate an existing template under a " (Copy)" name.
    pub async fn duplicate(&self, id: i64) -> Result<Template, StorageError> {
        let existing = self.get(id).await?;
        self.create(NewTemplate {
            name: format!("{} (Copy)", existing.name),
            description: existing.description,
            markdown: existing.markdown,
            variables: existing.variables,
            pdf_template: Some(existing.pdf_template),
        })
        .await
    }
}

fn row_to_template(row: &SqliteRow) -> Result<Template, StorageError> {
    let variables_json: String = row.try_get("variables")?;
    Ok(Template {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        markdown: row.try_get("markdown")?,
        variables: serde_json::from_str(&variables_json)?,
        pdf_template: row.try_get("pdf_template")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SowDb;
    use pretty_assertions::assert_eq;

    async fn store() -> TemplateStore {
        let db = SowDb::connect_in_memory().await.expect("connect");
        db.init().await.expect("init");
        db.templates()
    }

    fn sample() -> NewTemplate {
        NewTemplate {
            name: "Web SOW".to_owned(),
            description: "desc".to_owned(),
            markdown: "# {{project_name}}".to_owned(),
            variables: HashMap::from([("project_name".to_owned(), "Site".to_owned())]),
            pdf_template: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let store = store().await;
        let created = store.create(sample()).await.expect("create");
        let fetched = store.get(created.id).await.expect("get");
        assert_eq!(fetched.name, "Web SOW");
        assert_eq!(
            fetched.variables.get("project_name").map(String::as_str),
            Some("Site")
        );
        assert_eq!(fetched.pdf_template, "modern");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = store().await;
        assert!(matches!(store.get(99999).await, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_keeps_unset_fields() {
        let store = store().await;
        let created = store.create(sample()).await.expect("create");
        let updated = store
            .update(
                created.id,
                TemplateUpdate {
                    name: Some("Renamed".to_owned()),
                    ..TemplateUpdate::default()
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.markdown, "# {{project_name}}");
        assert_eq!(updated.description, "desc");
    }

    #[tokio::test]
    async fn test_delete() {
        let store = store().await;
        let created = store.create(sample()).await.expect("create");
        store.delete(created.id).await.expect("delete");
        assert!(matches!(
            store.get(created.id).await,
            Err(StorageError::NotFound)
        ));
        assert!(matches!(
            store.delete(created.id).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_appends_copy_suffix() {
        let store = store().await;
        let created = store.create(sample()).await.expect("create");
        let copy = store.duplicate(created.id).await.expect("duplicate");
        assert_eq!(copy.name, "Web SOW (Copy)");
        assert_eq!(copy.markdown, created.markdown);
        assert_ne!(copy.id, created.id);
    }

    #[tokio::test]
    async fn test_seeded_templates_present() {
        let store = store().await;
        let all = store.list().await.expect("list");
        assert!(!all.is_empty());
    }
}
