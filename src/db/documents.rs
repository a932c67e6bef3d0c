use chrono::Utc;

use super::{missing_parent, Database, Result, StoreError};
use crate::models::{Document, NewDocument};

impl Database {
    pub async fn get_document(&self, id: i64) -> Result<Document> {
        sqlx::query_as::<_, Document>(
            "SELECT id, name, uploaded_by, timestamp, project_id FROM documents WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.get_pool())
        .await?
        .ok_or(StoreError::NotFound)
    }

    pub async fn get_documents_by_project(&self, project_id: i64) -> Result<Vec<Document>> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT id, name, uploaded_by, timestamp, project_id FROM documents WHERE project_id = ? ORDER BY id ASC",
        )
        .bind(project_id)
        .fetch_all(self.get_pool())
        .await?;

        Ok(documents)
    }

    /// Record an uploaded document's metadata against a project.
    pub async fn create_document(&self, project_id: i64, document: &NewDocument) -> Result<Document> {
        let created = sqlx::query_as::<_, Document>(
            r#"
            INSERT INTO documents (name, uploaded_by, timestamp, project_id)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, uploaded_by, timestamp, project_id
            "#,
        )
        .bind(&document.name)
        .bind(&document.uploaded_by)
        .bind(Utc::now())
        .bind(project_id)
        .fetch_one(self.get_pool())
        .await
        .map_err(missing_parent)?;

        tracing::debug!(document_id = created.id, project_id, "recorded document");
        Ok(created)
    }
}
