use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use super::{Database, Result, StoreError};
use crate::models::{Document, NewProject, Project, ProjectTask, ProjectUpdate};

// Decimals are stored as TEXT with two fractional digits.
fn decimal_column(row: &SqliteRow, column: &str) -> std::result::Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    raw.parse::<Decimal>().map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn decimal_text(value: Decimal) -> String {
    value.round_dp(2).to_string()
}

impl<'r> FromRow<'r, SqliteRow> for Project {
    fn from_row(row: &'r SqliteRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            budget: decimal_column(row, "budget")?,
            spent: decimal_column(row, "spent")?,
            progress: row.try_get("progress")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            tasks: Vec::new(),
            documents: Vec::new(),
        })
    }
}

impl Database {
    /// All projects, oldest first, with their tasks and documents attached.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let mut projects = sqlx::query_as::<_, Project>(
            "SELECT id, name, budget, spent, progress, status, created_at FROM projects ORDER BY id ASC",
        )
        .fetch_all(self.get_pool())
        .await?;

        let tasks = sqlx::query_as::<_, ProjectTask>(
            "SELECT id, title, status, assignee, priority, project_id FROM tasks ORDER BY id ASC",
        )
        .fetch_all(self.get_pool())
        .await?;

        let documents = sqlx::query_as::<_, Document>(
            "SELECT id, name, uploaded_by, timestamp, project_id FROM documents ORDER BY id ASC",
        )
        .fetch_all(self.get_pool())
        .await?;

        let mut tasks_by_project: HashMap<i64, Vec<ProjectTask>> = HashMap::new();
        for task in tasks {
            tasks_by_project.entry(task.project_id).or_default().push(task);
        }

        let mut documents_by_project: HashMap<i64, Vec<Document>> = HashMap::new();
        for document in documents {
            documents_by_project
                .entry(document.project_id)
                .or_default()
                .push(document);
        }

        for project in &mut projects {
            project.tasks = tasks_by_project.remove(&project.id).unwrap_or_default();
            project.documents = documents_by_project.remove(&project.id).unwrap_or_default();
        }

        Ok(projects)
    }

    pub async fn get_project(&self, id: i64) -> Result<Project> {
        let mut project = sqlx::query_as::<_, Project>(
            "SELECT id, name, budget, spent, progress, status, created_at FROM projects WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.get_pool())
        .await?
        .ok_or(StoreError::NotFound)?;

        project.tasks = self.get_tasks_by_project(id).await?;
        project.documents = self.get_documents_by_project(id).await?;

        Ok(project)
    }

    pub async fn project_exists(&self, id: i64) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE id = ?")
            .bind(id)
            .fetch_one(self.get_pool())
            .await?;

        Ok(count > 0)
    }

    /// Insert a project and return it as stored, with generated id and
    /// creation time.
    pub async fn create_project(&self, project: &NewProject) -> Result<Project> {
        let created = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, budget, spent, progress, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, name, budget, spent, progress, status, created_at
            "#,
        )
        .bind(&project.name)
        .bind(decimal_text(project.budget))
        .bind(decimal_text(project.spent))
        .bind(project.progress)
        .bind(&project.status)
        .bind(Utc::now())
        .fetch_one(self.get_pool())
        .await?;

        tracing::debug!(project_id = created.id, "created project");
        Ok(created)
    }

    /// Overwrite every scalar field of an existing project.
    pub async fn update_project(&self, project: &ProjectUpdate) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE projects
            SET name = ?, budget = ?, spent = ?, progress = ?, status = ?,
                created_at = COALESCE(?, created_at)
            WHERE id = ?
            "#,
        )
        .bind(&project.name)
        .bind(decimal_text(project.budget))
        .bind(decimal_text(project.spent))
        .bind(project.progress)
        .bind(&project.status)
        .bind(project.created_at)
        .bind(project.id)
        .execute(self.get_pool())
        .await?;

        if result.rows_affected() == 0 {
            // No row written. A row that still exists lost a concurrent write.
            return if self.project_exists(project.id).await? {
                Err(StoreError::Conflict)
            } else {
                Err(StoreError::NotFound)
            };
        }

        Ok(())
    }

    /// Delete a project. Its tasks and documents go with it.
    pub async fn delete_project(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(self.get_pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        tracing::debug!(project_id = id, "deleted project");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewDocument, NewTask, DEFAULT_PROJECT_STATUS};

    fn bridge() -> NewProject {
        NewProject {
            name: "Bridge".to_string(),
            budget: Decimal::new(150_050, 2),
            spent: Decimal::new(250, 1),
            progress: 30,
            status: "paused".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_get_preserves_fields() {
        let db = Database::in_memory().await.unwrap();

        let created = db.create_project(&bridge()).await.unwrap();
        let fetched = db.get_project(created.id).await.unwrap();

        assert!(created.id > 0);
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Bridge");
        assert_eq!(fetched.budget, Decimal::new(150_050, 2));
        assert_eq!(fetched.spent, Decimal::new(25, 0));
        assert_eq!(fetched.progress, 30);
        assert_eq!(fetched.status, "paused");
        assert!(fetched.tasks.is_empty());
        assert!(fetched.documents.is_empty());
    }

    #[tokio::test]
    async fn budget_is_rounded_to_cents() {
        let db = Database::in_memory().await.unwrap();
        let mut draft = bridge();
        draft.budget = Decimal::new(1_234_567, 4);

        let created = db.create_project(&draft).await.unwrap();

        assert_eq!(created.budget, Decimal::new(12_346, 2));
    }

    #[tokio::test]
    async fn get_missing_project_is_not_found() {
        let db = Database::in_memory().await.unwrap();

        let err = db.get_project(42).await.unwrap_err();

        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn list_attaches_children_to_their_project() {
        let db = Database::in_memory().await.unwrap();
        let first = db.create_project(&bridge()).await.unwrap();
        let second = db.create_project(&NewProject::default()).await.unwrap();

        db.create_task(first.id, &NewTask { title: "Survey".into(), assignee: "amy".into(), ..Default::default() })
            .await
            .unwrap();
        db.create_document(second.id, &NewDocument { name: "plan.pdf".into(), uploaded_by: "bo".into() })
            .await
            .unwrap();

        let projects = db.list_projects().await.unwrap();

        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].tasks.len(), 1);
        assert!(projects[0].documents.is_empty());
        assert!(projects[1].tasks.is_empty());
        assert_eq!(projects[1].documents[0].name, "plan.pdf");
        assert_eq!(projects[1].status, DEFAULT_PROJECT_STATUS);
    }

    #[tokio::test]
    async fn update_overwrites_fields_and_keeps_created_at() {
        let db = Database::in_memory().await.unwrap();
        let created = db.create_project(&bridge()).await.unwrap();

        let mut update = ProjectUpdate::from(&created);
        update.name = "Tunnel".to_string();
        update.progress = 250;
        update.status = "anything goes".to_string();
        update.created_at = None;
        db.update_project(&update).await.unwrap();

        let fetched = db.get_project(created.id).await.unwrap();
        assert_eq!(fetched.name, "Tunnel");
        assert_eq!(fetched.progress, 250);
        assert_eq!(fetched.status, "anything goes");
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn update_missing_project_is_not_found() {
        let db = Database::in_memory().await.unwrap();
        let created = db.create_project(&bridge()).await.unwrap();
        db.delete_project(created.id).await.unwrap();

        let err = db.update_project(&ProjectUpdate::from(&created)).await.unwrap_err();

        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn delete_cascades_to_tasks_and_documents() {
        let db = Database::in_memory().await.unwrap();
        let project = db.create_project(&bridge()).await.unwrap();
        let task = db
            .create_task(project.id, &NewTask { title: "Pour".into(), assignee: "cy".into(), ..Default::default() })
            .await
            .unwrap();
        let document = db
            .create_document(project.id, &NewDocument { name: "notes.txt".into(), uploaded_by: "cy".into() })
            .await
            .unwrap();

        db.delete_project(project.id).await.unwrap();

        assert!(matches!(db.get_task(task.id).await, Err(StoreError::NotFound)));
        assert!(matches!(db.get_document(document.id).await, Err(StoreError::NotFound)));
        assert!(!db.project_exists(project.id).await.unwrap());
    }

    #[tokio::test]
    async fn delete_missing_project_is_not_found() {
        let db = Database::in_memory().await.unwrap();

        assert!(matches!(db.delete_project(7).await, Err(StoreError::NotFound)));
    }
}
