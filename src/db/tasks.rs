use super::{missing_parent, Database, Result, StoreError};
use crate::models::{NewTask, ProjectTask};

impl Database {
    pub async fn get_task(&self, id: i64) -> Result<ProjectTask> {
        sqlx::query_as::<_, ProjectTask>(
            "SELECT id, title, status, assignee, priority, project_id FROM tasks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.get_pool())
        .await?
        .ok_or(StoreError::NotFound)
    }

    pub async fn get_tasks_by_project(&self, project_id: i64) -> Result<Vec<ProjectTask>> {
        let tasks = sqlx::query_as::<_, ProjectTask>(
            "SELECT id, title, status, assignee, priority, project_id FROM tasks WHERE project_id = ? ORDER BY id ASC",
        )
        .bind(project_id)
        .fetch_all(self.get_pool())
        .await?;

        Ok(tasks)
    }

    /// Add a task to a project. New tasks always start as "todo".
    pub async fn create_task(&self, project_id: i64, task: &NewTask) -> Result<ProjectTask> {
        let created = sqlx::query_as::<_, ProjectTask>(
            r#"
            INSERT INTO tasks (title, assignee, priority, project_id)
            VALUES (?, ?, ?, ?)
            RETURNING id, title, status, assignee, priority, project_id
            "#,
        )
        .bind(&task.title)
        .bind(&task.assignee)
        .bind(&task.priority)
        .bind(project_id)
        .fetch_one(self.get_pool())
        .await
        .map_err(missing_parent)?;

        tracing::debug!(task_id = created.id, project_id, "created task");
        Ok(created)
    }

    /// Overwrite a task's status with any string.
    pub async fn update_task_status(&self, id: i64, status: &str) -> Result<()> {
        let result = sqlx::query("UPDATE tasks SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(self.get_pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    pub async fn delete_task(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(self.get_pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
