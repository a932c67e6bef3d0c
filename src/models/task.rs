use serde::{Deserialize, Serialize};

pub const DEFAULT_TASK_STATUS: &str = "todo";
pub const DEFAULT_PRIORITY: &str = "medium";

/// Values offered by the UI. The server accepts any string.
pub const TASK_STATUSES: [&str; 3] = ["todo", "in progress", "completed"];
pub const PRIORITIES: [&str; 3] = ["low", "medium", "high"];

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTask {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub assignee: String,
    pub priority: String,
    pub project_id: i64,
}

/// Body of `POST /projects/{id}/tasks`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTask {
    pub title: String,
    pub assignee: String,
    pub priority: String,
}

impl Default for NewTask {
    fn default() -> Self {
        Self {
            title: String::new(),
            assignee: String::new(),
            priority: DEFAULT_PRIORITY.to_string(),
        }
    }
}
