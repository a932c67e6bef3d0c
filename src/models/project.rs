use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Document, ProjectTask};

pub const DEFAULT_PROJECT_STATUS: &str = "in progress";

/// Values offered by the UI. The server accepts any string.
pub const PROJECT_STATUSES: [&str; 4] = ["preparing", "in progress", "paused", "completed"];

fn default_status() -> String {
    DEFAULT_PROJECT_STATUS.to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub budget: Decimal,
    pub spent: Decimal,
    pub progress: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tasks: Vec<ProjectTask>,
    #[serde(default)]
    pub documents: Vec<Document>,
}

/// Body of `POST /projects`. Missing fields take the same defaults a fresh
/// project row gets.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub budget: Decimal,
    #[serde(default)]
    pub spent: Decimal,
    #[serde(default)]
    pub progress: i32,
    #[serde(default = "default_status")]
    pub status: String,
}

impl Default for NewProject {
    fn default() -> Self {
        Self {
            name: String::new(),
            budget: Decimal::ZERO,
            spent: Decimal::ZERO,
            progress: 0,
            status: default_status(),
        }
    }
}

/// Body of `PUT /projects/{id}`: the full scalar state of a project.
///
/// `created_at` is kept as stored when the body leaves it out. Any `tasks` or
/// `documents` arrays in the body are ignored. A missing `id` reads as 0.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub budget: Decimal,
    #[serde(default)]
    pub spent: Decimal,
    #[serde(default)]
    pub progress: i32,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<&Project> for ProjectUpdate {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: project.name.clone(),
            budget: project.budget,
            spent: project.spent,
            progress: project.progress,
            status: project.status.clone(),
            created_at: Some(project.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_project_defaults_apply_to_missing_fields() {
        let draft: NewProject = serde_json::from_str(r#"{"name":"Bridge","budget":1200.5}"#).unwrap();

        assert_eq!(draft.name, "Bridge");
        assert_eq!(draft.budget, Decimal::new(12005, 1));
        assert_eq!(draft.spent, Decimal::ZERO);
        assert_eq!(draft.progress, 0);
        assert_eq!(draft.status, DEFAULT_PROJECT_STATUS);
    }

    #[test]
    fn update_ignores_child_collections() {
        let body = r#"{
            "id": 3,
            "name": "Bridge",
            "budget": 10,
            "spent": 2,
            "progress": 40,
            "status": "paused",
            "tasks": [{"id": 1}],
            "documents": []
        }"#;
        let update: ProjectUpdate = serde_json::from_str(body).unwrap();

        assert_eq!(update.id, 3);
        assert_eq!(update.status, "paused");
        assert_eq!(update.created_at, None);
    }

    #[test]
    fn update_without_id_reads_as_zero() {
        let update: ProjectUpdate = serde_json::from_str(r#"{"name": "Bridge"}"#).unwrap();

        assert_eq!(update.id, 0);
    }

    #[test]
    fn project_serializes_camel_case() {
        let project = Project {
            id: 1,
            name: "Bridge".to_string(),
            budget: Decimal::new(100, 0),
            spent: Decimal::ZERO,
            progress: 5,
            status: DEFAULT_PROJECT_STATUS.to_string(),
            created_at: Utc::now(),
            tasks: Vec::new(),
            documents: Vec::new(),
        };
        let value = serde_json::to_value(&project).unwrap();

        assert!(value.get("createdAt").is_some());
        assert_eq!(value["budget"], serde_json::json!(100.0));
    }
}
