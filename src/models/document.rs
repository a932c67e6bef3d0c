use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub name: String,
    pub uploaded_by: String,
    pub timestamp: DateTime<Utc>,
    pub project_id: i64,
}

/// Metadata recorded for an upload. File contents are never sent.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct NewDocument {
    pub name: String,
    pub uploaded_by: String,
}
