//! HTTP client used by the terminal UI.
//!
//! Every call logs its own failure. `get_projects` swallows errors into an
//! empty list; mutations hand the error back so the caller can abandon the
//! action.

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Document, NewDocument, NewProject, NewTask, Project, ProjectTask};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    uploader: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, uploader: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            uploader: uploader.into(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn uploader(&self) -> &str {
        &self.uploader
    }

    /// The full project list, or an empty one if anything went wrong.
    pub async fn get_projects(&self) -> Vec<Project> {
        match send_json(self.http.get(self.url("/projects"))).await {
            Ok(projects) => projects,
            Err(err) => {
                log::error!("Failed to load projects: {}", err);
                Vec::new()
            }
        }
    }

    pub async fn create_project(&self, project: &NewProject) -> Result<Project> {
        let request = self.http.post(self.url("/projects")).json(project);
        logged(send_json(request).await, "Failed to create project")
    }

    pub async fn add_task(&self, project_id: i64, task: &NewTask) -> Result<ProjectTask> {
        let request = self
            .http
            .post(self.url(&format!("/projects/{}/tasks", project_id)))
            .json(task);
        logged(send_json(request).await, "Failed to add task")
    }

    /// Record a document by name only; the file itself is never read or sent.
    pub async fn upload_document(&self, project_id: i64, file_name: &str) -> Result<Document> {
        let document = NewDocument {
            name: file_name.to_string(),
            uploaded_by: self.uploader.clone(),
        };
        let request = self
            .http
            .post(self.url(&format!("/projects/{}/documents", project_id)))
            .json(&document);
        logged(send_json(request).await, "Failed to upload document")
    }

    pub async fn update_task_status(&self, task_id: i64, status: &str) -> Result<()> {
        let request = self
            .http
            .put(self.url(&format!("/tasks/{}/status", task_id)))
            .json(status);
        logged(send(request).await.map(|_| ()), "Failed to update task status")
    }

    pub async fn delete_task(&self, task_id: i64) -> Result<()> {
        let request = self.http.delete(self.url(&format!("/tasks/{}", task_id)));
        logged(send(request).await.map(|_| ()), "Failed to delete task")
    }

    pub async fn delete_project(&self, project_id: i64) -> Result<()> {
        let request = self.http.delete(self.url(&format!("/projects/{}", project_id)));
        logged(send(request).await.map(|_| ()), "Failed to delete project")
    }
}

async fn send(request: RequestBuilder) -> Result<reqwest::Response> {
    let response = request.send().await?;
    checked(response)
}

async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = send(request).await?;
    Ok(response.json().await?)
}

fn checked(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ClientError::Status(response.status()))
    }
}

fn logged<T>(result: Result<T>, context: &str) -> Result<T> {
    if let Err(err) = &result {
        log::error!("{}: {}", context, err);
    }
    result
}
