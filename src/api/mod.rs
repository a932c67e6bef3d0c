//! REST surface over the project store.
//!
//! Two resource groups: `/projects` (with nested tasks and documents) and
//! `/tasks`. Handlers are thin; every rule about what exists lives in
//! [`crate::db`].

pub mod projects;
pub mod tasks;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::json;
use thiserror::Error;

use crate::db::{Database, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("the record was modified by another request")]
    Conflict,

    #[error("internal server error")]
    Internal(#[source] StoreError),
}

/// `Json` whose rejections use the JSON error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Path` whose rejections use the JSON error body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Conflict => ApiError::Conflict,
            other => ApiError::Internal(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(source) = &self {
            tracing::error!(error = %source, "request failed");
        }

        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// All routes, ready to be served or nested.
pub fn router(db: Database) -> Router {
    Router::new()
        .route(
            "/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/projects/:id",
            get(projects::get_project)
                .put(projects::update_project)
                .delete(projects::delete_project),
        )
        .route("/projects/:id/tasks", post(projects::add_task))
        .route("/projects/:id/documents", post(projects::add_document))
        .route("/tasks/:id/status", put(tasks::update_task_status))
        .route("/tasks/:id", axum::routing::delete(tasks::delete_task))
        .with_state(AppState { db })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_status_codes() {
        assert_eq!(ApiError::from(StoreError::NotFound).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(StoreError::Conflict).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::from(StoreError::Database(sqlx::Error::RowNotFound)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = ApiError::from(StoreError::Database(sqlx::Error::PoolTimedOut));

        assert_eq!(err.to_string(), "internal server error");
    }
}
