use axum::{extract::State, http::StatusCode};

use super::{ApiError, ApiJson, ApiPath, AppState};

/// The body is a bare JSON string, e.g. `"completed"`.
pub async fn update_task_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(status): ApiJson<String>,
) -> Result<StatusCode, ApiError> {
    state.db.update_task_status(id, &status).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.db.delete_task(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
