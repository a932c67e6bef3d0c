use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use super::{ApiError, ApiJson, ApiPath, AppState};
use crate::models::{NewDocument, NewProject, NewTask, Project, ProjectUpdate};

fn project_location(id: i64) -> String {
    format!("/projects/{}", id)
}

pub async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(state.db.list_projects().await?))
}

pub async fn get_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Project>, ApiError> {
    Ok(Json(state.db.get_project(id).await?))
}

pub async fn create_project(
    State(state): State<AppState>,
    ApiJson(project): ApiJson<NewProject>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.db.create_project(&project).await?;
    tracing::info!(project_id = created.id, name = %created.name, "project created");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, project_location(created.id))],
        Json(created),
    ))
}

pub async fn update_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(project): ApiJson<ProjectUpdate>,
) -> Result<StatusCode, ApiError> {
    if id != project.id {
        return Err(ApiError::BadRequest(format!(
            "path id {} does not match body id {}",
            id, project.id
        )));
    }

    state.db.update_project(&project).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.db.delete_project(id).await?;
    tracing::info!(project_id = id, "project deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(task): ApiJson<NewTask>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.db.create_task(id, &task).await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, project_location(id))],
        Json(created),
    ))
}

pub async fn add_document(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(document): ApiJson<NewDocument>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.db.create_document(id, &document).await?;
    tracing::info!(project_id = id, name = %created.name, "document recorded");

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, project_location(id))],
        Json(created),
    ))
}
