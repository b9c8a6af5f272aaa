use axum::extract::{Extension, Path, State};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use super::owned_project;
use crate::database::models::{NewProject, Project};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, RequestSchema, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProjectRequest {
    #[validate(length(min = 1, max = 50, message = "Project name must be between 1 and 50 characters"))]
    pub project_name: String,
    #[validate(length(max = 255, message = "Description must be at most 255 characters"))]
    pub project_description: Option<String>,
}

impl RequestSchema for CreateProjectRequest {}

/// POST /space/create-space - Create a project owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<CreateProjectRequest>,
) -> ApiResult<Value> {
    let project = state
        .gateway
        .insert_project(&NewProject {
            owner_id: user.user_id,
            project_name: payload.project_name,
            project_description: payload.project_description,
        })
        .await?;

    tracing::info!("User {} created project {}", user.user_id, project.id);
    Ok(ApiResponse::created(json!({
        "message": "Project created successfully",
        "project": project,
    })))
}

/// GET /space/details - All projects owned by the caller
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<Project>> {
    let projects = state.gateway.list_projects(user.user_id).await?;
    Ok(ApiResponse::success(projects))
}

/// GET /space/:id/details - Project with its files and folders
pub async fn details(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let project = owned_project(&state, &id, user).await?;
    let files = state.gateway.list_files(project.id).await?;
    let folders = state.gateway.list_folders(project.id).await?;

    Ok(ApiResponse::success(json!({
        "project": project,
        "files": files,
        "folders": folders,
    })))
}

/// DELETE /space/:id - Delete a project; its files and folders go with it
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    let project = owned_project(&state, &id, user).await?;
    state.gateway.delete_project(project.id, user.user_id).await?;

    tracing::info!("User {} deleted project {}", user.user_id, project.id);
    Ok(ApiResponse::success(json!({
        "message": "Project deleted successfully",
        "project_id": project.id,
    })))
}
