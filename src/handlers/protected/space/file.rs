use axum::extract::{Extension, Path, State};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use super::{ensure_parent_folder, ensure_same_project, owned_project};
use crate::database::models::{File, NewFile};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, RequestSchema, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFileRequest {
    pub project_id: Option<Uuid>,
    #[validate(length(min = 1, max = 255, message = "File name must be between 1 and 255 characters"))]
    pub file_name: String,
    /// Required, may be empty.
    pub file_content: String,
    pub parent_folder_id: Option<Uuid>,
}

impl RequestSchema for CreateFileRequest {}

#[derive(Debug, Deserialize, Validate)]
pub struct SaveFileRequest {
    pub project_id: Option<Uuid>,
    pub file_id: Uuid,
    pub file_content: String,
}

impl RequestSchema for SaveFileRequest {}

/// GET /space/:id/get-files - Files of one project
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Vec<File>> {
    let project = owned_project(&state, &id, user).await?;
    let files = state.gateway.list_files(project.id).await?;
    Ok(ApiResponse::success(files))
}

/// POST /space/:id/create-file
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<CreateFileRequest>,
) -> ApiResult<Value> {
    let project = owned_project(&state, &id, user).await?;
    ensure_same_project(&project, payload.project_id)?;
    ensure_parent_folder(&state, &project, payload.parent_folder_id).await?;

    let file = state
        .gateway
        .insert_file(&NewFile {
            project_id: project.id,
            file_name: payload.file_name,
            file_content: payload.file_content,
            parent_folder_id: payload.parent_folder_id,
        })
        .await?;

    tracing::debug!("Created file {} in project {}", file.id, project.id);
    Ok(ApiResponse::created(json!({
        "message": "File created successfully",
        "file": file,
    })))
}

/// POST /space/:id/save-file - Replace a file's content (last write wins)
pub async fn save(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<SaveFileRequest>,
) -> ApiResult<Value> {
    let project = owned_project(&state, &id, user).await?;
    ensure_same_project(&project, payload.project_id)?;

    let file = state
        .gateway
        .update_file_content(project.id, payload.file_id, &payload.file_content)
        .await?;

    Ok(ApiResponse::success(json!({
        "message": "File saved successfully",
        "file": file,
    })))
}
