use axum::extract::{Extension, Path, State};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use super::{ensure_parent_folder, ensure_same_project, owned_project};
use crate::database::models::NewFolder;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, RequestSchema, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFolderRequest {
    pub project_id: Option<Uuid>,
    #[validate(length(min = 1, max = 255, message = "Folder name must be between 1 and 255 characters"))]
    pub folder_name: String,
    pub parent_folder_id: Option<Uuid>,
}

impl RequestSchema for CreateFolderRequest {}

/// POST /space/:id/create-folder
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    ValidatedJson(payload): ValidatedJson<CreateFolderRequest>,
) -> ApiResult<Value> {
    let project = owned_project(&state, &id, user).await?;
    ensure_same_project(&project, payload.project_id)?;
    ensure_parent_folder(&state, &project, payload.parent_folder_id).await?;

    let folder = state
        .gateway
        .insert_folder(&NewFolder {
            project_id: project.id,
            folder_name: payload.folder_name,
            parent_folder_id: payload.parent_folder_id,
        })
        .await?;

    Ok(ApiResponse::created(json!({
        "message": "Folder created successfully",
        "folder": folder,
    })))
}
