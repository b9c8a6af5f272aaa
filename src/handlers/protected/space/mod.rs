// handlers/protected/space/mod.rs - Project ("space"), file and folder handlers
//
// Every handler here resolves the project from the `:id` path segment and
// checks that the caller owns it before touching files or folders. Projects
// that exist but belong to someone else are reported as not found.

use uuid::Uuid;

use crate::database::models::Project;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

pub mod file;
pub mod folder;
pub mod project;

pub use file::{create as create_file, list as get_files, save as save_file};
pub use folder::create as create_folder;
pub use project::{create as create_space, delete as delete_space, details as space_details, list as list_spaces};

/// Parses a UUID path segment.
pub(crate) fn parse_id(raw: &str, field: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::invalid_field(field, "Must be a valid UUID"))
}

/// Loads the project named in the path, scoped to the caller.
pub(crate) async fn owned_project(
    state: &AppState,
    raw_id: &str,
    user: AuthUser,
) -> Result<Project, ApiError> {
    let project_id = parse_id(raw_id, "id")?;
    Ok(state.gateway.fetch_project(project_id, user.user_id).await?)
}

/// The path is authoritative. A body `project_id`, when sent, has to agree.
pub(crate) fn ensure_same_project(project: &Project, body_project_id: Option<Uuid>) -> Result<(), ApiError> {
    match body_project_id {
        Some(id) if id != project.id => Err(ApiError::invalid_field(
            "project_id",
            "Must match the project in the request path",
        )),
        _ => Ok(()),
    }
}

/// A parent folder, when given, must exist in the same project.
pub(crate) async fn ensure_parent_folder(
    state: &AppState,
    project: &Project,
    parent_folder_id: Option<Uuid>,
) -> Result<(), ApiError> {
    let Some(folder_id) = parent_folder_id else {
        return Ok(());
    };

    let folder = state.gateway.fetch_folder(folder_id).await?;
    if folder.project_id != project.id {
        return Err(ApiError::not_found("folder not found"));
    }
    Ok(())
}
