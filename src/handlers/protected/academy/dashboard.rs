use axum::extract::{Extension, State};

use crate::database::models::SkillSummary;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /user/academy/dashboard - `[{ skill_id, topic }]` for the caller
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<SkillSummary>> {
    let skills = state.gateway.list_skills(user.user_id).await?;
    Ok(ApiResponse::success(skills))
}
