use axum::extract::{Extension, Path, State};

use crate::database::models::Skill;
use crate::handlers::protected::space::parse_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /user/academy/:id/status - Full skill document
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Skill> {
    let skill_id = parse_id(&id, "id")?;
    let skill = state.gateway.fetch_skill(skill_id, user.user_id).await?;
    Ok(ApiResponse::success(skill))
}
