use axum::extract::{Extension, State};

use crate::database::models::UserProfile;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /user/profile - The caller's profile, including `social_accounts`.
/// Never includes the password hash.
pub async fn get(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<UserProfile> {
    let profile = state.gateway.fetch_user(user.user_id).await?;
    Ok(ApiResponse::success(profile))
}
