use axum::extract::{Extension, State};
use serde_json::{json, Value};

use crate::database::models::Socials;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, RequestSchema, ValidatedJson};
use crate::state::AppState;

impl RequestSchema for Socials {}

/// POST /user/update-socials - Replace the caller's social links
///
/// Omitted links are cleared.
pub async fn post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(socials): ValidatedJson<Socials>,
) -> ApiResult<Value> {
    let social_accounts = state.gateway.upsert_socials(user.user_id, &socials).await?;

    Ok(ApiResponse::success(json!({
        "message": "Social accounts updated successfully",
        "social_accounts": social_accounts,
    })))
}
