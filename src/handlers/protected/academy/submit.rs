use axum::extract::{Extension, Path, State};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::database::models::NewSubmission;
use crate::error::ApiError;
use crate::handlers::protected::space::parse_id;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, RequestSchema, ValidatedJson};
use crate::state::AppState;

/// Width of `submissions.question_id`.
const MAX_QUESTION_ID_LEN: usize = 64;

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitRequest {
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
}

impl RequestSchema for SubmitRequest {}

/// POST /user/academy/:id/status/:qid/submit - Record a solution attempt
///
/// The submission is stored as received. Grading happens elsewhere, so the
/// response is 202 with a receipt rather than a verdict.
pub async fn post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((id, question_id)): Path<(String, String)>,
    ValidatedJson(payload): ValidatedJson<SubmitRequest>,
) -> ApiResult<Value> {
    let skill_id = parse_id(&id, "id")?;
    if question_id.chars().count() > MAX_QUESTION_ID_LEN {
        return Err(ApiError::invalid_field(
            "qid",
            format!("Question id must be at most {} characters", MAX_QUESTION_ID_LEN),
        ));
    }
    let skill = state.gateway.fetch_skill(skill_id, user.user_id).await?;
    if !skill.has_question(&question_id) {
        return Err(ApiError::not_found("question not found"));
    }

    let submission = state
        .gateway
        .insert_submission(&NewSubmission {
            skill_id: skill.id,
            question_id,
            user_id: user.user_id,
            code: payload.code,
        })
        .await?;

    tracing::debug!(
        "User {} submitted {} for skill {}",
        user.user_id,
        submission.question_id,
        skill.id
    );
    Ok(ApiResponse::accepted(json!({
        "message": "Submission received",
        "submission": submission,
    })))
}
