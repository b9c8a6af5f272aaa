use axum::extract::{Extension, State};
use serde::Deserialize;
use validator::Validate;

use crate::database::models::{NewSkill, Skill};
use crate::middleware::{ApiResponse, ApiResult, AuthUser, RequestSchema, ValidatedJson};
use crate::services::GeneratorError;
use crate::state::AppState;

const MAX_TOPIC_LEN: usize = 100;

#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    #[validate(length(min = 1, max = 32, message = "Difficulty must be between 1 and 32 characters"))]
    pub difficulty: String,
    #[validate(length(min = 1, max = 100, message = "Topic must be between 1 and 100 characters"))]
    pub topic: String,
}

impl RequestSchema for GenerateRequest {}

/**
 * POST /user/academy/generate - Have the external generator write a skill
 *
 * Expected Input:
 * ```json
 * { "topic": "recursion", "difficulty": "easy" }
 * ```
 *
 * The generated skill is stored with the caller as its only user and
 * returned with 201. Without a configured generator this is 503; a failing
 * generator is 502.
 */
pub async fn post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ValidatedJson(payload): ValidatedJson<GenerateRequest>,
) -> ApiResult<Skill> {
    let generator = state.generator.as_ref().ok_or(GeneratorError::NotConfigured)?;
    let generated = generator.generate(&payload.topic, &payload.difficulty).await?;

    // Prefer the generator's wording of the topic when it fits the column.
    let topic = generated
        .topic
        .filter(|t| !t.trim().is_empty() && t.chars().count() <= MAX_TOPIC_LEN)
        .unwrap_or(payload.topic);

    let skill = state
        .gateway
        .insert_skill(&NewSkill {
            topic,
            intro: generated.intro,
            questions: generated.questions,
            user_ids: vec![user.user_id],
        })
        .await?;

    tracing::info!("Generated skill {} for user {}", skill.id, user.user_id);
    Ok(ApiResponse::created(skill))
}
