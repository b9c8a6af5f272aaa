// handlers/public/auth/register.rs - POST /auth/register handler

use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::AuthResponse;
use crate::auth::hash_password_blocking;
use crate::database::models::NewUser;
use crate::error::FieldErrors;
use crate::middleware::extract::is_e164;
use crate::middleware::{ApiResponse, ApiResult, RequestSchema, ValidatedJson};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32, message = "Username must be between 3 and 32 characters"))]
    pub username: String,
    #[validate(
        email(message = "Must be a valid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 32, message = "First name must be between 1 and 32 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 32, message = "Last name must be between 1 and 32 characters"))]
    pub last_name: Option<String>,
    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"))]
    pub password: String,
    pub confirm_password: String,
}

impl RequestSchema for RegisterRequest {
    fn cross_field(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if self.password != self.confirm_password {
            errors.insert("confirm_password".to_string(), "Passwords do not match".to_string());
        }
        if let Some(phone) = &self.phone {
            if !is_e164(phone) {
                errors.insert(
                    "phone".to_string(),
                    "Phone number must be in E.164 format, e.g. +14155552671".to_string(),
                );
            }
        }
        errors
    }
}

/**
 * POST /auth/register - Create an account and receive a session token
 *
 * Expected Input:
 * ```json
 * {
 *   "username": "alice",
 *   "email": "alice@example.com",
 *   "phone": "+14155552671",        // optional, E.164
 *   "first_name": "Alice",          // optional
 *   "last_name": "Liddell",         // optional
 *   "password": "correct horse",
 *   "confirm_password": "correct horse"
 * }
 * ```
 *
 * Responds 201 with `{ token, user_id }`. A taken username or email is 409
 * and leaves the store untouched.
 */
pub async fn register_post(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> ApiResult<AuthResponse> {
    let password_hash = hash_password_blocking(payload.password).await?;

    let user = NewUser {
        id: Uuid::new_v4(),
        username: payload.username,
        email: payload.email,
        phone: payload.phone,
        first_name: payload.first_name,
        last_name: payload.last_name,
        password_hash,
    };
    state.gateway.insert_user(&user).await?;

    let token = state.tokens.issue(user.id)?;
    tracing::info!("Registered user {} ({})", user.username, user.id);

    Ok(ApiResponse::created(AuthResponse {
        token,
        user_id: user.id,
    }))
}
