// handlers/public/auth/login.rs - POST /auth/login handler

use axum::extract::State;
use serde::Deserialize;
use validator::Validate;

use super::AuthResponse;
use crate::auth::verify_password_blocking;
use crate::database::GatewayError;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, RequestSchema, ValidatedJson};
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl RequestSchema for LoginRequest {}

/**
 * POST /auth/login - Exchange email and password for a session token
 *
 * Expected Input:
 * ```json
 * { "email": "alice@example.com", "password": "correct horse" }
 * ```
 *
 * Unknown email and wrong password produce the same 400 response.
 */
pub async fn login_post(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let credentials = match state.gateway.fetch_credentials(&payload.email).await {
        Ok(credentials) => Some(credentials),
        Err(GatewayError::NotFound(_)) => None,
        Err(e) => return Err(e.into()),
    };

    let stored_hash = credentials.as_ref().map(|c| c.password_hash.clone());
    let verified = verify_password_blocking(stored_hash, payload.password).await;

    let user_id = match credentials {
        Some(c) if verified => c.id,
        Some(c) => {
            tracing::warn!("Failed login for user {}: wrong password", c.id);
            return Err(ApiError::authentication_failed(INVALID_CREDENTIALS));
        }
        None => {
            tracing::warn!("Failed login for {}: unknown email", masked_email(&payload.email));
            return Err(ApiError::authentication_failed(INVALID_CREDENTIALS));
        }
    };

    let token = state.tokens.issue(user_id)?;
    tracing::debug!("User {} logged in", user_id);

    Ok(ApiResponse::success(AuthResponse { token, user_id }))
}

/// Keeps the first character of the local part and the domain.
fn masked_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_email_hides_the_local_part() {
        assert_eq!(masked_email("alice@example.com"), "a***@example.com");
        assert_eq!(masked_email("@example.com"), "***@example.com");
        assert_eq!(masked_email("no-at-sign"), "***");
        assert!(!masked_email("alice.secret@example.com").contains("secret"));
    }
}
