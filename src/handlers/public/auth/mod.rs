// handlers/public/auth/mod.rs - Public authentication handlers
//
// Token acquisition endpoints. Neither requires a bearer token; both return
// one on success.

use serde::Serialize;
use uuid::Uuid;

pub mod login; // POST /auth/login
pub mod register; // POST /auth/register

pub use login::login_post;
pub use register::register_post;

/// Body returned by both register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: Uuid,
}
