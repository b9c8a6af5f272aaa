use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Row written at registration. The hash is the only form the password takes
/// past the handler.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: String,
}

/// Everything login needs, fetched in one statement.
#[derive(Debug, Clone, FromRow)]
pub struct StoredCredentials {
    pub id: Uuid,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow, Validate)]
pub struct Socials {
    #[validate(url(message = "Must be a valid URL"), length(max = 255))]
    pub github: Option<String>,
    #[validate(url(message = "Must be a valid URL"), length(max = 255))]
    pub linkedin: Option<String>,
    #[validate(url(message = "Must be a valid URL"), length(max = 255))]
    pub instagram: Option<String>,
    #[validate(url(message = "Must be a valid URL"), length(max = 255))]
    pub noobs_social: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[sqlx(flatten)]
    pub social_accounts: Socials,
    /// Achievement labels. Granted outside the API.
    pub badges: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
