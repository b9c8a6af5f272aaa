pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod schema;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use models::{
    File, Folder, NewFile, NewFolder, NewProject, NewSkill, NewSubmission, NewUser, Project,
    Skill, SkillSummary, Socials, StoredCredentials, Submission, UserProfile,
};

pub use manager::DatabaseManager;
pub use memory::MemoryGateway;
pub use postgres::PgGateway;
pub use schema::Table;

/// Outcome of a failed gateway call. Driver errors never cross this boundary
/// untranslated except as the opaque `Query` variant, which handlers turn into
/// a generic internal error.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A value the store refused to hold, such as text wider than its column.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Statement timed out: {0}")]
    Timeout(&'static str),

    #[error(transparent)]
    Query(sqlx::Error),
}

/// The only component allowed to talk to the store. One method per
/// resource action; each runs a single statement or one small transaction.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn ping(&self) -> Result<(), GatewayError>;

    // Administrative
    async fn create_tables(&self) -> Result<(), GatewayError>;
    async fn drop_table(&self, table: Table) -> Result<(), GatewayError>;

    // Users
    async fn insert_user(&self, user: &NewUser) -> Result<(), GatewayError>;
    async fn fetch_user(&self, id: Uuid) -> Result<UserProfile, GatewayError>;
    async fn fetch_credentials(&self, email: &str) -> Result<StoredCredentials, GatewayError>;
    async fn upsert_socials(&self, user_id: Uuid, socials: &Socials) -> Result<Socials, GatewayError>;

    // Projects
    async fn insert_project(&self, project: &NewProject) -> Result<Project, GatewayError>;
    async fn fetch_project(&self, id: Uuid, owner_id: Uuid) -> Result<Project, GatewayError>;
    async fn list_projects(&self, owner_id: Uuid) -> Result<Vec<Project>, GatewayError>;
    async fn delete_project(&self, id: Uuid, owner_id: Uuid) -> Result<(), GatewayError>;

    // Folders
    async fn insert_folder(&self, folder: &NewFolder) -> Result<Folder, GatewayError>;
    async fn fetch_folder(&self, id: Uuid) -> Result<Folder, GatewayError>;
    async fn list_folders(&self, project_id: Uuid) -> Result<Vec<Folder>, GatewayError>;

    // Files
    async fn insert_file(&self, file: &NewFile) -> Result<File, GatewayError>;
    async fn list_files(&self, project_id: Uuid) -> Result<Vec<File>, GatewayError>;
    async fn update_file_content(
        &self,
        project_id: Uuid,
        file_id: Uuid,
        content: &str,
    ) -> Result<File, GatewayError>;

    // Academy
    async fn insert_skill(&self, skill: &NewSkill) -> Result<Skill, GatewayError>;
    async fn fetch_skill(&self, id: Uuid, user_id: Uuid) -> Result<Skill, GatewayError>;
    async fn list_skills(&self, user_id: Uuid) -> Result<Vec<SkillSummary>, GatewayError>;
    async fn insert_submission(&self, submission: &NewSubmission) -> Result<Submission, GatewayError>;
}
