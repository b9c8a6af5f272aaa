use async_trait::async_trait;
use sqlx::PgPool;
use std::future::Future;
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::models::{
    File, Folder, NewFile, NewFolder, NewProject, NewSkill, NewSubmission, NewUser, Project,
    Skill, SkillSummary, Socials, StoredCredentials, Submission, UserProfile,
};
use super::schema::{conflict_message, Table};
use super::{Gateway, GatewayError};
use crate::config::DatabaseConfig;

const PROJECT_COLUMNS: &str = "id, owner_id, project_name, project_description, created_at, updated_at";
const FOLDER_COLUMNS: &str = "id, project_id, folder_name, parent_folder_id, created_at, updated_at";
const FILE_COLUMNS: &str =
    "id, project_id, file_name, file_content, parent_folder_id, created_at, updated_at";
const SKILL_COLUMNS: &str = "id, topic, intro, questions, user_ids, created_at";

/// PostgreSQL implementation of the gateway. Every statement is bounded by
/// the configured statement timeout.
#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
    statement_timeout: Duration,
    slow_query_threshold: Option<Duration>,
}

impl PgGateway {
    pub fn new(pool: PgPool, config: &DatabaseConfig) -> Self {
        Self {
            pool,
            statement_timeout: config.statement_timeout(),
            slow_query_threshold: config.slow_query_threshold(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn run<T, F>(&self, operation: &'static str, statement: F) -> Result<T, GatewayError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        let started = Instant::now();
        let result = tokio::time::timeout(self.statement_timeout, statement)
            .await
            .map_err(|_| GatewayError::Timeout(operation))?;

        let elapsed = started.elapsed();
        if let Some(threshold) = self.slow_query_threshold {
            if elapsed > threshold {
                tracing::warn!("Slow query: {} took {}ms", operation, elapsed.as_millis());
            }
        }

        result.map_err(translate)
    }
}

/// Maps driver errors onto the gateway taxonomy.
fn translate(err: sqlx::Error) -> GatewayError {
    if let sqlx::Error::Database(db) = &err {
        let code = db.code().map(|c| c.into_owned());
        match code.as_deref() {
            // unique_violation
            Some("23505") => return GatewayError::Conflict(conflict_message(db.constraint())),
            // foreign_key_violation
            Some("23503") => {
                return GatewayError::NotFound("referenced resource does not exist".to_string())
            }
            // string_data_right_truncation
            Some("22001") => {
                return GatewayError::InvalidValue("value is too long for its field".to_string())
            }
            _ => {}
        }
    }

    match err {
        sqlx::Error::RowNotFound => GatewayError::NotFound("record not found".to_string()),
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            GatewayError::Unavailable(err.to_string())
        }
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) => GatewayError::Unavailable(err.to_string()),
        other => GatewayError::Query(other),
    }
}

fn found<T>(row: Option<T>, what: &str) -> Result<T, GatewayError> {
    row.ok_or_else(|| GatewayError::NotFound(format!("{} not found", what)))
}

#[async_trait]
impl Gateway for PgGateway {
    async fn ping(&self) -> Result<(), GatewayError> {
        self.run("ping", sqlx::query("SELECT 1").execute(&self.pool))
            .await
            .map(|_| ())
    }

    async fn create_tables(&self) -> Result<(), GatewayError> {
        self.run("create_tables", async {
            let mut tx = self.pool.begin().await?;
            for table in Table::ALL {
                sqlx::query(table.create_statement()).execute(&mut *tx).await?;
            }
            tx.commit().await
        })
        .await?;

        tracing::info!("Ensured {} tables exist", Table::ALL.len());
        Ok(())
    }

    async fn drop_table(&self, table: Table) -> Result<(), GatewayError> {
        // Table names come from the closed `Table` enum, never from input.
        let sql = format!("DROP TABLE IF EXISTS {} CASCADE", table.as_str());
        self.run("drop_table", sqlx::query(&sql).execute(&self.pool)).await?;

        tracing::warn!("Dropped table {}", table);
        Ok(())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<(), GatewayError> {
        let query = sqlx::query(
            r#"
            INSERT INTO users (id, username, email, phone, first_name, last_name, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash);

        self.run("insert_user", query.execute(&self.pool)).await.map(|_| ())
    }

    async fn fetch_user(&self, id: Uuid) -> Result<UserProfile, GatewayError> {
        let query = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT
                u.id, u.username, u.email, u.phone, u.first_name, u.last_name,
                s.github, s.linkedin, s.instagram, s.noobs_social,
                u.badges, u.created_at, u.updated_at
            FROM users u
            LEFT JOIN socials s ON s.user_id = u.id
            WHERE u.id = $1
            "#,
        )
        .bind(id);

        found(self.run("fetch_user", query.fetch_optional(&self.pool)).await?, "user")
    }

    async fn fetch_credentials(&self, email: &str) -> Result<StoredCredentials, GatewayError> {
        let query = sqlx::query_as::<_, StoredCredentials>(
            "SELECT id, password_hash FROM users WHERE email = $1",
        )
        .bind(email);

        found(self.run("fetch_credentials", query.fetch_optional(&self.pool)).await?, "user")
    }

    async fn upsert_socials(&self, user_id: Uuid, socials: &Socials) -> Result<Socials, GatewayError> {
        let query = sqlx::query_as::<_, Socials>(
            r#"
            INSERT INTO socials (user_id, github, linkedin, instagram, noobs_social)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                github = EXCLUDED.github,
                linkedin = EXCLUDED.linkedin,
                instagram = EXCLUDED.instagram,
                noobs_social = EXCLUDED.noobs_social
            RETURNING github, linkedin, instagram, noobs_social
            "#,
        )
        .bind(user_id)
        .bind(&socials.github)
        .bind(&socials.linkedin)
        .bind(&socials.instagram)
        .bind(&socials.noobs_social);

        self.run("upsert_socials", query.fetch_one(&self.pool)).await
    }

    async fn insert_project(&self, project: &NewProject) -> Result<Project, GatewayError> {
        let sql = format!(
            "INSERT INTO projects (id, owner_id, project_name, project_description, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, NOW(), NOW()) RETURNING {}",
            PROJECT_COLUMNS
        );
        let query = sqlx::query_as::<_, Project>(&sql)
            .bind(Uuid::new_v4())
            .bind(project.owner_id)
            .bind(&project.project_name)
            .bind(&project.project_description);

        self.run("insert_project", query.fetch_one(&self.pool)).await
    }

    async fn fetch_project(&self, id: Uuid, owner_id: Uuid) -> Result<Project, GatewayError> {
        let sql = format!("SELECT {} FROM projects WHERE id = $1 AND owner_id = $2", PROJECT_COLUMNS);
        let query = sqlx::query_as::<_, Project>(&sql).bind(id).bind(owner_id);

        found(self.run("fetch_project", query.fetch_optional(&self.pool)).await?, "project")
    }

    async fn list_projects(&self, owner_id: Uuid) -> Result<Vec<Project>, GatewayError> {
        let sql = format!(
            "SELECT {} FROM projects WHERE owner_id = $1 ORDER BY created_at, id",
            PROJECT_COLUMNS
        );
        let query = sqlx::query_as::<_, Project>(&sql).bind(owner_id);

        self.run("list_projects", query.fetch_all(&self.pool)).await
    }

    async fn delete_project(&self, id: Uuid, owner_id: Uuid) -> Result<(), GatewayError> {
        let query = sqlx::query("DELETE FROM projects WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id);

        let result = self.run("delete_project", query.execute(&self.pool)).await?;
        if result.rows_affected() == 0 {
            return Err(GatewayError::NotFound("project not found".to_string()));
        }
        Ok(())
    }

    async fn insert_folder(&self, folder: &NewFolder) -> Result<Folder, GatewayError> {
        let sql = format!(
            "INSERT INTO folders (id, project_id, folder_name, parent_folder_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, NOW(), NOW()) RETURNING {}",
            FOLDER_COLUMNS
        );
        let query = sqlx::query_as::<_, Folder>(&sql)
            .bind(Uuid::new_v4())
            .bind(folder.project_id)
            .bind(&folder.folder_name)
            .bind(folder.parent_folder_id);

        self.run("insert_folder", query.fetch_one(&self.pool)).await
    }

    async fn fetch_folder(&self, id: Uuid) -> Result<Folder, GatewayError> {
        let sql = format!("SELECT {} FROM folders WHERE id = $1", FOLDER_COLUMNS);
        let query = sqlx::query_as::<_, Folder>(&sql).bind(id);

        found(self.run("fetch_folder", query.fetch_optional(&self.pool)).await?, "folder")
    }

    async fn list_folders(&self, project_id: Uuid) -> Result<Vec<Folder>, GatewayError> {
        let sql = format!(
            "SELECT {} FROM folders WHERE project_id = $1 ORDER BY created_at, id",
            FOLDER_COLUMNS
        );
        let query = sqlx::query_as::<_, Folder>(&sql).bind(project_id);

        self.run("list_folders", query.fetch_all(&self.pool)).await
    }

    async fn insert_file(&self, file: &NewFile) -> Result<File, GatewayError> {
        let sql = format!(
            "INSERT INTO files (id, project_id, file_name, file_content, parent_folder_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, NOW(), NOW()) RETURNING {}",
            FILE_COLUMNS
        );
        let query = sqlx::query_as::<_, File>(&sql)
            .bind(Uuid::new_v4())
            .bind(file.project_id)
            .bind(&file.file_name)
            .bind(&file.file_content)
            .bind(file.parent_folder_id);

        self.run("insert_file", query.fetch_one(&self.pool)).await
    }

    async fn list_files(&self, project_id: Uuid) -> Result<Vec<File>, GatewayError> {
        let sql = format!(
            "SELECT {} FROM files WHERE project_id = $1 ORDER BY created_at, id",
            FILE_COLUMNS
        );
        let query = sqlx::query_as::<_, File>(&sql).bind(project_id);

        self.run("list_files", query.fetch_all(&self.pool)).await
    }

    async fn update_file_content(
        &self,
        project_id: Uuid,
        file_id: Uuid,
        content: &str,
    ) -> Result<File, GatewayError> {
        let sql = format!(
            "UPDATE files SET file_content = $1, updated_at = NOW() \
             WHERE id = $2 AND project_id = $3 RETURNING {}",
            FILE_COLUMNS
        );
        let query = sqlx::query_as::<_, File>(&sql)
            .bind(content)
            .bind(file_id)
            .bind(project_id);

        found(self.run("update_file_content", query.fetch_optional(&self.pool)).await?, "file")
    }

    async fn insert_skill(&self, skill: &NewSkill) -> Result<Skill, GatewayError> {
        let sql = format!(
            "INSERT INTO skills (id, topic, intro, questions, user_ids, created_at) \
             VALUES ($1, $2, $3, $4, $5, NOW()) RETURNING {}",
            SKILL_COLUMNS
        );
        let query = sqlx::query_as::<_, Skill>(&sql)
            .bind(Uuid::new_v4())
            .bind(&skill.topic)
            .bind(&skill.intro)
            .bind(&skill.questions)
            .bind(&skill.user_ids);

        self.run("insert_skill", query.fetch_one(&self.pool)).await
    }

    async fn fetch_skill(&self, id: Uuid, user_id: Uuid) -> Result<Skill, GatewayError> {
        let sql = format!(
            "SELECT {} FROM skills WHERE id = $1 AND $2 = ANY(user_ids)",
            SKILL_COLUMNS
        );
        let query = sqlx::query_as::<_, Skill>(&sql).bind(id).bind(user_id);

        found(self.run("fetch_skill", query.fetch_optional(&self.pool)).await?, "skill")
    }

    async fn list_skills(&self, user_id: Uuid) -> Result<Vec<SkillSummary>, GatewayError> {
        let query = sqlx::query_as::<_, SkillSummary>(
            "SELECT id, topic FROM skills WHERE $1 = ANY(user_ids) ORDER BY created_at, id",
        )
        .bind(user_id);

        self.run("list_skills", query.fetch_all(&self.pool)).await
    }

    async fn insert_submission(&self, submission: &NewSubmission) -> Result<Submission, GatewayError> {
        let query = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (id, skill_id, question_id, user_id, code, submitted_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING id, skill_id, question_id, user_id, code, submitted_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(submission.skill_id)
        .bind(&submission.question_id)
        .bind(submission.user_id)
        .bind(&submission.code);

        self.run("insert_submission", query.fetch_one(&self.pool)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;

    /// Server-side error as the driver would surface it.
    #[derive(Debug)]
    struct ServerError {
        code: &'static str,
        constraint: Option<&'static str>,
    }

    impl std::fmt::Display for ServerError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "server error {}", self.code)
        }
    }

    impl std::error::Error for ServerError {}

    impl DatabaseError for ServerError {
        fn message(&self) -> &str {
            "server error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.code {
                "23505" => ErrorKind::UniqueViolation,
                "23503" => ErrorKind::ForeignKeyViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn server_error(code: &'static str, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ServerError { code, constraint }))
    }

    #[test]
    fn unique_violations_name_the_taken_field() {
        let err = translate(server_error("23505", Some("users_email_key")));
        assert!(matches!(err, GatewayError::Conflict(msg) if msg == "email already registered"));

        let err = translate(server_error("23505", Some("users_username_key")));
        assert!(matches!(err, GatewayError::Conflict(msg) if msg == "username already taken"));

        let err = translate(server_error("23505", None));
        assert!(matches!(err, GatewayError::Conflict(_)));
    }

    #[test]
    fn foreign_key_violation_is_not_found() {
        let err = translate(server_error("23503", Some("files_project_id_fkey")));
        assert!(matches!(err, GatewayError::NotFound(_)));
    }

    #[test]
    fn oversized_value_is_invalid_not_internal() {
        let err = translate(server_error("22001", None));
        assert!(matches!(err, GatewayError::InvalidValue(_)));
    }

    #[test]
    fn unknown_server_codes_stay_opaque() {
        let err = translate(server_error("42P01", None));
        assert!(matches!(err, GatewayError::Query(_)));
    }

    #[test]
    fn missing_rows_become_not_found() {
        assert!(matches!(translate(sqlx::Error::RowNotFound), GatewayError::NotFound(_)));
        assert!(matches!(found::<()>(None, "project"), Err(GatewayError::NotFound(msg)) if msg == "project not found"));
    }

    #[test]
    fn pool_exhaustion_is_unavailable() {
        assert!(matches!(translate(sqlx::Error::PoolTimedOut), GatewayError::Unavailable(_)));
        assert!(matches!(translate(sqlx::Error::PoolClosed), GatewayError::Unavailable(_)));
    }

    #[test]
    fn other_driver_errors_stay_opaque() {
        let err = translate(sqlx::Error::Protocol("unexpected message".into()));
        assert!(matches!(err, GatewayError::Query(_)));
    }
}
