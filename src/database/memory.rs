use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{
    File, Folder, NewFile, NewFolder, NewProject, NewSkill, NewSubmission, NewUser, Project,
    Skill, SkillSummary, Socials, StoredCredentials, Submission, UserProfile,
};
use super::schema::{conflict_message, Table};
use super::{Gateway, GatewayError};

#[derive(Debug, Clone)]
struct UserRow {
    user: NewUser,
    badges: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<UserRow>,
    socials: HashMap<Uuid, Socials>,
    projects: Vec<Project>,
    folders: Vec<Folder>,
    files: Vec<File>,
    skills: Vec<Skill>,
    submissions: Vec<Submission>,
}

impl Tables {
    fn user_exists(&self, id: Uuid) -> bool {
        self.users.iter().any(|row| row.user.id == id)
    }

    fn project_exists(&self, id: Uuid) -> bool {
        self.projects.iter().any(|p| p.id == id)
    }

    /// Mirrors the composite (parent_folder_id, project_id) foreign key.
    fn parent_in_project(&self, parent: Option<Uuid>, project_id: Uuid) -> bool {
        match parent {
            None => true,
            Some(id) => self
                .folders
                .iter()
                .any(|f| f.id == id && f.project_id == project_id),
        }
    }
}

fn missing_reference() -> GatewayError {
    GatewayError::NotFound("referenced resource does not exist".to_string())
}

/// Process-local store with the same constraint behavior as the PostgreSQL
/// schema. Used for tests and for running without a database.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    tables: RwLock<Tables>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn ping(&self) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn create_tables(&self) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn drop_table(&self, table: Table) -> Result<(), GatewayError> {
        let mut tables = self.tables.write().await;
        match table {
            Table::Users => tables.users.clear(),
            Table::Socials => tables.socials.clear(),
            Table::Projects => tables.projects.clear(),
            Table::Folders => tables.folders.clear(),
            Table::Files => tables.files.clear(),
            Table::Skills => tables.skills.clear(),
            Table::Submissions => tables.submissions.clear(),
        }
        tracing::warn!("Dropped table {}", table);
        Ok(())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<(), GatewayError> {
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|row| row.user.username == user.username) {
            return Err(GatewayError::Conflict(conflict_message(Some("users_username_key"))));
        }
        if tables.users.iter().any(|row| row.user.email == user.email) {
            return Err(GatewayError::Conflict(conflict_message(Some("users_email_key"))));
        }
        if tables.user_exists(user.id) {
            return Err(GatewayError::Conflict(conflict_message(None)));
        }

        let now = Utc::now();
        tables.users.push(UserRow {
            user: user.clone(),
            badges: Vec::new(),
            created_at: now,
            updated_at: now,
        });
        Ok(())
    }

    async fn fetch_user(&self, id: Uuid) -> Result<UserProfile, GatewayError> {
        let tables = self.tables.read().await;
        let row = tables
            .users
            .iter()
            .find(|row| row.user.id == id)
            .ok_or_else(|| GatewayError::NotFound("user not found".to_string()))?;

        Ok(UserProfile {
            id: row.user.id,
            username: row.user.username.clone(),
            email: row.user.email.clone(),
            phone: row.user.phone.clone(),
            first_name: row.user.first_name.clone(),
            last_name: row.user.last_name.clone(),
            social_accounts: tables.socials.get(&id).cloned().unwrap_or_default(),
            badges: row.badges.clone(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    async fn fetch_credentials(&self, email: &str) -> Result<StoredCredentials, GatewayError> {
        let tables = self.tables.read().await;
        tables
            .users
            .iter()
            .find(|row| row.user.email == email)
            .map(|row| StoredCredentials {
                id: row.user.id,
                password_hash: row.user.password_hash.clone(),
            })
            .ok_or_else(|| GatewayError::NotFound("user not found".to_string()))
    }

    async fn upsert_socials(&self, user_id: Uuid, socials: &Socials) -> Result<Socials, GatewayError> {
        let mut tables = self.tables.write().await;
        if !tables.user_exists(user_id) {
            return Err(missing_reference());
        }

        tables.socials.insert(user_id, socials.clone());
        Ok(socials.clone())
    }

    async fn insert_project(&self, project: &NewProject) -> Result<Project, GatewayError> {
        let mut tables = self.tables.write().await;
        if !tables.user_exists(project.owner_id) {
            return Err(missing_reference());
        }

        let now = Utc::now();
        let row = Project {
            id: Uuid::new_v4(),
            owner_id: project.owner_id,
            project_name: project.project_name.clone(),
            project_description: project.project_description.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.projects.push(row.clone());
        Ok(row)
    }

    async fn fetch_project(&self, id: Uuid, owner_id: Uuid) -> Result<Project, GatewayError> {
        let tables = self.tables.read().await;
        tables
            .projects
            .iter()
            .find(|p| p.id == id && p.owner_id == owner_id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound("project not found".to_string()))
    }

    async fn list_projects(&self, owner_id: Uuid) -> Result<Vec<Project>, GatewayError> {
        let tables = self.tables.read().await;
        Ok(tables
            .projects
            .iter()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn delete_project(&self, id: Uuid, owner_id: Uuid) -> Result<(), GatewayError> {
        let mut tables = self.tables.write().await;
        let before = tables.projects.len();
        tables
            .projects
            .retain(|p| !(p.id == id && p.owner_id == owner_id));

        if tables.projects.len() == before {
            return Err(GatewayError::NotFound("project not found".to_string()));
        }

        // ON DELETE CASCADE
        tables.folders.retain(|f| f.project_id != id);
        tables.files.retain(|f| f.project_id != id);
        Ok(())
    }

    async fn insert_folder(&self, folder: &NewFolder) -> Result<Folder, GatewayError> {
        let mut tables = self.tables.write().await;
        if !tables.project_exists(folder.project_id)
            || !tables.parent_in_project(folder.parent_folder_id, folder.project_id)
        {
            return Err(missing_reference());
        }

        let now = Utc::now();
        let row = Folder {
            id: Uuid::new_v4(),
            project_id: folder.project_id,
            folder_name: folder.folder_name.clone(),
            parent_folder_id: folder.parent_folder_id,
            created_at: now,
            updated_at: now,
        };
        tables.folders.push(row.clone());
        Ok(row)
    }

    async fn fetch_folder(&self, id: Uuid) -> Result<Folder, GatewayError> {
        let tables = self.tables.read().await;
        tables
            .folders
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound("folder not found".to_string()))
    }

    async fn list_folders(&self, project_id: Uuid) -> Result<Vec<Folder>, GatewayError> {
        let tables = self.tables.read().await;
        Ok(tables
            .folders
            .iter()
            .filter(|f| f.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn insert_file(&self, file: &NewFile) -> Result<File, GatewayError> {
        let mut tables = self.tables.write().await;
        if !tables.project_exists(file.project_id)
            || !tables.parent_in_project(file.parent_folder_id, file.project_id)
        {
            return Err(missing_reference());
        }

        let now = Utc::now();
        let row = File {
            id: Uuid::new_v4(),
            project_id: file.project_id,
            file_name: file.file_name.clone(),
            file_content: file.file_content.clone(),
            parent_folder_id: file.parent_folder_id,
            created_at: now,
            updated_at: now,
        };
        tables.files.push(row.clone());
        Ok(row)
    }

    async fn list_files(&self, project_id: Uuid) -> Result<Vec<File>, GatewayError> {
        let tables = self.tables.read().await;
        Ok(tables
            .files
            .iter()
            .filter(|f| f.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn update_file_content(
        &self,
        project_id: Uuid,
        file_id: Uuid,
        content: &str,
    ) -> Result<File, GatewayError> {
        let mut tables = self.tables.write().await;
        let file = tables
            .files
            .iter_mut()
            .find(|f| f.id == file_id && f.project_id == project_id)
            .ok_or_else(|| GatewayError::NotFound("file not found".to_string()))?;

        file.file_content = content.to_string();
        file.updated_at = Utc::now();
        Ok(file.clone())
    }

    async fn insert_skill(&self, skill: &NewSkill) -> Result<Skill, GatewayError> {
        let mut tables = self.tables.write().await;
        let row = Skill {
            id: Uuid::new_v4(),
            topic: skill.topic.clone(),
            intro: skill.intro.clone(),
            questions: skill.questions.clone(),
            user_ids: skill.user_ids.clone(),
            created_at: Utc::now(),
        };
        tables.skills.push(row.clone());
        Ok(row)
    }

    async fn fetch_skill(&self, id: Uuid, user_id: Uuid) -> Result<Skill, GatewayError> {
        let tables = self.tables.read().await;
        tables
            .skills
            .iter()
            .find(|s| s.id == id && s.user_ids.contains(&user_id))
            .cloned()
            .ok_or_else(|| GatewayError::NotFound("skill not found".to_string()))
    }

    async fn list_skills(&self, user_id: Uuid) -> Result<Vec<SkillSummary>, GatewayError> {
        let tables = self.tables.read().await;
        Ok(tables
            .skills
            .iter()
            .filter(|s| s.user_ids.contains(&user_id))
            .map(|s| SkillSummary {
                id: s.id,
                topic: s.topic.clone(),
            })
            .collect())
    }

    async fn insert_submission(&self, submission: &NewSubmission) -> Result<Submission, GatewayError> {
        let mut tables = self.tables.write().await;
        if !tables.skills.iter().any(|s| s.id == submission.skill_id)
            || !tables.user_exists(submission.user_id)
        {
            return Err(missing_reference());
        }

        let row = Submission {
            id: Uuid::new_v4(),
            skill_id: submission.skill_id,
            question_id: submission.question_id.clone(),
            user_id: submission.user_id,
            code: submission.code.clone(),
            submitted_at: Utc::now(),
        };
        tables.submissions.push(row.clone());
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            phone: None,
            first_name: Some("Alice".to_string()),
            last_name: None,
            password_hash: "hash".to_string(),
        }
    }

    async fn seeded() -> (MemoryGateway, Uuid, Project) {
        let gateway = MemoryGateway::new();
        let user = new_user("alice", "alice@example.com");
        gateway.insert_user(&user).await.unwrap();
        let project = gateway
            .insert_project(&NewProject {
                owner_id: user.id,
                project_name: "Solar".to_string(),
                project_description: None,
            })
            .await
            .unwrap();
        (gateway, user.id, project)
    }

    #[tokio::test]
    async fn duplicate_username_and_email_conflict() {
        let gateway = MemoryGateway::new();
        gateway.insert_user(&new_user("alice", "a@example.com")).await.unwrap();

        let err = gateway.insert_user(&new_user("alice", "b@example.com")).await.unwrap_err();
        assert!(matches!(err, GatewayError::Conflict(msg) if msg == "username already taken"));

        let err = gateway.insert_user(&new_user("bob", "a@example.com")).await.unwrap_err();
        assert!(matches!(err, GatewayError::Conflict(msg) if msg == "email already registered"));
    }

    #[tokio::test]
    async fn profile_includes_socials_after_upsert() {
        let (gateway, user_id, _) = seeded().await;

        let empty = gateway.fetch_user(user_id).await.unwrap();
        assert_eq!(empty.social_accounts, Socials::default());

        let socials = Socials {
            github: Some("https://github.com/alice".to_string()),
            ..Default::default()
        };
        gateway.upsert_socials(user_id, &socials).await.unwrap();
        let replaced = Socials {
            linkedin: Some("https://linkedin.com/in/alice".to_string()),
            ..Default::default()
        };
        gateway.upsert_socials(user_id, &replaced).await.unwrap();

        let profile = gateway.fetch_user(user_id).await.unwrap();
        assert_eq!(profile.social_accounts, replaced);
    }

    #[tokio::test]
    async fn projects_are_scoped_to_owner() {
        let (gateway, user_id, project) = seeded().await;
        let stranger = Uuid::new_v4();

        assert!(gateway.fetch_project(project.id, user_id).await.is_ok());
        assert!(matches!(
            gateway.fetch_project(project.id, stranger).await,
            Err(GatewayError::NotFound(_))
        ));
        assert!(gateway.list_projects(stranger).await.unwrap().is_empty());
        assert!(matches!(
            gateway.delete_project(project.id, stranger).await,
            Err(GatewayError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn parent_folder_must_share_project() {
        let (gateway, user_id, project) = seeded().await;
        let other = gateway
            .insert_project(&NewProject {
                owner_id: user_id,
                project_name: "Wind".to_string(),
                project_description: None,
            })
            .await
            .unwrap();
        let foreign = gateway
            .insert_folder(&NewFolder {
                project_id: other.id,
                folder_name: "src".to_string(),
                parent_folder_id: None,
            })
            .await
            .unwrap();

        let err = gateway
            .insert_file(&NewFile {
                project_id: project.id,
                file_name: "main.rs".to_string(),
                file_content: String::new(),
                parent_folder_id: Some(foreign.id),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::NotFound(_)));
        assert!(gateway.list_files(project.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_project_cascades() {
        let (gateway, user_id, project) = seeded().await;
        let folder = gateway
            .insert_folder(&NewFolder {
                project_id: project.id,
                folder_name: "src".to_string(),
                parent_folder_id: None,
            })
            .await
            .unwrap();
        gateway
            .insert_file(&NewFile {
                project_id: project.id,
                file_name: "lib.rs".to_string(),
                file_content: "fn main() {}".to_string(),
                parent_folder_id: Some(folder.id),
            })
            .await
            .unwrap();

        gateway.delete_project(project.id, user_id).await.unwrap();

        assert!(gateway.list_folders(project.id).await.unwrap().is_empty());
        assert!(gateway.list_files(project.id).await.unwrap().is_empty());
        assert!(matches!(gateway.fetch_folder(folder.id).await, Err(GatewayError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_content_requires_matching_project() {
        let (gateway, _, project) = seeded().await;
        let file = gateway
            .insert_file(&NewFile {
                project_id: project.id,
                file_name: "a.txt".to_string(),
                file_content: "one".to_string(),
                parent_folder_id: None,
            })
            .await
            .unwrap();

        let updated = gateway.update_file_content(project.id, file.id, "two").await.unwrap();
        assert_eq!(updated.file_content, "two");

        assert!(matches!(
            gateway.update_file_content(Uuid::new_v4(), file.id, "three").await,
            Err(GatewayError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn skills_are_visible_to_associated_users_only() {
        let (gateway, user_id, _) = seeded().await;
        let skill = gateway
            .insert_skill(&NewSkill {
                topic: "recursion".to_string(),
                intro: "Functions that call themselves".to_string(),
                questions: serde_json::json!([]),
                user_ids: vec![user_id],
            })
            .await
            .unwrap();

        assert_eq!(gateway.list_skills(user_id).await.unwrap().len(), 1);
        assert!(gateway.list_skills(Uuid::new_v4()).await.unwrap().is_empty());
        assert!(gateway.fetch_skill(skill.id, Uuid::new_v4()).await.is_err());
    }

    #[tokio::test]
    async fn dropped_table_is_empty() {
        let (gateway, user_id, _) = seeded().await;
        gateway.drop_table(Table::Projects).await.unwrap();
        assert!(gateway.list_projects(user_id).await.unwrap().is_empty());
    }
}
