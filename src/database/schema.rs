use std::fmt;
use std::str::FromStr;

/// Tables owned by the application, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Users,
    Socials,
    Projects,
    Folders,
    Files,
    Skills,
    Submissions,
}

impl Table {
    pub const ALL: [Table; 7] = [
        Table::Users,
        Table::Socials,
        Table::Projects,
        Table::Folders,
        Table::Files,
        Table::Skills,
        Table::Submissions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Socials => "socials",
            Table::Projects => "projects",
            Table::Folders => "folders",
            Table::Files => "files",
            Table::Skills => "skills",
            Table::Submissions => "submissions",
        }
    }

    pub fn create_statement(&self) -> &'static str {
        match self {
            Table::Users => {
                r#"
                CREATE TABLE IF NOT EXISTS users (
                    id UUID PRIMARY KEY,
                    username VARCHAR(32) NOT NULL,
                    email VARCHAR(255) NOT NULL,
                    phone VARCHAR(20),
                    first_name VARCHAR(32),
                    last_name VARCHAR(32),
                    badges TEXT[] NOT NULL DEFAULT '{}',
                    password_hash TEXT NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    CONSTRAINT users_username_key UNIQUE (username),
                    CONSTRAINT users_email_key UNIQUE (email)
                )
                "#
            }
            Table::Socials => {
                r#"
                CREATE TABLE IF NOT EXISTS socials (
                    user_id UUID PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                    github VARCHAR(255),
                    linkedin VARCHAR(255),
                    instagram VARCHAR(255),
                    noobs_social VARCHAR(255)
                )
                "#
            }
            Table::Projects => {
                r#"
                CREATE TABLE IF NOT EXISTS projects (
                    id UUID PRIMARY KEY,
                    owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                    project_name VARCHAR(50) NOT NULL,
                    project_description VARCHAR(255),
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#
            }
            // (id, project_id) is unique so children can reference a parent
            // within the same project through a composite key.
            Table::Folders => {
                r#"
                CREATE TABLE IF NOT EXISTS folders (
                    id UUID PRIMARY KEY,
                    project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                    folder_name VARCHAR(255) NOT NULL,
                    parent_folder_id UUID,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    CONSTRAINT folders_id_project_key UNIQUE (id, project_id),
                    CONSTRAINT folders_parent_fkey FOREIGN KEY (parent_folder_id, project_id)
                        REFERENCES folders(id, project_id) ON DELETE CASCADE
                )
                "#
            }
            Table::Files => {
                r#"
                CREATE TABLE IF NOT EXISTS files (
                    id UUID PRIMARY KEY,
                    project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
                    file_name VARCHAR(255) NOT NULL,
                    file_content TEXT NOT NULL,
                    parent_folder_id UUID,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    CONSTRAINT files_parent_fkey FOREIGN KEY (parent_folder_id, project_id)
                        REFERENCES folders(id, project_id) ON DELETE CASCADE
                )
                "#
            }
            Table::Skills => {
                r#"
                CREATE TABLE IF NOT EXISTS skills (
                    id UUID PRIMARY KEY,
                    topic VARCHAR(100) NOT NULL,
                    intro TEXT NOT NULL,
                    questions JSONB NOT NULL DEFAULT '[]'::jsonb,
                    user_ids UUID[] NOT NULL DEFAULT '{}',
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#
            }
            Table::Submissions => {
                r#"
                CREATE TABLE IF NOT EXISTS submissions (
                    id UUID PRIMARY KEY,
                    skill_id UUID NOT NULL REFERENCES skills(id) ON DELETE CASCADE,
                    question_id VARCHAR(64) NOT NULL,
                    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                    code TEXT NOT NULL,
                    submitted_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#
            }
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTable(pub String);

impl fmt::Display for UnknownTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown table '{}'", self.0)
    }
}

impl std::error::Error for UnknownTable {}

impl FromStr for Table {
    type Err = UnknownTable;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Table::ALL
            .into_iter()
            .find(|table| table.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTable(s.to_string()))
    }
}

/// Message for a unique-constraint violation, keyed by constraint name.
pub fn conflict_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("users_username_key") => "username already taken".to_string(),
        Some("users_email_key") => "email already registered".to_string(),
        _ => "resource already exists".to_string(),
    }
}
