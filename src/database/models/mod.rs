pub mod file;
pub mod folder;
pub mod project;
pub mod skill;
pub mod user;

pub use file::{File, NewFile};
pub use folder::{Folder, NewFolder};
pub use project::{NewProject, Project};
pub use skill::{NewSkill, NewSubmission, Skill, SkillSummary, Submission};
pub use user::{NewUser, Socials, StoredCredentials, UserProfile};
