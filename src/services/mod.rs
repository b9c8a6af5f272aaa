pub mod academy_service;

pub use academy_service::{GeneratedSkill, GeneratorError, SkillGenerator};
