use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewSkill {
    pub topic: String,
    pub intro: String,
    pub questions: Value,
    pub user_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Skill {
    pub id: Uuid,
    pub topic: String,
    pub intro: String,
    /// Question/tutorial document as produced by the generator.
    pub questions: Value,
    pub user_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Skill {
    /// Looks up a question by id. Question ids may be strings or numbers in
    /// the generated document, so both compare against the path segment.
    pub fn has_question(&self, question_id: &str) -> bool {
        let Some(questions) = self.questions.as_array() else {
            return false;
        };

        questions.iter().any(|q| match q.get("id") {
            Some(Value::String(id)) => id == question_id,
            Some(Value::Number(id)) => id.to_string() == question_id,
            _ => false,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillSummary {
    #[serde(rename = "skill_id")]
    pub id: Uuid,
    pub topic: String,
}

#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub skill_id: Uuid,
    pub question_id: String,
    pub user_id: Uuid,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Submission {
    pub id: Uuid,
    pub skill_id: Uuid,
    pub question_id: String,
    pub user_id: Uuid,
    pub code: String,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn skill_with(questions: Value) -> Skill {
        Skill {
            id: Uuid::new_v4(),
            topic: "rust".into(),
            intro: "intro".into(),
            questions,
            user_ids: vec![],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn finds_string_and_numeric_question_ids() {
        let skill = skill_with(json!([{ "id": "q1" }, { "id": 2 }]));
        assert!(skill.has_question("q1"));
        assert!(skill.has_question("2"));
        assert!(!skill.has_question("q3"));
    }

    #[test]
    fn non_array_document_has_no_questions() {
        let skill = skill_with(json!({ "id": "q1" }));
        assert!(!skill.has_question("q1"));
    }

    #[test]
    fn summary_serializes_skill_id() {
        let summary = SkillSummary { id: Uuid::nil(), topic: "graphs".into() };
        let value = serde_json::to_value(summary).unwrap();
        assert_eq!(value["topic"], "graphs");
        assert!(value.get("skill_id").is_some());
    }
}
