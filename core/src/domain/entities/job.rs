//! Job entity posted by a company.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::schema::{Constraint, FieldRule};

/// Minimum experience level required for a job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinimumSkill {
    Junior,
    Medior,
    Senior,
}

/// Accepted string spellings, used by the schema rules
pub const MINIMUM_SKILL_NAMES: &[&str] = &["junior", "medior", "senior"];

impl std::str::FromStr for MinimumSkill {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "junior" => Ok(MinimumSkill::Junior),
            "medior" => Ok(MinimumSkill::Medior),
            "senior" => Ok(MinimumSkill::Senior),
            _ => Err(()),
        }
    }
}

/// Job entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique identifier
    pub id: Uuid,

    /// Job title
    pub title: String,

    /// Job description
    pub description: String,

    /// Required years of experience
    pub years_of_experience: u32,

    /// Yearly salary
    pub salary: u64,

    /// Minimum skill level
    pub minimum_skill: MinimumSkill,

    /// Whether the job is suitable for entry-level candidates
    pub entry_level_job: bool,

    /// Company offering the job
    pub company: Uuid,

    /// User who created the posting
    pub creator: Uuid,

    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn new(
        title: String,
        description: String,
        years_of_experience: u32,
        salary: u64,
        minimum_skill: MinimumSkill,
        entry_level_job: bool,
        company: Uuid,
        creator: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            years_of_experience,
            salary,
            minimum_skill,
            entry_level_job,
            company,
            creator,
            created_at: Utc::now(),
        }
    }
}

/// Schema rules for job creation
pub static CREATE_RULES: &[FieldRule] = &[
    FieldRule {
        field: "title",
        constraint: Constraint::Required,
        message: "Please add a job title",
    },
    FieldRule {
        field: "description",
        constraint: Constraint::Required,
        message: "Please add a description",
    },
    FieldRule {
        field: "years_of_experience",
        constraint: Constraint::Required,
        message: "Please add a number of years of experience",
    },
    FieldRule {
        field: "salary",
        constraint: Constraint::Required,
        message: "Please add a salary",
    },
    FieldRule {
        field: "minimum_skill",
        constraint: Constraint::Required,
        message: "Please add a minimum skill",
    },
    FieldRule {
        field: "minimum_skill",
        constraint: Constraint::OneOf(MINIMUM_SKILL_NAMES),
        message: "Minimum skill must be junior, medior or senior",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_skill_parsing() {
        assert_eq!("junior".parse::<MinimumSkill>(), Ok(MinimumSkill::Junior));
        assert_eq!("senior".parse::<MinimumSkill>(), Ok(MinimumSkill::Senior));
        assert!("principal".parse::<MinimumSkill>().is_err());
    }

    #[test]
    fn test_minimum_skill_serialization() {
        assert_eq!(
            serde_json::to_string(&MinimumSkill::Medior).unwrap(),
            "\"medior\""
        );
    }
}
