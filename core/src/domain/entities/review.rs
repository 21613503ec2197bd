//! Review entity: one per (company, author) pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::schema::{Constraint, FieldRule};

/// Review entity
///
/// The store enforces uniqueness of `(company, author)`; a concurrent
/// duplicate insert loses the race and surfaces `DomainError::Duplicate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Unique identifier
    pub id: Uuid,

    /// Review headline
    pub title: String,

    /// Review body
    pub text: String,

    /// Rating from 1 to 10
    pub rating: u8,

    /// Reviewed company
    pub company: Uuid,

    /// Review author
    pub author: Uuid,

    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn new(title: String, text: String, rating: u8, company: Uuid, author: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            text,
            rating,
            company,
            author,
            created_at: Utc::now(),
        }
    }
}

/// Schema rules for review creation
pub static CREATE_RULES: &[FieldRule] = &[
    FieldRule {
        field: "title",
        constraint: Constraint::Required,
        message: "Please add a title for the review",
    },
    FieldRule {
        field: "title",
        constraint: Constraint::MaxLength(100),
        message: "Title can not be more than 100 characters",
    },
    FieldRule {
        field: "text",
        constraint: Constraint::Required,
        message: "Please add some text",
    },
    FieldRule {
        field: "rating",
        constraint: Constraint::Required,
        message: "Please add a rating between 1 and 10",
    },
    FieldRule {
        field: "rating",
        constraint: Constraint::Range { min: 1.0, max: 10.0 },
        message: "Rating must be between 1 and 10",
    },
];
