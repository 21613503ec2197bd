//! Declarative validation rules applied to inbound JSON payloads.
//!
//! Each entity module exposes a `CREATE_RULES` table describing its required
//! fields and constraints. `validate_create` applies the full table and
//! `validate_update` skips presence checks, so partial payloads only have to
//! satisfy the constraints of the fields they actually carry. All failures
//! are collected and surfaced as a single `DomainError::Validation`.

use serde_json::Value;

use crate::errors::{DomainError, DomainResult, Violation};

/// One validation constraint
#[derive(Clone, Copy)]
pub enum Constraint {
    /// Field must be present and non-null (non-empty for strings)
    Required,
    /// String length must not exceed the limit
    MaxLength(usize),
    /// String length must be at least the limit
    MinLength(usize),
    /// String must satisfy the predicate
    Matches(fn(&str) -> bool),
    /// String must be one of the listed values
    OneOf(&'static [&'static str]),
    /// Every string in the array must be one of the listed values
    EachOneOf(&'static [&'static str]),
    /// Array must contain at least one element
    NonEmptyList,
    /// Number must fall within the inclusive range
    Range { min: f64, max: f64 },
}

/// A constraint bound to a payload field, with the message reported on failure
#[derive(Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub constraint: Constraint,
    pub message: &'static str,
}

/// Validates a creation payload against the full rule table
pub fn validate_create(rules: &[FieldRule], payload: &Value) -> DomainResult<()> {
    validate(rules, payload, true)
}

/// Validates an update payload: absent fields are left alone, present
/// fields must still satisfy their constraints
pub fn validate_update(rules: &[FieldRule], payload: &Value) -> DomainResult<()> {
    validate(rules, payload, false)
}

fn validate(rules: &[FieldRule], payload: &Value, require_presence: bool) -> DomainResult<()> {
    let mut violations = Vec::new();

    for rule in rules {
        let value = payload.get(rule.field);
        let present = matches!(value, Some(v) if !v.is_null());

        if let Constraint::Required = rule.constraint {
            if require_presence && !satisfies_required(value) {
                violations.push(Violation {
                    field: rule.field.to_string(),
                    message: rule.message.to_string(),
                });
            }
            continue;
        }

        if !present {
            continue;
        }
        let value = value.unwrap();

        if !satisfies(&rule.constraint, value) {
            violations.push(Violation {
                field: rule.field.to_string(),
                message: rule.message.to_string(),
            });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation { violations })
    }
}

fn satisfies_required(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

fn satisfies(constraint: &Constraint, value: &Value) -> bool {
    match constraint {
        Constraint::Required => true,
        Constraint::MaxLength(limit) => match value.as_str() {
            Some(s) => s.chars().count() <= *limit,
            None => false,
        },
        Constraint::MinLength(limit) => match value.as_str() {
            Some(s) => s.chars().count() >= *limit,
            None => false,
        },
        Constraint::Matches(predicate) => match value.as_str() {
            Some(s) => predicate(s),
            None => false,
        },
        Constraint::OneOf(options) => match value.as_str() {
            Some(s) => options.contains(&s),
            None => false,
        },
        Constraint::EachOneOf(options) => match value.as_array() {
            Some(items) => items
                .iter()
                .all(|item| matches!(item.as_str(), Some(s) if options.contains(&s))),
            None => false,
        },
        Constraint::NonEmptyList => match value.as_array() {
            Some(items) => !items.is_empty(),
            None => false,
        },
        Constraint::Range { min, max } => match value.as_f64() {
            Some(n) => n >= *min && n <= *max,
            None => false,
        },
    }
}
