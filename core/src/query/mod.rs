//! Translation of list-endpoint query strings into a typed query plan.
//!
//! Every collection endpoint accepts the same surface: filter parameters
//! with optional bracket operators (`salary[gte]=10000`), plus the reserved
//! keys `select`, `sort`, `page` and `limit`. `parse` turns that surface
//! into a [`ListQuery`]; repositories translate the plan into their own
//! storage dialect, and [`eval`] executes it in memory for the mock stores.

mod parse;

pub mod eval;

pub use parse::{parse_list_query, RESERVED_KEYS};

use serde_json::Value;
use wl_shared::PageWindow;

/// A scalar filter operand, inferred from the raw query-string text
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl Scalar {
    /// Infers the operand type: number first, then boolean, else text
    pub fn infer(raw: &str) -> Self {
        if let Ok(n) = raw.parse::<f64>() {
            return Scalar::Number(n);
        }
        match raw {
            "true" => Scalar::Bool(true),
            "false" => Scalar::Bool(false),
            _ => Scalar::Text(raw.to_string()),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Number(n) => serde_json::json!(n),
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Text(s) => Value::String(s.clone()),
        }
    }
}

/// How a field is compared against its operand
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Eq(Scalar),
    Gt(Scalar),
    Gte(Scalar),
    Lt(Scalar),
    Lte(Scalar),
    In(Vec<Scalar>),
}

/// A single filter on one field
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub comparison: Comparison,
}

impl Condition {
    pub fn eq(field: impl Into<String>, value: Scalar) -> Self {
        Self {
            field: field.into(),
            comparison: Comparison::Eq(value),
        }
    }
}

/// Sort direction for one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One sort key; multiple keys apply left to right
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// A fully translated list query
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub conditions: Vec<Condition>,
    /// Fields to project; `None` returns full documents
    pub select: Option<Vec<String>>,
    pub sort: Vec<SortKey>,
    pub window: PageWindow,
}

impl ListQuery {
    /// Adds a fixed equality filter, used by nested routes to scope the
    /// query to a parent resource
    pub fn scoped_to(mut self, field: impl Into<String>, value: Scalar) -> Self {
        self.conditions.push(Condition::eq(field, value));
        self
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
            select: None,
            sort: vec![SortKey::desc("created_at")],
            window: PageWindow::default(),
        }
    }
}

/// A request to embed a related document in place of a foreign key,
/// optionally projected to a subset of its fields
#[derive(Debug, Clone, PartialEq)]
pub struct Populate {
    pub path: String,
    pub select: Option<Vec<String>>,
}

impl Populate {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            select: None,
        }
    }

    pub fn with_select(path: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            path: path.into(),
            select: Some(fields.iter().map(|f| f.to_string()).collect()),
        }
    }
}

/// One page of results plus the total match count before windowing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
