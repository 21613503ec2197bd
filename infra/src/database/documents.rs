//! BSON conversion and query translation shared by the repositories.

use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::Collection;
use serde_json::Value;
use uuid::Uuid;

use wl_core::errors::{DomainError, DomainResult};
use wl_core::query::{eval, Comparison, Condition, ListQuery, Page, Scalar, SortDirection, SortKey};

/// Maps a driver error onto the domain's upstream variant
pub(crate) fn storage_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::upstream("database", e.to_string())
}

/// Maps an insert or replace error, surfacing unique-index violations
/// (duplicate email, company name or review pair) as duplicates
pub(crate) fn write_err(e: mongodb::error::Error) -> DomainError {
    use mongodb::error::{ErrorKind, WriteFailure};

    if let ErrorKind::Write(WriteFailure::WriteError(ref write_error)) = *e.kind {
        if write_error.code == 11000 {
            return DomainError::Duplicate("Duplicate field value entered".to_string());
        }
    }
    storage_err(e)
}

/// JSON object to BSON document, renaming `id` to `_id`
pub(crate) fn json_to_document(json: Value) -> DomainResult<Document> {
    let bson = mongodb::bson::to_bson(&json).map_err(storage_err)?;
    let mut document = match bson {
        Bson::Document(d) => d,
        _ => return Err(DomainError::internal("expected a JSON object")),
    };

    if let Some(id) = document.remove("id") {
        document.insert("_id", id);
    }
    Ok(document)
}

/// BSON document back to JSON, renaming `_id` to `id`
pub(crate) fn document_to_json(mut document: Document) -> Value {
    if let Some(id) = document.remove("_id") {
        document.insert("id", id);
    }
    Bson::Document(document).into_relaxed_extjson()
}

pub(crate) fn uuid_bson(id: Uuid) -> Bson {
    Bson::String(id.to_string())
}

fn scalar_bson(scalar: &Scalar) -> Bson {
    match scalar {
        Scalar::Number(n) => Bson::Double(*n),
        Scalar::Bool(b) => Bson::Boolean(*b),
        Scalar::Text(s) => Bson::String(s.clone()),
    }
}

/// Translates the plan's conditions into a find filter
pub(crate) fn filter_document(conditions: &[Condition]) -> Document {
    let mut filter = Document::new();
    for condition in conditions {
        let clause = match &condition.comparison {
            Comparison::Eq(v) => scalar_bson(v),
            Comparison::Gt(v) => Bson::Document(doc! { "$gt": scalar_bson(v) }),
            Comparison::Gte(v) => Bson::Document(doc! { "$gte": scalar_bson(v) }),
            Comparison::Lt(v) => Bson::Document(doc! { "$lt": scalar_bson(v) }),
            Comparison::Lte(v) => Bson::Document(doc! { "$lte": scalar_bson(v) }),
            Comparison::In(values) => Bson::Document(doc! {
                "$in": values.iter().map(scalar_bson).collect::<Vec<_>>()
            }),
        };
        filter.insert(condition.field.clone(), clause);
    }
    filter
}

/// Translates the plan's sort keys into a sort document
pub(crate) fn sort_document(keys: &[SortKey]) -> Document {
    let mut sort = Document::new();
    for key in keys {
        let direction = match key.direction {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        };
        sort.insert(key.field.clone(), direction);
    }
    sort
}

/// Runs the full list plan against a collection: filter, count, sort,
/// window, then the same post-fetch projection the mocks use
pub(crate) async fn run_list_query(
    collection: &Collection<Document>,
    query: &ListQuery,
) -> DomainResult<Page<Value>> {
    let filter = filter_document(&query.conditions);

    let total = collection
        .count_documents(filter.clone())
        .await
        .map_err(storage_err)?;

    let cursor = collection
        .find(filter)
        .sort(sort_document(&query.sort))
        .skip(query.window.skip())
        .limit(i64::try_from(query.window.limit).unwrap_or(i64::MAX))
        .await
        .map_err(storage_err)?;
    let documents: Vec<Document> = cursor.try_collect().await.map_err(storage_err)?;

    let mut items: Vec<Value> = documents.into_iter().map(document_to_json).collect();
    if let Some(fields) = &query.select {
        items = items.iter().map(|doc| eval::project(doc, fields)).collect();
    }

    Ok(Page::new(items, total))
}

/// Extracts a single `$avg` aggregation result, if the group matched
pub(crate) async fn run_average(
    collection: &Collection<Document>,
    company: Uuid,
    field: &str,
) -> DomainResult<Option<f64>> {
    let pipeline = vec![
        doc! { "$match": { "company": uuid_bson(company) } },
        doc! { "$group": { "_id": "$company", "average": { "$avg": format!("${field}") } } },
    ];

    let mut cursor = collection
        .aggregate(pipeline)
        .await
        .map_err(storage_err)?;

    match cursor.try_next().await.map_err(storage_err)? {
        Some(group) => Ok(bson_f64(group.get("average"))),
        None => Ok(None),
    }
}

fn bson_f64(value: Option<&Bson>) -> Option<f64> {
    match value {
        Some(Bson::Double(n)) => Some(*n),
        Some(Bson::Int32(n)) => Some(*n as f64),
        Some(Bson::Int64(n)) => Some(*n as f64),
        _ => None,
    }
}

// Field accessors for the explicitly mapped user collection

pub(crate) fn get_string(document: &Document, key: &str) -> DomainResult<String> {
    document
        .get_str(key)
        .map(str::to_string)
        .map_err(|_| DomainError::internal(format!("missing field '{key}'")))
}

pub(crate) fn get_opt_string(document: &Document, key: &str) -> Option<String> {
    document.get_str(key).ok().map(str::to_string)
}

pub(crate) fn get_bool(document: &Document, key: &str) -> DomainResult<bool> {
    document
        .get_bool(key)
        .map_err(|_| DomainError::internal(format!("missing field '{key}'")))
}

pub(crate) fn get_uuid(document: &Document, key: &str) -> DomainResult<Uuid> {
    let raw = get_string(document, key)?;
    Uuid::parse_str(&raw).map_err(|_| DomainError::internal(format!("malformed uuid in '{key}'")))
}

pub(crate) fn get_datetime(document: &Document, key: &str) -> DomainResult<DateTime<Utc>> {
    let raw = get_string(document, key)?;
    parse_datetime(&raw).ok_or_else(|| DomainError::internal(format!("malformed date in '{key}'")))
}

pub(crate) fn get_opt_datetime(document: &Document, key: &str) -> Option<DateTime<Utc>> {
    document.get_str(key).ok().and_then(parse_datetime)
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
