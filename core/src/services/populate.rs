//! Post-fetch population of foreign keys with embedded documents.

use serde_json::Value;
use uuid::Uuid;

use crate::errors::DomainResult;
use crate::query::{eval, Populate};
use crate::repositories::{CompanyRepository, JobRepository};

/// Replaces the company id in each document with an embedded projection of
/// the company itself. Ids that no longer resolve are left in place.
pub async fn attach_company<C>(
    companies: &C,
    documents: &mut [Value],
    populate: &Populate,
) -> DomainResult<()>
where
    C: CompanyRepository + ?Sized,
{
    for document in documents.iter_mut() {
        let Some(object) = document.as_object_mut() else {
            continue;
        };
        let Some(id) = object
            .get(&populate.path)
            .and_then(Value::as_str)
            .and_then(|raw| Uuid::parse_str(raw).ok())
        else {
            continue;
        };

        if let Some(company) = companies.find_by_id(id).await? {
            let mut embedded = serde_json::to_value(&company)
                .map_err(|e| crate::errors::DomainError::internal(e.to_string()))?;
            if let Some(fields) = &populate.select {
                embedded = eval::project(&embedded, fields);
            }
            object.insert(populate.path.clone(), embedded);
        }
    }

    Ok(())
}

/// The reverse direction: embeds each company's jobs under a `jobs` key.
/// Documents without a resolvable `id` are left untouched.
pub async fn attach_jobs<J>(jobs: &J, documents: &mut [Value]) -> DomainResult<()>
where
    J: JobRepository + ?Sized,
{
    for document in documents.iter_mut() {
        let Some(object) = document.as_object_mut() else {
            continue;
        };
        let Some(id) = object
            .get("id")
            .and_then(Value::as_str)
            .and_then(|raw| Uuid::parse_str(raw).ok())
        else {
            continue;
        };

        let posted = jobs.find_by_company(id).await?;
        let embedded = serde_json::to_value(&posted)
            .map_err(|e| crate::errors::DomainError::internal(e.to_string()))?;
        object.insert("jobs".to_string(), embedded);
    }

    Ok(())
}
