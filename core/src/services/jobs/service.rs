//! Job service: CRUD scoped to companies, with salary-aggregate upkeep.

use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::job::{self, Job, MinimumSkill};
use crate::domain::entities::User;
use crate::domain::schema::{validate_create, validate_update};
use crate::errors::{DomainError, DomainResult};
use crate::query::{ListQuery, Page, Populate};
use crate::repositories::{CompanyRepository, JobRepository};
use crate::services::{aggregates, populate};

/// Job management
///
/// Every write that can move a company's salary mix refreshes the derived
/// average after the job write commits.
pub struct JobService<J, C>
where
    J: JobRepository,
    C: CompanyRepository,
{
    jobs: J,
    companies: C,
}

impl<J, C> JobService<J, C>
where
    J: JobRepository,
    C: CompanyRepository,
{
    pub fn new(jobs: J, companies: C) -> Self {
        Self { jobs, companies }
    }

    fn company_populate() -> Populate {
        Populate::with_select("company", &["name", "description"])
    }

    /// Runs a translated list query, embedding each job's company
    pub async fn list(&self, query: &ListQuery) -> DomainResult<Page<Value>> {
        let mut page = self.jobs.list(query).await?;
        populate::attach_company(&self.companies, &mut page.items, &Self::company_populate())
            .await?;
        Ok(page)
    }

    /// Fetches one job with its company embedded
    pub async fn get(&self, id: Uuid) -> DomainResult<Value> {
        let job = self.find(id).await?;
        let mut docs = vec![serde_json::to_value(&job)
            .map_err(|e| DomainError::internal(e.to_string()))?];
        populate::attach_company(&self.companies, &mut docs, &Self::company_populate()).await?;
        Ok(docs.remove(0))
    }

    /// Creates a job under a company the actor owns
    pub async fn create(
        &self,
        company_id: Uuid,
        payload: &Value,
        actor: &User,
    ) -> DomainResult<Job> {
        validate_create(job::CREATE_RULES, payload)?;

        let company = self
            .companies
            .find_by_id(company_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Company"))?;

        if !actor.is_admin() && actor.id != company.owner {
            return Err(DomainError::Forbidden(format!(
                "User {} is not authorized to add a job to company {}",
                actor.id, company.id
            )));
        }

        let job = Job::new(
            str_field(payload, "title"),
            str_field(payload, "description"),
            u32_field(payload, "years_of_experience"),
            u64_field(payload, "salary"),
            skill_field(payload),
            payload
                .get("entry_level_job")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            company.id,
            actor.id,
        );

        let created = self.jobs.create(job).await?;
        aggregates::refresh_average_salary(&self.jobs, &self.companies, company.id).await?;
        Ok(created)
    }

    /// Updates a job the actor created (or any job, for admins)
    pub async fn update(&self, id: Uuid, payload: &Value, actor: &User) -> DomainResult<Job> {
        let mut existing = self.find(id).await?;
        self.ensure_creator_or_admin(&existing, actor, "update")?;
        validate_update(job::CREATE_RULES, payload)?;

        if let Some(title) = payload.get("title").and_then(Value::as_str) {
            existing.title = title.to_string();
        }
        if let Some(description) = payload.get("description").and_then(Value::as_str) {
            existing.description = description.to_string();
        }
        if payload.get("years_of_experience").is_some() {
            existing.years_of_experience = u32_field(payload, "years_of_experience");
        }
        if payload.get("salary").is_some() {
            existing.salary = u64_field(payload, "salary");
        }
        if payload.get("minimum_skill").is_some() {
            existing.minimum_skill = skill_field(payload);
        }
        if let Some(entry) = payload.get("entry_level_job").and_then(Value::as_bool) {
            existing.entry_level_job = entry;
        }

        let updated = self.jobs.update(existing).await?;
        aggregates::refresh_average_salary(&self.jobs, &self.companies, updated.company).await?;
        Ok(updated)
    }

    /// Deletes a job the actor created (or any job, for admins)
    pub async fn delete(&self, id: Uuid, actor: &User) -> DomainResult<()> {
        let existing = self.find(id).await?;
        self.ensure_creator_or_admin(&existing, actor, "delete")?;

        self.jobs.delete(id).await?;
        aggregates::refresh_average_salary(&self.jobs, &self.companies, existing.company).await?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> DomainResult<Job> {
        self.jobs
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Job"))
    }

    fn ensure_creator_or_admin(&self, job: &Job, actor: &User, action: &str) -> DomainResult<()> {
        if actor.is_admin() || actor.id == job.creator {
            return Ok(());
        }
        Err(DomainError::Forbidden(format!(
            "User {} is not authorized to {action} job {}",
            actor.id, job.id
        )))
    }
}

fn str_field(payload: &Value, field: &str) -> String {
    payload
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn u32_field(payload: &Value, field: &str) -> u32 {
    payload
        .get(field)
        .and_then(Value::as_u64)
        .unwrap_or_default() as u32
}

fn u64_field(payload: &Value, field: &str) -> u64 {
    payload
        .get(field)
        .and_then(Value::as_u64)
        .unwrap_or_default()
}

fn skill_field(payload: &Value) -> MinimumSkill {
    payload
        .get("minimum_skill")
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or(MinimumSkill::Junior)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Company, Industry, Role};
    use crate::query::{parse_list_query, Scalar};
    use crate::repositories::{MockCompanyRepository, MockJobRepository};
    use serde_json::json;
    use std::collections::HashMap;

    struct Harness {
        service: JobService<MockJobRepository, MockCompanyRepository>,
        companies: MockCompanyRepository,
        owner: User,
        company: Company,
    }

    async fn harness() -> Harness {
        let companies = MockCompanyRepository::new();
        let jobs = MockJobRepository::new();

        let owner = User::new(
            "Rita".to_string(),
            "rita@example.com".to_string(),
            "hash".to_string(),
            Role::Recruiter,
        );
        let company = Company::new(
            "Acme".to_string(),
            "Anvils".to_string(),
            vec![Industry::Tech],
            owner.id,
        );
        companies.seed(company.clone()).await;

        Harness {
            service: JobService::new(jobs, companies.clone()),
            companies,
            owner,
            company,
        }
    }

    fn payload(salary: u64) -> Value {
        json!({
            "title": "Backend Engineer",
            "description": "Builds services",
            "years_of_experience": 3,
            "salary": salary,
            "minimum_skill": "medior",
        })
    }

    #[tokio::test]
    async fn test_create_refreshes_average_salary() {
        let h = harness().await;
        h.service
            .create(h.company.id, &payload(10000), &h.owner)
            .await
            .unwrap();
        h.service
            .create(h.company.id, &payload(10001), &h.owner)
            .await
            .unwrap();

        let stored = h.companies.find_by_id(h.company.id).await.unwrap().unwrap();
        assert_eq!(stored.average_salary, Some(10001));
    }

    #[tokio::test]
    async fn test_create_under_missing_company() {
        let h = harness().await;
        let err = h
            .service
            .create(Uuid::new_v4(), &payload(10000), &h.owner)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_create_by_stranger_forbidden() {
        let h = harness().await;
        let stranger = User::new(
            "Sam".to_string(),
            "sam@example.com".to_string(),
            "hash".to_string(),
            Role::Recruiter,
        );

        let err = h
            .service
            .create(h.company.id, &payload(10000), &stranger)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_invalid_skill_rejected() {
        let h = harness().await;
        let mut bad = payload(10000);
        bad["minimum_skill"] = json!("wizard");

        let err = h
            .service
            .create(h.company.id, &bad, &h.owner)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_delete_last_job_clears_average() {
        let h = harness().await;
        let created = h
            .service
            .create(h.company.id, &payload(10000), &h.owner)
            .await
            .unwrap();

        h.service.delete(created.id, &h.owner).await.unwrap();

        let stored = h.companies.find_by_id(h.company.id).await.unwrap().unwrap();
        assert_eq!(stored.average_salary, None);
    }

    #[tokio::test]
    async fn test_update_moves_average() {
        let h = harness().await;
        let created = h
            .service
            .create(h.company.id, &payload(10000), &h.owner)
            .await
            .unwrap();

        h.service
            .update(created.id, &json!({"salary": 20000}), &h.owner)
            .await
            .unwrap();

        let stored = h.companies.find_by_id(h.company.id).await.unwrap().unwrap();
        assert_eq!(stored.average_salary, Some(20000));
    }

    #[tokio::test]
    async fn test_list_embeds_company() {
        let h = harness().await;
        h.service
            .create(h.company.id, &payload(10000), &h.owner)
            .await
            .unwrap();

        let query = parse_list_query(&HashMap::new())
            .unwrap()
            .scoped_to("company", Scalar::Text(h.company.id.to_string()));
        let page = h.service.list(&query).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0]["company"]["name"], "Acme");
    }
}
