//! Company service: CRUD with the pre-write pipeline, radius search,
//! cascade deletion and photo upload.

use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::company::{self, Company, Industry};
use crate::domain::entities::User;
use crate::domain::schema::{validate_create, validate_update};
use crate::errors::{DomainError, DomainResult};
use crate::query::{ListQuery, Page};
use crate::repositories::{CompanyRepository, JobRepository, ReviewRepository};
use crate::services::geocode::Geocoder;
use crate::services::populate;

use super::photos::PhotoStore;

/// Company management
///
/// Owns the pre-write pipeline: every create or rename re-derives the slug,
/// and every address change runs the geocoder before anything persists. The
/// free-form address itself is never stored.
pub struct CompanyService<C, J, R, G, P>
where
    C: CompanyRepository,
    J: JobRepository,
    R: ReviewRepository,
    G: Geocoder,
    P: PhotoStore,
{
    companies: C,
    jobs: J,
    reviews: R,
    geocoder: G,
    photos: P,
}

impl<C, J, R, G, P> CompanyService<C, J, R, G, P>
where
    C: CompanyRepository,
    J: JobRepository,
    R: ReviewRepository,
    G: Geocoder,
    P: PhotoStore,
{
    pub fn new(companies: C, jobs: J, reviews: R, geocoder: G, photos: P) -> Self {
        Self {
            companies,
            jobs,
            reviews,
            geocoder,
            photos,
        }
    }

    /// Runs a translated list query over the collection. Each listed
    /// company carries its job postings under a `jobs` key.
    pub async fn list(&self, query: &ListQuery) -> DomainResult<Page<Value>> {
        let mut page = self.companies.list(query).await?;
        populate::attach_jobs(&self.jobs, &mut page.items).await?;
        Ok(page)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Company> {
        self.companies
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Company"))
    }

    /// Creates a company for the acting user.
    ///
    /// Non-admin users may own at most one company.
    pub async fn create(&self, payload: &Value, actor: &User) -> DomainResult<Company> {
        validate_create(company::CREATE_RULES, payload)?;

        if !actor.is_admin() {
            if self.companies.find_by_owner(actor.id).await?.is_some() {
                return Err(DomainError::validation_msg(format!(
                    "The user with ID {} has already published a company",
                    actor.id
                )));
            }
        }

        let name = str_field(payload, "name");
        let description = str_field(payload, "description");
        let industries = parse_industries(payload);

        let mut created = Company::new(name, description, industries, actor.id);
        created.website = opt_str(payload, "website");
        created.phone = opt_str(payload, "phone");
        created.email = opt_str(payload, "email");
        if let Some(remote) = payload.get("remote_work").and_then(Value::as_bool) {
            created.remote_work = remote;
        }

        created.slug = wl_shared::slug::slugify(&created.name);
        let address = str_field(payload, "address");
        created.location = Some(self.geocoder.geocode(&address).await?);

        let created = self.companies.create(created).await?;
        info!(company = %created.id, "company created");
        Ok(created)
    }

    /// Updates a company the actor owns (or any company, for admins)
    pub async fn update(&self, id: Uuid, payload: &Value, actor: &User) -> DomainResult<Company> {
        let mut existing = self.get(id).await?;
        ensure_owner_or_admin(existing.owner, actor, "update this company")?;
        validate_update(company::CREATE_RULES, payload)?;

        if let Some(name) = payload.get("name").and_then(Value::as_str) {
            existing.name = name.to_string();
            existing.slug = wl_shared::slug::slugify(name);
        }
        if let Some(description) = payload.get("description").and_then(Value::as_str) {
            existing.description = description.to_string();
        }
        if payload.get("website").is_some() {
            existing.website = opt_str(payload, "website");
        }
        if payload.get("phone").is_some() {
            existing.phone = opt_str(payload, "phone");
        }
        if payload.get("email").is_some() {
            existing.email = opt_str(payload, "email");
        }
        if payload.get("industries").is_some() {
            existing.industries = parse_industries(payload);
        }
        if let Some(remote) = payload.get("remote_work").and_then(Value::as_bool) {
            existing.remote_work = remote;
        }
        if let Some(address) = payload.get("address").and_then(Value::as_str) {
            existing.location = Some(self.geocoder.geocode(address).await?);
        }

        existing.touch();
        self.companies.update(existing).await
    }

    /// Deletes a company and everything hanging off it: jobs and reviews
    /// go with it so no orphaned records keep pointing at a dead id
    pub async fn delete(&self, id: Uuid, actor: &User) -> DomainResult<()> {
        let existing = self.get(id).await?;
        ensure_owner_or_admin(existing.owner, actor, "delete this company")?;

        let jobs_removed = self.jobs.delete_by_company(id).await?;
        let reviews_removed = self.reviews.delete_by_company(id).await?;
        self.companies.delete(id).await?;

        info!(
            company = %id,
            jobs_removed,
            reviews_removed,
            "company deleted"
        );
        Ok(())
    }

    /// Companies within `distance_km` of a geocoded address or zipcode
    pub async fn within_radius(
        &self,
        place: &str,
        distance_km: f64,
    ) -> DomainResult<Vec<Company>> {
        if distance_km <= 0.0 {
            return Err(DomainError::validation(
                "distance",
                "Distance must be a positive number",
            ));
        }

        let location = self.geocoder.geocode(place).await?;
        self.companies
            .find_within_radius(location.coordinates, distance_km)
            .await
    }

    /// Stores an uploaded photo and records its filename on the company.
    ///
    /// Only image content types are accepted, and the payload may not
    /// exceed `max_bytes`.
    pub async fn upload_photo(
        &self,
        id: Uuid,
        actor: &User,
        content_type: &str,
        bytes: &[u8],
        max_bytes: usize,
    ) -> DomainResult<String> {
        let mut existing = self.get(id).await?;
        ensure_owner_or_admin(existing.owner, actor, "update this company")?;

        if !content_type.starts_with("image/") {
            return Err(DomainError::validation(
                "file",
                "Please upload an image file",
            ));
        }
        if bytes.is_empty() {
            return Err(DomainError::validation("file", "Please upload a file"));
        }
        if bytes.len() > max_bytes {
            return Err(DomainError::validation(
                "file",
                format!("Please upload an image less than {max_bytes} bytes"),
            ));
        }

        let filename = format!("photo_{}{}", existing.id, extension_for(content_type));
        self.photos.save(&filename, bytes).await?;

        existing.photo = filename.clone();
        existing.touch();
        self.companies.update(existing).await?;
        Ok(filename)
    }
}

fn ensure_owner_or_admin(owner: Uuid, actor: &User, action: &str) -> DomainResult<()> {
    if actor.is_admin() || actor.id == owner {
        return Ok(());
    }
    Err(DomainError::Forbidden(format!(
        "User {} is not authorized to {action}",
        actor.id
    )))
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        _ => ".img",
    }
}

fn str_field(payload: &Value, field: &str) -> String {
    payload
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn opt_str(payload: &Value, field: &str) -> Option<String> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

fn parse_industries(payload: &Value) -> Vec<Industry> {
    payload
        .get("industries")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .filter_map(|s| s.parse::<Industry>().ok())
                .collect()
        })
        .unwrap_or_default()
}
