//! Top-level job routes. Creation lives under the company scope.

use std::collections::HashMap;

use actix_web::{web, HttpResponse, Scope};
use serde_json::{json, Value};
use uuid::Uuid;

use wl_core::domain::entities::Role;
use wl_core::query::parse_list_query;
use wl_core::repositories::{CompanyRepository, JobRepository};
use wl_core::services::JobService;
use wl_shared::ApiResponse;

use crate::errors::ApiError;
use crate::middleware::{require_role, AuthedUser};
use crate::routes::list_response;

const WRITERS: &[Role] = &[Role::Recruiter, Role::Admin];

pub fn scope<J, C>() -> Scope
where
    J: JobRepository + 'static,
    C: CompanyRepository + 'static,
{
    web::scope("/jobs")
        .route("", web::get().to(list::<J, C>))
        .route("/{id}", web::get().to(get::<J, C>))
        .route("/{id}", web::put().to(update::<J, C>))
        .route("/{id}", web::delete().to(delete::<J, C>))
}

async fn list<J, C>(
    service: web::Data<JobService<J, C>>,
    params: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, ApiError>
where
    J: JobRepository,
    C: CompanyRepository,
{
    let query = parse_list_query(&params)?;
    let page = service.list(&query).await?;
    Ok(list_response(page, query.window))
}

async fn get<J, C>(
    service: web::Data<JobService<J, C>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    J: JobRepository,
    C: CompanyRepository,
{
    let job = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(job)))
}

async fn update<J, C>(
    user: AuthedUser,
    service: web::Data<JobService<J, C>>,
    path: web::Path<Uuid>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError>
where
    J: JobRepository,
    C: CompanyRepository,
{
    require_role(&user.0, WRITERS)?;
    let job = service.update(path.into_inner(), &body, &user.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(job)))
}

async fn delete<J, C>(
    user: AuthedUser,
    service: web::Data<JobService<J, C>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    J: JobRepository,
    C: CompanyRepository,
{
    require_role(&user.0, WRITERS)?;
    service.delete(path.into_inner(), &user.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(json!({}))))
}
