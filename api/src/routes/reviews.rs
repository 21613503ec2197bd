//! Top-level review routes. Creation lives under the company scope.

use std::collections::HashMap;

use actix_web::{web, HttpResponse, Scope};
use serde_json::{json, Value};
use uuid::Uuid;

use wl_core::domain::entities::Role;
use wl_core::query::parse_list_query;
use wl_core::repositories::{CompanyRepository, ReviewRepository};
use wl_core::services::ReviewService;
use wl_shared::ApiResponse;

use crate::errors::ApiError;
use crate::middleware::{require_role, AuthedUser};
use crate::routes::list_response;

const REVIEWERS: &[Role] = &[Role::User, Role::Admin];

pub fn scope<R, C>() -> Scope
where
    R: ReviewRepository + 'static,
    C: CompanyRepository + 'static,
{
    web::scope("/reviews")
        .route("", web::get().to(list::<R, C>))
        .route("/{id}", web::get().to(get::<R, C>))
        .route("/{id}", web::put().to(update::<R, C>))
        .route("/{id}", web::delete().to(delete::<R, C>))
}

async fn list<R, C>(
    service: web::Data<ReviewService<R, C>>,
    params: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, ApiError>
where
    R: ReviewRepository,
    C: CompanyRepository,
{
    let query = parse_list_query(&params)?;
    let page = service.list(&query).await?;
    Ok(list_response(page, query.window))
}

async fn get<R, C>(
    service: web::Data<ReviewService<R, C>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    R: ReviewRepository,
    C: CompanyRepository,
{
    let review = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(review)))
}

async fn update<R, C>(
    user: AuthedUser,
    service: web::Data<ReviewService<R, C>>,
    path: web::Path<Uuid>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError>
where
    R: ReviewRepository,
    C: CompanyRepository,
{
    require_role(&user.0, REVIEWERS)?;
    let review = service.update(path.into_inner(), &body, &user.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(review)))
}

async fn delete<R, C>(
    user: AuthedUser,
    service: web::Data<ReviewService<R, C>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    R: ReviewRepository,
    C: CompanyRepository,
{
    require_role(&user.0, REVIEWERS)?;
    service.delete(path.into_inner(), &user.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(json!({}))))
}
