//! Company routes, including the nested job and review collections.

use std::collections::HashMap;

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse, Scope};
use serde_json::{json, Value};
use uuid::Uuid;

use wl_core::domain::entities::Role;
use wl_core::query::{parse_list_query, Scalar};
use wl_core::repositories::{CompanyRepository, JobRepository, ReviewRepository};
use wl_core::services::{CompanyService, Geocoder, JobService, PhotoStore, ReviewService};
use wl_shared::config::AppConfig;
use wl_shared::ApiResponse;

use crate::errors::ApiError;
use crate::middleware::{require_role, AuthedUser};
use crate::routes::list_response;

const WRITERS: &[Role] = &[Role::Recruiter, Role::Admin];
const REVIEWERS: &[Role] = &[Role::User, Role::Admin];

pub fn scope<C, J, R, G, P>() -> Scope
where
    C: CompanyRepository + 'static,
    J: JobRepository + 'static,
    R: ReviewRepository + 'static,
    G: Geocoder + 'static,
    P: PhotoStore + 'static,
{
    web::scope("/companies")
        .route("", web::get().to(list::<C, J, R, G, P>))
        .route("", web::post().to(create::<C, J, R, G, P>))
        .route(
            "/radius/{zipcode}/{distance}",
            web::get().to(within_radius::<C, J, R, G, P>),
        )
        .route("/{id}", web::get().to(get::<C, J, R, G, P>))
        .route("/{id}", web::put().to(update::<C, J, R, G, P>))
        .route("/{id}", web::delete().to(delete::<C, J, R, G, P>))
        .route("/{id}/photo", web::put().to(upload_photo::<C, J, R, G, P>))
        .route("/{id}/jobs", web::get().to(list_jobs::<J, C>))
        .route("/{id}/jobs", web::post().to(create_job::<J, C>))
        .route("/{id}/reviews", web::get().to(list_reviews::<R, C>))
        .route("/{id}/reviews", web::post().to(create_review::<R, C>))
}

async fn list<C, J, R, G, P>(
    service: web::Data<CompanyService<C, J, R, G, P>>,
    params: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, ApiError>
where
    C: CompanyRepository,
    J: JobRepository,
    R: ReviewRepository,
    G: Geocoder,
    P: PhotoStore,
{
    let query = parse_list_query(&params)?;
    let page = service.list(&query).await?;
    Ok(list_response(page, query.window))
}

async fn get<C, J, R, G, P>(
    service: web::Data<CompanyService<C, J, R, G, P>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    C: CompanyRepository,
    J: JobRepository,
    R: ReviewRepository,
    G: Geocoder,
    P: PhotoStore,
{
    let company = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(company)))
}

async fn create<C, J, R, G, P>(
    user: AuthedUser,
    service: web::Data<CompanyService<C, J, R, G, P>>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError>
where
    C: CompanyRepository,
    J: JobRepository,
    R: ReviewRepository,
    G: Geocoder,
    P: PhotoStore,
{
    require_role(&user.0, WRITERS)?;
    let company = service.create(&body, &user.0).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(company)))
}

async fn update<C, J, R, G, P>(
    user: AuthedUser,
    service: web::Data<CompanyService<C, J, R, G, P>>,
    path: web::Path<Uuid>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError>
where
    C: CompanyRepository,
    J: JobRepository,
    R: ReviewRepository,
    G: Geocoder,
    P: PhotoStore,
{
    require_role(&user.0, WRITERS)?;
    let company = service.update(path.into_inner(), &body, &user.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(company)))
}

async fn delete<C, J, R, G, P>(
    user: AuthedUser,
    service: web::Data<CompanyService<C, J, R, G, P>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    C: CompanyRepository,
    J: JobRepository,
    R: ReviewRepository,
    G: Geocoder,
    P: PhotoStore,
{
    require_role(&user.0, WRITERS)?;
    service.delete(path.into_inner(), &user.0).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(json!({}))))
}

/// Companies within `distance` kilometers of a geocoded place
async fn within_radius<C, J, R, G, P>(
    service: web::Data<CompanyService<C, J, R, G, P>>,
    path: web::Path<(String, f64)>,
) -> Result<HttpResponse, ApiError>
where
    C: CompanyRepository,
    J: JobRepository,
    R: ReviewRepository,
    G: Geocoder,
    P: PhotoStore,
{
    let (place, distance) = path.into_inner();
    let companies = service.within_radius(&place, distance).await?;
    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "count": companies.len(),
        "data": companies,
    })))
}

async fn upload_photo<C, J, R, G, P>(
    req: HttpRequest,
    user: AuthedUser,
    service: web::Data<CompanyService<C, J, R, G, P>>,
    config: web::Data<AppConfig>,
    path: web::Path<Uuid>,
    bytes: web::Bytes,
) -> Result<HttpResponse, ApiError>
where
    C: CompanyRepository,
    J: JobRepository,
    R: ReviewRepository,
    G: Geocoder,
    P: PhotoStore,
{
    require_role(&user.0, WRITERS)?;

    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let filename = service
        .upload_photo(
            path.into_inner(),
            &user.0,
            &content_type,
            &bytes,
            config.upload.max_file_upload,
        )
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(filename)))
}

async fn list_jobs<J, C>(
    service: web::Data<JobService<J, C>>,
    path: web::Path<Uuid>,
    params: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, ApiError>
where
    J: JobRepository,
    C: CompanyRepository,
{
    let company = path.into_inner();
    let query =
        parse_list_query(&params)?.scoped_to("company", Scalar::Text(company.to_string()));
    let page = service.list(&query).await?;
    Ok(list_response(page, query.window))
}

async fn create_job<J, C>(
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
    let job = service.create(path.into_inner(), &body, &user.0).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(job)))
}

async fn list_reviews<R, C>(
    service: web::Data<ReviewService<R, C>>,
    path: web::Path<Uuid>,
    params: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, ApiError>
where
    R: ReviewRepository,
    C: CompanyRepository,
{
    let company = path.into_inner();
    let query =
        parse_list_query(&params)?.scoped_to("company", Scalar::Text(company.to_string()));
    let page = service.list(&query).await?;
    Ok(list_response(page, query.window))
}

async fn create_review<R, C>(
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
    let review = service.create(path.into_inner(), &body, &user.0).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(review)))
}
