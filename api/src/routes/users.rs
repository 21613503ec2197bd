//! Administrative user routes. Every route here requires the admin role.

use std::collections::HashMap;

use actix_web::{web, HttpResponse, Scope};
use serde_json::{json, Value};
use uuid::Uuid;

use wl_core::domain::entities::Role;
use wl_core::query::parse_list_query;
use wl_core::repositories::UserRepository;
use wl_core::services::UserAdminService;
use wl_shared::ApiResponse;

use crate::errors::ApiError;
use crate::middleware::{require_role, AuthedUser};
use crate::routes::list_response;

const ADMINS: &[Role] = &[Role::Admin];

pub fn scope<U>() -> Scope
where
    U: UserRepository + 'static,
{
    web::scope("/users")
        .route("", web::get().to(list::<U>))
        .route("", web::post().to(create::<U>))
        .route("/{id}", web::get().to(get::<U>))
        .route("/{id}", web::put().to(update::<U>))
        .route("/{id}", web::delete().to(delete::<U>))
}

async fn list<U>(
    user: AuthedUser,
    service: web::Data<UserAdminService<U>>,
    params: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository,
{
    require_role(&user.0, ADMINS)?;
    let query = parse_list_query(&params)?;
    let page = service.list(&query).await?;
    Ok(list_response(page, query.window))
}

async fn get<U>(
    user: AuthedUser,
    service: web::Data<UserAdminService<U>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository,
{
    require_role(&user.0, ADMINS)?;
    let found = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(found)))
}

async fn create<U>(
    user: AuthedUser,
    service: web::Data<UserAdminService<U>>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository,
{
    require_role(&user.0, ADMINS)?;
    let created = service.create(&body).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(created)))
}

async fn update<U>(
    user: AuthedUser,
    service: web::Data<UserAdminService<U>>,
    path: web::Path<Uuid>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository,
{
    require_role(&user.0, ADMINS)?;
    let updated = service.update(path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(updated)))
}

async fn delete<U>(
    user: AuthedUser,
    service: web::Data<UserAdminService<U>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository,
{
    require_role(&user.0, ADMINS)?;
    service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(json!({}))))
}
