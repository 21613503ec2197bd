//! Route registration.
//!
//! Handlers are generic over the repository and collaborator traits, so
//! the same routing table runs against MongoDB in production and against
//! the in-memory mocks in tests. `configure_api` mounts everything under
//! `/api/v1`.

pub mod auth;
pub mod companies;
pub mod jobs;
pub mod reviews;
pub mod users;

use actix_web::{web, HttpResponse};
use serde_json::{json, Value};

use wl_core::query::Page;
use wl_core::repositories::{
    CompanyRepository, JobRepository, ReviewRepository, UserRepository,
};
use wl_core::services::{Geocoder, Mailer, PhotoStore};
use wl_shared::{ApiResponse, ListResponse, PageWindow, PaginationLinks};

/// Mounts the versioned API surface
pub fn configure_api<U, M, C, J, R, G, P>(cfg: &mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    M: Mailer + 'static,
    C: CompanyRepository + 'static,
    J: JobRepository + 'static,
    R: ReviewRepository + 'static,
    G: Geocoder + 'static,
    P: PhotoStore + 'static,
{
    cfg.service(
        web::scope("/api/v1")
            .service(auth::scope::<U, M>())
            .service(companies::scope::<C, J, R, G, P>())
            .service(jobs::scope::<J, C>())
            .service(reviews::scope::<R, C>())
            .service(users::scope::<U>()),
    );
}

/// Liveness probe
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(json!({ "status": "healthy" })))
}

/// Fallback for unmatched paths
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "success": false,
        "message": "Not found",
    }))
}

/// Builds the list envelope from a page of records and the window that
/// produced it
pub(crate) fn list_response(page: Page<Value>, window: PageWindow) -> HttpResponse {
    let links = PaginationLinks::for_window(window, page.total);
    HttpResponse::Ok().json(ListResponse::new(page.items, links))
}
