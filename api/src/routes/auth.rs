//! Authentication and account routes.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse, Scope};
use serde_json::{json, Value};

use wl_core::repositories::UserRepository;
use wl_core::services::auth::AuthOutcome;
use wl_core::services::{AuthService, Mailer};
use wl_shared::config::AppConfig;
use wl_shared::ApiResponse;

use crate::dto::auth::{
    ConfirmEmailQuery, ForgotPasswordRequest, LoginRequest, ResetPasswordRequest,
    UpdatePasswordRequest,
};
use crate::dto::check;
use crate::errors::ApiError;
use crate::middleware::auth::SESSION_COOKIE;
use crate::middleware::AuthedUser;

pub fn scope<U, M>() -> Scope
where
    U: UserRepository + 'static,
    M: Mailer + 'static,
{
    web::scope("/auth")
        .route("/register", web::post().to(register::<U, M>))
        .route("/login", web::post().to(login::<U, M>))
        .route("/logout", web::get().to(logout))
        .route("/me", web::get().to(me))
        .route("/updatedetails", web::put().to(update_details::<U, M>))
        .route("/updatepassword", web::put().to(update_password::<U, M>))
        .route("/forgotpassword", web::post().to(forgot_password::<U, M>))
        .route("/resetpassword/{token}", web::put().to(reset_password::<U, M>))
        .route("/confirmemail", web::get().to(confirm_email::<U, M>))
}

/// Issues the session: token in the body, and the same token in an
/// http-only cookie. The cookie is marked secure outside development.
fn token_response(outcome: AuthOutcome, config: &AppConfig) -> HttpResponse {
    let cookie = Cookie::build(SESSION_COOKIE, outcome.token.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.environment.is_production())
        .max_age(Duration::days(config.auth.cookie_expire_days))
        .finish();

    HttpResponse::Ok().cookie(cookie).json(json!({
        "success": true,
        "token": outcome.token,
    }))
}

/// Scheme and host the client reached us on, for links in outbound mail
fn external_base(req: &HttpRequest) -> String {
    let info = req.connection_info();
    format!("{}://{}", info.scheme(), info.host())
}

async fn register<U, M>(
    req: HttpRequest,
    service: web::Data<AuthService<U, M>>,
    config: web::Data<AppConfig>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository,
    M: Mailer,
{
    let confirm_base = format!("{}/api/v1/auth/confirmemail", external_base(&req));
    let outcome = service.register(&body, &confirm_base).await?;
    Ok(token_response(outcome, &config))
}

async fn login<U, M>(
    service: web::Data<AuthService<U, M>>,
    config: web::Data<AppConfig>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository,
    M: Mailer,
{
    let outcome = service.login(&body.email, &body.password).await?;
    Ok(token_response(outcome, &config))
}

/// Replaces the session cookie with a short-lived placeholder
async fn logout() -> HttpResponse {
    let cookie = Cookie::build(SESSION_COOKIE, "none")
        .path("/")
        .http_only(true)
        .max_age(Duration::seconds(10))
        .finish();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::success(json!({})))
}

async fn me(user: AuthedUser) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(user.0))
}

async fn update_details<U, M>(
    user: AuthedUser,
    service: web::Data<AuthService<U, M>>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository,
    M: Mailer,
{
    let updated = service.update_details(user.0.id, &body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(updated)))
}

async fn update_password<U, M>(
    user: AuthedUser,
    service: web::Data<AuthService<U, M>>,
    config: web::Data<AppConfig>,
    body: web::Json<UpdatePasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository,
    M: Mailer,
{
    check(&*body)?;
    let outcome = service
        .update_password(user.0.id, &body.current_password, &body.new_password)
        .await?;
    Ok(token_response(outcome, &config))
}

async fn forgot_password<U, M>(
    req: HttpRequest,
    service: web::Data<AuthService<U, M>>,
    body: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository,
    M: Mailer,
{
    check(&*body)?;
    let reset_base = format!("{}/api/v1/auth/resetpassword", external_base(&req));
    service.forgot_password(&body.email, &reset_base).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success("Email sent")))
}

async fn reset_password<U, M>(
    service: web::Data<AuthService<U, M>>,
    config: web::Data<AppConfig>,
    path: web::Path<String>,
    body: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository,
    M: Mailer,
{
    check(&*body)?;
    let outcome = service
        .reset_password(&path.into_inner(), &body.password)
        .await?;
    Ok(token_response(outcome, &config))
}

async fn confirm_email<U, M>(
    service: web::Data<AuthService<U, M>>,
    config: web::Data<AppConfig>,
    query: web::Query<ConfirmEmailQuery>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository,
    M: Mailer,
{
    let outcome = service.confirm_email(&query.token).await?;
    Ok(token_response(outcome, &config))
}
