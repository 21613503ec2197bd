//! End-to-end route tests against the in-memory mocks.
//!
//! The whole routing table is mounted exactly as in production, with the
//! MongoDB repositories swapped for mocks, the geocoder pinned to Boston
//! and the mail transport recording instead of sending.

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::{json, Value};

use wl_core::repositories::{
    MockCompanyRepository, MockJobRepository, MockReviewRepository, MockUserRepository,
};
use wl_core::services::companies::MockPhotoStore;
use wl_core::services::geocode::MockGeocoder;
use wl_core::services::mail::MockMailer;
use wl_core::services::{
    AuthService, CompanyService, IdentityResolver, JobService, ReviewService, TokenService,
    UserAdminService,
};
use wl_shared::config::AppConfig;

type MockAuth = AuthService<MockUserRepository, MockMailer>;
type MockCompanies = CompanyService<
    MockCompanyRepository,
    MockJobRepository,
    MockReviewRepository,
    MockGeocoder,
    MockPhotoStore,
>;
type MockJobs = JobService<MockJobRepository, MockCompanyRepository>;
type MockReviews = ReviewService<MockReviewRepository, MockCompanyRepository>;
type MockUsers = UserAdminService<MockUserRepository>;

// Low bcrypt cost keeps the tests fast
const TEST_COST: u32 = 4;

struct Stack {
    config: web::Data<AppConfig>,
    auth: web::Data<MockAuth>,
    resolver: web::Data<Arc<dyn IdentityResolver>>,
    companies: web::Data<MockCompanies>,
    jobs: web::Data<MockJobs>,
    reviews: web::Data<MockReviews>,
    users: web::Data<MockUsers>,
}

fn stack() -> Stack {
    let users = MockUserRepository::new();
    let companies = MockCompanyRepository::new();
    let jobs = MockJobRepository::new();
    let reviews = MockReviewRepository::new();

    let tokens = TokenService::new("test-secret", 60);
    let auth = Arc::new(AuthService::new(
        users.clone(),
        MockMailer::new(),
        tokens,
        TEST_COST,
    ));
    let resolver: Arc<dyn IdentityResolver> = auth.clone();

    Stack {
        config: web::Data::new(AppConfig::default()),
        auth: web::Data::from(auth),
        resolver: web::Data::new(resolver),
        companies: web::Data::new(CompanyService::new(
            companies.clone(),
            jobs.clone(),
            reviews.clone(),
            MockGeocoder::new(),
            MockPhotoStore::new(),
        )),
        jobs: web::Data::new(JobService::new(jobs.clone(), companies.clone())),
        reviews: web::Data::new(ReviewService::new(reviews, companies)),
        users: web::Data::new(UserAdminService::new(users, TEST_COST)),
    }
}

macro_rules! init_app {
    ($stack:expr) => {
        test::init_service(
            App::new()
                .app_data($stack.config.clone())
                .app_data($stack.auth.clone())
                .app_data($stack.resolver.clone())
                .app_data($stack.companies.clone())
                .app_data($stack.jobs.clone())
                .app_data($stack.reviews.clone())
                .app_data($stack.users.clone())
                .configure(
                    wl_api::configure_api::<
                        MockUserRepository,
                        MockMailer,
                        MockCompanyRepository,
                        MockJobRepository,
                        MockReviewRepository,
                        MockGeocoder,
                        MockPhotoStore,
                    >,
                ),
        )
        .await
    };
}

async fn register<S>(app: &S, name: &str, email: &str, role: &str) -> String
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .set_json(json!({
                "name": name,
                "email": email,
                "password": "secret123",
                "role": role,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["success"], true);
    body["token"].as_str().expect("session token").to_string()
}

fn session(token: &str) -> Cookie<'static> {
    Cookie::new("token", token.to_string())
}

fn company_payload(name: &str) -> Value {
    json!({
        "name": name,
        "description": "We make things",
        "address": "233 Bay State Rd Boston MA",
        "industries": ["Tech"],
    })
}

#[actix_web::test]
async fn test_register_opens_session_and_me_hides_secrets() {
    let stack = stack();
    let app = init_app!(stack);

    let token = register(&app, "Rita", "rita@example.com", "recruiter").await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .cookie(session(&token))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["data"]["email"], "rita@example.com");
    assert_eq!(body["data"]["role"], "recruiter");
    assert!(body["data"].get("password_hash").is_none());
}

#[actix_web::test]
async fn test_me_without_token_is_401() {
    let stack = stack();
    let app = init_app!(stack);

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/auth/me").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Not authorized, no token");
}

#[actix_web::test]
async fn test_tampered_token_reads_like_a_missing_one() {
    let stack = stack();
    let app = init_app!(stack);
    register(&app, "Rita", "rita@example.com", "recruiter").await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .cookie(session("not.a.jwt"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Not authorized, no token");
}

#[actix_web::test]
async fn test_login_failures_are_uniform() {
    let stack = stack();
    let app = init_app!(stack);
    register(&app, "Rita", "rita@example.com", "recruiter").await;

    for (email, password) in [
        ("rita@example.com", "wrong-password"),
        ("nobody@example.com", "secret123"),
    ] {
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/auth/login")
                .set_json(json!({ "email": email, "password": password }))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(response).await;
        assert_eq!(body["message"], "Invalid credentials");
    }
}

#[actix_web::test]
async fn test_company_create_requires_recruiter_role() {
    let stack = stack();
    let app = init_app!(stack);
    let token = register(&app, "Uma", "uma@example.com", "user").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/companies")
            .cookie(session(&token))
            .set_json(company_payload("Acme"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(
        body["message"],
        "User role user is not authorized to access this route"
    );
}

#[actix_web::test]
async fn test_company_create_and_list() {
    let stack = stack();
    let app = init_app!(stack);
    let token = register(&app, "Rita", "rita@example.com", "recruiter").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/companies")
            .cookie(session(&token))
            .set_json(company_payload("Acme Anvil Works"))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["data"]["slug"], "acme-anvil-works");
    // The mock geocoder pins every address to Boston
    assert_eq!(body["data"]["location"]["city"], "Boston");

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/companies").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Acme Anvil Works");
    // Listed companies carry their postings, empty for a fresh company
    assert_eq!(body["data"][0]["jobs"], json!([]));
}

#[actix_web::test]
async fn test_nested_job_create_refreshes_average_salary() {
    let stack = stack();
    let app = init_app!(stack);
    let token = register(&app, "Rita", "rita@example.com", "recruiter").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/companies")
            .cookie(session(&token))
            .set_json(company_payload("Acme"))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(response).await;
    let company_id = body["data"]["id"].as_str().unwrap().to_string();

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/companies/{company_id}/jobs"))
            .cookie(session(&token))
            .set_json(json!({
                "title": "Backend Engineer",
                "description": "Builds services",
                "years_of_experience": 3,
                "salary": 120000,
                "minimum_skill": "medior",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/companies/{company_id}"))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["data"]["average_salary"], 120000);
}

#[actix_web::test]
async fn test_second_review_for_same_company_conflicts() {
    let stack = stack();
    let app = init_app!(stack);
    let recruiter = register(&app, "Rita", "rita@example.com", "recruiter").await;
    let reviewer = register(&app, "Uma", "uma@example.com", "user").await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/companies")
            .cookie(session(&recruiter))
            .set_json(company_payload("Acme"))
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(response).await;
    let company_id = body["data"]["id"].as_str().unwrap().to_string();

    let review = json!({
        "title": "Solid place",
        "text": "Good colleagues",
        "rating": 8,
    });

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/companies/{company_id}/reviews"))
            .cookie(session(&reviewer))
            .set_json(review.clone())
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/companies/{company_id}/reviews"))
            .cookie(session(&reviewer))
            .set_json(review)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], "Duplicate field value entered");
}

#[actix_web::test]
async fn test_unknown_query_operator_is_rejected() {
    let stack = stack();
    let app = init_app!(stack);

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/companies?name%5Bfoo%5D=x")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_users_routes_are_admin_only() {
    let stack = stack();
    let app = init_app!(stack);
    let token = register(&app, "Rita", "rita@example.com", "recruiter").await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users")
            .cookie(session(&token))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_logout_clears_the_session_cookie() {
    let stack = stack();
    let app = init_app!(stack);
    let token = register(&app, "Rita", "rita@example.com", "recruiter").await;

    let response = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/auth/logout")
            .cookie(session(&token))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let cleared = response
        .headers()
        .get_all(actix_web::http::header::SET_COOKIE)
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("token="))
        .expect("logout cookie");
    assert!(cleared.starts_with("token=none"));
}
