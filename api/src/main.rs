//! Worklane API server entry point.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Env;

use wl_core::services::{
    AuthService, CompanyService, IdentityResolver, JobService, ReviewService, TokenService,
    UserAdminService,
};
use wl_infra::{
    connect, ensure_indexes, FsPhotoStore, MapQuestGeocoder, MongoCompanyRepository,
    MongoJobRepository, MongoReviewRepository, MongoUserRepository, SmtpMailer,
};
use wl_shared::config::AppConfig;

fn to_io_error(error: wl_core::errors::DomainError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, error.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();
    if config.environment.is_production() && config.auth.is_using_default_secret() {
        log::warn!("running in production with the default JWT secret");
    }
    wl_api::errors::expose_stacks(!config.environment.is_production());

    let database = connect(&config.database).await.map_err(to_io_error)?;
    ensure_indexes(&database).await.map_err(to_io_error)?;

    let users = MongoUserRepository::new(database.clone());
    let companies = MongoCompanyRepository::new(database.clone());
    let jobs = MongoJobRepository::new(database.clone());
    let reviews = MongoReviewRepository::new(database.clone());

    let tokens = TokenService::new(&config.auth.jwt_secret, config.auth.jwt_expire_minutes);
    let mailer = SmtpMailer::new(config.mail.clone());
    let geocoder = MapQuestGeocoder::new(config.geocoder.clone()).map_err(to_io_error)?;
    let photos = FsPhotoStore::new(&config.upload);

    let auth = Arc::new(AuthService::new(
        users.clone(),
        mailer,
        tokens,
        config.auth.bcrypt_cost,
    ));
    let resolver: Arc<dyn IdentityResolver> = auth.clone();

    let auth_data = web::Data::from(auth);
    let resolver_data = web::Data::new(resolver);
    let company_data = web::Data::new(CompanyService::new(
        companies.clone(),
        jobs.clone(),
        reviews.clone(),
        geocoder,
        photos,
    ));
    let job_data = web::Data::new(JobService::new(jobs.clone(), companies.clone()));
    let review_data = web::Data::new(ReviewService::new(reviews.clone(), companies.clone()));
    let user_data = web::Data::new(UserAdminService::new(users.clone(), config.auth.bcrypt_cost));
    let config_data = web::Data::new(config.clone());

    let bind_address = config.server.bind_address();
    log::info!(
        "starting server on {} ({:?})",
        bind_address,
        config.environment
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(config_data.clone())
            .app_data(auth_data.clone())
            .app_data(resolver_data.clone())
            .app_data(company_data.clone())
            .app_data(job_data.clone())
            .app_data(review_data.clone())
            .app_data(user_data.clone())
            .configure(
                wl_api::configure_api::<
                    MongoUserRepository,
                    SmtpMailer,
                    MongoCompanyRepository,
                    MongoJobRepository,
                    MongoReviewRepository,
                    MapQuestGeocoder,
                    FsPhotoStore,
                >,
            )
            .route("/health", web::get().to(wl_api::routes::health))
            .default_service(web::route().to(wl_api::routes::not_found))
    })
    .bind(bind_address)?
    .run()
    .await
}
