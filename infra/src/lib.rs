//! # Worklane Infrastructure
//!
//! Concrete implementations of the core crate's persistence and service
//! ports: MongoDB repositories, the MapQuest geocoder, the SMTP mailer and
//! filesystem photo storage.

pub mod database;
pub mod geocode;
pub mod mail;
pub mod photos;

pub use database::{
    connect, ensure_indexes, MongoCompanyRepository, MongoJobRepository, MongoReviewRepository,
    MongoUserRepository,
};
pub use geocode::MapQuestGeocoder;
pub use mail::SmtpMailer;
pub use photos::FsPhotoStore;
