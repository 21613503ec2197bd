//! MongoDB persistence.
//!
//! Collection-per-entity layout: `users`, `companies`, `jobs`, `reviews`.
//! Entities serialize through `serde_json::Value` into BSON with the `id`
//! field mapped to Mongo's `_id`; the user collection is the exception and
//! maps its fields explicitly so secret columns survive the entity's
//! output-oriented `Serialize` impl.

mod documents;

mod companies;
mod jobs;
mod reviews;
mod users;

pub use companies::MongoCompanyRepository;
pub use jobs::MongoJobRepository;
pub use reviews::MongoReviewRepository;
pub use users::MongoUserRepository;

use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Database, IndexModel};
use tracing::info;

use wl_core::errors::DomainResult;
use wl_shared::DatabaseConfig;

use documents::storage_err;

/// Opens a connection and selects the configured database
pub async fn connect(config: &DatabaseConfig) -> DomainResult<Database> {
    let client = Client::with_uri_str(&config.uri)
        .await
        .map_err(storage_err)?;
    info!(database = %config.database, "connected to MongoDB");
    Ok(client.database(&config.database))
}

/// Creates the indexes the repositories rely on.
///
/// Uniqueness of user emails, company names and `(company, author)` review
/// pairs is enforced here rather than with read-then-write checks, so
/// concurrent writers cannot race past each other.
pub async fn ensure_indexes(db: &Database) -> DomainResult<()> {
    let unique = IndexOptions::builder().unique(true).build();

    db.collection::<Document>("users")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique.clone())
                .build(),
        )
        .await
        .map_err(storage_err)?;

    db.collection::<Document>("companies")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(unique.clone())
                .build(),
        )
        .await
        .map_err(storage_err)?;

    db.collection::<Document>("companies")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "location.coordinates": "2d" })
                .build(),
        )
        .await
        .map_err(storage_err)?;

    db.collection::<Document>("reviews")
        .create_index(
            IndexModel::builder()
                .keys(doc! { "company": 1, "author": 1 })
                .options(unique)
                .build(),
        )
        .await
        .map_err(storage_err)?;

    Ok(())
}
