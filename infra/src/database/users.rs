//! MongoDB-backed user repository.
//!
//! Users map to and from BSON field by field: the entity's `Serialize`
//! impl drops the secret columns for API output, so persistence cannot go
//! through it on the way in.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Collection, Database};
use serde_json::Value;
use uuid::Uuid;

use wl_core::domain::entities::{Role, User};
use wl_core::errors::{DomainError, DomainResult};
use wl_core::query::{eval, ListQuery, Page};
use wl_core::repositories::UserRepository;

use super::documents::{
    filter_document, get_bool, get_datetime, get_opt_datetime, get_opt_string, get_string,
    get_uuid, sort_document, storage_err, uuid_bson, write_err,
};

const COLLECTION: &str = "users";

#[derive(Clone)]
pub struct MongoUserRepository {
    database: Database,
}

impl MongoUserRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    fn collection(&self) -> Collection<Document> {
        self.database.collection(COLLECTION)
    }

    async fn find_one(&self, filter: Document) -> DomainResult<Option<User>> {
        let document = self
            .collection()
            .find_one(filter)
            .await
            .map_err(storage_err)?;
        document.map(|d| parse_user(&d)).transpose()
    }
}

fn user_to_document(user: &User) -> Document {
    doc! {
        "_id": uuid_bson(user.id),
        "name": &user.name,
        "email": &user.email,
        "role": user.role.as_str(),
        "password_hash": &user.password_hash,
        "reset_password_token": Bson::from(user.reset_password_token.clone()),
        "reset_password_expire": Bson::from(
            user.reset_password_expire.map(|dt| dt.to_rfc3339())
        ),
        "confirm_email_token": Bson::from(user.confirm_email_token.clone()),
        "is_email_confirmed": user.is_email_confirmed,
        "created_at": user.created_at.to_rfc3339(),
        "updated_at": user.updated_at.to_rfc3339(),
    }
}

fn parse_user(document: &Document) -> DomainResult<User> {
    let role = get_string(document, "role")?
        .parse::<Role>()
        .map_err(|_| DomainError::internal("malformed role"))?;

    Ok(User {
        id: get_uuid(document, "_id")?,
        name: get_string(document, "name")?,
        email: get_string(document, "email")?,
        role,
        password_hash: get_string(document, "password_hash")?,
        reset_password_token: get_opt_string(document, "reset_password_token"),
        reset_password_expire: get_opt_datetime(document, "reset_password_expire"),
        confirm_email_token: get_opt_string(document, "confirm_email_token"),
        is_email_confirmed: get_bool(document, "is_email_confirmed")?,
        created_at: get_datetime(document, "created_at")?,
        updated_at: get_datetime(document, "updated_at")?,
    })
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.collection()
            .insert_one(user_to_document(&user))
            .await
            .map_err(write_err)?;
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        self.find_one(doc! { "_id": uuid_bson(id) }).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.find_one(doc! { "email": email }).await
    }

    async fn find_by_reset_token(&self, token_hash: &str) -> Result<Option<User>, DomainError> {
        self.find_one(doc! { "reset_password_token": token_hash })
            .await
    }

    async fn find_by_confirm_token(&self, token_hash: &str) -> Result<Option<User>, DomainError> {
        self.find_one(doc! { "confirm_email_token": token_hash })
            .await
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let result = self
            .collection()
            .replace_one(doc! { "_id": uuid_bson(user.id) }, user_to_document(&user))
            .await
            .map_err(write_err)?;

        if result.matched_count == 0 {
            return Err(DomainError::not_found("User"));
        }
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = self
            .collection()
            .delete_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(storage_err)?;
        Ok(result.deleted_count > 0)
    }

    /// Secrets never reach the caller: documents parse into the entity and
    /// re-serialize through its output-oriented `Serialize` impl
    async fn list(&self, query: &ListQuery) -> Result<Page<Value>, DomainError> {
        let filter = filter_document(&query.conditions);

        let total = self
            .collection()
            .count_documents(filter.clone())
            .await
            .map_err(storage_err)?;

        let cursor = self
            .collection()
            .find(filter)
            .sort(sort_document(&query.sort))
            .skip(query.window.skip())
            .limit(query.window.limit as i64)
            .await
            .map_err(storage_err)?;
        let documents: Vec<Document> = cursor.try_collect().await.map_err(storage_err)?;

        let mut items = Vec::with_capacity(documents.len());
        for document in &documents {
            let user = parse_user(document)?;
            let mut item =
                serde_json::to_value(&user).map_err(|e| DomainError::internal(e.to_string()))?;
            if let Some(fields) = &query.select {
                item = eval::project(&item, fields);
            }
            items.push(item);
        }

        Ok(Page::new(items, total))
    }
}
