//! Admin-only user CRUD, behind the admin role gate at the API layer.

use serde_json::Value;
use uuid::Uuid;

use crate::domain::entities::user::{self, Role, User};
use crate::domain::schema::{validate_create, validate_update};
use crate::errors::{DomainError, DomainResult};
use crate::query::{ListQuery, Page};
use crate::repositories::UserRepository;

/// User administration
pub struct UserAdminService<U: UserRepository> {
    users: U,
    bcrypt_cost: u32,
}

impl<U: UserRepository> UserAdminService<U> {
    pub fn new(users: U, bcrypt_cost: u32) -> Self {
        Self { users, bcrypt_cost }
    }

    /// Runs a translated list query over the collection
    pub async fn list(&self, query: &ListQuery) -> DomainResult<Page<Value>> {
        self.users.list(query).await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }

    /// Creates an account on a user's behalf
    pub async fn create(&self, payload: &Value) -> DomainResult<User> {
        validate_create(user::CREATE_RULES, payload)?;

        let password = payload
            .get("password")
            .and_then(Value::as_str)
            .unwrap_or_default();
        let password_hash = bcrypt::hash(password, self.bcrypt_cost)
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let role = payload
            .get("role")
            .and_then(Value::as_str)
            .and_then(|r| r.parse::<Role>().ok())
            .unwrap_or_default();

        self.users
            .create(User::new(
                str_field(payload, "name"),
                str_field(payload, "email"),
                password_hash,
                role,
            ))
            .await
    }

    /// Updates name, email or role; a new password is rehashed
    pub async fn update(&self, id: Uuid, payload: &Value) -> DomainResult<User> {
        validate_update(user::CREATE_RULES, payload)?;

        let mut existing = self.get(id).await?;
        if let Some(name) = payload.get("name").and_then(Value::as_str) {
            existing.name = name.to_string();
        }
        if let Some(email) = payload.get("email").and_then(Value::as_str) {
            existing.email = email.to_string();
        }
        if let Some(role) = payload
            .get("role")
            .and_then(Value::as_str)
            .and_then(|r| r.parse::<Role>().ok())
        {
            existing.role = role;
        }
        if let Some(password) = payload.get("password").and_then(Value::as_str) {
            let hash = bcrypt::hash(password, self.bcrypt_cost)
                .map_err(|e| DomainError::internal(e.to_string()))?;
            existing.set_password_hash(hash);
        }

        existing.updated_at = chrono::Utc::now();
        self.users.update(existing).await
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.users.delete(id).await? {
            return Err(DomainError::not_found("User"));
        }
        Ok(())
    }
}

fn str_field(payload: &Value, field: &str) -> String {
    payload
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::parse_list_query;
    use crate::repositories::MockUserRepository;
    use serde_json::json;
    use std::collections::HashMap;

    fn service() -> UserAdminService<MockUserRepository> {
        // cost 4 keeps the hashing fast in tests
        UserAdminService::new(MockUserRepository::new(), 4)
    }

    fn payload(email: &str) -> Value {
        json!({
            "name": "Jane",
            "email": email,
            "password": "secret1",
            "role": "recruiter",
        })
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let service = service();
        let created = service.create(&payload("jane@example.com")).await.unwrap();

        assert_ne!(created.password_hash, "secret1");
        assert!(bcrypt::verify("secret1", &created.password_hash).unwrap());
        assert_eq!(created.role, Role::Recruiter);
    }

    #[tokio::test]
    async fn test_create_rejects_admin_role() {
        let service = service();
        let mut bad = payload("jane@example.com");
        bad["role"] = json!("admin");

        let err = service.create(&bad).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let service = service();
        service.create(&payload("jane@example.com")).await.unwrap();

        let err = service.create(&payload("jane@example.com")).await.unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_update_rehashes_password() {
        let service = service();
        let created = service.create(&payload("jane@example.com")).await.unwrap();

        let updated = service
            .update(created.id, &json!({"password": "newpass"}))
            .await
            .unwrap();
        assert!(bcrypt::verify("newpass", &updated.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let service = service();
        let err = service.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_never_exposes_password_hash() {
        let service = service();
        service.create(&payload("jane@example.com")).await.unwrap();

        let query = parse_list_query(&HashMap::new()).unwrap();
        let page = service.list(&query).await.unwrap();
        assert_eq!(page.total, 1);
        assert!(page.items[0].get("password_hash").is_none());
    }
}
