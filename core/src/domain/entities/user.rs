//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::schema::{Constraint, FieldRule};
use wl_shared::utils::validation::is_valid_email;

/// Role of a user in the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A regular account: can review companies
    User,
    /// A recruiter: can manage companies and jobs
    Recruiter,
    /// Full access, including user administration
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Recruiter => "recruiter",
            Role::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "recruiter" => Ok(Role::Recruiter),
            "admin" => Ok(Role::Admin),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity
///
/// The password hash and one-time token hashes never serialize: the same
/// `Serialize` impl renders API responses, and persistence maps fields
/// explicitly in the repository layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address (unique)
    pub email: String,

    /// Role for authorization decisions
    pub role: Role,

    /// bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// sha256 hex of the outstanding password-reset token
    #[serde(skip_serializing, default)]
    pub reset_password_token: Option<String>,

    /// When the outstanding reset token stops being valid
    #[serde(skip_serializing, default)]
    pub reset_password_expire: Option<DateTime<Utc>>,

    /// sha256 hex of the outstanding email-confirmation token
    #[serde(skip_serializing, default)]
    pub confirm_email_token: Option<String>,

    /// Whether the email address has been confirmed
    pub is_email_confirmed: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User with a freshly hashed password
    pub fn new(name: String, email: String, password_hash: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            role,
            password_hash,
            reset_password_token: None,
            reset_password_expire: None,
            confirm_email_token: None,
            is_email_confirmed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stores a reset-token hash and its expiry
    pub fn set_reset_token(&mut self, token_hash: String, expires_at: DateTime<Utc>) {
        self.reset_password_token = Some(token_hash);
        self.reset_password_expire = Some(expires_at);
        self.updated_at = Utc::now();
    }

    /// Clears the outstanding reset token (consumed or rolled back)
    pub fn clear_reset_token(&mut self) {
        self.reset_password_token = None;
        self.reset_password_expire = None;
        self.updated_at = Utc::now();
    }

    /// Stores an email-confirmation token hash
    pub fn set_confirm_token(&mut self, token_hash: String) {
        self.confirm_email_token = Some(token_hash);
        self.updated_at = Utc::now();
    }

    /// Marks the email as confirmed and clears the token hash
    pub fn confirm_email(&mut self) {
        self.is_email_confirmed = true;
        self.confirm_email_token = None;
        self.updated_at = Utc::now();
    }

    /// Replaces the password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Whether the outstanding reset token is still within its expiry
    pub fn reset_token_valid(&self, now: DateTime<Utc>) -> bool {
        matches!(self.reset_password_expire, Some(expire) if expire > now)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Schema rules for user creation (registration and admin create)
///
/// The role set deliberately excludes `admin`: administrator accounts are
/// never created through the public surface.
pub static CREATE_RULES: &[FieldRule] = &[
    FieldRule {
        field: "name",
        constraint: Constraint::Required,
        message: "Please add a name",
    },
    FieldRule {
        field: "email",
        constraint: Constraint::Required,
        message: "Please add an email",
    },
    FieldRule {
        field: "email",
        constraint: Constraint::Matches(is_valid_email),
        message: "Please add a valid email",
    },
    FieldRule {
        field: "password",
        constraint: Constraint::Required,
        message: "Please add a password",
    },
    FieldRule {
        field: "password",
        constraint: Constraint::MinLength(6),
        message: "Password must be at least 6 characters",
    },
    FieldRule {
        field: "role",
        constraint: Constraint::OneOf(&["user", "recruiter"]),
        message: "Role must be either user or recruiter",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
            Role::default(),
        );

        assert_eq!(user.role, Role::User);
        assert!(!user.is_email_confirmed);
        assert!(user.reset_password_token.is_none());
        assert!(user.confirm_email_token.is_none());
    }

    #[test]
    fn test_password_hash_never_serializes() {
        let user = User::new(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            "secret-hash".to_string(),
            Role::User,
        );

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("reset_password_token").is_none());
        assert!(json.get("confirm_email_token").is_none());
        assert_eq!(json["email"], "jane@example.com");
    }

    #[test]
    fn test_confirm_email_clears_token() {
        let mut user = User::new(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
            Role::User,
        );
        user.set_confirm_token("abc".to_string());

        user.confirm_email();
        assert!(user.is_email_confirmed);
        assert!(user.confirm_email_token.is_none());
    }

    #[test]
    fn test_reset_token_expiry_window() {
        let mut user = User::new(
            "Jane".to_string(),
            "jane@example.com".to_string(),
            "hash".to_string(),
            Role::User,
        );
        let now = Utc::now();
        user.set_reset_token("hash".to_string(), now + chrono::Duration::minutes(10));

        assert!(user.reset_token_valid(now));
        assert!(!user.reset_token_valid(now + chrono::Duration::minutes(11)));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Recruiter).unwrap(), "\"recruiter\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }
}
