use crate::domain::error::DomainError;
use crate::domain::id::RecordId;
use crate::domain::validation::{normalize_email, require_non_blank};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// What the API exposes about a user; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// The authenticated caller a service acts on behalf of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: RecordId,
    pub role: Role,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Owners and admins may touch a user's documents.
    pub fn can_access(&self, owner: RecordId) -> bool {
        self.user_id == owner || self.is_admin()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl CreateUser {
    /// Checks the payload and returns the normalised email.
    pub fn validate(&self) -> Result<String, DomainError> {
        require_non_blank(&self.name, "Name is required")?;
        let email = normalize_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        Ok(email)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateRole {
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, email: &str, password: &str) -> CreateUser {
        CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_validate_returns_normalised_email() {
        let email = create("Alice", " Alice@Example.com", "secret1").validate().unwrap();
        assert_eq!(email, "alice@example.com");
    }

    #[test]
    fn test_validate_rejects_bad_payloads() {
        let cases = [
            (create("", "a@b.c", "secret1"), "Name is required"),
            (create("Al", "nope", "secret1"), "Please provide a valid email address"),
            (create("Al", "a@b.c", "12345"), "Password must be at least 6 characters"),
        ];
        for (req, message) in cases {
            assert_eq!(req.validate().unwrap_err().to_string(), message);
        }
    }

    #[test]
    fn test_actor_access_rules() {
        let owner = RecordId::generate();
        let user = Actor {
            user_id: owner,
            role: Role::User,
        };
        let stranger = Actor {
            user_id: RecordId::generate(),
            role: Role::User,
        };
        let admin = Actor {
            user_id: RecordId::generate(),
            role: Role::Admin,
        };
        assert!(user.can_access(owner));
        assert!(!stranger.can_access(owner));
        assert!(admin.can_access(owner));
    }

    #[test]
    fn test_profile_omits_password_hash() {
        let user = User {
            id: RecordId::generate(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::Admin,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(user.profile()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "admin");
        assert!(user.is_admin());
    }
}
