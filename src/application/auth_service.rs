use crate::domain::error::DomainError;
use crate::domain::id::RecordId;
use crate::domain::repository::UserRepository;
use crate::domain::user::{CreateUser, LoginRequest, Role, User, UserProfile};
use crate::infrastructure::config::AdminSeed;
use crate::infrastructure::security::{generate_token, hash_password, verify_password};
use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace, warn};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: UserProfile,
}

pub struct AuthService<R: UserRepository> {
    user_repository: Arc<R>,
    jwt_secret: String,
    token_ttl_secs: u64,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repository: Arc<R>, jwt_secret: String, token_ttl_secs: u64) -> Self {
        Self {
            user_repository,
            jwt_secret,
            token_ttl_secs,
        }
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn register_user(&self, req: CreateUser) -> Result<User> {
        trace!("Starting user registration");
        let email = req.validate()?;
        self.create_user(req.name.trim().to_string(), email, &req.password, Role::User)
            .await
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: LoginRequest) -> Result<Session> {
        trace!("Starting login");
        let email = req.email.trim().to_lowercase();

        let user = self
            .user_repository
            .find_user_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!("User not found during login");
                DomainError::Unauthorized(INVALID_CREDENTIALS.to_string())
            })?;

        let is_valid = verify_password(&req.password, &user.password_hash).map_err(|e| {
            error!(error = %e, "Failed to verify password");
            DomainError::Internal(format!("Failed to verify password: {}", e))
        })?;

        if !is_valid {
            warn!(user_id = %user.id, "Invalid password during login");
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()).into());
        }

        let access_token = self.issue_token(&user)?;
        info!(user_id = %user.id, role = ?user.role, "Login successful");

        Ok(Session {
            access_token,
            user: user.profile(),
        })
    }

    /// Creates the configured admin account, or promotes it when it already exists.
    #[instrument(skip(self, seed), fields(email = %seed.email))]
    pub async fn ensure_admin(&self, seed: &AdminSeed) -> Result<User> {
        let email = crate::domain::validation::normalize_email(&seed.email)?;

        if let Some(mut user) = self.user_repository.find_user_by_email(&email).await? {
            if !user.is_admin() {
                user.role = Role::Admin;
                if !self.user_repository.update_user(user.clone()).await? {
                    return Err(DomainError::UserNotFound.into());
                }
                info!(user_id = %user.id, "Existing user promoted to admin");
            }
            return Ok(user);
        }

        self.create_user(seed.name.clone(), email, &seed.password, Role::Admin)
            .await
    }

    pub fn issue_token(&self, user: &User) -> Result<String> {
        let token = generate_token(
            &user.id.to_string(),
            user.role,
            &self.jwt_secret,
            self.token_ttl_secs,
        )
        .map_err(|e| {
            error!(error = %e, "Failed to generate token");
            DomainError::Internal(format!("Failed to generate token: {}", e))
        })?;
        Ok(token)
    }

    /// The stored account behind a token subject. A deleted account is
    /// treated like a bad token.
    pub async fn current_user(&self, id: RecordId) -> Result<User> {
        self.user_repository
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %id, "Token presented for a deleted account");
                DomainError::Unauthorized("Invalid or expired token".to_string()).into()
            })
    }

    async fn create_user(&self, name: String, email: String, password: &str, role: Role) -> Result<User> {
        let password_hash = hash_password(password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {}", e))
        })?;

        let user = User {
            id: RecordId::generate(),
            name,
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        };

        debug!(user_id = %user.id, "Saving user to repository");
        if !self.user_repository.insert_user(user.clone()).await? {
            warn!(email = %user.email, "User already exists");
            return Err(
                DomainError::Conflict("User with this email already exists".to_string()).into(),
            );
        }

        info!(user_id = %user.id, email = %user.email, role = ?user.role, "User registered successfully");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::user_repository::InMemoryUserRepository;
    use crate::infrastructure::security::validate_token;

    const SECRET: &str = "auth-service-test-secret";

    fn service() -> AuthService<InMemoryUserRepository> {
        AuthService::new(Arc::new(InMemoryUserRepository::new()), SECRET.to_string(), 3600)
    }

    fn signup(email: &str) -> CreateUser {
        CreateUser {
            name: "Alice".to_string(),
            email: email.to_string(),
            password: "squat-every-day".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_defaults_role() {
        let auth = service();
        let user = auth.register_user(signup("Alice@Example.com")).await.unwrap();

        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.role, Role::User);
        assert_ne!(user.password_hash, "squat-every-day");
        assert!(verify_password("squat-every-day", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let auth = service();
        auth.register_user(signup("dup@example.com")).await.unwrap();

        let err = auth.register_user(signup("DUP@example.com")).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Conflict(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_registrations_store_one_user_per_email() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let auth = Arc::new(AuthService::new(repo.clone(), SECRET.to_string(), 3600));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let auth = auth.clone();
                tokio::spawn(async move { auth.register_user(signup("dup@x.io")).await })
            })
            .collect();

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(err) => {
                    assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Conflict(_))));
                    conflicts += 1;
                }
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(conflicts, 7);
        let stored = repo.find_all_users().await.unwrap();
        assert_eq!(stored.iter().filter(|u| u.email == "dup@x.io").count(), 1);
    }

    #[tokio::test]
    async fn test_current_user_rejects_deleted_account() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let auth = AuthService::new(repo.clone(), SECRET.to_string(), 3600);
        let user = auth.register_user(signup("gone@example.com")).await.unwrap();

        assert_eq!(auth.current_user(user.id).await.unwrap().id, user.id);

        repo.delete_user(user.id).await.unwrap();
        let err = auth.current_user(user.id).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<DomainError>(), Some(DomainError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_login_issues_token_for_valid_credentials() {
        let auth = service();
        let user = auth.register_user(signup("login@example.com")).await.unwrap();

        let session = auth
            .login(LoginRequest {
                email: " login@example.com".to_string(),
                password: "squat-every-day".to_string(),
            })
            .await
            .unwrap();

        let claims = validate_token(&session.access_token, SECRET).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(session.user.id, user.id);
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let auth = service();
        auth.register_user(signup("login@example.com")).await.unwrap();

        for (email, password) in [("login@example.com", "wrong"), ("nobody@example.com", "squat-every-day")] {
            let err = auth
                .login(LoginRequest {
                    email: email.to_string(),
                    password: password.to_string(),
                })
                .await
                .unwrap_err();
            assert_eq!(err.to_string(), INVALID_CREDENTIALS);
        }
    }

    #[tokio::test]
    async fn test_ensure_admin_creates_then_promotes() {
        let auth = service();
        let seed = AdminSeed {
            name: "Root".to_string(),
            email: "root@example.com".to_string(),
            password: "changeme".to_string(),
        };

        let created = auth.ensure_admin(&seed).await.unwrap();
        assert_eq!(created.role, Role::Admin);
        let again = auth.ensure_admin(&seed).await.unwrap();
        assert_eq!(again.id, created.id);

        let plain = auth.register_user(signup("coach@example.com")).await.unwrap();
        let promoted = auth
            .ensure_admin(&AdminSeed {
                email: "coach@example.com".to_string(),
                ..seed
            })
            .await
            .unwrap();
        assert_eq!(promoted.id, plain.id);
        assert!(promoted.is_admin());
    }
}
