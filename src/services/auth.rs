//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        activity::NewActivity,
        enums::{ActivityAction, ActivityEntity},
        user::{CreateUser, UpdateUser, User, UserClaims},
    },
    repository::Repository,
};

/// Successful login response
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    auth_config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, auth_config: AuthConfig) -> Self {
        Self {
            repository,
            auth_config,
        }
    }

    /// Verify credentials and issue a JWT
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !user.is_active {
            return Err(AppError::Authentication(
                "Account has been deactivated".to_string(),
            ));
        }

        if !verify_password(password, &user.password)? {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        let token = self.issue_token(&user)?;
        Ok(LoginResponse { token, user })
    }

    fn issue_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            exp: (now + Duration::hours(self.auth_config.jwt_expiration_hours)).timestamp(),
            iat: now.timestamp(),
        };

        claims
            .create_token(&self.auth_config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Token creation failed: {}", e)))
    }

    /// Create a new user account (admin only, enforced at the handler)
    pub async fn register(&self, req: &CreateUser, actor: Uuid) -> AppResult<User> {
        if self.repository.users.get_by_email(&req.email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "User with email {} already exists",
                req.email
            )));
        }

        let hash = hash_password(&req.password)?;
        let user = self
            .repository
            .users
            .create(&req.email, &hash, &req.name, req.role)
            .await?;

        self.repository
            .activity
            .record(&NewActivity::new(
                actor,
                ActivityAction::Create,
                ActivityEntity::User,
                user.id,
                format!("Created user {}", user.email),
            ))
            .await?;

        Ok(user)
    }

    /// List all user accounts
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.list().await
    }

    /// Update a user account, re-hashing the password when one is supplied
    pub async fn update_user(&self, id: Uuid, req: &UpdateUser, actor: Uuid) -> AppResult<User> {
        let hash = match req.password.as_deref() {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let user = self
            .repository
            .users
            .update(id, req, hash.as_deref())
            .await?;

        self.repository
            .activity
            .record(&NewActivity::new(
                actor,
                ActivityAction::Update,
                ActivityEntity::User,
                user.id,
                format!("Updated user {}", user.email),
            ))
            .await?;

        Ok(user)
    }

    /// Fetch the account behind a set of claims
    pub async fn current_user(&self, user_id: Uuid) -> AppResult<User> {
        self.repository.users.get_by_id(user_id).await
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_round_trip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }
}
