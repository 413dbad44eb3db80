// src/services/auth.rs

use std::sync::Arc;

use anyhow::anyhow;
use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sha2::{Digest, Sha256};
use tokio::sync::OnceCell;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::{
        auth::{AdminUser, Capabilities, Claims, LoginResponse, Role},
        new_id,
    },
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt_secret: String,
    token_ttl: Duration,
    hash_cost: u32,
    // Checked against when the username is unknown, so both failures cost one bcrypt verify.
    dummy_hash: Arc<OnceCell<String>>,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt_secret: String, token_ttl: Duration) -> Self {
        Self {
            user_repo,
            jwt_secret,
            token_ttl,
            hash_cost: bcrypt::DEFAULT_COST,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Lower bcrypt cost, for tests.
    pub fn with_hash_cost(mut self, hash_cost: u32) -> Self {
        self.hash_cost = hash_cost;
        self.dummy_hash = Arc::new(OnceCell::new());
        self
    }

    pub async fn login_user(&self, username: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user = self.user_repo.find_by_username(username).await?;

        let password_clone = password.to_owned();
        let password_hash_clone = match &user {
            Some(user) => user.password_hash.clone(),
            None => self.dummy_hash().await?,
        };

        // bcrypt is CPU bound; keep it off the async workers.
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify_password(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow!("Password verification task failed: {}", e))??;

        let user = match user {
            Some(user) if is_password_valid => user,
            _ => return Err(AppError::InvalidCredentials),
        };

        let token = self.create_token(&user)?;
        tracing::info!(username = %user.username, "admin signed in");

        Ok(LoginResponse {
            capabilities: Capabilities::for_role(user.role),
            id: user.id,
            username: user.username,
            display_name: user.display_name,
            role: user.role,
            token,
        })
    }

    pub async fn validate_token(&self, token: &str) -> Result<AdminUser, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        // Tokens of deleted users stop working.
        self.user_repo
            .find_by_id(&token_data.claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)
    }

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        display_name: Option<String>,
        role: Role,
    ) -> Result<AdminUser, AppError> {
        let password_clone = password.to_owned();
        let cost = self.hash_cost;
        let password_hash = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow!("Password hashing task failed: {}", e))??;

        self.user_repo
            .create_user(AdminUser {
                id: new_id(),
                username: username.to_owned(),
                password_hash,
                display_name,
                role,
                created_at: Utc::now(),
            })
            .await
    }

    /// Creates the configured admin account unless it already exists.
    /// Returns whether a user was created.
    pub async fn seed_admin(&self, username: &str, password: &str) -> Result<bool, AppError> {
        if self.user_repo.find_by_username(username).await?.is_some() {
            return Ok(false);
        }

        match self.create_user(username, password, None, Role::Admin).await {
            Ok(_) => Ok(true),
            Err(AppError::UsernameAlreadyExists) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn dummy_hash(&self) -> Result<String, AppError> {
        let cost = self.hash_cost;
        let dummy = self
            .dummy_hash
            .get_or_try_init(|| async move {
                tokio::task::spawn_blocking(move || hash("not-a-real-password", cost))
                    .await
                    .map_err(|e| AppError::from(anyhow!("Password hashing task failed: {}", e)))?
                    .map_err(AppError::from)
            })
            .await?;
        Ok(dummy.clone())
    }

    fn create_token(&self, user: &AdminUser) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(self.token_ttl)
            .ok_or_else(|| anyhow!("Token lifetime {} overflows the clock", self.token_ttl))?;

        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

// Accepts bcrypt hashes and the hex SHA-256 hashes of older deployments.
fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    if stored_hash.starts_with("$2") {
        return Ok(verify(password, stored_hash)?);
    }

    let digest = format!("{:x}", Sha256::digest(password.as_bytes()));
    Ok(digest.eq_ignore_ascii_case(stored_hash.trim()))
}
