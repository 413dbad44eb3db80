// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        auth::{AdminUser, Role},
        Stamp,
    },
};

/// Guard for every mutating route: a valid token whose user has the admin role.
/// Guests (no token) get 401, non-admin users 403.
pub struct RequireAdmin(pub AdminUser);

impl RequireAdmin {
    /// Write stamp attributed to this admin.
    pub fn stamp(&self) -> Stamp {
        Stamp::now(Some(self.0.username.clone()))
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state).await?;

        if user.role != Role::Admin {
            return Err(AppError::Forbidden);
        }

        Ok(RequireAdmin(user))
    }
}
