use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::auth::users::find_by_id;
use crate::errors::AppError;
use crate::models::user::{User, UserRole};
use crate::state::AppState;

/// The caller, resolved from `Authorization: Bearer <token>`.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn require_role(&self, role: UserRole) -> Result<&User, AppError> {
        if self.0.role == role {
            Ok(&self.0)
        } else {
            tracing::warn!(
                "User {} ({}) denied access to a {} endpoint",
                self.0.id,
                self.0.role.as_str(),
                role.as_str()
            );
            Err(AppError::Forbidden)
        }
    }
}

/// Like `AuthUser`, but anonymous callers are allowed. A header that is present
/// and invalid is still rejected.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?.ok_or_else(|| {
            tracing::debug!("Missing Authorization header");
            AppError::unauthorized()
        })?;
        resolve(token, state).await.map(AuthUser)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => resolve(token, state).await.map(|u| MaybeAuthUser(Some(u))),
            None => Ok(MaybeAuthUser(None)),
        }
    }
}

fn bearer_token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value = header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Malformed Authorization header".to_string()))?;
    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(Some(token.trim())),
        _ => {
            tracing::warn!("Invalid Authorization header format");
            Err(AppError::Unauthorized(
                "Authorization header must be 'Bearer <token>'".to_string(),
            ))
        }
    }
}

async fn resolve(token: &str, state: &AppState) -> Result<User, AppError> {
    let claims = state.tokens.verify(token)?;
    let user = find_by_id(&state.db, claims.sub)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account no longer exists".to_string()))?;
    Ok(user)
}
