//! Axum route handlers for registration, login, and the current user.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::password::{hash_password_blocking, verify_password_blocking, MIN_PASSWORD_LEN};
use crate::auth::users::{find_by_email, insert_user};
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::models::profile::{JobSeekerProfile, RecruiterProfile};
use crate::models::user::{User, UserRole};
use crate::profiles::completeness::compute_profile_completeness;
use crate::profiles::repository::{save_jobseeker_profile, save_recruiter_profile};
use crate::state::AppState;

pub const DEFAULT_COMPANY: &str = "Your Company";
pub const DEFAULT_RECRUITER_POSITION: &str = "Hiring Manager";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub company: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/auth/register
///
/// Creates the account plus an empty profile for its role and returns a token.
pub async fn handle_register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let email = normalize_email(&req.email)?;
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let email_taken = || AppError::Validation("Email already in use".to_string());
    if find_by_email(&state.db, &email).await?.is_some() {
        return Err(email_taken());
    }

    let role = req.role.unwrap_or(UserRole::Jobseeker);
    let name = req
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_name(&email));

    let user = User {
        id: Uuid::new_v4(),
        email,
        password_hash: hash_password_blocking(req.password).await?,
        name,
        role,
        avatar: None,
        created_at: Utc::now(),
    };

    let mut tx = state.db.begin().await?;
    // A concurrent registration can pass the lookup above; the unique index decides.
    insert_user(&mut *tx, &user)
        .await
        .map_err(|e| AppError::unique_violation_as(e, email_taken()))?;
    match role {
        UserRole::Jobseeker => {
            let mut profile = JobSeekerProfile::empty(user.id);
            profile.profile_completeness =
                i64::from(compute_profile_completeness(&user.name, &profile));
            save_jobseeker_profile(&mut *tx, &profile).await?;
        }
        UserRole::Recruiter => {
            let profile = RecruiterProfile {
                user_id: user.id,
                company: req
                    .company
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .unwrap_or(DEFAULT_COMPANY)
                    .to_string(),
                company_logo: None,
                position: DEFAULT_RECRUITER_POSITION.to_string(),
                jobs_posted: 0,
            };
            save_recruiter_profile(&mut *tx, &profile).await?;
        }
    }
    tx.commit().await?;

    info!("Registered {} user {}", role.as_str(), user.id);

    let token = state.tokens.issue(user.id, user.role)?;
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

/// POST /api/auth/login
///
/// Unknown email and wrong password are reported identically.
pub async fn handle_login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let invalid = || AppError::Unauthorized("Invalid credentials".to_string());

    let email = normalize_email(&req.email).map_err(|_| invalid())?;
    let user = find_by_email(&state.db, &email).await?.ok_or_else(invalid)?;

    if !verify_password_blocking(req.password, user.password_hash.clone()).await? {
        tracing::warn!("Failed login for user {}", user.id);
        return Err(invalid());
    }

    let token = state.tokens.issue(user.id, user.role)?;
    Ok(Json(AuthResponse { token, user }))
}

/// GET /api/auth/me
pub async fn handle_me(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Trims and lowercases; requires non-empty local and domain parts.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(email)
    } else {
        Err(AppError::Validation(format!(
            "'{}' is not a valid email address",
            raw.trim()
        )))
    }
}

fn default_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_trims_and_lowercases() {
        assert_eq!(
            normalize_email("  Mike.Johnson@Email.COM ").unwrap(),
            "mike.johnson@email.com"
        );
    }

    #[test]
    fn test_normalize_email_rejects_malformed() {
        for bad in ["", "mike", "@email.com", "mike@", "mike@.com", "a@b@c.com", "mi ke@email.com"] {
            assert!(normalize_email(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_normalize_email_accepts_single_label_domain() {
        assert_eq!(normalize_email("Mike@localhost").unwrap(), "mike@localhost");
    }

    #[test]
    fn test_default_name_is_local_part() {
        assert_eq!(default_name("sarah.chen@builderscorp.com"), "sarah.chen");
    }
}
