use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::extractor::AuthUser;
use crate::auth::users::update_name;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::jobs::validation::normalize_list;
use crate::models::profile::{JobSeekerProfile, RecruiterProfile};
use crate::models::user::{User, UserRole};
use crate::profiles::completeness::{compute_completeness_report, CompletenessReport};
use crate::profiles::repository::{
    get_jobseeker_profile, get_recruiter_profile, save_jobseeker_profile, save_recruiter_profile,
};
use crate::state::AppState;

const MAX_EXPERIENCE_YEARS: i64 = 60;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobseeker: Option<JobSeekerProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruiter: Option<RecruiterProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completeness: Option<CompletenessReport>,
}

/// Partial update. Absent fields are left alone; blank strings clear optional text.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    // job seeker
    pub title: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub experience_years: Option<i64>,
    pub skills: Option<Vec<String>>,
    // recruiter
    pub company: Option<String>,
    pub company_logo: Option<String>,
    pub position: Option<String>,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ProfileResponse>, AppError> {
    Ok(Json(load_profile(&state, user).await?))
}

/// PUT /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    AuthUser(mut user): AuthUser,
    AppJson(req): AppJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    if let Some(name) = req.name.as_deref().map(str::trim) {
        if name.is_empty() {
            return Err(AppError::Validation("name cannot be blank".to_string()));
        }
        user.name = name.to_string();
    }

    // Read everything before opening the transaction; an in-memory pool has one connection.
    let mut tx;
    match user.role {
        UserRole::Jobseeker => {
            let mut profile = get_jobseeker_profile(&state.db, user.id)
                .await?
                .unwrap_or_else(|| JobSeekerProfile::empty(user.id));
            apply_jobseeker_update(&mut profile, &req)?;
            profile.profile_completeness =
                i64::from(compute_completeness_report(&user.name, &profile).score);

            tx = state.db.begin().await?;
            save_jobseeker_profile(&mut *tx, &profile).await?;
        }
        UserRole::Recruiter => {
            let mut profile = get_recruiter_profile(&state.db, user.id)
                .await?
                .ok_or_else(|| AppError::NotFound("Recruiter profile not found".to_string()))?;
            apply_recruiter_update(&mut profile, &req)?;

            tx = state.db.begin().await?;
            save_recruiter_profile(&mut *tx, &profile).await?;
        }
    }
    update_name(&mut *tx, user.id, &user.name).await?;
    tx.commit().await?;

    info!("Updated {} profile for user {}", user.role.as_str(), user.id);
    Ok(Json(load_profile(&state, user).await?))
}

async fn load_profile(state: &AppState, user: User) -> Result<ProfileResponse, AppError> {
    match user.role {
        UserRole::Jobseeker => {
            let profile = get_jobseeker_profile(&state.db, user.id)
                .await?
                .unwrap_or_else(|| JobSeekerProfile::empty(user.id));
            let completeness = compute_completeness_report(&user.name, &profile);
            Ok(ProfileResponse {
                user,
                jobseeker: Some(profile),
                recruiter: None,
                completeness: Some(completeness),
            })
        }
        UserRole::Recruiter => {
            let profile = get_recruiter_profile(&state.db, user.id).await?;
            Ok(ProfileResponse {
                user,
                jobseeker: None,
                recruiter: profile,
                completeness: None,
            })
        }
    }
}

pub fn apply_jobseeker_update(
    profile: &mut JobSeekerProfile,
    req: &UpdateProfileRequest,
) -> Result<(), AppError> {
    if let Some(title) = &req.title {
        profile.title = optional_text(title);
    }
    if let Some(location) = &req.location {
        profile.location = optional_text(location);
    }
    if let Some(bio) = &req.bio {
        profile.bio = optional_text(bio);
    }
    if let Some(years) = req.experience_years {
        if !(0..=MAX_EXPERIENCE_YEARS).contains(&years) {
            return Err(AppError::Validation(format!(
                "experience_years must be between 0 and {MAX_EXPERIENCE_YEARS}"
            )));
        }
        profile.experience_years = Some(years);
    }
    if let Some(skills) = &req.skills {
        profile.skills.0 = normalize_list(skills);
    }
    Ok(())
}

pub fn apply_recruiter_update(
    profile: &mut RecruiterProfile,
    req: &UpdateProfileRequest,
) -> Result<(), AppError> {
    if let Some(company) = &req.company {
        profile.company = optional_text(company)
            .ok_or_else(|| AppError::Validation("company cannot be blank".to_string()))?;
    }
    if let Some(logo) = &req.company_logo {
        profile.company_logo = optional_text(logo);
    }
    if let Some(position) = &req.position {
        profile.position = optional_text(position)
            .ok_or_else(|| AppError::Validation("position cannot be blank".to_string()))?;
    }
    Ok(())
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_jobseeker_update_is_partial() {
        let mut profile = JobSeekerProfile::empty(Uuid::new_v4());
        profile.title = Some("Apprentice Electrician".to_string());
        profile.location = Some("Houston, TX".to_string());

        let req = UpdateProfileRequest {
            title: Some("Journeyman Electrician".to_string()),
            bio: Some("   ".to_string()),
            skills: Some(vec![
                "NEC Code".to_string(),
                "NEC Code".to_string(),
                "Conduit Bending".to_string(),
            ]),
            ..Default::default()
        };
        apply_jobseeker_update(&mut profile, &req).unwrap();

        assert_eq!(profile.title.as_deref(), Some("Journeyman Electrician"));
        assert_eq!(profile.location.as_deref(), Some("Houston, TX"));
        assert_eq!(profile.bio, None);
        assert_eq!(profile.skills.0, vec!["NEC Code", "Conduit Bending"]);
    }

    #[test]
    fn test_experience_out_of_range() {
        let mut profile = JobSeekerProfile::empty(Uuid::new_v4());
        let req = UpdateProfileRequest {
            experience_years: Some(-1),
            ..Default::default()
        };
        assert!(apply_jobseeker_update(&mut profile, &req).is_err());
    }

    #[test]
    fn test_recruiter_company_cannot_be_blanked() {
        let mut profile = RecruiterProfile {
            user_id: Uuid::new_v4(),
            company: "Builders Corp".to_string(),
            company_logo: None,
            position: "Hiring Manager".to_string(),
            jobs_posted: 8,
        };
        let req = UpdateProfileRequest {
            company: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(apply_recruiter_update(&mut profile, &req).is_err());
        assert_eq!(profile.company, "Builders Corp");
    }
}
