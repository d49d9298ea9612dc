//! Axum route handlers for applying to jobs and reviewing applicants.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::applications::repository::{
    find_application, get_application, insert_application, list_for_job, list_for_user,
    update_status,
};
use crate::applications::status::{transition, Transition};
use crate::auth::extractor::AuthUser;
use crate::auth::users::find_by_id;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::jobs::handlers::JobSummary;
use crate::jobs::repository::{get_job, increment_applicants};
use crate::matching::insights::build_insights;
use crate::matching::scorer::{MatchResult, MatchTier, SkillAlignment};
use crate::models::application::{ApplicationRow, ApplicationStatus};
use crate::models::job::Job;
use crate::models::profile::JobSeekerProfile;
use crate::models::user::{User, UserRole};
use crate::profiles::repository::get_jobseeker_profile;
use crate::search::filters::ScoredJob;
use crate::state::AppState;

const MAX_STATUS_ATTEMPTS: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ApplyRequest {
    pub cover_letter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: ApplicationStatus,
}

/// An application as the applicant sees it.
#[derive(Debug, Serialize)]
pub struct ApplicationView {
    #[serde(flatten)]
    pub application: ApplicationRow,
    pub job: JobSummary,
}

/// An application as the recruiter sees it.
#[derive(Debug, Clone, Serialize)]
pub struct Applicant {
    pub id: Uuid,
    pub application_id: Uuid,
    pub job_id: Uuid,
    pub user: User,
    pub profile: JobSeekerProfile,
    pub match_score: u32,
    pub applied_at: DateTime<Utc>,
    pub status: ApplicationStatus,
    pub skill_alignment: SkillAlignment,
    pub ai_insights: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs/:id/apply
///
/// The match score is frozen at apply time.
pub async fn handle_apply(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<Uuid>,
    body: Option<Json<ApplyRequest>>,
) -> Result<(StatusCode, Json<ApplicationView>), AppError> {
    let seeker = auth.require_role(UserRole::Jobseeker)?;
    let req = body.map(|Json(r)| r).unwrap_or_default();

    let job = get_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let already_applied = || AppError::Conflict("You have already applied to this job".to_string());
    if find_application(&state.db, job.id, seeker.id).await?.is_some() {
        return Err(already_applied());
    }

    let profile = get_jobseeker_profile(&state.db, seeker.id)
        .await?
        .unwrap_or_else(|| JobSeekerProfile::empty(seeker.id));
    let result = state.match_scorer.score(&job, &profile.skills).await?;

    let application = ApplicationRow {
        id: Uuid::new_v4(),
        job_id: job.id,
        user_id: seeker.id,
        status: ApplicationStatus::Pending,
        applied_at: Utc::now(),
        cover_letter: req
            .cover_letter
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
        match_score: i64::from(result.score),
    };

    let mut tx = state.db.begin().await?;
    // Two concurrent applies can both pass the lookup; the unique index decides.
    insert_application(&mut *tx, &application)
        .await
        .map_err(|e| AppError::unique_violation_as(e, already_applied()))?;
    increment_applicants(&mut *tx, job.id).await?;
    tx.commit().await?;

    info!(
        "User {} applied to job {} (match {}%)",
        seeker.id, job.id, result.score
    );

    let mut job = job;
    job.applicants += 1;
    Ok((
        StatusCode::CREATED,
        Json(ApplicationView {
            job: JobSummary::from_scored(ScoredJob {
                job,
                match_score: Some(result.score),
            }),
            application,
        }),
    ))
}

/// GET /api/v1/applications
pub async fn handle_my_applications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ApplicationView>>, AppError> {
    let seeker = auth.require_role(UserRole::Jobseeker)?;
    let applications = list_for_user(&state.db, seeker.id).await?;
    Ok(Json(application_views(&state, applications).await?))
}

/// GET /api/v1/jobs/:id/applicants
pub async fn handle_job_applicants(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<Applicant>>, AppError> {
    let recruiter = auth.require_role(UserRole::Recruiter)?;
    let job = owned_job(&state, job_id, recruiter.id).await?;

    let mut applicants = Vec::new();
    for application in list_for_job(&state.db, job.id).await? {
        if let Some(applicant) = build_applicant(&state, application, &job).await? {
            applicants.push(applicant);
        }
    }
    applicants.sort_by_key(|a| std::cmp::Reverse(a.match_score));
    Ok(Json(applicants))
}

/// PATCH /api/v1/applications/:id/status
pub async fn handle_update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(application_id): Path<Uuid>,
    AppJson(req): AppJson<StatusUpdateRequest>,
) -> Result<Json<ApplicationRow>, AppError> {
    let recruiter = auth.require_role(UserRole::Recruiter)?;
    let not_found = || AppError::NotFound(format!("Application {application_id} not found"));
    let mut application = get_application(&state.db, application_id)
        .await?
        .ok_or_else(not_found)?;
    owned_job(&state, application.job_id, recruiter.id).await?;

    // The write only lands if the status is still the one checked; after a
    // lost race the fresh status is checked again.
    for _ in 0..MAX_STATUS_ATTEMPTS {
        let Transition::Changed(next) = transition(application.status, req.status)? else {
            return Ok(Json(application));
        };
        if update_status(&state.db, application.id, application.status, next).await? {
            info!(
                "Application {} moved {} -> {}",
                application.id,
                application.status.as_str(),
                next.as_str()
            );
            application.status = next;
            return Ok(Json(application));
        }
        application = get_application(&state.db, application_id)
            .await?
            .ok_or_else(not_found)?;
    }
    Err(AppError::Conflict(
        "Application status is changing concurrently; retry".to_string(),
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Loads a job and checks the recruiter owns it.
async fn owned_job(state: &AppState, job_id: Uuid, recruiter_id: Uuid) -> Result<Job, AppError> {
    let job = get_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    if job.recruiter_id != recruiter_id {
        return Err(AppError::Forbidden);
    }
    Ok(job)
}

pub async fn application_views(
    state: &AppState,
    applications: Vec<ApplicationRow>,
) -> Result<Vec<ApplicationView>, AppError> {
    let mut views = Vec::with_capacity(applications.len());
    for application in applications {
        // The FK cascade removes applications with their job; this guards a race.
        let Some(job) = get_job(&state.db, application.job_id).await? else {
            continue;
        };
        let score = application.match_score.clamp(0, 100) as u32;
        views.push(ApplicationView {
            job: JobSummary::from_scored(ScoredJob {
                job,
                match_score: Some(score),
            }),
            application,
        });
    }
    Ok(views)
}

/// Builds the recruiter view of one application. `None` if the applicant's
/// account is gone.
pub async fn build_applicant(
    state: &AppState,
    application: ApplicationRow,
    job: &Job,
) -> Result<Option<Applicant>, AppError> {
    let Some(user) = find_by_id(&state.db, application.user_id).await? else {
        return Ok(None);
    };
    let profile = get_jobseeker_profile(&state.db, user.id)
        .await?
        .unwrap_or_else(|| JobSeekerProfile::empty(user.id));

    let live = state.match_scorer.score(job, &profile.skills).await?;
    let frozen_score = application.match_score.clamp(0, 100) as u32;
    let result = MatchResult {
        score: frozen_score,
        tier: MatchTier::from_score(frozen_score),
        alignment: live.alignment,
    };
    let ai_insights = build_insights(&profile, &result);

    Ok(Some(Applicant {
        id: application.id,
        application_id: application.id,
        job_id: job.id,
        user,
        profile,
        match_score: frozen_score,
        applied_at: application.applied_at,
        status: application.status,
        skill_alignment: result.alignment,
        ai_insights,
    }))
}
