//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::applications::repository::find_application;
use crate::auth::extractor::{AuthUser, MaybeAuthUser};
use crate::errors::AppError;
use crate::extract::{AppJson, AppQuery};
use crate::format::{format_salary, time_ago};
use crate::jobs::repository::{get_job, insert_job, list_jobs, list_jobs_by_recruiter};
use crate::jobs::validation::{normalize_list, validate_new_job, CreateJobRequest};
use crate::matching::scorer::{MatchResult, MatchTier};
use crate::models::job::{Job, SalaryRange};
use crate::models::user::UserRole;
use crate::profiles::repository::{get_recruiter_profile, increment_jobs_posted, seeker_skills};
use crate::search::filters::{apply_filters, JobFilters, ScoredJob};
use crate::search::query::JobSearchQuery;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// A job plus display fields. `job.match_score` holds the score used for ranking.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    #[serde(flatten)]
    pub job: Job,
    pub match_tier: Option<MatchTier>,
    pub salary_display: String,
    pub posted_ago: String,
}

impl JobSummary {
    pub fn from_scored(scored: ScoredJob) -> Self {
        let ScoredJob { mut job, match_score } = scored;
        job.match_score = match_score;
        let salary_display = format_salary(job.salary.min, job.salary.max, &job.salary.currency);
        let posted_ago = time_ago(job.posted_at, Utc::now());
        JobSummary {
            match_tier: match_score.map(MatchTier::from_score),
            job,
            salary_display,
            posted_ago,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobSummary>,
    pub total: usize,
    pub has_active_filters: bool,
    pub filters: JobFilters,
}

#[derive(Debug, Serialize)]
pub struct JobDetailResponse {
    #[serde(flatten)]
    pub summary: JobSummary,
    /// Present for job seeker callers only.
    #[serde(rename = "match")]
    pub match_result: Option<MatchResult>,
    pub has_applied: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs
///
/// Job seekers get scores computed from their own skills; everyone else sees
/// curated scores only.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    AppQuery(query): AppQuery<JobSearchQuery>,
) -> Result<Json<JobListResponse>, AppError> {
    let filters = JobFilters::try_from(query)?;
    let skills = seeker_skills(&state.db, caller.as_ref()).await?;

    let jobs = list_jobs(&state.db).await?;
    let scored = score_jobs(&state, jobs, skills.as_deref()).await?;
    let results = apply_filters(scored, &filters);

    let jobs: Vec<JobSummary> = results.into_iter().map(JobSummary::from_scored).collect();
    Ok(Json(JobListResponse {
        total: jobs.len(),
        has_active_filters: filters.has_active_filters(),
        jobs,
        filters,
    }))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobDetailResponse>, AppError> {
    let job = get_job(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let skills = seeker_skills(&state.db, caller.as_ref()).await?;
    let (match_result, has_applied) = match (caller.as_ref(), skills) {
        (Some(user), Some(skills)) => {
            let result = state.match_scorer.score(&job, &skills).await?;
            let applied = find_application(&state.db, job.id, user.id).await?.is_some();
            (Some(result), applied)
        }
        _ => (None, false),
    };

    let score = match_result.as_ref().map(|r| r.score).or(job.match_score);
    Ok(Json(JobDetailResponse {
        summary: JobSummary::from_scored(ScoredJob {
            job,
            match_score: score,
        }),
        match_result,
        has_applied,
    }))
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(req): AppJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let recruiter = auth.require_role(UserRole::Recruiter)?;
    let now = Utc::now();
    validate_new_job(&req, now)?;

    let profile = get_recruiter_profile(&state.db, recruiter.id).await?;
    let company = req
        .company
        .map(|c| c.trim().to_string())
        .or_else(|| profile.as_ref().map(|p| p.company.clone()))
        .ok_or_else(|| AppError::Validation("company is required".to_string()))?;

    let job = Job {
        id: Uuid::new_v4(),
        title: req.title.trim().to_string(),
        company,
        company_logo: req
            .company_logo
            .or_else(|| profile.as_ref().and_then(|p| p.company_logo.clone())),
        location: req.location.trim().to_string(),
        job_type: req.job_type,
        salary: SalaryRange {
            min: req.salary.min,
            max: req.salary.max,
            currency: req
                .salary
                .currency
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "USD".to_string()),
        },
        experience: req.experience,
        skills: normalize_list(&req.skills),
        description: req.description.trim().to_string(),
        responsibilities: normalize_list(&req.responsibilities),
        requirements: normalize_list(&req.requirements),
        benefits: normalize_list(&req.benefits),
        posted_at: now,
        deadline: req.deadline,
        recruiter_id: recruiter.id,
        applicants: 0,
        match_score: None,
    };

    let mut tx = state.db.begin().await?;
    insert_job(&mut *tx, &job).await?;
    increment_jobs_posted(&mut *tx, recruiter.id).await?;
    tx.commit().await?;

    info!("Recruiter {} posted job {} ({})", recruiter.id, job.id, job.title);
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/recruiter/jobs
pub async fn handle_recruiter_jobs(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<JobSummary>>, AppError> {
    let recruiter = auth.require_role(UserRole::Recruiter)?;
    let jobs = list_jobs_by_recruiter(&state.db, recruiter.id).await?;
    Ok(Json(
        jobs.into_iter()
            .map(|job| {
                let match_score = job.match_score;
                JobSummary::from_scored(ScoredJob { job, match_score })
            })
            .collect(),
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Pairs each job with its ranking score. Without seeker skills only curated
/// scores exist.
pub async fn score_jobs(
    state: &AppState,
    jobs: Vec<Job>,
    skills: Option<&[String]>,
) -> Result<Vec<ScoredJob>, AppError> {
    let mut scored = Vec::with_capacity(jobs.len());
    for job in jobs {
        let match_score = match skills {
            Some(skills) => Some(state.match_scorer.score(&job, skills).await?.score),
            None => job.match_score,
        };
        scored.push(ScoredJob { job, match_score });
    }
    Ok(scored)
}
