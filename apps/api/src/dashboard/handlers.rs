//! Dashboard aggregates for both roles.

use std::collections::{BTreeMap, HashSet};

use axum::{extract::State, Json};
use serde::Serialize;

use crate::applications::handlers::{application_views, build_applicant, Applicant, ApplicationView};
use crate::applications::repository::{list_for_recruiter, list_for_user};
use crate::auth::extractor::AuthUser;
use crate::errors::AppError;
use crate::jobs::handlers::{score_jobs, JobSummary};
use crate::jobs::repository::{get_job, list_jobs, list_jobs_by_recruiter};
use crate::models::application::{ApplicationRow, ApplicationStatus};
use crate::models::profile::JobSeekerProfile;
use crate::models::user::UserRole;
use crate::profiles::completeness::compute_profile_completeness;
use crate::profiles::repository::{get_jobseeker_profile, get_recruiter_profile};
use crate::search::filters::{sort_jobs, ScoredJob, SortBy};
use crate::state::AppState;

const RECOMMENDED_JOBS: usize = 4;
const RECENT_APPLICATIONS: usize = 3;
const ACTIVE_JOBS: usize = 3;
const RECENT_APPLICANTS: i64 = 10;

#[derive(Debug, Serialize)]
pub struct SeekerDashboard {
    pub profile_completeness: u32,
    pub applications_total: usize,
    pub by_status: BTreeMap<&'static str, usize>,
    pub average_match_score: u32,
    pub recommended_jobs: Vec<JobSummary>,
    pub recent_applications: Vec<ApplicationView>,
}

#[derive(Debug, Serialize)]
pub struct RecruiterDashboard {
    pub company: Option<String>,
    pub jobs_posted: i64,
    pub total_applicants: i64,
    pub active_jobs: Vec<JobSummary>,
    pub recent_applicants: Vec<Applicant>,
}

/// GET /api/v1/dashboard/seeker
pub async fn handle_seeker_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<SeekerDashboard>, AppError> {
    let seeker = auth.require_role(UserRole::Jobseeker)?;
    let profile = get_jobseeker_profile(&state.db, seeker.id)
        .await?
        .unwrap_or_else(|| JobSeekerProfile::empty(seeker.id));
    let applications = list_for_user(&state.db, seeker.id).await?;

    // Recommend the best-matching jobs the seeker has not applied to yet.
    let applied: HashSet<_> = applications.iter().map(|a| a.job_id).collect();
    let candidates: Vec<_> = list_jobs(&state.db)
        .await?
        .into_iter()
        .filter(|job| !applied.contains(&job.id))
        .collect();
    let mut scored = score_jobs(&state, candidates, Some(profile.skills.as_slice())).await?;
    sort_jobs(&mut scored, SortBy::Match);
    let recommended_jobs = scored
        .into_iter()
        .take(RECOMMENDED_JOBS)
        .map(JobSummary::from_scored)
        .collect();

    let by_status = count_by_status(&applications);
    let average_match_score = average_score(&applications);
    let applications_total = applications.len();
    let recent: Vec<ApplicationRow> = applications.into_iter().take(RECENT_APPLICATIONS).collect();

    Ok(Json(SeekerDashboard {
        profile_completeness: compute_profile_completeness(&seeker.name, &profile),
        applications_total,
        by_status,
        average_match_score,
        recommended_jobs,
        recent_applications: application_views(&state, recent).await?,
    }))
}

/// GET /api/v1/dashboard/recruiter
pub async fn handle_recruiter_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<RecruiterDashboard>, AppError> {
    let recruiter = auth.require_role(UserRole::Recruiter)?;
    let profile = get_recruiter_profile(&state.db, recruiter.id).await?;
    let jobs = list_jobs_by_recruiter(&state.db, recruiter.id).await?;

    let total_applicants: i64 = jobs.iter().map(|j| j.applicants).sum();

    let mut recent_applicants = Vec::new();
    for application in list_for_recruiter(&state.db, recruiter.id, RECENT_APPLICANTS).await? {
        let job = match jobs.iter().find(|j| j.id == application.job_id) {
            Some(job) => job.clone(),
            None => match get_job(&state.db, application.job_id).await? {
                Some(job) => job,
                None => continue,
            },
        };
        if let Some(applicant) = build_applicant(&state, application, &job).await? {
            recent_applicants.push(applicant);
        }
    }

    let active_jobs = jobs
        .into_iter()
        .take(ACTIVE_JOBS)
        .map(|job| {
            let match_score = job.match_score;
            JobSummary::from_scored(ScoredJob { job, match_score })
        })
        .collect();

    Ok(Json(RecruiterDashboard {
        company: profile.as_ref().map(|p| p.company.clone()),
        jobs_posted: profile.map(|p| p.jobs_posted).unwrap_or(0),
        total_applicants,
        active_jobs,
        recent_applicants,
    }))
}

/// Every status appears, zero or not.
pub fn count_by_status(applications: &[ApplicationRow]) -> BTreeMap<&'static str, usize> {
    let mut counts: BTreeMap<&'static str, usize> = ApplicationStatus::ALL
        .iter()
        .map(|s| (s.as_str(), 0))
        .collect();
    for application in applications {
        *counts.entry(application.status.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Rounded mean of frozen match scores; 0 with no applications.
pub fn average_score(applications: &[ApplicationRow]) -> u32 {
    if applications.is_empty() {
        return 0;
    }
    let sum: i64 = applications.iter().map(|a| a.match_score).sum();
    (sum as f64 / applications.len() as f64).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn app(status: ApplicationStatus, score: i64) -> ApplicationRow {
        ApplicationRow {
            id: Uuid::new_v4(),
            job_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            status,
            applied_at: Utc::now(),
            cover_letter: None,
            match_score: score,
        }
    }

    #[test]
    fn test_count_by_status_includes_zeroes() {
        let counts = count_by_status(&[
            app(ApplicationStatus::Pending, 72),
            app(ApplicationStatus::Shortlisted, 94),
            app(ApplicationStatus::Pending, 65),
        ]);
        assert_eq!(counts.len(), 5);
        assert_eq!(counts["pending"], 2);
        assert_eq!(counts["shortlisted"], 1);
        assert_eq!(counts["hired"], 0);
    }

    #[test]
    fn test_average_score() {
        assert_eq!(average_score(&[]), 0);
        // (94 + 65 + 72) / 3 = 77
        let apps = [
            app(ApplicationStatus::Shortlisted, 94),
            app(ApplicationStatus::Reviewed, 65),
            app(ApplicationStatus::Pending, 72),
        ];
        assert_eq!(average_score(&apps), 77);
    }
}
