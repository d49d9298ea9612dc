pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::auth::handlers as auth;
use crate::catalog::handle_catalog;
use crate::dashboard::handlers as dashboard;
use crate::jobs::handlers as jobs;
use crate::profiles::handlers as profiles;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/auth/register", post(auth::handle_register))
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/auth/me", get(auth::handle_me))
        // Profile
        .route(
            "/api/v1/profile",
            get(profiles::handle_get_profile).put(profiles::handle_update_profile),
        )
        // Jobs
        .route(
            "/api/v1/jobs",
            get(jobs::handle_list_jobs).post(jobs::handle_create_job),
        )
        .route("/api/v1/jobs/:id", get(jobs::handle_get_job))
        .route("/api/v1/jobs/:id/apply", post(applications::handle_apply))
        .route(
            "/api/v1/jobs/:id/applicants",
            get(applications::handle_job_applicants),
        )
        .route("/api/v1/recruiter/jobs", get(jobs::handle_recruiter_jobs))
        // Applications
        .route(
            "/api/v1/applications",
            get(applications::handle_my_applications),
        )
        .route(
            "/api/v1/applications/:id/status",
            patch(applications::handle_update_status),
        )
        // Dashboards
        .route(
            "/api/v1/dashboard/seeker",
            get(dashboard::handle_seeker_dashboard),
        )
        .route(
            "/api/v1/dashboard/recruiter",
            get(dashboard::handle_recruiter_dashboard),
        )
        .route("/api/v1/catalog", get(handle_catalog))
        .with_state(state)
}

// ── Tests ─────────────────────────────────────────────────────────────
