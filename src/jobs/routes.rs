// src/jobs/routes.rs

use axum::{routing::get, Router};

use super::handlers;

/// Create the jobs router
pub fn jobs_routes() -> Router {
    Router::new()
        .route("/jobs/", get(handlers::list_jobs))
        .route("/jobs", get(handlers::list_jobs))
        .route("/jobs/:id/summary", get(handlers::get_job_summary))
        .route("/jobs/:id/interview", get(handlers::get_job_interview_questions))
}
