// src/resumes/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Resume upload and AI matching routes
pub fn resumes_routes() -> Router {
    Router::new()
        .route("/users/me/resume", post(handlers::upload_resume))
        .route("/users/me/match", get(handlers::match_resume_to_jobs))
}
