// src/app.rs
//! Router composition shared by the api binary and the handler tests

use axum::{extract::Extension, middleware, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::common::AppState;
use crate::{auth, jobs, logging_middleware, resumes};

/// GET / - Service banner
async fn read_root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the AI Job Matching Platform API.",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// All routes with state injected. CORS and HTTP tracing are added by the binary.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(read_root))
        // ====================================================================
        // AUTHENTICATION ROUTES
        // ====================================================================
        .merge(auth::auth_routes())
        // ====================================================================
        // JOB ROUTES
        // ====================================================================
        .merge(jobs::jobs_routes())
        // ====================================================================
        // RESUME ROUTES
        // ====================================================================
        .merge(resumes::resumes_routes())
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(state))
}
