// src/jobs/handlers.rs

use axum::extract::{Extension, Json, Path, Query};
use std::sync::Arc;
use tracing::{debug, info};

use super::models::*;
use crate::auth::CurrentUser;
use crate::common::{ApiError, AppState};

async fn load_job(state: &AppState, job_id: i64) -> Result<Job, ApiError> {
    state
        .jobs
        .find_by_id(job_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Job not found".to_string()))
}

/// GET /jobs/ - Page through crawled jobs (`skip`, `limit`)
pub async fn list_jobs(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<JobListParams>,
) -> Result<Json<Vec<JobResponse>>, ApiError> {
    let (skip, limit) = params.window();
    let jobs = state.jobs.list(skip, limit).await?;

    debug!(job_count = jobs.len(), skip, limit, "Loaded job page");

    Ok(Json(jobs.into_iter().map(JobResponse::from).collect()))
}

/// GET /jobs/:id/summary - AI summary of the job description
pub async fn get_job_summary(
    Extension(state): Extension<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(job_id): Path<i64>,
) -> Result<Json<JobSummary>, ApiError> {
    let job = load_job(&state, job_id).await?;

    info!(job_id, user_id = user.id, "Summarizing job");
    let summary = state.ai.summarize(&job.description).await;

    Ok(Json(JobSummary {
        job_id,
        title: job.title,
        summary,
    }))
}

/// GET /jobs/:id/interview - AI interview questions for the job
pub async fn get_job_interview_questions(
    Extension(state): Extension<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(job_id): Path<i64>,
) -> Result<Json<InterviewQuestions>, ApiError> {
    let job = load_job(&state, job_id).await?;

    info!(job_id, user_id = user.id, "Generating interview questions");
    let questions = state.ai.generate_questions(&job.description).await;

    Ok(Json(InterviewQuestions {
        job_id,
        title: job.title,
        questions,
    }))
}
