// src/resumes/handlers.rs

use axum::extract::{Extension, Json};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::models::*;
use super::validators::ResumeValidator;
use crate::auth::CurrentUser;
use crate::common::{ApiError, AppState, Validator};
use crate::jobs::Job;
use crate::services::MatchRecord;

/// POST /users/me/resume - Store a new resume for the caller
pub async fn upload_resume(
    Extension(state): Extension<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<ResumeCreate>,
) -> Result<Json<Resume>, ApiError> {
    ResumeValidator.validate(&payload).into_result()?;

    let resume = state.resumes.create(user.id, &payload.content).await?;
    info!(resume_id = resume.id, user_id = user.id, "Resume uploaded");

    Ok(Json(resume))
}

/// GET /users/me/match - Rank stored jobs against the caller's latest resume
pub async fn match_resume_to_jobs(
    Extension(state): Extension<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<JobMatchResult>>, ApiError> {
    let resume = state
        .resumes
        .latest_for_owner(user.id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(
                "User has no resume uploaded. Please upload a resume first via POST /users/me/resume."
                    .to_string(),
            )
        })?;

    let jobs = state.jobs.list_all().await?;
    if jobs.is_empty() {
        return Err(ApiError::NotFound(
            "No job postings available for matching.".to_string(),
        ));
    }

    debug!(resume_id = resume.id, candidates = jobs.len(), "Matching resume against jobs");
    let records = state.ai.match_jobs(&resume.content, &jobs).await;
    let matches = select_matches(records, &jobs);

    info!(user_id = user.id, matches = matches.len(), "Resume matched");
    Ok(Json(matches))
}

/// Drops error records, repeated picks and picks outside the candidate set,
/// keeping the model's order.
/// Title and company come from the stored job rather than the model's echo.
pub fn select_matches(records: Vec<MatchRecord>, candidates: &[Job]) -> Vec<JobMatchResult> {
    let by_id: HashMap<i64, &Job> = candidates.iter().map(|job| (job.id, job)).collect();
    let mut seen = HashSet::new();

    records
        .into_iter()
        .filter_map(|record| match record {
            MatchRecord::Job(picked) => match by_id.get(&picked.id) {
                Some(job) if seen.insert(job.id) => Some(JobMatchResult::from(*job)),
                Some(_) => None,
                None => {
                    warn!(job_id = picked.id, "Model returned a job outside the candidate set");
                    None
                }
            },
            MatchRecord::Error { error } => {
                debug!(error = %error, "Skipping match error record");
                None
            }
        })
        .collect()
}
