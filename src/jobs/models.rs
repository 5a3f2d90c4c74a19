// src/jobs/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Upper bound on `limit` for `GET /jobs/`.
pub const MAX_PAGE_SIZE: i64 = 1000;
pub const DEFAULT_PAGE_SIZE: i64 = 100;

// ============================================================================
// Job Models
// ============================================================================

/// A crawled job posting. `description` holds the raw HTML of the posting body.
#[derive(FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Job {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: String,
}

/// Listing shape returned by `GET /jobs/`
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct JobResponse {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        JobResponse {
            id: job.id,
            url: job.url,
            title: job.title,
            company: job.company,
            location: job.location,
        }
    }
}

/// A job as extracted by the crawler, before it has an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub url: String,
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct JobListParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl JobListParams {
    /// Returns `(skip, limit)` with defaults applied and out-of-range values clamped.
    pub fn window(&self) -> (i64, i64) {
        let skip = self.skip.unwrap_or(0).max(0);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(0, MAX_PAGE_SIZE);
        (skip, limit)
    }
}

// ============================================================================
// AI-augmented responses
// ============================================================================

#[derive(Serialize, Deserialize, Debug)]
pub struct JobSummary {
    pub job_id: i64,
    pub title: String,
    pub summary: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct InterviewQuestions {
    pub job_id: i64,
    pub title: String,
    pub questions: Vec<String>,
}
