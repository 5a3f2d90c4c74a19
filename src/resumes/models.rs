// src/resumes/models.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::jobs::Job;

#[derive(FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Resume {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub owner_id: i64,
}

/// Upload body for `POST /users/me/resume`
#[derive(Deserialize, Debug)]
pub struct ResumeCreate {
    pub content: String,
}

/// One entry of `GET /users/me/match`, in ranking order.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct JobMatchResult {
    pub id: i64,
    pub title: String,
    pub company: Option<String>,
}

impl From<&Job> for JobMatchResult {
    fn from(job: &Job) -> Self {
        JobMatchResult {
            id: job.id,
            title: job.title.clone(),
            company: job.company.clone(),
        }
    }
}
