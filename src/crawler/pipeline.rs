// src/crawler/pipeline.rs
//! Persistence of extracted jobs

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::jobs::NewJob;
use crate::store::{InsertOutcome, JobRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Inserted,
    Duplicate,
    Failed,
}

/// Writes each job through the repository's insert-if-absent upsert.
/// A failed write is logged and reported; it never aborts the crawl.
pub struct JobPipeline {
    jobs: Arc<dyn JobRepository>,
}

impl JobPipeline {
    pub fn new(jobs: Arc<dyn JobRepository>) -> Self {
        Self { jobs }
    }

    pub async fn process_item(&self, job: &NewJob) -> PersistOutcome {
        match self.jobs.insert_if_absent(job).await {
            Ok(InsertOutcome::Inserted(id)) => {
                info!(id, url = %job.url, title = %job.title, "Stored job");
                PersistOutcome::Inserted
            }
            Ok(InsertOutcome::Duplicate) => {
                debug!(url = %job.url, "Job already stored");
                PersistOutcome::Duplicate
            }
            Err(e) => {
                warn!(error = %e, url = %job.url, "Failed to store job");
                PersistOutcome::Failed
            }
        }
    }
}
