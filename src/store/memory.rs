// src/store/memory.rs

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{
    InsertOutcome, JobRepository, ResumeRepository, StoreError, StoreResult, UserRepository,
};
use crate::auth::User;
use crate::jobs::{Job, NewJob};
use crate::resumes::Resume;

#[derive(Debug, Default)]
struct Tables {
    jobs: Vec<Job>,
    users: Vec<User>,
    resumes: Vec<Resume>,
    last_job_id: i64,
    last_user_id: i64,
    last_resume_id: i64,
}

/// In-process store with the same constraints as the SQLite schema.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Job>> {
        let tables = self.tables.read().await;
        Ok(tables.jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn find_by_url(&self, url: &str) -> StoreResult<Option<Job>> {
        let tables = self.tables.read().await;
        Ok(tables.jobs.iter().find(|j| j.url == url).cloned())
    }

    async fn insert_if_absent(&self, job: &NewJob) -> StoreResult<InsertOutcome> {
        let mut tables = self.tables.write().await;
        if tables.jobs.iter().any(|j| j.url == job.url) {
            return Ok(InsertOutcome::Duplicate);
        }
        tables.last_job_id += 1;
        let id = tables.last_job_id;
        tables.jobs.push(Job {
            id,
            url: job.url.clone(),
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            description: job.description.clone(),
        });
        Ok(InsertOutcome::Inserted(id))
    }

    async fn list(&self, skip: i64, limit: i64) -> StoreResult<Vec<Job>> {
        let tables = self.tables.read().await;
        Ok(tables
            .jobs
            .iter()
            .skip(skip.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> StoreResult<Vec<Job>> {
        Ok(self.tables.read().await.jobs.clone())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, email: &str, hashed_password: &str) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == email) {
            return Err(StoreError::Conflict(
                "user with this email already exists".to_string(),
            ));
        }
        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl ResumeRepository for MemoryStore {
    async fn create(&self, owner_id: i64, content: &str) -> StoreResult<Resume> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == owner_id) {
            return Err(StoreError::Constraint(
                "resume owner references a missing row".to_string(),
            ));
        }
        tables.last_resume_id += 1;
        let resume = Resume {
            id: tables.last_resume_id,
            content: content.to_string(),
            created_at: Utc::now(),
            owner_id,
        };
        tables.resumes.push(resume.clone());
        Ok(resume)
    }

    async fn latest_for_owner(&self, owner_id: i64) -> StoreResult<Option<Resume>> {
        let tables = self.tables.read().await;
        Ok(tables
            .resumes
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .max_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)))
            .cloned())
    }
}
