//! # Store Module
//!
//! Repository interfaces over the jobs, users and resumes tables.
//! `SqliteStore` backs the running services; `MemoryStore` has the same
//! semantics without a database and is what the handler tests run against.

pub mod memory;
pub mod sqlite;


use async_trait::async_trait;

use crate::auth::User;
use crate::jobs::{Job, NewJob};
use crate::resumes::Resume;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),

    /// A referenced row does not exist.
    #[error("{0}")]
    Constraint(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Result of an upsert-on-conflict insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(i64),
    /// A job with the same url already existed; nothing was written.
    Duplicate,
}

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Job>>;

    async fn find_by_url(&self, url: &str) -> StoreResult<Option<Job>>;

    /// Inserts the job unless one with the same url exists.
    async fn insert_if_absent(&self, job: &NewJob) -> StoreResult<InsertOutcome>;

    /// Page of jobs ordered by id.
    async fn list(&self, skip: i64, limit: i64) -> StoreResult<Vec<Job>>;

    async fn list_all(&self) -> StoreResult<Vec<Job>>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Fails with [`StoreError::Conflict`] when the email is taken.
    async fn create(&self, email: &str, hashed_password: &str) -> StoreResult<User>;
}

#[async_trait]
pub trait ResumeRepository: Send + Sync {
    /// Fails with [`StoreError::Constraint`] when the owner does not exist.
    async fn create(&self, owner_id: i64, content: &str) -> StoreResult<Resume>;

    /// Most recently created resume of the owner; ties go to the higher id.
    async fn latest_for_owner(&self, owner_id: i64) -> StoreResult<Option<Resume>>;
}
