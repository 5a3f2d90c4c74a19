// src/store/sqlite.rs

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::{
    InsertOutcome, JobRepository, ResumeRepository, StoreError, StoreResult, UserRepository,
};
use crate::auth::User;
use crate::jobs::{Job, NewJob};
use crate::resumes::Resume;

const JOB_COLUMNS: &str = "id, url, title, company, location, description";

/// Repositories backed by a SQLite pool. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Maps constraint violations onto the store taxonomy.
fn classify(e: sqlx::Error, what: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return StoreError::Conflict(format!("{} already exists", what));
        }
        if db_err.is_foreign_key_violation() {
            return StoreError::Constraint(format!("{} references a missing row", what));
        }
    }
    StoreError::Database(e)
}

#[async_trait]
impl JobRepository for SqliteStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Job>> {
        let job = sqlx::query_as::<_, Job>(&format!("SELECT {} FROM jobs WHERE id = ?", JOB_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(job)
    }

    async fn find_by_url(&self, url: &str) -> StoreResult<Option<Job>> {
        let job =
            sqlx::query_as::<_, Job>(&format!("SELECT {} FROM jobs WHERE url = ?", JOB_COLUMNS))
                .bind(url)
                .fetch_optional(&self.pool)
                .await?;
        Ok(job)
    }

    async fn insert_if_absent(&self, job: &NewJob) -> StoreResult<InsertOutcome> {
        let result = sqlx::query(
            r#"INSERT INTO jobs (url, title, company, location, description)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(url) DO NOTHING"#,
        )
        .bind(&job.url)
        .bind(&job.title)
        .bind(job.company.as_deref())
        .bind(job.location.as_deref())
        .bind(&job.description)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!(url = %job.url, "Job already stored, insert skipped");
            Ok(InsertOutcome::Duplicate)
        } else {
            Ok(InsertOutcome::Inserted(result.last_insert_rowid()))
        }
    }

    async fn list(&self, skip: i64, limit: i64) -> StoreResult<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!(
            "SELECT {} FROM jobs ORDER BY id LIMIT ? OFFSET ?",
            JOB_COLUMNS
        ))
        .bind(limit)
        .bind(skip)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    async fn list_all(&self) -> StoreResult<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(&format!("SELECT {} FROM jobs ORDER BY id", JOB_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(jobs)
    }
}

#[async_trait]
impl UserRepository for SqliteStore {
    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, hashed_password FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, hashed_password FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create(&self, email: &str, hashed_password: &str) -> StoreResult<User> {
        sqlx::query_as::<_, User>(
            r#"INSERT INTO users (email, hashed_password) VALUES (?, ?)
            RETURNING id, email, hashed_password"#,
        )
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, "user with this email"))
    }
}

#[async_trait]
impl ResumeRepository for SqliteStore {
    async fn create(&self, owner_id: i64, content: &str) -> StoreResult<Resume> {
        sqlx::query_as::<_, Resume>(
            r#"INSERT INTO resumes (content, created_at, owner_id) VALUES (?, ?, ?)
            RETURNING id, content, created_at, owner_id"#,
        )
        .bind(content)
        .bind(Utc::now())
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, "resume owner"))
    }

    async fn latest_for_owner(&self, owner_id: i64) -> StoreResult<Option<Resume>> {
        let resume = sqlx::query_as::<_, Resume>(
            r#"SELECT id, content, created_at, owner_id FROM resumes
            WHERE owner_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT 1"#,
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(resume)
    }
}
