//! AI-assisted job matching: a small HTTP API over crawled job postings and
//! user resumes, and the crawler that fills the job table.

pub mod app;
pub mod auth;
pub mod common;
pub mod crawler;
pub mod jobs;
pub mod logging_middleware;
pub mod resumes;
pub mod services;
pub mod store;

pub use app::build_router;
