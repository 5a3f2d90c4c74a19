//! # Crawler Module
//!
//! Collects job postings from a paginated job board into the jobs table.
//! Listing pages yield detail links and a next-page link; detail pages
//! yield one job each, stored with insert-if-absent on the url.

pub mod engine;
pub mod fetch;
pub mod pipeline;
pub mod spider;

#[cfg(test)]
mod tests;

pub use engine::{CrawlStats, Crawler};
pub use fetch::{FetchedPage, HttpFetcher, PageFetcher};
pub use pipeline::{JobPipeline, PersistOutcome};
pub use spider::{ListingPage, Spider};

#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("invalid selector {0}")]
    Selector(String),
}
