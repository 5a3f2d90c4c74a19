// src/crawl.rs
// Crawl the configured job board into the jobs table.
// Usage: cargo run --bin crawler

use dotenv::dotenv;
use reqwest::Url;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use jobmatch::common::config::CrawlerConfig;
use jobmatch::common::{db, migrations};
use jobmatch::crawler::{CrawlError, Crawler, HttpFetcher, Spider};
use jobmatch::store::SqliteStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = CrawlerConfig::from_env();

    let start = Url::parse(&config.start_url)
        .map_err(|e| CrawlError::InvalidUrl(format!("{}: {}", config.start_url, e)))?;
    let allowed_domain = match config.allowed_domain.clone() {
        Some(domain) => domain,
        None => Crawler::default_domain(&start)
            .ok_or_else(|| CrawlError::InvalidUrl(format!("{} has no host", start)))?,
    };

    let pool = db::connect_pool(&config.database_url).await?;
    migrations::run_migrations(&pool, config.reset_db).await?;
    let store = Arc::new(SqliteStore::new(pool));

    let fetcher = Arc::new(HttpFetcher::new(&config.user_agent, config.timeout_secs)?);
    let crawler = Crawler::new(fetcher, Spider::python_jobs()?, store, allowed_domain.clone());

    info!(start = %start, domain = %allowed_domain, "Starting crawl");
    let stats = crawler.run(start).await;

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
