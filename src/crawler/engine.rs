// src/crawler/engine.rs
//! Breadth-first crawl over listing and detail pages

use reqwest::Url;
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::fetch::PageFetcher;
use super::pipeline::{JobPipeline, PersistOutcome};
use super::spider::Spider;
use crate::store::JobRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageKind {
    Listing,
    Detail,
}

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlStats {
    pub pages_fetched: usize,
    pub fetch_failures: usize,
    pub items_extracted: usize,
    pub items_skipped: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub persist_failures: usize,
}

pub struct Crawler {
    fetcher: Arc<dyn PageFetcher>,
    spider: Spider,
    pipeline: JobPipeline,
    allowed_domain: String,
}

impl Crawler {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        spider: Spider,
        jobs: Arc<dyn JobRepository>,
        allowed_domain: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            spider,
            pipeline: JobPipeline::new(jobs),
            allowed_domain: allowed_domain.into().to_ascii_lowercase(),
        }
    }

    /// Domain derived from the start url: its host without a leading `www.`.
    pub fn default_domain(start: &Url) -> Option<String> {
        let host = start.host_str()?.to_ascii_lowercase();
        Some(host.strip_prefix("www.").map(str::to_string).unwrap_or(host))
    }

    fn is_allowed(&self, url: &Url) -> bool {
        match url.host_str() {
            Some(host) => {
                let host = host.to_ascii_lowercase();
                host == self.allowed_domain
                    || host
                        .strip_suffix(self.allowed_domain.as_str())
                        .map_or(false, |prefix| prefix.ends_with('.'))
            }
            None => false,
        }
    }

    /// Crawls from `start` until the frontier is empty. The start page is
    /// fetched even when it lies outside the allowed domain.
    pub async fn run(&self, start: Url) -> CrawlStats {
        let mut stats = CrawlStats::default();
        let mut seen: HashSet<Url> = HashSet::new();
        let mut frontier: VecDeque<(Url, PageKind)> = VecDeque::new();

        seen.insert(start.clone());
        frontier.push_back((start, PageKind::Listing));

        while let Some((url, kind)) = frontier.pop_front() {
            let page = match self.fetcher.fetch(&url).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(error = %e, url = %url, "Fetch failed");
                    stats.fetch_failures += 1;
                    continue;
                }
            };
            stats.pages_fetched += 1;
            seen.insert(page.url.clone());

            match kind {
                PageKind::Listing => {
                    let listing = self.spider.parse_listing(&page.url, &page.body);
                    debug!(
                        url = %page.url,
                        details = listing.detail_links.len(),
                        has_next = listing.next_page.is_some(),
                        "Parsed listing page"
                    );
                    for link in listing.detail_links {
                        self.enqueue(&mut frontier, &mut seen, link, PageKind::Detail);
                    }
                    if let Some(next) = listing.next_page {
                        self.enqueue(&mut frontier, &mut seen, next, PageKind::Listing);
                    }
                }
                PageKind::Detail => match self.spider.parse_job(&page.url, &page.body) {
                    Some(job) => {
                        stats.items_extracted += 1;
                        match self.pipeline.process_item(&job).await {
                            PersistOutcome::Inserted => stats.inserted += 1,
                            PersistOutcome::Duplicate => stats.duplicates += 1,
                            PersistOutcome::Failed => stats.persist_failures += 1,
                        }
                    }
                    None => stats.items_skipped += 1,
                },
            }
        }

        info!(
            pages = stats.pages_fetched,
            failures = stats.fetch_failures,
            inserted = stats.inserted,
            duplicates = stats.duplicates,
            skipped = stats.items_skipped,
            "Crawl finished"
        );
        stats
    }

    fn enqueue(
        &self,
        frontier: &mut VecDeque<(Url, PageKind)>,
        seen: &mut HashSet<Url>,
        url: Url,
        kind: PageKind,
    ) {
        if !matches!(url.scheme(), "http" | "https") {
            return;
        }
        if !self.is_allowed(&url) {
            debug!(url = %url, "Ignoring offsite link");
            return;
        }
        if seen.insert(url.clone()) {
            frontier.push_back((url, kind));
        }
    }
}
