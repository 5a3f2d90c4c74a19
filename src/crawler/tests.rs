//! Tests for the crawler
//!
//! Pages are served from memory; jobs land in a `MemoryStore`.

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use reqwest::Url;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use crate::crawler::*;
    use crate::store::{JobRepository, MemoryStore};

    const START: &str = "https://www.python.org/jobs/";

    const LISTING_PAGE_1: &str = r##"<html><body>
        <ol class="list-recent-jobs last">
          <li><h2 class="listing-company"><span class="listing-company-name">
            <a href="/jobs/1/">Senior Rust Engineer</a><br/>Acme Corp</span></h2></li>
          <li><h2 class="listing-company"><span class="listing-company-name">
            <a href="/jobs/2/#apply">Data Engineer</a></span></h2></li>
          <li><h2 class="listing-company"><span class="listing-company-name">
            <a href="https://jobs.elsewhere.example/9/">Offsite</a></span></h2></li>
          <li><h2 class="listing-company">No link here</h2></li>
        </ol>
        <ul class="pagination">
          <li class="previous disabled"><a href="#">Previous</a></li>
          <li class="next"><a href="?page=2">Next</a></li>
        </ul>
    </body></html>"##;

    const LISTING_PAGE_2: &str = r##"<html><body>
        <ol class="list-recent-jobs last">
          <li><span class="listing-company-name"><a href="/jobs/2/">Data Engineer</a></span></li>
          <li><span class="listing-company-name"><a href="/jobs/3/">Untitled</a></span></li>
        </ol>
        <ul class="pagination">
          <li class="previous"><a href="?page=1">Previous</a></li>
          <li class="next disabled"></li>
        </ul>
    </body></html>"##;

    const JOB_1: &str = r##"<html><body>
        <h1 class="listing-company">
          <span class="company-name">
            Senior Rust Engineer<br/>
            Acme Corp
          </span>
        </h1>
        <span class="listing-location"><a href="/jobs/location/berlin/">Berlin, Germany</a></span>
        <div class="job-description"><p>Write <b>Rust</b>.</p></div>
    </body></html>"##;

    const JOB_2: &str = r##"<html><body>
        <h1 class="listing-company">Data Engineer<span class="listing-new">New</span></h1>
    </body></html>"##;

    const JOB_3: &str = r##"<html><body>
        <h1 class="listing-company">   </h1>
        <div class="job-description"><p>No title on this one.</p></div>
    </body></html>"##;

    /// Serves fixed pages; unknown urls fail with 404.
    #[derive(Default)]
    struct StaticFetcher {
        pages: HashMap<String, String>,
        redirects: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl StaticFetcher {
        fn page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        fn redirect(mut self, from: &str, to: &str) -> Self {
            self.redirects.insert(from.to_string(), to.to_string());
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, url: &Url) -> Result<FetchedPage, CrawlError> {
            self.requested.lock().unwrap().push(url.to_string());
            let target = self
                .redirects
                .get(url.as_str())
                .cloned()
                .unwrap_or_else(|| url.to_string());
            match self.pages.get(&target) {
                Some(body) => Ok(FetchedPage {
                    url: Url::parse(&target).unwrap(),
                    body: body.clone(),
                }),
                None => Err(CrawlError::Status {
                    url: target,
                    status: 404,
                }),
            }
        }
    }

    fn board() -> StaticFetcher {
        StaticFetcher::default()
            .page(START, LISTING_PAGE_1)
            .page("https://www.python.org/jobs/?page=2", LISTING_PAGE_2)
            .page("https://www.python.org/jobs/1/", JOB_1)
            .page("https://www.python.org/jobs/2/", JOB_2)
            .page("https://www.python.org/jobs/3/", JOB_3)
    }

    fn crawler(fetcher: Arc<StaticFetcher>, store: Arc<MemoryStore>) -> Crawler {
        Crawler::new(fetcher, Spider::python_jobs().unwrap(), store, "python.org")
    }

    fn start() -> Url {
        Url::parse(START).unwrap()
    }

    #[test]
    fn test_parse_listing_resolves_links() {
        let spider = Spider::python_jobs().unwrap();
        let listing = spider.parse_listing(&start(), LISTING_PAGE_1);

        let links: Vec<_> = listing.detail_links.iter().map(Url::as_str).collect();
        assert_eq!(
            links,
            vec![
                "https://www.python.org/jobs/1/",
                "https://www.python.org/jobs/2/",
                "https://jobs.elsewhere.example/9/",
            ]
        );
        assert_eq!(
            listing.next_page.map(String::from),
            Some("https://www.python.org/jobs/?page=2".to_string())
        );

        let last = spider.parse_listing(&start(), LISTING_PAGE_2);
        assert_eq!(last.next_page, None);
    }

    #[test]
    fn test_parse_job_with_company_and_location() {
        let spider = Spider::python_jobs().unwrap();
        let url = Url::parse("https://www.python.org/jobs/1/").unwrap();
        let job = spider.parse_job(&url, JOB_1).unwrap();

        assert_eq!(job.url, "https://www.python.org/jobs/1/");
        assert_eq!(job.title, "Senior Rust Engineer");
        assert_eq!(job.company.as_deref(), Some("Acme Corp"));
        assert_eq!(job.location.as_deref(), Some("Berlin, Germany"));
        assert!(job.description.starts_with("<div class=\"job-description\">"));
        assert!(job.description.contains("<b>Rust</b>"));
    }

    #[test]
    fn test_parse_job_falls_back_to_heading() {
        let spider = Spider::python_jobs().unwrap();
        let url = Url::parse("https://www.python.org/jobs/2/").unwrap();
        let job = spider.parse_job(&url, JOB_2).unwrap();

        assert_eq!(job.title, "Data Engineer");
        assert_eq!(job.company, None);
        assert_eq!(job.location, None);
        assert_eq!(job.description, "");
    }

    #[test]
    fn test_parse_job_without_title_is_skipped() {
        let spider = Spider::python_jobs().unwrap();
        let url = Url::parse("https://www.python.org/jobs/3/").unwrap();
        assert!(spider.parse_job(&url, JOB_3).is_none());
    }

    #[test]
    fn test_default_domain_drops_www() {
        assert_eq!(Crawler::default_domain(&start()).as_deref(), Some("python.org"));
        let plain = Url::parse("https://jobs.example/list").unwrap();
        assert_eq!(Crawler::default_domain(&plain).as_deref(), Some("jobs.example"));
    }

    #[tokio::test]
    async fn test_crawl_follows_pagination_and_stores_jobs() {
        let fetcher = Arc::new(board());
        let store = Arc::new(MemoryStore::new());

        let stats = crawler(fetcher.clone(), store.clone()).run(start()).await;

        assert_eq!(
            stats,
            CrawlStats {
                pages_fetched: 5,
                fetch_failures: 0,
                items_extracted: 2,
                items_skipped: 1,
                inserted: 2,
                duplicates: 0,
                persist_failures: 0,
            }
        );

        let requested = fetcher.requested();
        assert!(!requested.iter().any(|u| u.contains("elsewhere.example")));
        assert_eq!(
            requested.iter().filter(|u| u.ends_with("/jobs/2/")).count(),
            1
        );

        let jobs = store.list_all().await.unwrap();
        let titles: Vec<_> = jobs.iter().map(|j| j.title.as_str()).collect();
        assert_eq!(titles, vec!["Senior Rust Engineer", "Data Engineer"]);
    }

    #[tokio::test]
    async fn test_recrawl_is_idempotent() {
        let fetcher = Arc::new(board());
        let store = Arc::new(MemoryStore::new());
        let crawler = crawler(fetcher, store.clone());

        crawler.run(start()).await;
        let before = store.list_all().await.unwrap();

        let stats = crawler.run(start()).await;
        assert_eq!(stats.inserted, 0);
        assert_eq!(stats.duplicates, 2);
        assert_eq!(store.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_cyclic_pagination_terminates() {
        let looping = r##"<ol class="list-recent-jobs"></ol>
            <ul class="pagination"><li class="next"><a href="/jobs/">Next</a></li></ul>"##;
        let fetcher = Arc::new(StaticFetcher::default().page(START, looping));
        let store = Arc::new(MemoryStore::new());

        let stats = crawler(fetcher.clone(), store).run(start()).await;
        assert_eq!(stats.pages_fetched, 1);
        assert_eq!(fetcher.requested().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_pages_are_counted_and_skipped() {
        let listing = r##"<ol class="list-recent-jobs">
              <li><span class="listing-company-name"><a href="/jobs/404/">Gone</a></span></li>
              <li><span class="listing-company-name"><a href="/jobs/1/">Rust</a></span></li>
            </ol>"##;
        let fetcher = Arc::new(
            StaticFetcher::default()
                .page(START, listing)
                .page("https://www.python.org/jobs/1/", JOB_1),
        );
        let store = Arc::new(MemoryStore::new());

        let stats = crawler(fetcher, store.clone()).run(start()).await;
        assert_eq!(stats.fetch_failures, 1);
        assert_eq!(stats.inserted, 1);
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_item_url_is_final_url_after_redirect() {
        let listing = r##"<ol class="list-recent-jobs">
              <li><span class="listing-company-name"><a href="/jobs/old-1/">Rust</a></span></li>
            </ol>"##;
        let fetcher = Arc::new(
            StaticFetcher::default()
                .page(START, listing)
                .page("https://www.python.org/jobs/1/", JOB_1)
                .redirect("https://www.python.org/jobs/old-1/", "https://www.python.org/jobs/1/"),
        );
        let store = Arc::new(MemoryStore::new());

        crawler(fetcher, store.clone()).run(start()).await;

        let stored = store
            .find_by_url("https://www.python.org/jobs/1/")
            .await
            .unwrap();
        assert!(stored.is_some());
        assert!(store
            .find_by_url("https://www.python.org/jobs/old-1/")
            .await
            .unwrap()
            .is_none());
    }
}
