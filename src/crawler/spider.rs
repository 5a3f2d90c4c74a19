// src/crawler/spider.rs
//! Field extraction from listing and detail pages

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::CrawlError;
use crate::jobs::NewJob;

/// Links found on a listing page.
#[derive(Debug, Default, PartialEq)]
pub struct ListingPage {
    pub detail_links: Vec<Url>,
    pub next_page: Option<Url>,
}

/// CSS selectors describing one job board's markup.
#[derive(Debug, Clone)]
pub struct Spider {
    listing_row: Selector,
    detail_link: Selector,
    next_link: Selector,
    company_name: Selector,
    fallback_title: Selector,
    location: Selector,
    description: Selector,
}

fn selector(css: &str) -> Result<Selector, CrawlError> {
    Selector::parse(css).map_err(|e| CrawlError::Selector(format!("{css}: {e:?}")))
}

impl Spider {
    /// Layout of the python.org jobs board.
    pub fn python_jobs() -> Result<Self, CrawlError> {
        Ok(Self {
            listing_row: selector("ol.list-recent-jobs li")?,
            detail_link: selector(".listing-company-name a[href]")?,
            next_link: selector("ul.pagination li.next a[href]")?,
            company_name: selector(".company-name")?,
            fallback_title: selector("h1.listing-company")?,
            location: selector(".listing-location a")?,
            description: selector("div.job-description")?,
        })
    }

    pub fn parse_listing(&self, page_url: &Url, html: &str) -> ListingPage {
        let document = Html::parse_document(html);

        let detail_links = document
            .select(&self.listing_row)
            .filter_map(|row| row.select(&self.detail_link).next())
            .filter_map(|link| resolve(page_url, link))
            .collect();

        let next_page = document
            .select(&self.next_link)
            .next()
            .and_then(|link| resolve(page_url, link));

        ListingPage {
            detail_links,
            next_page,
        }
    }

    /// Extracts a job from a detail page, or `None` when no title is present.
    pub fn parse_job(&self, page_url: &Url, html: &str) -> Option<NewJob> {
        let document = Html::parse_document(html);

        // Title and company are separate text nodes around a <br>.
        let name_parts: Vec<String> = document
            .select(&self.company_name)
            .flat_map(direct_text)
            .collect();

        let (title, company) = if name_parts.len() >= 2 {
            (name_parts[0].clone(), Some(name_parts[1].clone()))
        } else {
            let title = document
                .select(&self.fallback_title)
                .next()
                .and_then(|h1| direct_text(h1).into_iter().next())
                .unwrap_or_default();
            (title, None)
        };

        if title.is_empty() {
            debug!(url = %page_url, "No title found, skipping page");
            return None;
        }

        let location = document
            .select(&self.location)
            .next()
            .map(|a| a.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty());

        let description = document
            .select(&self.description)
            .next()
            .map(|div| div.html())
            .unwrap_or_default();

        Some(NewJob {
            url: page_url.to_string(),
            title,
            company,
            location,
            description,
        })
    }
}

/// Trimmed, non-blank text nodes that are direct children of the element.
fn direct_text(element: ElementRef<'_>) -> Vec<String> {
    element
        .children()
        .filter_map(|node| node.value().as_text().map(|text| text.trim().to_string()))
        .filter(|text| !text.is_empty())
        .collect()
}

fn resolve(page_url: &Url, link: ElementRef<'_>) -> Option<Url> {
    let href = link.value().attr("href")?.trim();
    let mut url = page_url.join(href).ok()?;
    url.set_fragment(None);
    Some(url)
}
