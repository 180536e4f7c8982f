// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Scrape worker: fetch + extract as one unit of work

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use super::extractor::{extract, ExtractionPolicy};
use super::fetcher::{FetchError, PageFetcher};
use crate::search::SearchResult;

/// Why a source produced no excerpt
#[derive(Debug, Clone, Error)]
pub enum ScrapeError {
    /// The page could not be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The page was fetched but nothing survived extraction
    #[error("No content extracted")]
    Empty,
}

/// Result of scraping one search result
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub source: SearchResult,
    pub result: Result<String, ScrapeError>,
}

impl ScrapeOutcome {
    /// The excerpt, or `""` when scraping failed for any reason
    pub fn excerpt(&self) -> &str {
        self.result.as_deref().unwrap_or("")
    }
}

/// Fetches a page and reduces it to a bounded excerpt
///
/// Never returns an error: every failure is captured in the outcome, so the
/// worker can run inside a pool without special-casing at the call site.
#[derive(Clone)]
pub struct ScrapeWorker {
    fetcher: Arc<dyn PageFetcher>,
    policy: ExtractionPolicy,
}

impl ScrapeWorker {
    pub fn new(fetcher: Arc<dyn PageFetcher>, policy: ExtractionPolicy) -> Self {
        Self { fetcher, policy }
    }

    /// Scrape `source.url` into at most `max_chars` characters
    pub async fn scrape(&self, source: SearchResult, max_chars: usize) -> ScrapeOutcome {
        let result = self.scrape_url(&source.url, max_chars).await;

        match &result {
            Ok(text) => info!("Scraped {} chars from: {}", text.chars().count(), source.url),
            Err(e) => debug!("Scrape failed for {}: {}", source.url, e),
        }

        ScrapeOutcome { source, result }
    }

    async fn scrape_url(&self, url: &str, max_chars: usize) -> Result<String, ScrapeError> {
        let html = self.fetcher.fetch(url).await?;
        let text = extract(&html, max_chars, self.policy);
        if text.is_empty() {
            return Err(ScrapeError::Empty);
        }
        Ok(text)
    }
}
